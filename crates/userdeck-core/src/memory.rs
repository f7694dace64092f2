//! In-memory collaborators.
//!
//! Used by `--memory` sessions and by tests. The store hands out sequential
//! ids ("1", "2", ...) and lists documents in insertion order. Both adapters
//! can be switched offline, and record the calls they receive once built
//! with `with_call_log`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::collaborators::{AuthError, AuthProvider, Collaborators, DocumentStore, StoreError};
use crate::record::{Document, Fields, name_fields};
use crate::session::{Session, SessionHandle};

const MIN_PASSWORD_LEN: usize = 6;
const TOKEN_LIFETIME_HOURS: i64 = 1;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A call received by `MemoryAuth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    CreateAccount { email: String },
    VerifyCredentials { email: String },
}

struct Account {
    user_id: String,
    password: String,
}

/// Auth collaborator keeping accounts in memory.
#[derive(Default)]
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    calls: Mutex<Vec<AuthCall>>,
    log_calls: bool,
    offline: AtomicBool,
    session: SessionHandle,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-registers an account.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        lock(&self.accounts).insert(
            email.to_string(),
            Account {
                user_id: uuid::Uuid::new_v4().to_string(),
                password: password.to_string(),
            },
        );
        self
    }

    /// Records every call, for `calls` to return.
    pub fn with_call_log(mut self) -> Self {
        self.log_calls = true;
        self
    }

    pub fn calls(&self) -> Vec<AuthCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: AuthCall) {
        if self.log_calls {
            lock(&self.calls).push(call);
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(api_error(503, "UNAVAILABLE", "auth backend offline"));
        }
        Ok(())
    }

    fn sign_in(&self, user_id: &str, email: &str) -> Session {
        let session = Session {
            user_id: user_id.to_string(),
            email: email.to_string(),
            id_token: uuid::Uuid::new_v4().to_string(),
            refresh_token: uuid::Uuid::new_v4().to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(TOKEN_LIFETIME_HOURS),
        };
        self.session.set(session.clone());
        session
    }
}

fn api_error(status: u16, code: &str, message: &str) -> AuthError {
    AuthError::Api {
        status,
        code: code.to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.record(AuthCall::CreateAccount {
            email: email.to_string(),
        });
        self.check_online()?;

        if !email.contains('@') {
            return Err(api_error(400, "INVALID_EMAIL", "malformed email address"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(api_error(
                400,
                "WEAK_PASSWORD",
                "Password should be at least 6 characters",
            ));
        }

        let user_id = {
            let mut accounts = lock(&self.accounts);
            if accounts.contains_key(email) {
                return Err(api_error(400, "EMAIL_EXISTS", "email already registered"));
            }
            let user_id = uuid::Uuid::new_v4().to_string();
            accounts.insert(
                email.to_string(),
                Account {
                    user_id: user_id.clone(),
                    password: password.to_string(),
                },
            );
            user_id
        };

        Ok(self.sign_in(&user_id, email))
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        self.record(AuthCall::VerifyCredentials {
            email: email.to_string(),
        });
        self.check_online()?;

        let user_id = lock(&self.accounts)
            .get(email)
            .filter(|account| account.password == password)
            .map(|account| account.user_id.clone());

        match user_id {
            Some(user_id) => Ok(self.sign_in(&user_id, email)),
            None => Err(api_error(
                400,
                "INVALID_LOGIN_CREDENTIALS",
                "email or password is incorrect",
            )),
        }
    }

    fn current_session(&self) -> Option<Session> {
        self.session.get()
    }
}

/// A call received by `MemoryStore`.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Insert {
        collection: String,
        fields: Fields,
    },
    List {
        collection: String,
    },
    Update {
        collection: String,
        id: String,
        fields: Fields,
    },
    Remove {
        collection: String,
        id: String,
    },
}

/// Storage collaborator keeping collections in memory.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    next_id: AtomicU64,
    calls: Mutex<Vec<StoreCall>>,
    log_calls: bool,
    offline: AtomicBool,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every operation, to observe in-flight behavior.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Records every call, for `calls` to return.
    pub fn with_call_log(mut self) -> Self {
        self.log_calls = true;
        self
    }

    /// Seeds a collection with named documents, assigning sequential ids.
    pub fn with_names(self, collection: &str, names: &[&str]) -> Self {
        {
            let mut collections = lock(&self.collections);
            let docs = collections.entry(collection.to_string()).or_default();
            for name in names {
                docs.push(Document {
                    id: self.allocate_id(),
                    fields: name_fields(name),
                });
            }
        }
        self
    }

    /// Documents of a collection, bypassing the call log.
    pub fn snapshot(&self, collection: &str) -> Vec<Document> {
        lock(&self.collections)
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn allocate_id(&self) -> String {
        (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    async fn enter(&self, call: StoreCall) -> Result<(), StoreError> {
        if self.log_calls {
            lock(&self.calls).push(call);
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.enter(StoreCall::Insert {
            collection: collection.to_string(),
            fields: fields.clone(),
        })
        .await?;

        let id = self.allocate_id();
        lock(&self.collections)
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.enter(StoreCall::List {
            collection: collection.to_string(),
        })
        .await?;
        Ok(self.snapshot(collection))
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError> {
        self.enter(StoreCall::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            fields: fields.clone(),
        })
        .await?;

        let mut collections = lock(&self.collections);
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        doc.fields.extend(fields);
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.enter(StoreCall::Remove {
            collection: collection.to_string(),
            id: id.to_string(),
        })
        .await?;

        if let Some(docs) = lock(&self.collections).get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }
        Ok(())
    }
}

/// In-memory adapters plus the bundle handed to the runtime.
pub struct MemoryBackend {
    pub auth: Arc<MemoryAuth>,
    pub store: Arc<MemoryStore>,
}

impl MemoryBackend {
    pub fn new(auth: MemoryAuth, store: MemoryStore) -> Self {
        Self {
            auth: Arc::new(auth),
            store: Arc::new(store),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        let auth: Arc<MemoryAuth> = Arc::clone(&self.auth);
        let store: Arc<MemoryStore> = Arc::clone(&self.store);
        Collaborators::new(auth, store)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(MemoryAuth::new(), MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn names(store: &MemoryStore, collection: &str) -> Vec<String> {
        store
            .snapshot(collection)
            .iter()
            .map(|doc| Record::from_document(doc).name)
            .collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids_in_order() {
        let store = MemoryStore::new();
        let a = store.insert("Users", name_fields("Alice")).await.unwrap();
        let b = store.insert("Users", name_fields("Bob")).await.unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("1", "2"));

        let listed = store.list_all("Users").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new().with_names("Users", &["Alice"]);
        let err = store
            .update_fields("Users", "99", name_fields("Zed"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        store
            .update_fields("Users", "1", name_fields("Alicia"))
            .await
            .unwrap();
        assert_eq!(names(&store, "Users"), ["Alicia"]);
    }

    #[tokio::test]
    async fn test_remove_absent_is_ok() {
        let store = MemoryStore::new().with_names("Users", &["Alice", "Bob"]);
        store.remove("Users", "1").await.unwrap();
        store.remove("Users", "1").await.unwrap();
        store.remove("Other", "7").await.unwrap();
        assert_eq!(names(&store, "Users"), ["Bob"]);
    }

    #[tokio::test]
    async fn test_offline_store_fails_and_logs_call() {
        let store = MemoryStore::new().with_call_log();
        store.set_offline(true);
        let err = store.list_all("Users").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable));
        assert_eq!(
            store.calls(),
            [StoreCall::List {
                collection: "Users".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_auth_register_then_login() {
        let auth = MemoryAuth::new();
        let created = auth
            .create_account("a@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(auth.current_session().map(|s| s.user_id), Some(created.user_id.clone()));

        let dup = auth
            .create_account("a@example.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(dup.code(), Some("EMAIL_EXISTS"));

        let signed_in = auth
            .verify_credentials("a@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(signed_in.user_id, created.user_id);

        let wrong = auth
            .verify_credentials("a@example.com", "nope")
            .await
            .unwrap_err();
        assert_eq!(wrong.code(), Some("INVALID_LOGIN_CREDENTIALS"));
    }

    #[tokio::test]
    async fn test_auth_rejects_weak_password_and_bad_email() {
        let auth = MemoryAuth::new();
        let weak = auth.create_account("a@example.com", "123").await.unwrap_err();
        assert_eq!(weak.code(), Some("WEAK_PASSWORD"));
        let bad = auth.create_account("not-an-email", "secret1").await.unwrap_err();
        assert_eq!(bad.code(), Some("INVALID_EMAIL"));
        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn test_seeded_account_can_sign_in() {
        let auth = MemoryAuth::new()
            .with_account("b@example.com", "hunter22")
            .with_call_log();
        assert!(auth.verify_credentials("b@example.com", "hunter22").await.is_ok());
        assert_eq!(
            auth.calls(),
            [AuthCall::VerifyCredentials {
                email: "b@example.com".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_calls_are_not_kept_by_default() {
        let store = MemoryStore::new();
        store.insert("Users", name_fields("Alice")).await.unwrap();
        store.list_all("Users").await.unwrap();
        assert!(store.calls().is_empty());
        assert_eq!(names(&store, "Users"), ["Alice"]);

        let auth = MemoryAuth::new();
        auth.create_account("a@example.com", "secret1").await.unwrap();
        assert!(auth.calls().is_empty());
    }
}
