//! Records command handlers: the records screen operations, one per
//! invocation.

use std::sync::Arc;

use anyhow::{Context, Result};
use userdeck_core::config::Config;
use userdeck_core::record::{is_blank, name_fields};
use userdeck_core::{DocumentStore, Record, firebase};

/// Email and password used to sign in before touching the collection.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A configured store bound to the managed collection.
pub struct RecordsSession {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

/// Builds the Firebase collaborators and signs in when credentials are
/// given, so later requests carry the session token.
pub async fn connect(config: &Config, credentials: Option<&Credentials>) -> Result<RecordsSession> {
    let collaborators = firebase::collaborators(config).context("configure Firebase")?;

    if let Some(credentials) = credentials {
        let session = collaborators
            .auth
            .verify_credentials(&credentials.email, &credentials.password)
            .await
            .with_context(|| format!("Sign-in error for {}", credentials.email))?;
        tracing::debug!(user_id = %session.user_id, "Signed in");
    }

    Ok(RecordsSession {
        store: collaborators.store,
        collection: config.collection.clone(),
    })
}

impl RecordsSession {
    pub async fn list(&self) -> Result<()> {
        let docs = self
            .store
            .list_all(&self.collection)
            .await
            .context("Error fetching documents")?;

        if docs.is_empty() {
            println!("No users found");
            return Ok(());
        }
        for record in docs.iter().map(Record::from_document) {
            println!("{}\t{}", record.id, record.name);
        }
        Ok(())
    }

    pub async fn add(&self, name: &str) -> Result<()> {
        if is_blank(name) {
            anyhow::bail!("Name must not be empty");
        }
        let id = self
            .store
            .insert(&self.collection, name_fields(name))
            .await
            .context("Error adding document")?;
        tracing::info!(%id, "User saved");
        println!("{id}");
        Ok(())
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<()> {
        if is_blank(name) {
            anyhow::bail!("Updated name is empty");
        }
        self.store
            .update_fields(&self.collection, id, name_fields(name))
            .await
            .context("Error updating document")?;
        tracing::info!(%id, "User updated");
        println!("Renamed {id} → {name}");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .remove(&self.collection, id)
            .await
            .context("Error deleting document")?;
        println!("Deleted {id}");
        Ok(())
    }
}
