//! Cloud Firestore documents adapter.
//!
//! Documents live under
//! `{base}/v1/projects/{project}/databases/{database}/documents/{collection}/{id}`.
//! Field values use Firestore's typed JSON encoding (`{"stringValue": "x"}`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use url::Url;

use super::{FirebaseSettings, parse_error_body};
use crate::collaborators::{DocumentStore, StoreError};
use crate::record::{Document, FieldValue, Fields};
use crate::session::SessionHandle;

#[derive(Debug, Deserialize)]
struct WireDocument {
    /// Full resource name; the id is its last segment.
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl WireDocument {
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    fn into_document(self) -> Document {
        let id = self.id().to_string();
        let fields = self
            .fields
            .iter()
            .filter_map(|(key, value)| match decode_value(value) {
                Some(decoded) => Some((key.clone(), decoded)),
                None => {
                    tracing::debug!(document = %id, field = %key, "Skipping unsupported field value");
                    None
                }
            })
            .collect();
        Document { id, fields }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Encodes a field value in Firestore's typed JSON form.
pub(crate) fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::String(s) => json!({ "stringValue": s }),
        // int64 travels as a decimal string
        FieldValue::Integer(i) => json!({ "integerValue": i.to_string() }),
        FieldValue::Double(d) => json!({ "doubleValue": d }),
        FieldValue::Boolean(b) => json!({ "booleanValue": b }),
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Timestamp(ts) => json!({ "timestampValue": ts.to_rfc3339() }),
    }
}

/// Decodes a typed JSON value. Returns `None` for kinds the record model
/// does not carry (maps, arrays, references, geo points, bytes).
pub(crate) fn decode_value(value: &Value) -> Option<FieldValue> {
    let object = value.as_object()?;
    let (kind, inner) = object.iter().next()?;
    match kind.as_str() {
        "stringValue" => inner.as_str().map(FieldValue::from),
        "integerValue" => match inner {
            Value::String(s) => s.parse().ok().map(FieldValue::Integer),
            Value::Number(n) => n.as_i64().map(FieldValue::Integer),
            _ => None,
        },
        "doubleValue" => inner.as_f64().map(FieldValue::Double),
        "booleanValue" => inner.as_bool().map(FieldValue::Boolean),
        "nullValue" => Some(FieldValue::Null),
        "timestampValue" => inner
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|ts| FieldValue::Timestamp(ts.with_timezone(&Utc))),
        _ => None,
    }
}

fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    json!({ "fields": encoded })
}

/// Quotes a field path segment unless it is a simple identifier.
fn field_path(key: &str) -> String {
    let simple = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        key.to_string()
    } else {
        format!("`{}`", key.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

/// Storage collaborator backed by the Firestore REST API.
pub struct FirestoreStore {
    http: reqwest::Client,
    documents_url: Url,
    api_key: String,
    page_size: u32,
    session: SessionHandle,
}

impl FirestoreStore {
    /// # Errors
    /// Returns an error if the documents URL cannot be built.
    pub fn new(
        settings: &FirebaseSettings,
        http: reqwest::Client,
        session: SessionHandle,
    ) -> anyhow::Result<Self> {
        let raw = format!(
            "{}/v1/projects/{}/databases/{}/documents",
            settings.firestore_base_url, settings.project_id, settings.database
        );
        let documents_url = Url::parse(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid Firestore documents URL {raw}: {e}"))?;
        if documents_url.cannot_be_a_base() {
            anyhow::bail!("Firestore base URL cannot carry a path: {raw}");
        }

        Ok(Self {
            http,
            documents_url,
            api_key: settings.api_key.clone(),
            page_size: settings.page_size,
            session,
        })
    }

    /// `.../documents/{collection}[/{id}]` with the API key attached.
    fn url(&self, collection: &str, id: Option<&str>) -> Result<Url, StoreError> {
        let mut url = self.documents_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| StoreError::Decode("documents URL cannot be a base".to_string()))?;
            segments.push(collection);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String, StoreError> {
        let response = self.authorize(builder).send().await?;
        read_body(response).await
    }
}

/// Reads a response body, mapping non-2xx statuses to `StoreError::Api`.
async fn read_body(response: Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(api_error(status, &body))
    }
}

fn api_error(status: StatusCode, body: &str) -> StoreError {
    let parsed = parse_error_body(body);
    let code = parsed
        .status
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("UNKNOWN").to_string());
    StoreError::Api {
        status: status.as_u16(),
        code,
        message: parsed.message,
    }
}

fn decode<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = self.url(collection, None)?;
        let body = self
            .send(self.http.post(url).json(&encode_fields(&fields)))
            .await?;
        let created: WireDocument = decode(&body)?;
        let id = created.id().to_string();
        tracing::debug!(collection, id = %id, "Inserted document");
        Ok(id)
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.url(collection, None)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", &self.page_size.to_string());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let body = self.send(self.http.get(url)).await?;
            // An empty collection answers with `{}` (or nothing at all).
            let page: ListResponse = if body.trim().is_empty() {
                ListResponse {
                    documents: Vec::new(),
                    next_page_token: None,
                }
            } else {
                decode(&body)?
            };

            documents.extend(page.documents.into_iter().map(WireDocument::into_document));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(collection, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let mut url = self.url(collection, Some(id))?;
        {
            let mut query = url.query_pairs_mut();
            for key in fields.keys() {
                query.append_pair("updateMask.fieldPaths", &field_path(key));
            }
            query.append_pair("currentDocument.exists", "true");
        }

        match self
            .send(self.http.patch(url).json(&encode_fields(&fields)))
            .await
        {
            Ok(_) => Ok(()),
            Err(StoreError::Api { status: 404, .. }) => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = self.url(collection, Some(id))?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}
