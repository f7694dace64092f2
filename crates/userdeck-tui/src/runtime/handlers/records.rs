use std::sync::Arc;

use userdeck_core::record::name_fields;
use userdeck_core::{DocumentStore, Record};

use crate::events::{MountId, RecordsUiEvent, UiEvent};

pub async fn list_records(
    store: Arc<dyn DocumentStore>,
    collection: String,
    mount: MountId,
) -> UiEvent {
    let result = store
        .list_all(&collection)
        .await
        .map(|docs| docs.iter().map(Record::from_document).collect())
        .map_err(|e| e.to_string());
    UiEvent::Records(RecordsUiEvent::Listed { mount, result })
}

pub async fn insert_record(
    store: Arc<dyn DocumentStore>,
    collection: String,
    mount: MountId,
    name: String,
) -> UiEvent {
    let result = store
        .insert(&collection, name_fields(&name))
        .await
        .map_err(|e| e.to_string());
    UiEvent::Records(RecordsUiEvent::Inserted { mount, result })
}

pub async fn update_record(
    store: Arc<dyn DocumentStore>,
    collection: String,
    mount: MountId,
    id: String,
    name: String,
) -> UiEvent {
    let result = store
        .update_fields(&collection, &id, name_fields(&name))
        .await
        .map_err(|e| e.to_string());
    UiEvent::Records(RecordsUiEvent::Updated { mount, id, result })
}

pub async fn remove_record(
    store: Arc<dyn DocumentStore>,
    collection: String,
    mount: MountId,
    id: String,
) -> UiEvent {
    let result = store
        .remove(&collection, &id)
        .await
        .map_err(|e| e.to_string());
    UiEvent::Records(RecordsUiEvent::Removed { mount, id, result })
}
