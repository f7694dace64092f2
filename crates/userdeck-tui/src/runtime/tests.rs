use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent};
use userdeck_core::memory::{AuthCall, MemoryAuth, MemoryBackend, MemoryStore, StoreCall};
use userdeck_core::record::name_fields;
use userdeck_core::{DocumentStore, Record};

use super::*;

fn dispatcher(backend: &MemoryBackend) -> Dispatcher {
    Dispatcher::new(AppState::new(&Config::default()), backend.collaborators())
}

fn press(dispatcher: &mut Dispatcher, code: KeyCode) {
    dispatcher.dispatch(UiEvent::Terminal(Event::Key(KeyEvent::from(code))));
}

fn type_text(dispatcher: &mut Dispatcher, text: &str) {
    for ch in text.chars() {
        press(dispatcher, KeyCode::Char(ch));
    }
}

fn shown(dispatcher: &Dispatcher) -> Vec<Record> {
    dispatcher
        .state
        .records()
        .map(|state| state.records.clone())
        .unwrap_or_default()
}

async fn on_records(backend: &MemoryBackend) -> Dispatcher {
    let mut dispatcher = dispatcher(backend);
    dispatcher.start(Route::Records);
    dispatcher.settle().await;
    dispatcher
}

#[tokio::test]
async fn test_mount_lists_collection() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new()
            .with_names("Users", &["Alice", "Bob"])
            .with_call_log(),
    );
    let dispatcher = on_records(&backend).await;

    assert_eq!(
        shown(&dispatcher),
        [Record::new("1", "Alice"), Record::new("2", "Bob")]
    );
    assert_eq!(dispatcher.state.pending, 0);
    assert_eq!(
        backend.store.calls(),
        [StoreCall::List {
            collection: "Users".to_string()
        }]
    );
}

#[tokio::test]
async fn test_add_then_refetch() {
    let backend = MemoryBackend::default();
    let mut dispatcher = on_records(&backend).await;

    type_text(&mut dispatcher, "Alice");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;
    type_text(&mut dispatcher, "Bob");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    assert_eq!(
        shown(&dispatcher),
        [Record::new("1", "Alice"), Record::new("2", "Bob")]
    );
    let records = dispatcher.state.records().unwrap();
    assert!(records.add_field.is_empty());
}

#[tokio::test]
async fn test_blank_add_makes_no_call() {
    let backend = MemoryBackend::new(MemoryAuth::new(), MemoryStore::new().with_call_log());
    let mut dispatcher = on_records(&backend).await;

    type_text(&mut dispatcher, "   ");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    assert_eq!(backend.store.calls().len(), 1);
    assert_eq!(dispatcher.state.pending, 0);
}

#[tokio::test]
async fn test_edit_and_update_renames_record() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new()
            .with_names("Users", &["Alice", "Bob"])
            .with_call_log(),
    );
    let mut dispatcher = on_records(&backend).await;

    press(&mut dispatcher, KeyCode::Tab);
    press(&mut dispatcher, KeyCode::Enter);
    assert!(dispatcher.state.records().unwrap().is_editing());

    press(&mut dispatcher, KeyCode::Backspace);
    type_text(&mut dispatcher, "ia");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    assert!(backend.store.calls().contains(&StoreCall::Update {
        collection: "Users".to_string(),
        id: "1".to_string(),
        fields: name_fields("Alicia"),
    }));
    assert_eq!(
        shown(&dispatcher),
        [Record::new("1", "Alicia"), Record::new("2", "Bob")]
    );
    let records = dispatcher.state.records().unwrap();
    assert!(!records.is_editing());
    assert!(records.edit_field.is_empty());
}

#[tokio::test]
async fn test_delete_filters_locally_without_refetch() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new()
            .with_names("Users", &["Alice", "Bob"])
            .with_call_log(),
    );
    let mut dispatcher = on_records(&backend).await;

    press(&mut dispatcher, KeyCode::Tab);
    press(&mut dispatcher, KeyCode::Down);
    press(&mut dispatcher, KeyCode::Char('d'));
    dispatcher.settle().await;

    assert_eq!(shown(&dispatcher), [Record::new("1", "Alice")]);
    let lists = backend
        .store
        .calls()
        .iter()
        .filter(|call| matches!(call, StoreCall::List { .. }))
        .count();
    assert_eq!(lists, 1);
}

#[tokio::test]
async fn test_delete_of_already_removed_record_still_filters() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new().with_names("Users", &["Alice"]),
    );
    let mut dispatcher = on_records(&backend).await;
    backend.store.remove("Users", "1").await.unwrap();

    press(&mut dispatcher, KeyCode::Tab);
    press(&mut dispatcher, KeyCode::Char('d'));
    dispatcher.settle().await;

    assert!(shown(&dispatcher).is_empty());
    assert!(dispatcher.state.last_error.is_none());
}

#[tokio::test]
async fn test_failed_insert_keeps_list_and_input() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new().with_names("Users", &["Alice"]),
    );
    let mut dispatcher = on_records(&backend).await;
    backend.store.set_offline(true);

    type_text(&mut dispatcher, "Carol");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    assert_eq!(shown(&dispatcher), [Record::new("1", "Alice")]);
    assert_eq!(
        dispatcher.state.records().unwrap().add_field.value(),
        "Carol"
    );
    assert!(dispatcher.state.last_error.is_some());
    assert_eq!(dispatcher.state.pending, 0);
}

#[tokio::test]
async fn test_failed_delete_keeps_list() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new().with_names("Users", &["Alice", "Bob"]),
    );
    let mut dispatcher = on_records(&backend).await;
    backend.store.set_offline(true);

    press(&mut dispatcher, KeyCode::Tab);
    press(&mut dispatcher, KeyCode::Char('d'));
    dispatcher.settle().await;

    assert_eq!(
        shown(&dispatcher),
        [Record::new("1", "Alice"), Record::new("2", "Bob")]
    );
    assert!(dispatcher.state.last_error.is_some());
    assert_eq!(dispatcher.state.pending, 0);
}

#[tokio::test]
async fn test_failed_update_keeps_edit_session() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new().with_names("Users", &["Alice"]),
    );
    let mut dispatcher = on_records(&backend).await;
    backend.store.set_offline(true);

    press(&mut dispatcher, KeyCode::Tab);
    press(&mut dispatcher, KeyCode::Enter);
    press(&mut dispatcher, KeyCode::Backspace);
    type_text(&mut dispatcher, "ia");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    let records = dispatcher.state.records().unwrap();
    assert!(records.is_editing());
    assert_eq!(records.edit_field.value(), "Alicia");
    assert_eq!(records.records, [Record::new("1", "Alice")]);
    assert!(dispatcher.state.last_error.is_some());
}

#[tokio::test]
async fn test_login_navigates_to_records_and_lists() {
    let backend = MemoryBackend::new(
        MemoryAuth::new()
            .with_account("a@example.com", "secret1")
            .with_call_log(),
        MemoryStore::new().with_names("Users", &["Alice"]),
    );
    let mut dispatcher = dispatcher(&backend);
    dispatcher.start(Route::Login);
    dispatcher.settle().await;

    type_text(&mut dispatcher, "a@example.com");
    press(&mut dispatcher, KeyCode::Tab);
    type_text(&mut dispatcher, "secret1");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    assert_eq!(dispatcher.state.screen.route(), Route::Records);
    assert_eq!(dispatcher.state.signed_in_as.as_deref(), Some("a@example.com"));
    assert_eq!(shown(&dispatcher), [Record::new("1", "Alice")]);
    assert_eq!(
        backend.auth.calls(),
        [AuthCall::VerifyCredentials {
            email: "a@example.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_wrong_password_stays_on_login() {
    let backend = MemoryBackend::new(
        MemoryAuth::new().with_account("a@example.com", "secret1"),
        MemoryStore::new().with_call_log(),
    );
    let mut dispatcher = dispatcher(&backend);
    dispatcher.start(Route::Login);
    dispatcher.settle().await;

    type_text(&mut dispatcher, "a@example.com");
    press(&mut dispatcher, KeyCode::Tab);
    type_text(&mut dispatcher, "wrong-password");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    assert_eq!(dispatcher.state.screen.route(), Route::Login);
    assert!(dispatcher.state.signed_in_as.is_none());
    assert!(backend.store.calls().is_empty());
}

#[tokio::test]
async fn test_register_navigates_to_login() {
    let backend = MemoryBackend::new(MemoryAuth::new().with_call_log(), MemoryStore::new());
    let mut dispatcher = dispatcher(&backend);
    dispatcher.start(Route::Register);
    dispatcher.settle().await;

    type_text(&mut dispatcher, "new@example.com");
    press(&mut dispatcher, KeyCode::Tab);
    type_text(&mut dispatcher, "secret1");
    press(&mut dispatcher, KeyCode::Enter);
    dispatcher.settle().await;

    assert_eq!(dispatcher.state.screen.route(), Route::Login);
    assert_eq!(
        backend.auth.calls(),
        [AuthCall::CreateAccount {
            email: "new@example.com".to_string()
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_late_list_for_previous_mount_is_ignored() {
    let backend = MemoryBackend::new(
        MemoryAuth::new(),
        MemoryStore::new()
            .with_names("Users", &["Alice"])
            .with_latency(Duration::from_millis(200)),
    );
    let mut dispatcher = dispatcher(&backend);
    dispatcher.start(Route::Records);
    dispatcher.drain_inbox();
    assert_eq!(dispatcher.state.pending, 1);

    dispatcher.start(Route::Login);
    dispatcher.drain_inbox();
    dispatcher.settle().await;

    assert_eq!(dispatcher.state.screen.route(), Route::Login);
    assert_eq!(dispatcher.state.pending, 0);
    assert!(dispatcher.state.records().is_none());
}

#[tokio::test]
async fn test_quit_stops_settling() {
    let backend = MemoryBackend::default();
    let mut dispatcher = dispatcher(&backend);
    dispatcher.start(Route::Login);
    dispatcher.settle().await;

    dispatcher.dispatch(UiEvent::Terminal(Event::Key(KeyEvent::new(
        KeyCode::Char('q'),
        crossterm::event::KeyModifiers::CONTROL,
    ))));
    assert!(dispatcher.state.should_quit);
}
