//! Records feature slice: add, list, rename, and delete entries of the
//! managed collection.

mod render;
mod state;
mod update;

pub use render::render_records;
pub use state::{EditSession, RecordsFocus, RecordsState};
pub use update::{add, delete, edit, handle_key, handle_paste, handle_result, list, update};
