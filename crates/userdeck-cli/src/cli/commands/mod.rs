//! CLI command handlers.

pub mod config;
pub mod records;
pub mod register;
pub mod ui;
