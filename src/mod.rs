//! Turns free-text instructions sent by a voice shortcut into expense and diary commands
//!
//! ```text
//! instruction -> tokenizer -> parser (+ catalog) -> parsed command -> registry -> handler -> response
//! ```
mod app;
pub mod catalog;
pub mod commands;
pub mod config;
mod error;
pub mod handler;
pub mod mail;
pub mod models;
pub mod parser;
pub mod registry;
pub mod store;

pub use app::{run_app, CommonOpts};
pub use error::{ConfigError, Error, HandlerError, MailError, ParseError, StoreError};
