// src/models/mod.rs

//! Domain models for the watcher application.

mod config;
mod notice;
mod selectors;

// Re-export all public types
pub use config::{BoardConfig, Config, Header, HttpConfig, NotifyConfig, StateConfig};
pub use notice::Notice;
pub use selectors::{RowStrategy, SelectorConfig};
