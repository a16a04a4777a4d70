// src/pipeline/mod.rs

//! Pipeline entry point for a single watcher pass.

pub mod run;

pub use run::{filter_today, run_once, select_unnotified};
