// src/storage/mod.rs

//! Durable notification state.

mod state;

pub use state::StateStore;
