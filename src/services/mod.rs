// src/services/mod.rs

//! Services for fetching, identifying and delivering notices.

pub mod board;
pub mod dates;
pub mod identity;
pub mod notify;

use async_trait::async_trait;

use crate::models::Notice;

pub use board::BoardFetcher;
pub use notify::SlackNotifier;

/// Source of board notices.
///
/// Implementations are best-effort: transport or parse failures are
/// logged internally and yield an empty list, never an error.
#[async_trait]
pub trait FetchNotices {
    async fn fetch(&self) -> Vec<Notice>;
}

/// Delivery channel for a batch of notices.
///
/// Returns true on confirmed delivery (or when there was nothing to
/// send), false otherwise. Failures are logged internally.
#[async_trait]
pub trait DeliverNotices {
    async fn notify(&self, notices: &[Notice]) -> bool;
}
