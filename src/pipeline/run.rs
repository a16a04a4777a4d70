// src/pipeline/run.rs

//! One end-to-end watcher pass.
//!
//! load state → fetch → filter to today → filter unnotified → notify →
//! commit state. The pass is terminal; scheduling recurring runs is an
//! external concern. No failure inside the pass escalates to an error:
//! the worst outcome is that the run accomplishes nothing and the next
//! scheduled invocation retries.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::Notice;
use crate::services::{DeliverNotices, FetchNotices, dates, identity};
use crate::storage::StateStore;

/// Keep the notices whose displayed date denotes `today`.
pub fn filter_today(notices: Vec<Notice>, today: NaiveDate) -> Vec<Notice> {
    notices
        .into_iter()
        .filter(|n| dates::matches_date(&n.date, today))
        .collect()
}

/// Keep the notices not yet notified, assigning each its fingerprint.
///
/// Order is preserved from the fetch.
pub fn select_unnotified(notices: Vec<Notice>, notified: &HashSet<String>) -> Vec<Notice> {
    notices
        .into_iter()
        .filter_map(|mut notice| {
            let id = identity::notice_id(&notice.title);
            if notified.contains(&id) {
                return None;
            }
            notice.id = id;
            Some(notice)
        })
        .collect()
}

/// Run one watcher pass.
///
/// State is only committed after a confirmed delivery, so a failed or
/// skipped delivery leaves the same notices pending for the next run.
/// With `dry_run` set, delivery and the state commit are both skipped.
pub async fn run_once<F, N>(
    fetcher: &F,
    notifier: &N,
    store: &StateStore,
    today: NaiveDate,
    dry_run: bool,
) where
    F: FetchNotices + Sync,
    N: DeliverNotices + Sync,
{
    let mut notified = store.load(today).await;
    log::info!("{} notice ids already notified today", notified.len());

    let all = fetcher.fetch().await;
    log::info!("Fetched {} notices from the board", all.len());

    let todays = filter_today(all, today);
    log::info!("{} notices dated today", todays.len());

    let new = select_unnotified(todays, &notified);
    if new.is_empty() {
        log::info!("No new notices to deliver");
        return;
    }
    log::info!("{} new notices to deliver", new.len());

    if dry_run {
        for notice in &new {
            log::info!("[dry-run] {}", notice.format("{id} {title} ({date})"));
        }
        log::info!("Dry run: skipping delivery and state commit");
        return;
    }

    if notifier.notify(&new).await {
        notified.extend(new.into_iter().map(|n| n.id));
        match store.save(today, &notified).await {
            Ok(()) => log::info!("State committed with {} ids", notified.len()),
            Err(e) => log::warn!("Failed to persist notification state: {}", e),
        }
    } else {
        log::warn!("Delivery failed; state left untouched for retry on the next run");
    }
}
