// src/services/notify.rs

//! Slack webhook notifier.
//!
//! Formats a batch of notices as a Block Kit message and posts it to the
//! configured incoming webhook. Delivery is fire-and-forget: there is no
//! retry here, because state is only committed on success and the next
//! scheduled run re-attempts anything unsent.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Value, json};

use crate::models::{Notice, NotifyConfig};
use crate::services::DeliverNotices;

/// Webhook-based notice delivery.
pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
    board_url: String,
    max_items: usize,
}

impl SlackNotifier {
    /// Create a notifier.
    ///
    /// `webhook_url` is None when the environment variable was not set;
    /// delivery then degrades to a logged no-op that reports failure.
    pub fn new(config: &NotifyConfig, webhook_url: Option<String>, board_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            webhook_url,
            board_url: board_url.to_string(),
            max_items: config.max_items,
        }
    }

    async fn post(&self, url: &str, payload: &Value) -> crate::error::Result<()> {
        self.client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Compose the Block Kit payload for a batch of notices.
///
/// Layout: header with the count, a context line naming the day, a
/// divider, one section per notice up to `max_items`, an omission
/// summary when truncated, and a footer linking back to the board.
pub fn compose_payload(
    notices: &[Notice],
    day_label: &str,
    board_url: &str,
    max_items: usize,
) -> Value {
    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": format!("📢 KETEP 새 공지사항 ({}건)", notices.len()),
                "emoji": true
            }
        }),
        json!({
            "type": "context",
            "elements": [{ "type": "mrkdwn", "text": format!("📆 {}", day_label) }]
        }),
        json!({ "type": "divider" }),
    ];

    for notice in notices.iter().take(max_items) {
        let mut text = format!("*<{}|{}>*", notice.link, notice.title);
        if !notice.date.is_empty() {
            text.push_str(&format!("\n📅 {}", notice.date));
        }
        blocks.push(json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": text }
        }));
    }

    if notices.len() > max_items {
        blocks.push(json!({
            "type": "context",
            "elements": [{
                "type": "mrkdwn",
                "text": format!("외 {}건의 공지사항이 더 있습니다.", notices.len() - max_items)
            }]
        }));
    }

    blocks.push(json!({
        "type": "context",
        "elements": [{
            "type": "mrkdwn",
            "text": format!("🔗 <{}|KETEP 공지사항 바로가기>", board_url)
        }]
    }));

    json!({ "blocks": blocks })
}

#[async_trait]
impl DeliverNotices for SlackNotifier {
    /// Deliver a batch of notices to the webhook.
    ///
    /// Empty input is vacuous success. A missing webhook URL, transport
    /// failure or non-2xx response is logged and yields false.
    async fn notify(&self, notices: &[Notice]) -> bool {
        let Some(webhook_url) = &self.webhook_url else {
            log::warn!("Webhook URL not configured; skipping notification");
            return false;
        };

        if notices.is_empty() {
            return true;
        }

        let day_label = Local::now().format("%Y-%m-%d").to_string();
        let payload = compose_payload(notices, &day_label, &self.board_url, self.max_items);

        match self.post(webhook_url, &payload).await {
            Ok(()) => {
                log::info!("Delivered {} notices to webhook", notices.len());
                true
            }
            Err(e) => {
                log::warn!("Webhook delivery failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(n: usize) -> Notice {
        Notice {
            id: String::new(),
            number: n.to_string(),
            title: format!("공고 {}", n),
            link: format!("https://example.com/{}", n),
            date: "2024-03-05".to_string(),
            source: "KETEP".to_string(),
        }
    }

    fn sections(payload: &Value) -> Vec<&Value> {
        payload["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|b| b["type"] == "section")
            .collect()
    }

    #[test]
    fn payload_itemizes_all_notices_under_the_cap() {
        let notices: Vec<Notice> = (1..=3).map(notice).collect();
        let payload = compose_payload(&notices, "2024-03-05", "https://example.com/board", 10);

        assert_eq!(sections(&payload).len(), 3);
        assert_eq!(
            payload["blocks"][0]["text"]["text"],
            "📢 KETEP 새 공지사항 (3건)"
        );
    }

    #[test]
    fn payload_truncates_to_cap_with_omission_summary() {
        let notices: Vec<Notice> = (1..=15).map(notice).collect();
        let payload = compose_payload(&notices, "2024-03-05", "https://example.com/board", 10);

        assert_eq!(sections(&payload).len(), 10);

        let blocks = payload["blocks"].as_array().unwrap();
        let omission = blocks
            .iter()
            .find(|b| {
                b["type"] == "context"
                    && b["elements"][0]["text"]
                        .as_str()
                        .is_some_and(|t| t.contains("더 있습니다"))
            })
            .expect("omission summary present");
        assert!(omission["elements"][0]["text"].as_str().unwrap().contains("외 5건"));
    }

    #[test]
    fn payload_links_title_and_appends_date_line() {
        let payload = compose_payload(&[notice(1)], "2024-03-05", "https://example.com/board", 10);
        let text = sections(&payload)[0]["text"]["text"].as_str().unwrap();

        assert!(text.contains("<https://example.com/1|공고 1>"));
        assert!(text.contains("📅 2024-03-05"));
    }

    #[test]
    fn payload_skips_date_line_when_absent() {
        let mut n = notice(1);
        n.date.clear();
        let payload = compose_payload(&[n], "2024-03-05", "https://example.com/board", 10);
        let text = sections(&payload)[0]["text"]["text"].as_str().unwrap();

        assert!(!text.contains("📅"));
    }

    #[test]
    fn payload_footer_links_back_to_board() {
        let payload = compose_payload(&[notice(1)], "2024-03-05", "https://example.com/board", 10);
        let blocks = payload["blocks"].as_array().unwrap();
        let footer = blocks.last().unwrap();

        assert_eq!(footer["type"], "context");
        assert!(
            footer["elements"][0]["text"]
                .as_str()
                .unwrap()
                .contains("https://example.com/board")
        );
    }

    #[tokio::test]
    async fn missing_webhook_url_reports_failure() {
        let notifier = SlackNotifier::new(&NotifyConfig::default(), None, "https://example.com");
        assert!(!notifier.notify(&[notice(1)]).await);
    }

    #[tokio::test]
    async fn empty_batch_is_vacuous_success() {
        let notifier = SlackNotifier::new(
            &NotifyConfig::default(),
            Some("https://hooks.invalid/services/x".to_string()),
            "https://example.com",
        );
        assert!(notifier.notify(&[]).await);
    }
}
