// src/services/board.rs

//! Board fetcher service.
//!
//! Fetches the announcement board page and extracts notice records using
//! layered CSS selector fallbacks. The fetch is best-effort: transport
//! failures yield an empty list and malformed rows are skipped, so a
//! partial page never aborts the run.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{Config, Notice};
use crate::services::FetchNotices;
use crate::utils::url::{origin_of, resolve_against_origin};

/// Service for fetching notices from the configured board.
pub struct BoardFetcher {
    config: Arc<Config>,
    client: Client,
}

impl BoardFetcher {
    /// Create a new board fetcher with the given configuration and client.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Retrieve the board page body.
    async fn fetch_page(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.config.board.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Extract notices from a parsed board document.
    pub fn extract(&self, document: &Html) -> Vec<Notice> {
        let origin = origin_of(&self.config.board.url).unwrap_or_default();
        let rows = self.select_rows(document);

        let mut notices = Vec::new();
        for row in rows {
            match self.parse_row(&row, &origin) {
                Some(notice) => notices.push(notice),
                None => log::debug!("Skipping row without a resolvable title anchor"),
            }
        }
        notices
    }

    /// Locate notice rows using the configured strategies, first
    /// non-empty match wins.
    fn select_rows<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for strategy in &self.config.selectors.row_strategies {
            let Ok(row_sel) = Self::parse_selector(&strategy.rows) else {
                continue;
            };

            let rows: Vec<ElementRef<'a>> = match &strategy.container {
                Some(container) => {
                    let Ok(container_sel) = Self::parse_selector(container) else {
                        continue;
                    };
                    match document.select(&container_sel).next() {
                        Some(scope) => scope.select(&row_sel).collect(),
                        None => continue,
                    }
                }
                None => document.select(&row_sel).collect(),
            };

            if !rows.is_empty() {
                log::debug!("Row strategy '{}' matched {} rows", strategy.rows, rows.len());
                return rows;
            }
        }

        log::warn!("No row strategy matched the board markup");
        Vec::new()
    }

    /// Parse a single row into a notice.
    ///
    /// Returns None when the row carries no title anchor or the title
    /// text is empty.
    fn parse_row(&self, row: &ElementRef<'_>, origin: &str) -> Option<Notice> {
        let selectors = &self.config.selectors;

        let title_elem = Self::first_match(row, &selectors.title_chain)?;
        let title = Self::element_text(&title_elem);
        if title.is_empty() {
            return None;
        }

        let raw_link = title_elem
            .value()
            .attr(&selectors.attr_name)
            .unwrap_or_default();
        let link = resolve_against_origin(origin, raw_link);

        let date = Self::first_match(row, &selectors.date_chain)
            .map(|el| Self::element_text(&el))
            .unwrap_or_default();
        let number = Self::first_match(row, &selectors.number_chain)
            .map(|el| Self::element_text(&el))
            .unwrap_or_default();

        Some(Notice {
            id: String::new(), // Assigned later by the pipeline
            number,
            title,
            link,
            date,
            source: self.config.board.source.clone(),
        })
    }

    /// Try each selector in the chain in order, returning the first
    /// matching element within the row.
    fn first_match<'a>(row: &ElementRef<'a>, chain: &[String]) -> Option<ElementRef<'a>> {
        chain.iter().find_map(|s| {
            let sel = Self::parse_selector(s).ok()?;
            row.select(&sel).next()
        })
    }

    fn element_text(element: &ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| {
            log::warn!("Invalid selector '{}': {:?}", s, e);
            crate::error::AppError::selector(s, format!("{e:?}"))
        })
    }
}

#[async_trait]
impl FetchNotices for BoardFetcher {
    /// Fetch the board page and extract notices.
    ///
    /// Network and status errors are logged and produce an empty list.
    async fn fetch(&self) -> Vec<Notice> {
        let html = match self.fetch_page().await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Board fetch failed ({}): {}", self.config.board.url, e);
                return Vec::new();
            }
        };

        let document = Html::parse_document(&html);
        self.extract(&document)
    }
}
