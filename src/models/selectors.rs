// src/models/selectors.rs

//! CSS selector chains for scraping the notice board.
//!
//! Each field chain is an ordered list of selectors tried in sequence;
//! the first one that matches wins. This tolerates markup variation
//! across board renderings without per-field conditional trees.

use serde::{Deserialize, Serialize};

/// One way of locating notice rows in a board document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowStrategy {
    /// Optional container selector; when set, the strategy only applies
    /// if the document has a matching element, and rows are searched
    /// inside the first match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Selector for the row elements themselves
    pub rows: String,
}

impl RowStrategy {
    /// Row strategy scoped to a container element.
    pub fn scoped(container: impl Into<String>, rows: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            rows: rows.into(),
        }
    }

    /// Row strategy applied to the whole document.
    pub fn bare(rows: impl Into<String>) -> Self {
        Self {
            container: None,
            rows: rows.into(),
        }
    }
}

/// Ordered selector chains used to extract notice fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Row location strategies, tried in order until one yields rows
    #[serde(default = "defaults::row_strategies")]
    pub row_strategies: Vec<RowStrategy>,

    /// Title/link anchor selectors, most specific first
    #[serde(default = "defaults::title_chain")]
    pub title_chain: Vec<String>,

    /// Date cell selectors, most specific first
    #[serde(default = "defaults::date_chain")]
    pub date_chain: Vec<String>,

    /// Number cell selectors, most specific first
    #[serde(default = "defaults::number_chain")]
    pub number_chain: Vec<String>,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            row_strategies: defaults::row_strategies(),
            title_chain: defaults::title_chain(),
            date_chain: defaults::date_chain(),
            number_chain: defaults::number_chain(),
            attr_name: defaults::attr_name(),
        }
    }
}

mod defaults {
    use super::RowStrategy;

    pub fn row_strategies() -> Vec<RowStrategy> {
        vec![
            // Board table carrying the recognized list marker
            RowStrategy::scoped("table.board-list", "tbody tr"),
            // Any table at all
            RowStrategy::scoped("table", "tbody tr"),
            // List-style boards without a table
            RowStrategy::bare(".board-list li, .list-item, tr[class*='list']"),
            // Last resort: generic table-body rows
            RowStrategy::bare("tbody tr"),
        ]
    }

    pub fn title_chain() -> Vec<String> {
        vec![
            ".title a".into(),
            "td.title a".into(),
            ".subject a".into(),
            "a".into(),
        ]
    }

    pub fn date_chain() -> Vec<String> {
        vec![
            ".date".into(),
            "td.date".into(),
            ".reg-date".into(),
            "td:nth-child(4)".into(),
            "td:nth-child(5)".into(),
        ]
    }

    pub fn number_chain() -> Vec<String> {
        vec![".num".into(), "td.num".into(), "td:first-child".into()]
    }

    pub fn attr_name() -> String {
        "href".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chains_are_nonempty() {
        let selectors = SelectorConfig::default();
        assert!(!selectors.row_strategies.is_empty());
        assert!(!selectors.title_chain.is_empty());
        assert!(!selectors.date_chain.is_empty());
        assert!(!selectors.number_chain.is_empty());
    }

    #[test]
    fn generic_anchor_is_last_title_fallback() {
        let selectors = SelectorConfig::default();
        assert_eq!(selectors.title_chain.last().unwrap(), "a");
    }
}
