//! Notice data structure.

use serde::{Deserialize, Serialize};

/// A notice fetched from the announcement board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    /// Derived fingerprint, empty until assigned by the pipeline
    #[serde(default)]
    pub id: String,

    /// Display sequence string (may be empty or non-numeric, e.g. "공지")
    pub number: String,

    /// Notice title
    pub title: String,

    /// Full URL to the notice
    pub link: String,

    /// Notice date as displayed by the board
    pub date: String,

    /// Tag identifying the originating board
    pub source: String,
}

impl Notice {
    /// Format notice for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{number}`, `{title}`, `{link}`, `{date}`, `{source}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", &self.id)
            .replace("{number}", &self.number)
            .replace("{title}", &self.title)
            .replace("{link}", &self.link)
            .replace("{date}", &self.date)
            .replace("{source}", &self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notice() -> Notice {
        Notice {
            id: String::new(),
            number: "42".to_string(),
            title: "Test Title".to_string(),
            link: "https://example.com/notice/1".to_string(),
            date: "2024-01-01".to_string(),
            source: "KETEP".to_string(),
        }
    }

    #[test]
    fn test_format() {
        let notice = sample_notice();
        let result = notice.format("[{source}] {title} ({date})");
        assert_eq!(result, "[KETEP] Test Title (2024-01-01)");
    }
}
