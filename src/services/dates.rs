// src/services/dates.rs

//! Same-day matching for board date strings.
//!
//! The board's date rendering is not guaranteed stable, so several
//! equivalent representations of "today" are accepted: dotted, dashed
//! and slashed forms with 2- or 4-digit years, plus a digits-only
//! comparison that survives stray separators or whitespace.

use chrono::{Local, NaiveDate};

/// Check whether a displayed date string denotes today.
pub fn is_today(date_str: &str) -> bool {
    matches_date(date_str, Local::now().date_naive())
}

/// Check whether a displayed date string denotes the given calendar day.
///
/// Known fragile edge: a short numeric fragment that happens to equal the
/// 6-digit `YYMMDD` form (e.g. "250305" on 2025-03-05) matches through the
/// digits-only branch. Kept as-is.
pub fn matches_date(date_str: &str, day: NaiveDate) -> bool {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return false;
    }

    let exact_forms = [
        day.format("%Y-%m-%d").to_string(),
        day.format("%Y.%m.%d").to_string(),
        day.format("%Y/%m/%d").to_string(),
        day.format("%y-%m-%d").to_string(),
        day.format("%y.%m.%d").to_string(),
    ];
    if exact_forms.iter().any(|form| form == date_str) {
        return true;
    }

    let digits: String = date_str.chars().filter(|c| c.is_ascii_digit()).collect();
    digits == day.format("%Y%m%d").to_string() || digits == day.format("%y%m%d").to_string()
}
