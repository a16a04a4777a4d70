// src/services/identity.rs

//! Content-based notice fingerprints.

use sha2::{Digest, Sha256};

/// Length of the hex fingerprint.
const ID_LEN: usize = 12;

/// Derive a stable fingerprint for a notice title.
///
/// Hashes the UTF-8 bytes of the title and truncates to 12 lowercase hex
/// characters. Keyed on the title alone: two notices with identical titles
/// collapse to the same identity even when their date or link differ.
pub fn notice_id(title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_deterministic() {
        assert_eq!(notice_id("2024년 신규과제 공고"), notice_id("2024년 신규과제 공고"));
    }

    #[test]
    fn id_distinguishes_titles() {
        assert_ne!(notice_id("공고 A"), notice_id("공고 B"));
        assert_ne!(notice_id("title"), notice_id("title "));
    }

    #[test]
    fn id_is_twelve_lowercase_hex_chars() {
        for title in ["", "a", "공지사항", "a longer notice title with spaces"] {
            let id = notice_id(title);
            assert_eq!(id.len(), 12);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
