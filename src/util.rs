//! Text formatting helpers for profile and repository card rendering

use chrono::{DateTime, Utc};

/// Human-readable date for card metadata, e.g. "Sep 1, 2011".
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Thousands-separated counter, e.g. 150000 -> "150,000".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate to at most `max_chars` characters, ellipsized. Operates on
/// char boundaries so multi-byte text never splits mid-codepoint.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let truncated: String = text.chars().take(max_chars - 1).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2011, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(&date), "Sep 1, 2011");

        let date = Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).unwrap();
        assert_eq!(format_date(&date), "Jan 25, 2011");
    }

    #[test]
    fn test_format_count_small_numbers() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_inserts_separators() {
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(150000), "150,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("linux", 10), "linux");
        assert_eq!(truncate("linux", 5), "linux");
    }

    #[test]
    fn test_truncate_long_text_ellipsized() {
        assert_eq!(truncate("Linux kernel source tree", 12), "Linux kerne…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("日本語のテキスト", 4), "日本語…");
    }
}
