//! Display formatting shared by tables, cards and detail views.

use chrono::{DateTime, NaiveDateTime};

/// First eight characters of an id followed by an ellipsis
pub fn short_id(id: &str) -> String {
    truncate(id, 8)
}

/// Shorten free text to `max_chars`, marking the cut with `...`
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Calendar date of a backend timestamp.
///
/// The backend sends either RFC 3339 or a naive ISO timestamp depending on
/// the storage layer. Anything else is shown as-is.
pub fn format_date(timestamp: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    timestamp.to_string()
}

pub fn format_optional_date(timestamp: Option<&str>) -> String {
    timestamp.map(format_date).unwrap_or_else(|| "-".to_string())
}

pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

pub fn format_rating(rating: i32) -> String {
    format!("{}/5 *", rating)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3fa85f64-5717-4562-b3fc-2c963f66afa6"), "3fa85f64...");
        assert_eq!(short_id("42"), "42");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
        assert_eq!(truncate("short", 50), "short");
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2025-03-14T09:26:53+00:00"), "2025-03-14");
        assert_eq!(format_date("2025-03-14T09:26:53.123456"), "2025-03-14");
        assert_eq!(format_date("2025-03-14 09:26:53"), "2025-03-14");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_optional_date(None), "-");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(120.0), "$120");
        assert_eq!(format_price(99.5), "$99.50");
    }
}
