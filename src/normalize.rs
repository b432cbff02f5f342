//! Item normalization: publisher filtering, title cleaning, date parsing.
//!
//! Google-News-style search feeds are messy in two specific ways this module
//! exists to handle:
//!
//! 1. The publisher is appended to the title as one or more trailing
//!    `" - Publisher"` segments, and the structured `<source>` element is
//!    sometimes missing entirely.
//! 2. `pubDate` strings arrive in several formats (RFC 822 with a named zone
//!    or a numeric offset, ISO 8601, or a bare timestamp).
//!
//! The title stripper here is deliberately conservative: it only removes a
//! trailing segment that matches a known publisher, so titles that happen to
//! contain `" - "` keep their real text. Downstream consumers depend on the
//! exact behavior of this heuristic, so it must not be made smarter.

use crate::models::{NewsItem, RawItem};
use chrono::{DateTime, NaiveDateTime};

/// Check whether an item's source or title mentions an allow-listed outlet.
///
/// Matches each allow-listed publisher name as a case-insensitive substring
/// of the title or of the source. Feeds that omit the source element still
/// pass when the publisher appears in the title.
pub fn is_from_allowed_source(item: &RawItem, allowed: &[String]) -> bool {
    let title = item.title.to_lowercase();
    let source = item.source.to_lowercase();
    allowed.iter().any(|name| {
        let name = name.to_lowercase();
        title.contains(&name) || source.contains(&name)
    })
}

/// Strip trailing publisher attribution segments from a feed title.
///
/// Repeatedly inspects the last `" - "`-delimited segment of the title. If it
/// case-insensitively equals an allow-listed publisher or the item's known
/// source, the segment is stripped; when the source was empty, the segment is
/// adopted as the source. The loop stops at the first segment that matches
/// neither, so unrecognized trailing clauses are never removed.
///
/// Some feeds chain several attribution segments
/// (`"Title - CHOSUNBIZ - Chosunbiz"`), which is why this loops.
///
/// Returns the cleaned title and the (possibly inferred) source.
pub fn clean_title(raw_title: &str, raw_source: &str, allowed: &[String]) -> (String, String) {
    let mut title = raw_title.trim().to_string();
    let mut source = raw_source.trim().to_string();

    while let Some((head, tail)) = title.rsplit_once(" - ") {
        let trailing = tail.trim();
        let trailing_lower = trailing.to_lowercase();
        let is_known = allowed.iter().any(|name| name.to_lowercase() == trailing_lower);
        let matches_source = !source.is_empty() && source.to_lowercase() == trailing_lower;

        if !(is_known || matches_source) {
            break;
        }
        if source.is_empty() {
            source = trailing.to_string();
        }
        title = head.trim().to_string();
    }

    (title, source)
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Split off the leading RFC 822 weekday (`"Thu, "`), if present.
///
/// The weekday is redundant with the date and feeds sometimes get it wrong,
/// so it is dropped rather than validated against the date.
fn strip_weekday(raw: &str) -> Option<&str> {
    match raw.split_once(", ") {
        Some((prefix, rest)) if WEEKDAYS.contains(&prefix) => Some(rest),
        _ => None,
    }
}

/// Parse a feed date string into canonical ISO 8601 form.
///
/// Tries a fixed, ordered sequence of formats and renders the first match:
/// RFC 822 with a numeric offset (rendered as RFC 3339), RFC 822 with a
/// named timezone like `GMT` (the name carries no offset, so this renders a
/// naive `YYYY-MM-DDTHH:MM:SS`), RFC 3339 (ISO 8601 with offset or `Z`),
/// then a bare `YYYY-MM-DD HH:MM:SS` rendered without an offset.
///
/// When nothing matches the raw string is returned unchanged. Callers must
/// treat the result as "ISO 8601 or opaque original" and not assume it is
/// always machine-sortable across mixed inputs.
pub fn normalize_date(raw: &str) -> String {
    if let Some(rest) = strip_weekday(raw) {
        // The numeric-offset form must be tried first: %Z consumes any
        // non-whitespace trailer, including "+0900".
        if let Ok(dt) = DateTime::parse_from_str(rest, "%d %b %Y %H:%M:%S %z") {
            return dt.to_rfc3339();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(rest, "%d %b %Y %H:%M:%S %Z") {
            return dt.format("%Y-%m-%dT%H:%M:%S").to_string();
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.to_rfc3339();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    }
    raw.to_string()
}

/// Normalize one raw feed entry into its archived form.
pub fn normalize_item(item: &RawItem, allowed: &[String]) -> NewsItem {
    let (title, source) = clean_title(&item.title, &item.source, allowed);
    NewsItem {
        title,
        link: item.link.clone(),
        pub_date: normalize_date(&item.pub_date),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        ["Reuters", "CHOSUNBIZ", "Bloomberg", "The Korea Herald"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn raw(title: &str, source: &str) -> RawItem {
        RawItem {
            title: title.to_string(),
            link: "https://example.com/a".to_string(),
            pub_date: String::new(),
            source: source.to_string(),
        }
    }

    #[test]
    fn test_filter_matches_source_field() {
        let item = raw("Some headline", "Reuters");
        assert!(is_from_allowed_source(&item, &allowed()));
    }

    #[test]
    fn test_filter_matches_title_when_source_empty() {
        let item = raw("Acme wins award - Bloomberg", "");
        assert!(is_from_allowed_source(&item, &allowed()));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let item = raw("headline", "rEuTeRs");
        assert!(is_from_allowed_source(&item, &allowed()));
    }

    #[test]
    fn test_filter_rejects_unknown_outlet() {
        let item = raw("Some headline - Random Blog", "Random Blog");
        assert!(!is_from_allowed_source(&item, &allowed()));
    }

    #[test]
    fn test_clean_title_strips_known_source() {
        let (title, source) = clean_title("Acme Corp Wins Award - Reuters", "", &allowed());
        assert_eq!(title, "Acme Corp Wins Award");
        assert_eq!(source, "Reuters");
    }

    #[test]
    fn test_clean_title_strips_chained_segments() {
        // Allow-list carries "CHOSUNBIZ"; the second segment matches the
        // source adopted from the first strip.
        let (title, source) = clean_title("Market Rallies - CHOSUNBIZ - Chosunbiz", "", &allowed());
        assert_eq!(title, "Market Rallies");
        assert_eq!(source, "Chosunbiz");
    }

    #[test]
    fn test_clean_title_preserves_non_source_suffix() {
        let (title, source) = clean_title("Talks Continue - for now", "", &allowed());
        assert_eq!(title, "Talks Continue - for now");
        assert_eq!(source, "");
    }

    #[test]
    fn test_clean_title_without_delimiter_is_unchanged() {
        let (title, source) = clean_title("Plain headline", "Reuters", &allowed());
        assert_eq!(title, "Plain headline");
        assert_eq!(source, "Reuters");
    }

    #[test]
    fn test_clean_title_keeps_existing_source() {
        // Trailing segment equals the already-known source even though it is
        // not on the allow-list.
        let (title, source) = clean_title("Deal signed - Acme Daily", "Acme Daily", &allowed());
        assert_eq!(title, "Deal signed");
        assert_eq!(source, "Acme Daily");
    }

    #[test]
    fn test_clean_title_stops_at_first_non_match() {
        // The inner " - " belongs to the real title and must survive.
        let (title, source) =
            clean_title("Acme - a history of growth - Reuters", "", &allowed());
        assert_eq!(title, "Acme - a history of growth");
        assert_eq!(source, "Reuters");
    }

    #[test]
    fn test_normalize_date_rfc822_named_zone() {
        // Zone names carry no offset, so the result is naive. The weekday is
        // ignored even when it disagrees with the date (2026-02-27 is a
        // Friday), matching what real feeds require.
        assert_eq!(
            normalize_date("Thu, 27 Feb 2026 10:30:00 GMT"),
            "2026-02-27T10:30:00"
        );
        assert_eq!(
            normalize_date("Fri, 27 Feb 2026 10:30:00 GMT"),
            "2026-02-27T10:30:00"
        );
    }

    #[test]
    fn test_normalize_date_rfc822_numeric_offset() {
        assert_eq!(
            normalize_date("Sat, 28 Feb 2026 09:15:00 +0900"),
            "2026-02-28T09:15:00+09:00"
        );
    }

    #[test]
    fn test_normalize_date_requires_weekday_for_rfc822() {
        // Without the weekday prefix the RFC 822 forms do not apply and the
        // string stays opaque.
        assert_eq!(
            normalize_date("27 Feb 2026 10:30:00 GMT"),
            "27 Feb 2026 10:30:00 GMT"
        );
    }

    #[test]
    fn test_normalize_date_iso_with_offset() {
        assert_eq!(
            normalize_date("2026-02-27T10:30:00+09:00"),
            "2026-02-27T10:30:00+09:00"
        );
    }

    #[test]
    fn test_normalize_date_iso_zulu() {
        assert_eq!(normalize_date("2026-02-27T10:30:00Z"), "2026-02-27T10:30:00+00:00");
    }

    #[test]
    fn test_normalize_date_bare_format() {
        assert_eq!(normalize_date("2026-02-27 10:30:00"), "2026-02-27T10:30:00");
    }

    #[test]
    fn test_normalize_date_falls_back_to_raw() {
        assert_eq!(normalize_date("not a date"), "not a date");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_normalize_item_combines_title_and_date() {
        let item = RawItem {
            title: "Acme Corp Wins Award - Reuters".to_string(),
            link: "https://example.com/award".to_string(),
            pub_date: "Thu, 27 Feb 2026 10:30:00 GMT".to_string(),
            source: String::new(),
        };
        let normalized = normalize_item(&item, &allowed());
        assert_eq!(normalized.title, "Acme Corp Wins Award");
        assert_eq!(normalized.source, "Reuters");
        assert_eq!(normalized.link, "https://example.com/award");
        assert_eq!(normalized.pub_date, "2026-02-27T10:30:00");
    }
}
