//! Data models for feed items and the persisted news archive.
//!
//! This module defines the core data structures used throughout the application:
//! - [`TrackedCompany`]: A company whose news is tracked, with its search query
//! - [`RawItem`]: A feed entry exactly as pulled out of the RSS XML
//! - [`NewsItem`]: A cleaned, normalized item ready for archiving
//! - [`NewsArchive`]: The full persisted document with per-company item lists
//!
//! The archive uses camelCase field names on the wire (`lastUpdated`,
//! `companyMeta`, `pubDate`) to stay compatible with the JSON document
//! consumed by downstream clients, hence the `#[serde(rename)]` attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A company tracked by the updater.
///
/// Static configuration, immutable at runtime. The `name` is the unique key
/// under which items are archived; the `query` is what gets sent to the feed
/// search; `color` and `logo` are presentation hints passed through to the
/// archive's `companyMeta` for downstream consumers.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackedCompany {
    /// Unique display name, used as the archive key.
    pub name: String,
    /// Search query sent to the news feed.
    pub query: String,
    /// CSS color token used by the frontend.
    pub color: String,
    /// Path to the company logo asset.
    #[serde(default)]
    pub logo: String,
}

/// A raw feed entry as received from the RSS feed, unvalidated.
///
/// Feeds frequently omit the `<source>` element or fold the publisher into
/// the title instead; `source` is empty in that case and the normalizer may
/// recover it from a trailing title segment.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub source: String,
}

/// A normalized item as stored in the archive.
///
/// `link` is the deduplication identity: two items with the same link are the
/// same article regardless of other field differences. `pub_date` is either a
/// canonical ISO 8601 timestamp (offset-carrying when the feed supplied one)
/// or, when no known date format matched, the original raw string.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub source: String,
}

/// Presentation metadata for one tracked company, upserted every run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompanyMeta {
    pub color: String,
    pub query: String,
    #[serde(default)]
    pub logo: String,
}

impl From<&TrackedCompany> for CompanyMeta {
    fn from(company: &TrackedCompany) -> Self {
        Self {
            color: company.color.clone(),
            query: company.query.clone(),
            logo: company.logo.clone(),
        }
    }
}

/// The full persisted archive document.
///
/// Loaded once at run start, mutated in memory, written once at the end with
/// a refreshed `lastUpdated`. All fields default so documents written by
/// older versions (missing `companyMeta` or `companies`) still load.
///
/// # Invariants
///
/// - Within one company's list, no two items share a `link`.
/// - Lists are ordered non-increasing by `pubDate` string comparison.
/// - `companyMeta` holds an entry for every currently configured company;
///   entries for companies no longer configured are never removed.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NewsArchive {
    /// RFC 3339 instant of the last completed run, or `""` for a fresh archive.
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: String,
    #[serde(rename = "companyMeta", default)]
    pub company_meta: BTreeMap<String, CompanyMeta>,
    #[serde(default)]
    pub companies: BTreeMap<String, Vec<NewsItem>>,
}

impl NewsArchive {
    /// Upsert `companyMeta` entries for every configured company.
    ///
    /// Stale entries for companies that are no longer configured are kept.
    pub fn upsert_meta(&mut self, companies: &[TrackedCompany]) {
        for company in companies {
            self.company_meta
                .insert(company.name.clone(), CompanyMeta::from(company));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: &str) -> NewsItem {
        NewsItem {
            title: "Title".to_string(),
            link: link.to_string(),
            pub_date: "2026-02-27T10:30:00+00:00".to_string(),
            source: "Reuters".to_string(),
        }
    }

    #[test]
    fn test_archive_wire_field_names() {
        let mut archive = NewsArchive::default();
        archive.last_updated = "2026-02-27T12:00:00Z".to_string();
        archive
            .companies
            .insert("Acme".to_string(), vec![item("https://example.com/a")]);

        let json = serde_json::to_string(&archive).unwrap();
        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"companyMeta\""));
        assert!(json.contains("\"pubDate\""));
        assert!(!json.contains("last_updated"));
    }

    #[test]
    fn test_archive_tolerates_missing_keys() {
        // Documents written before companyMeta existed must still load.
        let json = r#"{"lastUpdated": "", "companies": {}}"#;
        let archive: NewsArchive = serde_json::from_str(json).unwrap();
        assert!(archive.company_meta.is_empty());

        let json = r#"{}"#;
        let archive: NewsArchive = serde_json::from_str(json).unwrap();
        assert_eq!(archive.last_updated, "");
        assert!(archive.companies.is_empty());
    }

    #[test]
    fn test_upsert_meta_overwrites_and_keeps_stale() {
        let mut archive = NewsArchive::default();
        archive.company_meta.insert(
            "Old Corp".to_string(),
            CompanyMeta {
                color: "var(--gray)".to_string(),
                query: "Old Corp".to_string(),
                logo: String::new(),
            },
        );

        let configured = vec![TrackedCompany {
            name: "Acme".to_string(),
            query: "Acme Corporation".to_string(),
            color: "var(--teal)".to_string(),
            logo: "logos/acme.png".to_string(),
        }];
        archive.upsert_meta(&configured);

        assert_eq!(archive.company_meta.len(), 2);
        assert_eq!(archive.company_meta["Acme"].query, "Acme Corporation");
        // Stale entries survive.
        assert!(archive.company_meta.contains_key("Old Corp"));
    }

    #[test]
    fn test_news_item_round_trip() {
        let original = item("https://example.com/story");
        let json = serde_json::to_string(&original).unwrap();
        let parsed: NewsItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
