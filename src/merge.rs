//! Merging freshly normalized items into a company's archived list.

use crate::models::NewsItem;
use std::collections::HashSet;

/// Merge `incoming` items into `existing`, deduplicating by link.
///
/// Items whose link is already present are skipped; duplicates *within* the
/// incoming batch collapse to their first occurrence. After appending, the
/// whole list is re-sorted by `pubDate` descending (string comparison, which
/// is correct for RFC 3339 timestamps and best-effort for items that kept an
/// unparseable raw date). The sort is stable, so same-date items keep their
/// relative order.
///
/// Returns the number of items actually appended. Re-running the merge with
/// the same batch appends zero.
pub fn merge_items(existing: &mut Vec<NewsItem>, incoming: Vec<NewsItem>) -> usize {
    let mut seen: HashSet<String> = existing.iter().map(|item| item.link.clone()).collect();
    let mut added = 0;

    for item in incoming {
        if seen.insert(item.link.clone()) {
            existing.push(item);
            added += 1;
        }
    }

    existing.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    added
}
