//! Orchestration of a full update run across all tracked companies.
//!
//! The updater walks the configured companies in order and, for each one,
//! fetches the search feed, filters to allow-listed publishers, truncates to
//! the per-fetch cap, normalizes, and merges into the archive. A failure on
//! one company is recorded and logged but never aborts the remaining
//! companies.
//!
//! The external fetch is abstracted behind the [`NewsSearch`] trait so the
//! run loop can be exercised in tests with scripted responses instead of
//! network calls.

use crate::config::AppConfig;
use crate::merge::merge_items;
use crate::models::{NewsArchive, NewsItem, RawItem};
use crate::normalize::{is_from_allowed_source, normalize_item};
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument};

/// External feed-search collaborator.
///
/// Implementations may fail with any network or parse error; the updater
/// contains such failures at the per-company level.
pub trait NewsSearch {
    /// Fetch raw feed items for a search query.
    async fn search(&self, query: &str) -> Result<Vec<RawItem>, Box<dyn Error>>;
}

/// What happened to one company during a run.
#[derive(Debug)]
pub enum CompanyOutcome {
    /// The fetch succeeded; counts describe each pipeline stage.
    Updated {
        /// Raw items in the feed response.
        fetched: usize,
        /// Items surviving the allow-list filter and per-fetch cap.
        kept: usize,
        /// Items actually appended to the archive.
        added: usize,
        /// Archived items for this company after the merge.
        total: usize,
    },
    /// The fetch or parse failed; the company's list is untouched this run.
    Failed { reason: String },
}

/// Per-company result of a run, collected for summary logging and tests.
#[derive(Debug)]
pub struct CompanyReport {
    pub name: String,
    pub outcome: CompanyOutcome,
}

impl CompanyReport {
    /// Items this company contributed to the archive this run.
    pub fn added(&self) -> usize {
        match self.outcome {
            CompanyOutcome::Updated { added, .. } => added,
            CompanyOutcome::Failed { .. } => 0,
        }
    }
}

/// Drives one update run over an in-memory archive.
pub struct Updater {
    config: AppConfig,
    max_items: usize,
    fetch_delay: Duration,
}

impl Updater {
    pub fn new(config: AppConfig, max_items: usize, fetch_delay: Duration) -> Self {
        Self {
            config,
            max_items,
            fetch_delay,
        }
    }

    /// Process every configured company once, strictly sequentially.
    ///
    /// Upserts `companyMeta` for all configured companies, then fetches,
    /// filters, normalizes, and merges per company. Waits `fetch_delay`
    /// between successive fetches (not after the last one) to stay polite
    /// toward the feed host.
    ///
    /// The caller is responsible for persisting the archive afterwards.
    #[instrument(level = "info", skip_all)]
    pub async fn run<S: NewsSearch>(
        &self,
        source: &S,
        archive: &mut NewsArchive,
    ) -> Vec<CompanyReport> {
        archive.upsert_meta(&self.config.companies);

        let company_count = self.config.companies.len();
        let mut reports = Vec::with_capacity(company_count);

        for (i, company) in self.config.companies.iter().enumerate() {
            info!(company = %company.name, query = %company.query, "Fetching news");

            let outcome = match source.search(&company.query).await {
                Ok(raw_items) => {
                    let fetched = raw_items.len();
                    let filtered: Vec<RawItem> = raw_items
                        .into_iter()
                        .filter(|item| {
                            is_from_allowed_source(item, &self.config.allowed_sources)
                        })
                        .take(self.max_items)
                        .collect();
                    let kept = filtered.len();

                    let normalized: Vec<NewsItem> = filtered
                        .iter()
                        .map(|item| normalize_item(item, &self.config.allowed_sources))
                        .collect();

                    let list = archive.companies.entry(company.name.clone()).or_default();
                    let added = merge_items(list, normalized);
                    let total = list.len();

                    info!(
                        company = %company.name,
                        fetched,
                        kept,
                        added,
                        total,
                        "Company updated"
                    );
                    CompanyOutcome::Updated {
                        fetched,
                        kept,
                        added,
                        total,
                    }
                }
                Err(e) => {
                    error!(
                        company = %company.name,
                        error = %e,
                        "Fetch failed; company contributes no items this run"
                    );
                    CompanyOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            reports.push(CompanyReport {
                name: company.name.clone(),
                outcome,
            });

            // Rate-limit courtesy pause between fetches, skipped after the
            // final company.
            if i + 1 < company_count && !self.fetch_delay.is_zero() {
                tokio::time::sleep(self.fetch_delay).await;
            }
        }

        reports
    }
}
