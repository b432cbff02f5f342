//! Runtime configuration: tracked companies and the publisher allow-list.
//!
//! Configuration is resolved once at startup and never re-read mid-run. The
//! compiled-in defaults mirror the production deployment; a YAML file with
//! the same shape can replace them wholesale via `--config`:
//!
//! ```yaml
//! companies:
//!   - name: Novo Nordisk
//!     query: Novo Nordisk
//!     color: var(--purple)
//!     logo: logos/novo-nordisk.png
//! allowed_sources:
//!   - Reuters
//!   - Bloomberg
//! ```

use crate::models::TrackedCompany;
use serde::Deserialize;
use std::error::Error;
use tracing::info;

/// Immutable application configuration, passed into the updater at
/// construction so the core stays testable with synthetic configs.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Companies to fetch news for, processed in this order.
    pub companies: Vec<TrackedCompany>,
    /// Publisher names considered trustworthy enough to retain.
    /// Matched case-insensitively against item titles and sources.
    pub allowed_sources: Vec<String>,
}

impl AppConfig {
    /// Resolve configuration: the YAML file at `path` if given, otherwise
    /// the compiled-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse; an
    /// unreadable configuration is fatal to the run.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let config: AppConfig = serde_yaml::from_str(&raw)?;
                info!(
                    path,
                    companies = config.companies.len(),
                    allowed_sources = config.allowed_sources.len(),
                    "Loaded configuration from file"
                );
                Ok(config)
            }
            None => {
                let config = AppConfig::default();
                info!(
                    companies = config.companies.len(),
                    allowed_sources = config.allowed_sources.len(),
                    "Using built-in configuration"
                );
                Ok(config)
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let company = |name: &str, query: &str, color: &str, logo: &str| TrackedCompany {
            name: name.to_string(),
            query: query.to_string(),
            color: color.to_string(),
            logo: logo.to_string(),
        };

        Self {
            companies: vec![
                company(
                    "Novo Nordisk",
                    "Novo Nordisk",
                    "var(--purple)",
                    "logos/novo-nordisk.png",
                ),
                company(
                    "Hyundai E&C",
                    "Hyundai Engineering Construction",
                    "var(--coral)",
                    "logos/hyundai-enc.png",
                ),
                company(
                    "Kiwoom Securities",
                    "Kiwoom Securities",
                    "var(--teal)",
                    "logos/kiwoom-securities.png",
                ),
                company(
                    "Woori Financial Group",
                    "Woori Financial Group",
                    "var(--amber)",
                    "logos/woori-financial.png",
                ),
            ],
            allowed_sources: [
                "Nikkei Asia",
                "Financial Times",
                "Bloomberg",
                "South China Morning Post",
                "CHOSUNBIZ",
                "The Korea Times",
                "The Korea Herald",
                "Reuters",
                "The Japan Times",
                "Yonhap News Agency",
                "CNBC",
                "Barron's",
                "WSJ",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}
