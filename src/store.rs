//! Loading and saving the persisted archive document.
//!
//! The archive lives in a single JSON file (`news-data.json` by default).
//! It is read once at run start and written once at the end; there is no
//! incremental persistence and no locking against concurrent runs.
//!
//! A missing file initializes an empty archive. A file that exists but does
//! not parse is an error: the store's integrity is the operator's
//! responsibility, and silently replacing a corrupt archive would discard
//! the accumulated history.

use crate::models::NewsArchive;
use chrono::{SecondsFormat, Utc};
use std::error::Error;
use std::io::ErrorKind;
use tokio::fs;
use tracing::{info, instrument};

/// Load the archive from `path`, or initialize an empty one if absent.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn load_archive(path: &str) -> Result<NewsArchive, Box<dyn Error>> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No existing archive; starting empty");
            return Ok(NewsArchive::default());
        }
        Err(e) => return Err(e.into()),
    };

    let archive: NewsArchive = serde_json::from_str(&raw)?;
    let total_items: usize = archive.companies.values().map(Vec::len).sum();
    info!(
        companies = archive.companies.len(),
        items = total_items,
        last_updated = %archive.last_updated,
        "Loaded existing archive"
    );
    Ok(archive)
}

/// Refresh `lastUpdated` and write the whole archive to `path` as
/// pretty-printed JSON, overwriting any previous file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn save_archive(archive: &mut NewsArchive, path: &str) -> Result<(), Box<dyn Error>> {
    archive.last_updated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let json = serde_json::to_string_pretty(archive)?;
    fs::write(path, json).await?;
    info!(last_updated = %archive.last_updated, "Saved archive");
    Ok(())
}
