//! Command-line interface definitions for News Pulse.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Defaults match the production deployment, so running the binary with no
//! arguments performs a normal update against `news-data.json`.

use clap::Parser;

/// Command-line arguments for the News Pulse updater.
///
/// # Examples
///
/// ```sh
/// # Normal scheduled run
/// news_pulse
///
/// # Custom archive location and config
/// news_pulse -d ./data/news-data.json -c ./config.yaml
///
/// # Faster, smaller test run
/// news_pulse --max-items 5 --fetch-delay 0
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON archive file
    #[arg(short, long, default_value = "news-data.json")]
    pub data_file: String,

    /// Optional path to a YAML config file with companies and allowed sources
    #[arg(short, long, env = "NEWS_PULSE_CONFIG")]
    pub config: Option<String>,

    /// Maximum filtered items kept per company from each fetch
    #[arg(long, default_value_t = 20)]
    pub max_items: usize,

    /// Seconds to wait between successive feed requests
    #[arg(long, default_value_t = 2)]
    pub fetch_delay: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_pulse"]);
        assert_eq!(cli.data_file, "news-data.json");
        assert_eq!(cli.config, None);
        assert_eq!(cli.max_items, 20);
        assert_eq!(cli.fetch_delay, 2);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "news_pulse",
            "--data-file",
            "/tmp/archive.json",
            "--config",
            "/tmp/config.yaml",
            "--max-items",
            "5",
            "--fetch-delay",
            "0",
        ]);

        assert_eq!(cli.data_file, "/tmp/archive.json");
        assert_eq!(cli.config.as_deref(), Some("/tmp/config.yaml"));
        assert_eq!(cli.max_items, 5);
        assert_eq!(cli.fetch_delay, 0);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["news_pulse", "-d", "./news.json", "-c", "./cfg.yaml"]);
        assert_eq!(cli.data_file, "./news.json");
        assert_eq!(cli.config.as_deref(), Some("./cfg.yaml"));
    }
}
