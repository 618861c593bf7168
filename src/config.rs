use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use serde::Deserialize;
use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use crate::services::profiler::AnalysisOptions;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_file_size: usize,
    pub fetch_timeout_secs: u64,
    pub sample_cache_capacity: u64,
    pub analysis: AnalysisOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            max_file_size: default_max_file_size(),
            fetch_timeout_secs: 30,
            sample_cache_capacity: 16,
            analysis: AnalysisOptions::default(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let analysis_defaults = defaults.analysis.clone();

        let delimiter = match lookup("CSV_DELIMITER") {
            Some(raw) => parse_delimiter(&raw)?,
            None => analysis_defaults.delimiter,
        };

        let analysis = AnalysisOptions {
            delimiter,
            top_values: parse_var(&lookup, "TOP_VALUES", analysis_defaults.top_values)?,
            category_bar_limit: parse_var(&lookup, "CATEGORY_BAR_LIMIT", analysis_defaults.category_bar_limit)?,
            histogram_bins: parse_var(&lookup, "HISTOGRAM_BINS", analysis_defaults.histogram_bins)?,
            histogram_columns: parse_var(&lookup, "HISTOGRAM_COLUMNS", analysis_defaults.histogram_columns)?,
            category_chart_columns: parse_var(&lookup, "CATEGORY_CHART_COLUMNS", analysis_defaults.category_chart_columns)?,
            correlation_threshold: parse_var(&lookup, "CORRELATION_THRESHOLD", analysis_defaults.correlation_threshold)?,
        };
        analysis.validate()?;

        Ok(Config {
            host: parse_var(&lookup, "HOST", defaults.host)?,
            port: parse_var(&lookup, "PORT", defaults.port)?,
            max_file_size: parse_var(&lookup, "MAX_FILE_SIZE", defaults.max_file_size)?,
            fetch_timeout_secs: parse_var(&lookup, "FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?,
            sample_cache_capacity: parse_var(&lookup, "SAMPLE_CACHE_CAPACITY", defaults.sample_cache_capacity)?,
            analysis,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::new()?;
    tracing::info!(
        "Loaded configuration: addr={}, max_file_size={}B, delimiter={:?}",
        config.socket_addr(),
        config.max_file_size,
        config.analysis.delimiter
    );
    Ok(config)
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Failed to parse {}={:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}

/// Accepts a single character, or `tab` / `\t` for a tab.
pub fn parse_delimiter(raw: &str) -> Result<char> {
    if raw == "tab" || raw == "\\t" {
        return Ok('\t');
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(anyhow!("Delimiter must be a single character, got {:?}", raw)),
    }
}
