//! Tabular data profiling service.
//!
//! The engine in [`services::profiler`] turns delimited text into an
//! [`AnalysisResult`]: column types and statistics, significant Pearson
//! correlations, histogram and category chart data, and summary insights.
//! The rest of the crate hosts it behind an axum router.
//!
//! ```
//! use csv_profile_services::{analyze, AnalysisOptions};
//!
//! let result = analyze("A,B\n1,x\n2,y\n3,x\n", &AnalysisOptions::default()).unwrap();
//! assert_eq!(result.row_count, 3);
//! assert_eq!(result.insights[0], "Dataset contains 3 rows and 2 columns");
//! ```

use std::sync::Arc;
use moka::sync::Cache;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

pub use services::profiler::{analyze, AnalysisOptions, AnalysisResult};

// Application state
pub struct AppState {
    pub config: config::Config,
    sample_cache: Cache<String, Arc<AnalysisResult>>,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let sample_cache = Cache::new(config.sample_cache_capacity);
        Self { config, sample_cache }
    }

    /// Cached analyses of the built-in samples under the default options.
    pub fn sample_cache(&self) -> &Cache<String, Arc<AnalysisResult>> {
        &self.sample_cache
    }
}
