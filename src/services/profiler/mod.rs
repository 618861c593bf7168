pub mod analyzer;
pub mod charts;
pub mod correlation;
pub mod insights;
pub mod parser;
pub mod summarizer;
pub mod types;
pub mod utils;

pub use analyzer::{analyze, TableAnalyzer};
pub use types::{AnalysisOptions, AnalysisResult};
