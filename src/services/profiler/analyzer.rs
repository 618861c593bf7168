use super::charts::{build_category_chart, build_histogram};
use super::correlation::{significant_correlations, NumericSeries};
use super::insights::generate_insights;
use super::parser::parse_table;
use super::summarizer::summarize_table;
use super::types::*;
use super::utils::parse_number;
use crate::error::AppError;

/// Runs the whole profiling pipeline over one text blob.
///
/// Pure and deterministic: identical input and options always give an identical
/// result, and a result is only returned once every stage has succeeded.
pub fn analyze(text: &str, options: &AnalysisOptions) -> Result<AnalysisResult, AppError> {
    TableAnalyzer::new(options.clone()).analyze(text)
}

pub struct TableAnalyzer {
    options: AnalysisOptions,
}

impl TableAnalyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AppError> {
        self.options.validate()?;

        let start = std::time::Instant::now();
        tracing::info!("Starting table analysis ({} bytes)", text.len());

        let table = parse_table(text, self.options.delimiter)?;
        tracing::info!(
            "Parsed table with {} rows and {} columns in {:?}",
            table.row_count(),
            table.column_count(),
            start.elapsed()
        );

        let summary_start = std::time::Instant::now();
        let profiles = summarize_table(&table, &self.options);
        tracing::debug!("Column profiles computed in {:?}", summary_start.elapsed());

        let result = self.assemble(&table, profiles);
        ensure_finite(&result)?;

        tracing::info!(
            "Analysis completed in {:?}: {} correlations, {} histograms, {} category charts",
            start.elapsed(),
            result.correlations.len(),
            result.histograms.len(),
            result.category_bars.len()
        );

        Ok(result)
    }

    fn assemble(&self, table: &Table, profiles: Vec<ColumnProfile>) -> AnalysisResult {
        let numeric_idx: Vec<usize> = profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_numeric())
            .map(|(idx, _)| idx)
            .collect();
        let categorical_idx: Vec<usize> = profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_numeric())
            .map(|(idx, _)| idx)
            .collect();

        let series: Vec<NumericSeries<'_>> = numeric_idx
            .iter()
            .map(|&idx| NumericSeries {
                name: &table.column_names()[idx],
                values: table.column(idx).map(|cell| cell.and_then(parse_number)).collect(),
            })
            .collect();

        let correlations = significant_correlations(&series, self.options.correlation_threshold);

        let histograms = series
            .iter()
            .take(self.options.histogram_columns)
            .map(|s| {
                let values: Vec<f64> = s.values.iter().flatten().copied().collect();
                build_histogram(s.name, &values, self.options.histogram_bins)
            })
            .collect();

        let category_bars = categorical_idx
            .iter()
            .take(self.options.category_chart_columns)
            .map(|&idx| {
                build_category_chart(
                    &table.column_names()[idx],
                    table.column(idx).flatten(),
                    self.options.category_bar_limit,
                )
            })
            .collect();

        let insights = generate_insights(table.row_count(), &profiles, &correlations);

        AnalysisResult {
            row_count: table.row_count(),
            column_count: table.column_count(),
            column_names: table.column_names().to_vec(),
            column_profiles: profiles,
            insights,
            correlations,
            histograms,
            category_bars,
        }
    }
}

/// Rejects results carrying NaN or infinite statistics, e.g. from sums that overflow.
fn ensure_finite(result: &AnalysisResult) -> Result<(), AppError> {
    for profile in &result.column_profiles {
        if let ColumnStats::Numeric(stats) = &profile.stats {
            let values = [stats.mean, stats.median, stats.std_dev, stats.min, stats.max];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(AppError::Computation(format!(
                    "statistics for column '{}' are not finite",
                    profile.name
                )));
            }
        }
    }
    if let Some(edge) = result.correlations.iter().find(|e| !e.coefficient.is_finite()) {
        return Err(AppError::Computation(format!(
            "correlation between '{}' and '{}' is not finite",
            edge.column_a, edge.column_b
        )));
    }
    Ok(())
}
