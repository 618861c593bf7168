use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use crate::error::AppError;

pub const TOP_VALUES_INLINE: usize = 5;

/// A parsed cell. `None` covers both empty and absent fields.
pub type Cell = Option<String>;

/// Parsed delimited text: unique ordered column names plus fixed-arity rows.
///
/// Every row has exactly `columns.len()` cells, so column alignment is a
/// structural property rather than something checked on access.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table, padding short rows with missing cells and dropping extra ones.
    /// Column names must already be unique.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let index = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();

        Self { columns, index, rows }
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cells of one column in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |row| row[idx].as_deref())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?[idx].as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    /// First distinct value in first-seen order. `None` when the column has no data.
    pub min: Option<String>,
    /// Last distinct value in first-seen order. `None` when the column has no data.
    pub max: Option<String>,
    pub top_values: SmallVec<[ValueCount; TOP_VALUES_INLINE]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub missing_count: usize,
    pub unique_count: usize,
    pub stats: ColumnStats,
}

impl ColumnProfile {
    pub fn kind(&self) -> ColumnKind {
        match self.stats {
            ColumnStats::Numeric(_) => ColumnKind::Numeric,
            ColumnStats::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEdge {
    pub column_a: String,
    pub column_b: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub column: String,
    pub buckets: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryChart {
    pub column: String,
    pub bars: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub row_count: usize,
    pub column_count: usize,
    pub column_names: Vec<String>,
    pub column_profiles: Vec<ColumnProfile>,
    pub insights: Vec<String>,
    pub correlations: Vec<CorrelationEdge>,
    pub histograms: Vec<Histogram>,
    pub category_bars: Vec<CategoryChart>,
}

/// Tunables for one analysis run. The defaults reproduce the dashboard's behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub delimiter: char,
    /// Entries kept in a categorical profile's `top_values`.
    pub top_values: usize,
    /// Bars kept per category chart.
    pub category_bar_limit: usize,
    pub histogram_bins: usize,
    /// How many numeric columns (in column order) get a histogram.
    pub histogram_columns: usize,
    /// How many categorical columns (in column order) get a category chart.
    pub category_chart_columns: usize,
    /// Edges are kept when `|r|` is strictly greater than this.
    pub correlation_threshold: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            top_values: 5,
            category_bar_limit: 10,
            histogram_bins: 4,
            histogram_columns: 2,
            category_chart_columns: 3,
            correlation_threshold: 0.3,
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.histogram_bins == 0 {
            return Err(AppError::InvalidInput("histogram_bins must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(AppError::InvalidInput(format!(
                "correlation_threshold must be within [0, 1], got {}",
                self.correlation_threshold
            )));
        }
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(AppError::InvalidInput("delimiter cannot be a line break".to_string()));
        }
        Ok(())
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_and_truncates_rows() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Some("1".to_string())],
                vec![Some("2".to_string()), Some("x".to_string()), Some("extra".to_string())],
            ],
        );

        assert!(table.rows().iter().all(|row| row.len() == 2));
        assert_eq!(table.cell(0, "b"), None);
        assert_eq!(table.cell(1, "b"), Some("x"));
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column(0).collect::<Vec<_>>(), vec![Some("1"), Some("2")]);
    }

    #[test]
    fn default_options_match_dashboard_constants() {
        let options = AnalysisOptions::default();
        assert_eq!(options.delimiter, ',');
        assert_eq!(options.top_values, 5);
        assert_eq!(options.category_bar_limit, 10);
        assert_eq!(options.histogram_bins, 4);
        assert_eq!(options.histogram_columns, 2);
        assert_eq!(options.category_chart_columns, 3);
        assert_eq!(options.correlation_threshold, 0.3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn invalid_options_are_rejected() {
        let zero_bins = AnalysisOptions { histogram_bins: 0, ..Default::default() };
        assert!(matches!(zero_bins.validate(), Err(AppError::InvalidInput(_))));

        let threshold = AnalysisOptions { correlation_threshold: 1.5, ..Default::default() };
        assert!(threshold.validate().is_err());

        let newline = AnalysisOptions::default().with_delimiter('\n');
        assert!(newline.validate().is_err());
    }

    #[test]
    fn stats_serialize_with_kind_tag() {
        let profile = ColumnProfile {
            name: "A".to_string(),
            missing_count: 0,
            unique_count: 1,
            stats: ColumnStats::Numeric(NumericStats {
                mean: 1.0,
                median: 1.0,
                std_dev: 0.0,
                min: 1.0,
                max: 1.0,
            }),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["stats"]["kind"], "numeric");
        assert_eq!(json["stats"]["std_dev"], 0.0);
        assert_eq!(profile.kind(), ColumnKind::Numeric);
    }
}
