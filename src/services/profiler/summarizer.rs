use rayon::prelude::*;
use smallvec::SmallVec;
use super::types::*;
use super::utils::{first_seen_counts, parse_number, rank_by_count};

/// Profiles every column of `table`, in column order.
pub fn summarize_table(table: &Table, options: &AnalysisOptions) -> Vec<ColumnProfile> {
    (0..table.column_count())
        .into_par_iter()
        .map(|idx| {
            let values: Vec<&str> = table.column(idx).flatten().collect();
            summarize_column(&table.column_names()[idx], &values, table.row_count(), options)
        })
        .collect()
}

/// Classifies one column and computes its statistics from its non-missing values.
pub fn summarize_column(
    name: &str,
    values: &[&str],
    row_count: usize,
    options: &AnalysisOptions,
) -> ColumnProfile {
    let counts = first_seen_counts(values.iter().copied());
    let missing_count = row_count - values.len();
    let unique_count = counts.len();

    let stats = match numeric_values(values) {
        Some(numbers) => ColumnStats::Numeric(numeric_stats(numbers)),
        None => {
            let min = counts.first().map(|c| c.value.clone());
            let max = counts.last().map(|c| c.value.clone());
            let top_values: SmallVec<[ValueCount; TOP_VALUES_INLINE]> =
                rank_by_count(counts, options.top_values).into_iter().collect();
            ColumnStats::Categorical(CategoricalStats { min, max, top_values })
        }
    };

    ColumnProfile {
        name: name.to_string(),
        missing_count,
        unique_count,
        stats,
    }
}

/// Every value parsed as a float, or `None` if the column is empty or any value fails.
fn numeric_values(values: &[&str]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    values.iter().map(|v| parse_number(v)).collect()
}

/// Requires a non-empty slice.
fn numeric_stats(mut numbers: Vec<f64>) -> NumericStats {
    numbers.sort_by(|a, b| a.total_cmp(b));
    let n = numbers.len();
    let mean = numbers.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (numbers[n / 2 - 1] + numbers[n / 2]) / 2.0
    } else {
        numbers[n / 2]
    };
    let variance = numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    NumericStats {
        mean,
        median,
        std_dev: variance.sqrt(),
        min: numbers[0],
        max: numbers[n - 1],
    }
}
