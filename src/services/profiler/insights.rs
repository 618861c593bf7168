use super::types::{ColumnProfile, CorrelationEdge};

/// Percentage of non-missing cells, rounded. A table with no cells scores 100.
pub fn data_quality_score(total_missing: usize, total_cells: usize) -> u32 {
    if total_cells == 0 {
        return 100;
    }
    (100.0 * (1.0 - total_missing as f64 / total_cells as f64)).round() as u32
}

pub fn generate_insights(
    row_count: usize,
    profiles: &[ColumnProfile],
    correlations: &[CorrelationEdge],
) -> Vec<String> {
    let column_count = profiles.len();
    let total_missing: usize = profiles.iter().map(|p| p.missing_count).sum();
    let quality = data_quality_score(total_missing, row_count * column_count);

    let mut insights = vec![
        format!("Dataset contains {} rows and {} columns", row_count, column_count),
        format!("Data quality score: {}% ({} missing values)", quality, total_missing),
    ];

    let numeric = profiles.iter().filter(|p| p.is_numeric()).count();
    let categorical = column_count - numeric;
    if numeric > 0 {
        insights.push(format!("{} numeric columns detected for statistical analysis", numeric));
    }
    if categorical > 0 {
        insights.push(format!("{} categorical columns identified for grouping operations", categorical));
    }
    if !correlations.is_empty() {
        insights.push(format!(
            "Found {} significant correlations between numeric variables",
            correlations.len()
        ));
    }

    insights
}
