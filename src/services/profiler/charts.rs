use super::types::{CategoryChart, Histogram, HistogramBucket};
use super::utils::{first_seen_counts, format_bound, rank_by_count};

/// Buckets `values` into `bins` fixed-width bins spanning their range.
///
/// When every value is equal the width is zero and all values land in the first bin.
pub fn build_histogram(column: &str, values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() {
        return Histogram { column: column.to_string(), buckets: Vec::new() };
    }
    let bins = bins.max(1);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let width = (max - min) / bins as f64;
    let mut buckets: Vec<HistogramBucket> = (0..bins)
        .map(|i| {
            let lower = min + i as f64 * width;
            let upper = if i + 1 == bins { max } else { min + (i + 1) as f64 * width };
            HistogramBucket {
                label: format!("{}-{}", format_bound(lower), format_bound(upper)),
                count: 0,
            }
        })
        .collect();

    for &value in values {
        let idx = if width > 0.0 {
            (((value - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        buckets[idx].count += 1;
    }

    Histogram { column: column.to_string(), buckets }
}

/// Frequency bars for the non-missing values of a categorical column.
pub fn build_category_chart<'a, I>(column: &str, values: I, limit: usize) -> CategoryChart
where
    I: IntoIterator<Item = &'a str>,
{
    CategoryChart {
        column: column.to_string(),
        bars: rank_by_count(first_seen_counts(values), limit),
    }
}
