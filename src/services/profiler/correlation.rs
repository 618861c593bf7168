use super::types::CorrelationEdge;

/// A numeric column as it appears row by row. `None` marks a cell with no number.
#[derive(Debug, Clone)]
pub struct NumericSeries<'a> {
    pub name: &'a str,
    pub values: Vec<Option<f64>>,
}

/// Pearson correlation over the rows where both sides have a value.
///
/// Returns `None` when fewer than two aligned pairs exist or either side has zero
/// variance, since the coefficient is undefined there.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut numerator, mut ss_x, mut ss_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        ss_x += dx * dx;
        ss_y += dy * dy;
    }

    if ss_x == 0.0 || ss_y == 0.0 {
        return None;
    }

    let r = numerator / (ss_x * ss_y).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Every pair `i < j` whose coefficient magnitude exceeds `threshold`, in discovery order.
pub fn significant_correlations(series: &[NumericSeries<'_>], threshold: f64) -> Vec<CorrelationEdge> {
    let mut edges = Vec::new();

    for (i, a) in series.iter().enumerate() {
        for b in &series[i + 1..] {
            match pearson(&a.values, &b.values) {
                Some(r) if r.abs() > threshold => edges.push(CorrelationEdge {
                    column_a: a.name.to_string(),
                    column_b: b.name.to_string(),
                    coefficient: r,
                }),
                Some(_) => {}
                None => tracing::debug!(
                    "Correlation between '{}' and '{}' is undefined, skipping",
                    a.name,
                    b.name
                ),
            }
        }
    }

    edges
}
