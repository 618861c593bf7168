use std::collections::{HashMap, HashSet};
use super::types::ValueCount;

/// Returns a header name that is not yet in `existing_names`, suffixing `_1`, `_2`, ...
/// on collision. Blank headers are named after their 1-based position.
pub fn unique_column_name(name: &str, position: usize, existing_names: &mut HashSet<String>) -> String {
    let base_name = if name.is_empty() {
        format!("column_{}", position + 1)
    } else {
        name.to_string()
    };

    let mut cleaned = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(cleaned.clone()) {
        cleaned = format!("{}_{}", base_name, counter);
        counter += 1;
    }

    cleaned
}

/// Reads the longest numeric prefix of `value`, ignoring anything after it,
/// so `"2024-01-15"` reads as `2024.0` and `"12abc"` as `12.0`.
///
/// Accepts an optional sign followed by digits with an optional fraction and
/// exponent, or `Infinity`. Returns `None` when no digits lead the token.
/// Overflowing literals come back infinite; callers reject non-finite statistics.
pub fn parse_number(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let sign_len = end;
    if s[end..].starts_with("Infinity") {
        let inf = if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
        return Some(inf);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            end = frac_end;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    // "5." and ".5" forms are normalised so the std parser accepts them
    let number = &s[..end];
    let mut normalised = String::with_capacity(number.len() + 2);
    normalised.push_str(&number[..sign_len]);
    if int_digits == 0 {
        normalised.push('0');
    }
    normalised.push_str(number[sign_len..].trim_end_matches('.'));
    normalised.parse::<f64>().ok()
}

/// Distinct values with their frequencies, in first-seen order.
pub fn first_seen_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push(ValueCount { value: value.to_string(), count: 1 });
            }
        }
    }

    counts
}

/// Sorts by count descending and keeps `limit` entries. The sort is stable, so
/// equal counts stay in first-seen order.
pub fn rank_by_count(mut counts: Vec<ValueCount>, limit: usize) -> Vec<ValueCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Integer label for a bin bound, rounding half away from zero.
///
/// A negative bound that rounds to zero keeps its sign (`-0.3` reads `"-0"`),
/// while an exact zero reads `"0"` whatever its sign bit.
pub fn format_bound(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.0}", value.round())
}
