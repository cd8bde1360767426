use std::collections::HashMap;
use std::hash::Hash;

/// Counts occurrences of each value, most frequent first.
///
/// Values with equal counts keep the order in which they were first seen.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut first_seen: Vec<T> = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();

    for value in values {
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(value);
        }
        *count += 1;
    }

    let mut result: Vec<(T, usize)> = first_seen
        .into_iter()
        .map(|v| {
            let n = counts[&v];
            (v, n)
        })
        .collect();
    // stable sort keeps first-seen order among ties
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// Most frequent value; ties go to whichever appeared first. `None` for empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(v, _)| v)
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rounds to `places` decimals, sending exact halves to the even neighbour.
pub fn round_half_even(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
