use crate::data_types::Heatmap3D;

use rayon::prelude::*;

/// Sum of all counts of each panel.
pub fn panel_totals(data: &Heatmap3D) -> Vec<u64> {
    data.buckets
        .par_iter()
        .map(|panel| panel.iter().flatten().sum())
        .collect()
}

/// Largest panel total; the shared Y scale of every panel of the trellis.
pub fn global_max(data: &Heatmap3D) -> u64 {
    panel_totals(data).into_iter().max().unwrap_or(0)
}

/// Redistributes the primary buckets of every panel into `x_buckets` buckets
/// without contacting the server. Totals per legend bucket are preserved.
pub fn rebucket(data: &Heatmap3D, x_buckets: usize) -> Heatmap3D {
    let buckets = data
        .buckets
        .par_iter()
        .map(|panel| rebucket_panel(panel, x_buckets))
        .collect();
    Heatmap3D {
        buckets,
        either_missing: data.either_missing,
        total_present: data.total_present,
    }
}

/// Rebuckets one panel indexed `[x][legend]` along x.
pub fn rebucket_panel(panel: &[Vec<u64>], x_buckets: usize) -> Vec<Vec<u64>> {
    let x_buckets = x_buckets.max(1);
    if panel.is_empty() || panel.len() == x_buckets {
        return panel.to_vec();
    }
    let legend = panel.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = vec![vec![0u64; legend]; x_buckets];
    for y in 0..legend {
        let column: Vec<u64> = panel.iter().map(|c| c.get(y).copied().unwrap_or(0)).collect();
        let prefix = prefix_sums(&column);
        let mut previous = 0u64;
        for (j, row) in out.iter_mut().enumerate() {
            let boundary = (j + 1) as f64 / x_buckets as f64;
            let cumulative = if j + 1 == x_buckets {
                prefix[column.len()]
            } else {
                interpolate(&column, &prefix, boundary)
            };
            row[y] = cumulative.saturating_sub(previous);
            previous = previous.max(cumulative);
        }
    }
    out
}

fn prefix_sums(values: &[u64]) -> Vec<u64> {
    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(0);
    let mut acc = 0u64;
    for v in values {
        acc += v;
        prefix.push(acc);
    }
    prefix
}

/// Rounded count left of `t` in [0, 1], spreading each bucket uniformly.
fn interpolate(values: &[u64], prefix: &[u64], t: f64) -> u64 {
    let position = t * values.len() as f64;
    let index = position.floor() as usize;
    if index >= values.len() {
        return prefix[values.len()];
    }
    let fraction = position - index as f64;
    let exact = prefix[index] as f64 + fraction * values[index] as f64;
    (exact + 0.5).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_midpoint() {
        let values = [10, 20];
        let prefix = prefix_sums(&values);
        assert_eq!(interpolate(&values, &prefix, 0.25), 5);
        assert_eq!(interpolate(&values, &prefix, 0.5), 10);
        assert_eq!(interpolate(&values, &prefix, 0.75), 20);
    }
}
