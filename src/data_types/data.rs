use serde::{Deserialize, Serialize};

/// Counts for one panel, indexed `[primary bucket][legend bucket]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub buckets: Vec<Vec<u64>>,
    pub missing_data: u64,
    pub total_size: u64,
}

impl Heatmap {
    pub fn x_bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn y_bucket_count(&self) -> usize {
        self.buckets.first().map(|b| b.len()).unwrap_or(0)
    }

    /// Stacked height of primary bucket `x`.
    pub fn column_total(&self, x: usize) -> u64 {
        self.buckets.get(x).map(|c| c.iter().sum()).unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Aggregation result of a trellis request, indexed
/// `[panel][primary bucket][legend bucket]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap3D {
    pub buckets: Vec<Vec<Vec<u64>>>,
    pub either_missing: u64,
    pub total_present: u64,
}

impl Heatmap3D {
    pub fn panel_count(&self) -> usize {
        self.buckets.len()
    }

    /// Sum of all counts in panel `index`; 0 for a missing panel.
    pub fn panel_total(&self, index: usize) -> u64 {
        self.buckets
            .get(index)
            .map(|panel| panel.iter().flatten().sum())
            .unwrap_or(0)
    }

    /// Legend buckets of the first non-empty column.
    pub fn legend_bucket_count(&self) -> Option<usize> {
        self.buckets
            .iter()
            .flatten()
            .map(Vec::len)
            .find(|&len| len > 0)
    }

    /// The 2D histogram of a single panel.
    pub fn panel(&self, index: usize) -> Heatmap {
        Heatmap {
            buckets: self.buckets.get(index).cloned().unwrap_or_default(),
            missing_data: self.either_missing,
            total_size: self.either_missing + self.total_present,
        }
    }
}

/// The stacked box under a point of a panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxInfo {
    pub x_index: usize,
    /// Legend bucket; equals the legend bucket count above the stack.
    pub y_index: usize,
    pub count: u64,
    /// Cumulative count up to and including this box.
    pub count_below: u64,
    pub column_total: u64,
}

impl BoxInfo {
    /// Share of the box within its column, in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.count == 0 || self.column_total == 0 {
            0.0
        } else {
            self.count as f64 / self.column_total as f64
        }
    }
}
