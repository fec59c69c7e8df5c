use serde::{Deserialize, Serialize};

use crate::scales::LinearScale;
use crate::utils::date_formatter::format_date_in_span;
use crate::utils::{significant_digits, truncate_label};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContentsKind {
    Integer,
    Double,
    /// Milliseconds since the Unix epoch.
    Date,
    String,
    Category,
}

impl ContentsKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Double | Self::Date)
    }
}

/// Identity of a column being visualized.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ColumnDescription {
    pub name: String,
    pub kind: ContentsKind,
}

impl ColumnDescription {
    pub fn new(name: impl Into<String>, kind: ContentsKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Value range of a column, as computed by the remote range pass.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum DataRange {
    Numeric { min: f64, max: f64 },
    Categorical { labels: Vec<String> },
}

/// Describes one visualized dimension: a column bucketed into a fixed number
/// of buckets. Never mutated; every change builds a new descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisDescriptor {
    column: ColumnDescription,
    bucket_count: usize,
    range: Option<DataRange>,
}

impl AxisDescriptor {
    pub fn new(column: ColumnDescription, bucket_count: usize, range: Option<DataRange>) -> Self {
        Self {
            column,
            bucket_count: bucket_count.max(1),
            range,
        }
    }

    /// An axis whose range has not been computed yet.
    pub fn unloaded(column: ColumnDescription, bucket_count: usize) -> Self {
        Self::new(column, bucket_count, None)
    }

    pub fn column(&self) -> &ColumnDescription {
        &self.column
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn range(&self) -> Option<&DataRange> {
        self.range.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.range.is_some()
    }

    /// Same column and range, different bucketing.
    pub fn with_bucket_count(&self, bucket_count: usize) -> Self {
        Self::new(self.column.clone(), bucket_count, self.range.clone())
    }

    /// Numeric bounds of bucket `index` as `[low, high)`.
    pub fn bucket_bounds(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.bucket_count {
            return None;
        }
        match self.range.as_ref()? {
            DataRange::Numeric { min, max } => {
                let width = (max - min) / self.bucket_count as f64;
                Some((min + width * index as f64, min + width * (index + 1) as f64))
            }
            DataRange::Categorical { labels } => {
                let per = labels.len() as f64 / self.bucket_count as f64;
                Some(((index as f64 * per).floor(), ((index + 1) as f64 * per).floor()))
            }
        }
    }

    /// Bucket holding `value`. Categorical values are label indexes.
    pub fn value_to_bucket(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let (min, max) = match self.range.as_ref()? {
            DataRange::Numeric { min, max } => (*min, *max),
            DataRange::Categorical { labels } => (0.0, labels.len() as f64),
        };
        if value < min || value > max {
            return None;
        }
        if max <= min {
            return Some(0);
        }
        let index = ((value - min) / (max - min) * self.bucket_count as f64).floor() as usize;
        Some(index.min(self.bucket_count - 1))
    }

    /// Human-readable description of a bucket; empty when out of range.
    pub fn bucket_description(&self, index: usize, max_chars: usize) -> String {
        if index >= self.bucket_count {
            return String::new();
        }
        let text = match &self.range {
            None => index.to_string(),
            Some(DataRange::Categorical { labels }) => {
                let Some((low, high)) = self.bucket_bounds(index) else {
                    return String::new();
                };
                let first = low as usize;
                let last = (high as usize).saturating_sub(1).max(first);
                match (labels.get(first), labels.get(last)) {
                    (Some(a), Some(b)) if first != last => format!("{}..{}", a, b),
                    (Some(a), _) => a.clone(),
                    _ => String::new(),
                }
            }
            Some(DataRange::Numeric { .. }) => {
                let Some((low, high)) = self.bucket_bounds(index) else {
                    return String::new();
                };
                if self.column.kind == ContentsKind::Integer && high - low <= 1.0 {
                    self.format_value(low)
                } else {
                    format!("[{}, {})", self.format_value(low), self.format_value(high))
                }
            }
        };
        truncate_label(&text, max_chars)
    }

    /// Maps a pixel offset within `extent` pixels back to a data value.
    pub fn invert_to_number(&self, pixel: f64, extent: f64) -> Option<f64> {
        if extent <= 0.0 || !pixel.is_finite() {
            return None;
        }
        let fraction = (pixel / extent).clamp(0.0, 1.0);
        match self.range.as_ref()? {
            DataRange::Numeric { min, max } => {
                let value = if max > min {
                    LinearScale::new((*min, *max), (0.0, extent)).invert(pixel.clamp(0.0, extent))
                } else {
                    *min
                };
                if self.column.kind == ContentsKind::Integer {
                    Some(value.round())
                } else {
                    Some(value)
                }
            }
            DataRange::Categorical { labels } => {
                if labels.is_empty() {
                    return None;
                }
                let index = (fraction * labels.len() as f64).floor() as usize;
                Some(index.min(labels.len() - 1) as f64)
            }
        }
    }

    /// Display string for the value under a pixel.
    pub fn invert(&self, pixel: f64, extent: f64) -> String {
        let Some(value) = self.invert_to_number(pixel, extent) else {
            return String::new();
        };
        match &self.range {
            Some(DataRange::Categorical { labels }) => {
                labels.get(value as usize).cloned().unwrap_or_default()
            }
            _ => self.format_value(value),
        }
    }

    fn format_value(&self, value: f64) -> String {
        match (self.column.kind, &self.range) {
            (ContentsKind::Date, Some(DataRange::Numeric { min, max })) => {
                format_date_in_span(value, max - min)
            }
            (ContentsKind::Integer, _) => format!("{}", value.round() as i64),
            _ => significant_digits(value),
        }
    }
}
