use crate::data_types::{AxisDescriptor, Schema};

use super::LegendPlot;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub index: usize,
    pub label: String,
    pub x: f64,
    pub width: f64,
    pub highlighted: bool,
}

/// Horizontal color strip describing the legend axis buckets.
#[derive(Clone, Debug, Default)]
pub struct HistogramLegendPlot {
    width: f64,
    axis: Option<AxisDescriptor>,
    title: String,
    missing: bool,
    highlighted: Option<usize>,
    entries: Vec<LegendEntry>,
}

impl HistogramLegendPlot {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn shows_missing(&self) -> bool {
        self.missing
    }
}

impl LegendPlot for HistogramLegendPlot {
    fn set_data(&mut self, axis: &AxisDescriptor, missing: bool, schema: &Schema) {
        self.axis = Some(axis.clone());
        self.missing = missing;
        self.title = schema.display_name(&axis.column().name);
    }

    fn draw(&mut self) {
        self.entries.clear();
        let Some(axis) = &self.axis else {
            return;
        };
        let count = axis.bucket_count();
        let swatch = self.width / count as f64;
        self.entries = (0..count)
            .map(|index| LegendEntry {
                index,
                label: axis.bucket_description(index, 0),
                x: index as f64 * swatch,
                width: swatch,
                highlighted: self.highlighted == Some(index),
            })
            .collect();
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.highlighted = None;
    }

    fn highlight(&mut self, bucket: Option<usize>) {
        self.highlighted = bucket;
        for entry in &mut self.entries {
            entry.highlighted = Some(entry.index) == bucket;
        }
    }

    fn width(&self) -> f64 {
        self.width
    }
}
