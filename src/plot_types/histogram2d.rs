// Stacked 2D histogram panel

use crate::data_types::{AxisDescriptor, BoxInfo, Heatmap, Schema};
use crate::layout::PageSize;
use crate::scales::LinearScale;

use super::PanelPlot;

/// One stacked segment, in panel pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub x_index: usize,
    pub y_index: usize,
    pub count: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Histogram whose bars are stacked by legend bucket.
///
/// Absolute plots extrapolate sampled counts by `1 / sampling_rate` and
/// share the trellis-wide maximum; relative plots scale every bar to 100.
#[derive(Clone, Debug, Default)]
pub struct Histogram2DPlot {
    size: PageSize,
    heatmap: Heatmap,
    x_axis: Option<AxisDescriptor>,
    sampling_rate: f64,
    relative: bool,
    global_max: u64,
    y_scale: LinearScale,
    bars: Vec<Bar>,
    x_label: String,
}

impl Histogram2DPlot {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            sampling_rate: 1.0,
            ..Default::default()
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn heatmap(&self) -> &Heatmap {
        &self.heatmap
    }

    pub fn global_max(&self) -> u64 {
        self.global_max
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn x_axis(&self) -> Option<&AxisDescriptor> {
        self.x_axis.as_ref()
    }

    fn bar_width(&self) -> f64 {
        let count = self.heatmap.x_bucket_count();
        if count == 0 {
            0.0
        } else {
            self.size.width / count as f64
        }
    }

    /// Multiplier turning raw counts of column `x` into y-axis units.
    fn column_scale(&self, x: usize) -> f64 {
        if self.relative {
            let total = self.heatmap.column_total(x);
            if total > 0 {
                100.0 / total as f64
            } else {
                1.0
            }
        } else {
            1.0 / self.sampling_rate
        }
    }

    fn update_y_scale(&mut self) {
        let max = if self.relative {
            100.0
        } else if self.global_max == 0 {
            1.0
        } else {
            self.global_max as f64 / self.sampling_rate
        };
        self.y_scale = LinearScale::new((0.0, max), (self.size.height, 0.0));
    }
}

impl PanelPlot for Histogram2DPlot {
    fn set_data(
        &mut self,
        heatmap: Heatmap,
        x_axis: &AxisDescriptor,
        sampling_rate: f64,
        relative: bool,
        schema: &Schema,
        global_max: u64,
    ) {
        self.heatmap = heatmap;
        self.x_axis = Some(x_axis.clone());
        self.sampling_rate = if sampling_rate > 0.0 { sampling_rate } else { 1.0 };
        self.relative = relative;
        self.global_max = global_max;
        self.x_label = schema.display_name(&x_axis.column().name);
        self.update_y_scale();
    }

    fn draw(&mut self) {
        self.bars.clear();
        let bar_width = self.bar_width();
        for (x, column) in self.heatmap.buckets.iter().enumerate() {
            let scale = self.column_scale(x);
            let mut below = 0.0;
            for (y, &count) in column.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let top = below + count as f64 * scale;
                let y_top = self.y_scale.map(top);
                let y_bottom = self.y_scale.map(below);
                self.bars.push(Bar {
                    x_index: x,
                    y_index: y,
                    count,
                    x: x as f64 * bar_width,
                    y: y_top,
                    width: bar_width,
                    height: y_bottom - y_top,
                });
                below = top;
            }
        }
    }

    fn clear(&mut self) {
        self.bars.clear();
    }

    fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.update_y_scale();
    }

    fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    fn box_info(&self, pixel_x: f64, bucket_y: f64) -> Option<BoxInfo> {
        let bar_width = self.bar_width();
        if bar_width <= 0.0 || pixel_x < 0.0 {
            return None;
        }
        let x_index = (pixel_x / bar_width).floor() as usize;
        let column = self.heatmap.buckets.get(x_index)?;
        let column_total = self.heatmap.column_total(x_index);
        let scale = self.column_scale(x_index);

        let mut scaled = 0.0;
        let mut count_below = 0;
        for (y_index, &count) in column.iter().enumerate() {
            scaled += count as f64 * scale;
            count_below += count;
            if scaled >= bucket_y {
                return Some(BoxInfo {
                    x_index,
                    y_index,
                    count,
                    count_below,
                    column_total,
                });
            }
        }
        Some(BoxInfo {
            x_index,
            y_index: column.len(),
            count: 0,
            count_below,
            column_total,
        })
    }

    fn bucket_count(&self) -> usize {
        self.heatmap.x_bucket_count()
    }
}
