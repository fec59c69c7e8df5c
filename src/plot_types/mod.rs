// Plot types module

pub mod histogram2d;
pub mod legend;

pub use histogram2d::{Bar, Histogram2DPlot};
pub use legend::{HistogramLegendPlot, LegendEntry};

use crate::data_types::{AxisDescriptor, BoxInfo, Heatmap, Schema};
use crate::layout::PageSize;
use crate::scales::LinearScale;
use parking_lot::RwLock;
use std::sync::Arc;

/// Rendered state of one trellis panel.
pub trait PanelPlot: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn set_data(
        &mut self,
        heatmap: Heatmap,
        x_axis: &AxisDescriptor,
        sampling_rate: f64,
        relative: bool,
        schema: &Schema,
        global_max: u64,
    );

    fn draw(&mut self);

    fn clear(&mut self);

    fn set_size(&mut self, size: PageSize);

    /// Maps data counts to panel pixels (pixel 0 at the top).
    fn y_scale(&self) -> &LinearScale;

    /// The stacked box at a panel pixel column and a y value in data units.
    fn box_info(&self, pixel_x: f64, bucket_y: f64) -> Option<BoxInfo>;

    /// Primary buckets currently shown.
    fn bucket_count(&self) -> usize;
}

/// Color legend shared by all panels.
pub trait LegendPlot: Send + Sync {
    fn set_data(&mut self, axis: &AxisDescriptor, missing: bool, schema: &Schema);

    fn draw(&mut self);

    fn clear(&mut self);

    fn highlight(&mut self, bucket: Option<usize>);

    /// Pixel width of the legend strip; selections are inverted against it.
    fn width(&self) -> f64;
}

pub type PanelPlotHandle = Arc<RwLock<dyn PanelPlot>>;
pub type LegendPlotHandle = Arc<RwLock<dyn LegendPlot>>;

pub fn panel_handle<P: PanelPlot + 'static>(plot: P) -> PanelPlotHandle {
    Arc::new(RwLock::new(plot))
}

pub fn legend_handle<P: LegendPlot + 'static>(plot: P) -> LegendPlotHandle {
    Arc::new(RwLock::new(plot))
}
