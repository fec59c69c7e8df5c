//! View capabilities
//!
//! A chart view is polymorphic over a small set of capabilities rather than a
//! class hierarchy. `DataView` is what every view renders and persists;
//! `TrellisCapable` adds the panel grid shared by all trellis chart kinds.

use serde::Serialize;

use crate::data_types::{
    ChartKind, ChartOptions, ColumnDescription, FilterDescription, Heatmap3D, RemoteObjectId,
    RequestDescriptor,
};
use crate::layout::{PageSize, PanelPosition, TrellisShape, LEFT_MARGIN, TOP_MARGIN};
use crate::plot_types::PanelPlotHandle;

pub trait DataView {
    /// Persistable record of the view.
    type Record: Serialize;

    /// Renders a (possibly partial) result; `None` is a tick with nothing new.
    fn update_view(&mut self, data: Option<Heatmap3D>);

    fn serialize(&self) -> Self::Record;

    /// Builds the request drawing the result of a combine operation.
    fn combine_handler(&self, title: &str) -> CombineHandler;

    fn handle_filter(&mut self, filter: FilterDescription);
}

pub trait TrellisCapable {
    fn shape(&self) -> &TrellisShape;

    fn panels(&self) -> &[PanelPlotHandle];

    fn resize(&mut self, window: PageSize);

    /// Canvas point to chart-area point.
    fn canvas_to_chart(&self, x: f64, y: f64) -> (f64, f64) {
        (x - LEFT_MARGIN, y - TOP_MARGIN)
    }

    /// Panel under a canvas point.
    fn panel_at(&self, x: f64, y: f64) -> Option<PanelPosition> {
        let (cx, cy) = self.canvas_to_chart(x, y);
        self.shape().position(cx, cy)
    }
}

/// Keeps the column set and flags of a view so the dataset produced by a
/// combine operation is drawn the same way, on a new page.
#[derive(Clone, Debug, PartialEq)]
pub struct CombineHandler {
    title: String,
    columns: Vec<ColumnDescription>,
    options: ChartOptions,
}

impl CombineHandler {
    pub fn new(title: impl Into<String>, columns: Vec<ColumnDescription>, options: ChartOptions) -> Self {
        Self {
            title: title.into(),
            columns,
            options,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn request_for(&self, combined: RemoteObjectId) -> RequestDescriptor {
        RequestDescriptor::new(
            combined,
            ChartKind::Trellis2DHistogram,
            self.columns.clone(),
            vec![0; self.columns.len()],
            self.options,
        )
        .with_title(self.title.clone())
    }
}
