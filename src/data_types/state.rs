use std::sync::Arc;

use super::axis::{AxisDescriptor, ColumnDescription};
use super::data::Heatmap3D;
use super::plot_configs::ViewConfig;
use super::request::{ChartOptions, PageId, RemoteObjectId};
use super::schema::Schema;
use crate::layout::{PageSize, TrellisLayout, TrellisShape};

/// Which dataset a view shows and where it lives.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewIdentity {
    pub remote_object_id: RemoteObjectId,
    pub row_count: u64,
    pub schema: Schema,
    pub page_id: PageId,
    pub title: String,
}

/// Everything a trellis histogram view needs to issue requests and redraw.
///
/// Transitions build a new value instead of mutating a shared one; the last
/// aggregation result is shared through an `Arc` so copies stay cheap.
#[derive(Clone, Debug)]
pub struct ViewState {
    pub identity: ViewIdentity,
    pub x_axis: AxisDescriptor,
    pub legend_axis: AxisDescriptor,
    pub group_by_axis: AxisDescriptor,
    pub shape: TrellisShape,
    pub window: PageSize,
    /// Fraction of the rows scanned; 1 means exact.
    pub sampling_rate: f64,
    pub relative: bool,
    pub data: Option<Arc<Heatmap3D>>,
}

impl ViewState {
    /// Lays out one panel per group-by bucket for the given page size.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: ViewIdentity,
        window: PageSize,
        sampling_rate: f64,
        x_axis: AxisDescriptor,
        legend_axis: AxisDescriptor,
        group_by_axis: AxisDescriptor,
        relative: bool,
        config: &ViewConfig,
    ) -> Self {
        let shape = Self::layout_for(window, config).compute(group_by_axis.bucket_count());
        Self::with_shape(
            identity,
            window,
            shape,
            sampling_rate,
            x_axis,
            legend_axis,
            group_by_axis,
            relative,
        )
    }

    /// Builds a state around an existing grid shape.
    #[allow(clippy::too_many_arguments)]
    pub fn with_shape(
        identity: ViewIdentity,
        window: PageSize,
        shape: TrellisShape,
        sampling_rate: f64,
        x_axis: AxisDescriptor,
        legend_axis: AxisDescriptor,
        group_by_axis: AxisDescriptor,
        relative: bool,
    ) -> Self {
        // panel count and group-by bucket count must agree
        let group_by_axis = if group_by_axis.bucket_count() == shape.bucket_count {
            group_by_axis
        } else {
            group_by_axis.with_bucket_count(shape.bucket_count)
        };
        Self {
            identity,
            x_axis,
            legend_axis,
            group_by_axis,
            shape,
            window,
            sampling_rate: sanitize_rate(sampling_rate),
            relative,
            data: None,
        }
    }

    pub fn layout_for(window: PageSize, config: &ViewConfig) -> TrellisLayout {
        TrellisLayout::new(window, config.legend_space_height, config.max_panel_aspect_ratio)
    }

    pub fn layout(&self, config: &ViewConfig) -> TrellisLayout {
        Self::layout_for(self.window, config)
    }

    pub fn is_exact(&self) -> bool {
        self.sampling_rate >= 1.0
    }

    /// Column list in request order: primary, legend, group-by.
    pub fn columns(&self) -> Vec<ColumnDescription> {
        vec![
            self.x_axis.column().clone(),
            self.legend_axis.column().clone(),
            self.group_by_axis.column().clone(),
        ]
    }

    pub fn panel_count(&self) -> usize {
        self.shape.bucket_count
    }

    /// Primary bucket count that fits the current panel width.
    pub fn default_buckets(&self, config: &ViewConfig) -> usize {
        config.buckets_for_width(self.shape.size.width)
    }

    pub fn options(&self, reuse_page: bool, exact: bool) -> ChartOptions {
        ChartOptions {
            reuse_page,
            relative: self.relative,
            exact,
        }
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate.min(1.0)
    } else {
        1.0
    }
}
