use tracing::{debug, warn};

use crate::chart::{DataView, TrellisCapable};
use crate::layout::{PanelRect, TOP_MARGIN};
use crate::utils::{percent, significant_digits};
use crate::view_controller::ViewController;

use super::TrellisHistogram2DView;

/// A rectangular drag in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub origin: (f64, f64),
    pub end: (f64, f64),
}

impl TrellisHistogram2DView {
    /// Updates the hover description for a canvas point.
    pub fn on_mouse_move(&mut self, x: f64, y: f64) {
        let Some(values) = self.describe_point(x, y) else {
            self.on_mouse_leave();
            return;
        };
        let (values, legend_bucket) = values;
        self.overlay.update(x, y, values);
        self.legend.write().highlight(Some(legend_bucket));
    }

    pub fn on_mouse_leave(&mut self) {
        self.overlay.show(false);
        self.legend.write().highlight(None);
    }

    /// Overlay values under a canvas point and the legend bucket hovered.
    fn describe_point(&self, x: f64, y: f64) -> Option<(Vec<String>, usize)> {
        let position = self.panel_at(x, y)?;
        let plot = self.panels.get(position.plot_index)?.read();
        let state = &self.state;

        let xs = state.x_axis.invert(position.x, state.shape.size.width);
        let count_y = plot.y_scale().invert(position.y).round();
        let info = plot.box_info(position.x, count_y)?;

        let value = state.legend_axis.bucket_description(info.y_index, 0);
        let group = state.group_by_axis.bucket_description(
            position.plot_index,
            self.controller.config().group_label_width,
        );
        Some((
            vec![
                xs,
                value,
                group,
                significant_digits(count_y),
                percent(info.fraction()),
                significant_digits(info.count as f64),
            ],
            info.y_index,
        ))
    }

    pub fn drag_start(&mut self, x: f64, y: f64) {
        self.selection = Some(Selection {
            origin: (x, y),
            end: (x, y),
        });
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        if let Some(selection) = &mut self.selection {
            selection.end = (x, y);
        }
    }

    /// Rectangle to draw for the selection in progress. A selection inside a
    /// single panel covers the panel's full height.
    pub fn selection_rect(&self) -> Option<PanelRect> {
        let selection = self.selection?;
        let (x0, y0) = selection.origin;
        let (x1, y1) = selection.end;
        let mut rect = PanelRect {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        };
        if let (Some(a), Some(b)) = (self.panel_at(x0, y0), self.panel_at(x1, y1)) {
            if a.plot_index == b.plot_index {
                let (_, top) = self.state.shape.panel_origin(a.plot_index);
                rect.y = top + TOP_MARGIN;
                rect.height = self.state.shape.size.height;
            }
        }
        Some(rect)
    }

    /// Turns the finished drag into a filter: a primary range inside one
    /// panel, or the groups of every panel between both ends.
    pub fn selection_completed(&mut self, x: f64, y: f64, complement: bool) {
        let Some(mut selection) = self.selection.take() else {
            return;
        };
        selection.end = (x, y);
        let start = self.panel_at(selection.origin.0, selection.origin.1);
        let end = self.panel_at(x, y);
        let (Some(start), Some(end)) = (start, end) else {
            debug!(?selection, "selection ends outside the panels");
            return;
        };

        let filter = if start.plot_index == end.plot_index {
            ViewController::range_filter(
                &self.state.x_axis,
                start.x,
                end.x,
                self.state.shape.size.width,
                complement,
            )
        } else {
            ViewController::group_filter(
                &self.state.group_by_axis,
                start.plot_index,
                end.plot_index,
                complement,
            )
        };
        match filter {
            Some(filter) => self.handle_filter(filter),
            None => debug!(?selection, "selection does not map to data"),
        }
    }

    /// Selection on the legend strip, in legend pixels.
    pub fn legend_selection_completed(&mut self, xl: f64, xr: f64, complement: bool) {
        let width = self.legend.read().width();
        match ViewController::legend_filter(&self.state.legend_axis, xl, xr, width, complement) {
            Ok(filter) => self.handle_filter(filter),
            Err(e) => {
                warn!(xl, xr, "empty legend selection");
                self.page.report_error(&e.user_message());
            }
        }
    }
}
