//! Trellis grid geometry.
//!
//! The chart area of a page is split into a grid of equally sized panels,
//! one per group-by bucket, filled row by row.

use serde::{Deserialize, Serialize};

/// Space reserved around the panel grid for the shared axes.
pub const LEFT_MARGIN: f64 = 40.0;
pub const TOP_MARGIN: f64 = 10.0;
pub const BOTTOM_MARGIN: f64 = 30.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Grid shape of a trellis plot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrellisShape {
    /// Panels per row.
    pub x_num: usize,
    /// Panels per column.
    pub y_num: usize,
    /// Size of a single panel.
    pub size: PageSize,
    /// Number of panels, i.e. the group-by bucket count.
    pub bucket_count: usize,
}

/// A point resolved to a panel, in panel-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPosition {
    pub plot_index: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TrellisShape {
    pub fn panel_origin(&self, index: usize) -> (f64, f64) {
        let x_num = self.x_num.max(1);
        let col = index % x_num;
        let row = index / x_num;
        (col as f64 * self.size.width, row as f64 * self.size.height)
    }

    pub fn panel_rect(&self, index: usize) -> Option<PanelRect> {
        if index >= self.bucket_count {
            return None;
        }
        let (x, y) = self.panel_origin(index);
        Some(PanelRect {
            x,
            y,
            width: self.size.width,
            height: self.size.height,
        })
    }

    /// Resolves a chart-area point to the panel containing it.
    pub fn position(&self, x: f64, y: f64) -> Option<PanelPosition> {
        if x < 0.0 || y < 0.0 || self.size.width <= 0.0 || self.size.height <= 0.0 {
            return None;
        }
        let col = (x / self.size.width).floor() as usize;
        let row = (y / self.size.height).floor() as usize;
        if col >= self.x_num || row >= self.y_num {
            return None;
        }
        let plot_index = row * self.x_num + col;
        if plot_index >= self.bucket_count {
            return None;
        }
        Some(PanelPosition {
            plot_index,
            x: x - col as f64 * self.size.width,
            y: y - row as f64 * self.size.height,
        })
    }

    /// Total pixels covered by the grid.
    pub fn grid_size(&self) -> PageSize {
        PageSize::new(
            self.size.width * self.x_num as f64,
            self.size.height * self.y_num as f64,
        )
    }
}

/// Computes trellis shapes for a page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrellisLayout {
    pub window: PageSize,
    pub legend_height: f64,
    pub max_ratio: f64,
}

impl TrellisLayout {
    pub fn new(window: PageSize, legend_height: f64, max_ratio: f64) -> Self {
        Self {
            window,
            legend_height,
            max_ratio,
        }
    }

    /// Space left for the panels once axes and legend are placed.
    pub fn chart_area(&self) -> PageSize {
        PageSize::new(
            (self.window.width - LEFT_MARGIN).max(0.0),
            (self.window.height - TOP_MARGIN - BOTTOM_MARGIN - self.legend_height).max(0.0),
        )
    }

    /// Picks the grid that gives each of `groups` panels the largest usable area.
    pub fn compute(&self, groups: usize) -> TrellisShape {
        let groups = groups.max(1);
        let area = self.chart_area();

        let mut best = (1, groups, 0.0, PageSize::default());
        for x_num in 1..=groups {
            let y_num = groups.div_ceil(x_num);
            let width = area.width / x_num as f64;
            let height = area.height / y_num as f64;
            let (width, height) = self.clamp_ratio(width, height);
            let usable = width * height;
            if usable > best.2 {
                best = (x_num, y_num, usable, PageSize::new(width, height));
            }
        }

        let (x_num, y_num, _, size) = best;
        TrellisShape {
            x_num,
            y_num,
            size,
            bucket_count: groups,
        }
    }

    /// Shape with a fixed grid, as restored from a persisted view.
    pub fn with_grid(&self, x_num: usize, y_num: usize, groups: usize) -> TrellisShape {
        let x_num = x_num.max(1);
        let y_num = y_num.max(1);
        let area = self.chart_area();
        TrellisShape {
            x_num,
            y_num,
            size: PageSize::new(area.width / x_num as f64, area.height / y_num as f64),
            bucket_count: groups.max(1),
        }
    }

    /// Same panel count laid out for this page size.
    pub fn resize(&self, shape: &TrellisShape) -> TrellisShape {
        self.compute(shape.bucket_count)
    }

    fn clamp_ratio(&self, width: f64, height: f64) -> (f64, f64) {
        if self.max_ratio <= 0.0 {
            return (width, height);
        }
        (
            width.min(height * self.max_ratio),
            height.min(width * self.max_ratio),
        )
    }
}
