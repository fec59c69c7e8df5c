use serde::{Deserialize, Serialize};

/// Screen resolution limits and behavior switches of a trellis view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Maximum number of buckets in a histogram.
    pub max_bucket_count: usize,
    /// Minimum width of a histogram bar in pixels.
    pub min_bar_width: f64,
    pub legend_space_height: f64,
    pub legend_bar_width: f64,
    pub table_rows_on_screen: usize,
    /// Maximum characters of a group label in the hover overlay.
    pub group_label_width: usize,
    /// Panels are never stretched beyond this width/height ratio.
    pub max_panel_aspect_ratio: f64,
    /// Cancel the previous bound request when a new one is issued.
    pub cancel_superseded: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_bucket_count: 40,
            min_bar_width: 15.0,
            legend_space_height: 60.0,
            legend_bar_width: 500.0,
            table_rows_on_screen: 20,
            group_label_width: 40,
            max_panel_aspect_ratio: 2.0,
            cancel_superseded: true,
        }
    }
}

impl ViewConfig {
    pub fn from_json_str(text: &str) -> eyre::Result<Self> {
        use eyre::WrapErr;
        serde_json::from_str(text).wrap_err("invalid trellis view configuration")
    }

    pub fn is_valid_bucket_count(&self, count: usize) -> bool {
        (1..=self.max_bucket_count).contains(&count)
    }

    /// Bars that fit in `width` pixels, within [1, max_bucket_count].
    pub fn buckets_for_width(&self, width: f64) -> usize {
        if width <= 0.0 || self.min_bar_width <= 0.0 {
            return 1;
        }
        ((width / self.min_bar_width).round() as usize).clamp(1, self.max_bucket_count.max(1))
    }
}
