use serde::{Deserialize, Serialize};
use std::fmt;

use super::axis::ColumnDescription;

/// Identifier of a dataset object living on the aggregation server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteObjectId(pub String);

impl fmt::Display for RemoteObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PageId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    #[serde(rename = "Trellis2DHistogram")]
    Trellis2DHistogram,
    #[serde(rename = "TrellisHeatmap")]
    TrellisHeatmap,
    #[serde(rename = "2DHistogram")]
    Histogram2D,
    #[serde(rename = "Table")]
    Table,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trellis2DHistogram => "Trellis2DHistogram",
            Self::TrellisHeatmap => "TrellisHeatmap",
            Self::Histogram2D => "2DHistogram",
            Self::Table => "Table",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub reuse_page: bool,
    pub relative: bool,
    pub exact: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSortOrientation {
    pub column_description: ColumnDescription,
    pub is_ascending: bool,
}

/// Sort order of a table view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct RecordOrder(pub Vec<ColumnSortOrientation>);

impl RecordOrder {
    pub fn ascending(columns: &[ColumnDescription]) -> Self {
        Self(
            columns
                .iter()
                .map(|c| ColumnSortOrientation {
                    column_description: c.clone(),
                    is_ascending: true,
                })
                .collect(),
        )
    }
}

/// Range filter over one column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescription {
    pub min: f64,
    pub max: f64,
    pub min_string: String,
    pub max_string: String,
    pub cd: ColumnDescription,
    /// Keep the rows outside the range instead.
    pub complement: bool,
}

/// Everything the remote layer needs to start one aggregation.
/// A bucket count of 0 asks the server to choose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    pub source: RemoteObjectId,
    pub chart_kind: ChartKind,
    pub columns: Vec<ColumnDescription>,
    pub bucket_counts: Vec<usize>,
    pub options: ChartOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<RecordOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<usize>,
    /// Title of the page opened for the result, when not reusing the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RequestDescriptor {
    pub fn new(
        source: RemoteObjectId,
        chart_kind: ChartKind,
        columns: Vec<ColumnDescription>,
        bucket_counts: Vec<usize>,
        options: ChartOptions,
    ) -> Self {
        Self {
            source,
            chart_kind,
            columns,
            bucket_counts,
            options,
            filter: None,
            order: None,
            row_limit: None,
            title: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterDescription) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_order(mut self, order: RecordOrder, row_limit: usize) -> Self {
        self.order = Some(order);
        self.row_limit = Some(row_limit);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether the partial results come back to the view that issued it.
    pub fn targets_current_view(&self) -> bool {
        self.chart_kind == ChartKind::Trellis2DHistogram
            && self.options.reuse_page
            && self.filter.is_none()
    }
}
