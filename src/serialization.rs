//! Persisted form of a trellis histogram view.
//!
//! The record is flat and every field is optional on input so a missing field
//! can be told apart from a present zero. Aggregation results are never stored;
//! a reconstructed view starts empty with unloaded axes.

use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data_types::{
    AxisDescriptor, ColumnDescription, PageId, RemoteObjectId, Schema, ViewConfig, ViewIdentity,
    ViewState,
};
use crate::error::{Result, ViewError};
use crate::layout::PageSize;

pub const VIEW_KIND: &str = "Trellis2DHistogram";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrellisHistogram2DSerialization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<PageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub remote_object_id: Option<RemoteObjectId>,
    pub row_count: Option<u64>,
    pub schema: Option<Schema>,
    pub x_windows: Option<usize>,
    pub y_windows: Option<usize>,
    pub sampling_rate: Option<f64>,
    pub column_description0: Option<ColumnDescription>,
    pub column_description1: Option<ColumnDescription>,
    pub x_bucket_count: Option<usize>,
    pub y_bucket_count: Option<usize>,
    pub relative: Option<bool>,
    pub group_by_column: Option<ColumnDescription>,
    pub group_by_bucket_count: Option<usize>,
}

pub fn serialize(state: &ViewState) -> TrellisHistogram2DSerialization {
    TrellisHistogram2DSerialization {
        view_kind: Some(VIEW_KIND.to_string()),
        page_id: Some(state.identity.page_id),
        title: Some(state.identity.title.clone()),
        remote_object_id: Some(state.identity.remote_object_id.clone()),
        row_count: Some(state.identity.row_count),
        schema: Some(state.identity.schema.clone()),
        x_windows: Some(state.shape.x_num),
        y_windows: Some(state.shape.y_num),
        sampling_rate: Some(state.sampling_rate),
        column_description0: Some(state.x_axis.column().clone()),
        column_description1: Some(state.legend_axis.column().clone()),
        x_bucket_count: Some(state.x_axis.bucket_count()),
        y_bucket_count: Some(state.legend_axis.bucket_count()),
        relative: Some(state.relative),
        group_by_column: Some(state.group_by_axis.column().clone()),
        group_by_bucket_count: Some(state.shape.bucket_count),
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| {
        warn!(field, "cannot reconstruct view");
        ViewError::MissingField(field)
    })
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ViewError {
    let reason = reason.into();
    warn!(field, %reason, "cannot reconstruct view");
    ViewError::InvalidField { field, reason }
}

/// An absent bucket count takes the default; a present one must be usable.
fn bucket_count(
    value: Option<usize>,
    field: &'static str,
    default: usize,
    config: &ViewConfig,
) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(count) if config.is_valid_bucket_count(count) => Ok(count),
        Some(count) => Err(invalid(
            field,
            format!(
                "{} is not between 1 and {}",
                count, config.max_bucket_count
            ),
        )),
    }
}

/// Rebuilds a view state laid out in `window`. Axes come back unloaded and
/// the state holds no data until a request completes.
pub fn reconstruct(
    record: TrellisHistogram2DSerialization,
    window: PageSize,
    config: &ViewConfig,
) -> Result<ViewState> {
    let remote_object_id = required(record.remote_object_id, "remoteObjectId")?;
    let row_count = required(record.row_count, "rowCount")?;
    let x_windows = required(record.x_windows, "xWindows")?;
    let y_windows = required(record.y_windows, "yWindows")?;
    let groups = required(record.group_by_bucket_count, "groupByBucketCount")?;
    let sampling_rate = required(record.sampling_rate, "samplingRate")?;
    let schema = required(record.schema, "schema")?;
    let x_column = required(record.column_description0, "columnDescription0")?;
    let legend_column = required(record.column_description1, "columnDescription1")?;
    let group_column = required(record.group_by_column, "groupByColumn")?;

    if x_windows == 0 || y_windows == 0 {
        return Err(invalid("xWindows", "grid must have at least one row and column"));
    }
    if groups == 0 {
        return Err(invalid("groupByBucketCount", "must be at least 1"));
    }
    if groups > config.max_bucket_count {
        return Err(invalid(
            "groupByBucketCount",
            format!("must be at most {}", config.max_bucket_count),
        ));
    }
    if groups > x_windows.saturating_mul(y_windows) {
        return Err(invalid(
            "groupByBucketCount",
            format!("{} groups do not fit a {}x{} grid", groups, x_windows, y_windows),
        ));
    }
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(invalid("samplingRate", format!("{} is not a rate", sampling_rate)));
    }

    let shape = ViewState::layout_for(window, config).with_grid(x_windows, y_windows, groups);
    let default_buckets = config.buckets_for_width(shape.size.width);
    let x_buckets = bucket_count(record.x_bucket_count, "xBucketCount", default_buckets, config)?;
    let legend_buckets =
        bucket_count(record.y_bucket_count, "yBucketCount", default_buckets, config)?;
    let identity = ViewIdentity {
        remote_object_id,
        row_count,
        schema,
        page_id: record.page_id.unwrap_or_default(),
        title: record.title.unwrap_or_default(),
    };
    Ok(ViewState::with_shape(
        identity,
        window,
        shape,
        sampling_rate,
        AxisDescriptor::unloaded(x_column, x_buckets),
        AxisDescriptor::unloaded(legend_column, legend_buckets),
        AxisDescriptor::unloaded(group_column, groups),
        record.relative.unwrap_or(false),
    ))
}

pub fn to_json(state: &ViewState) -> eyre::Result<String> {
    serde_json::to_string(&serialize(state)).wrap_err("failed to encode trellis view")
}

pub fn from_json(text: &str) -> eyre::Result<TrellisHistogram2DSerialization> {
    serde_json::from_str(text).wrap_err("failed to decode trellis view record")
}
