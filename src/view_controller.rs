use tracing::warn;

use crate::chart::CombineHandler;
use crate::data_types::{
    AxisDescriptor, ChartKind, DataRange, FilterDescription, RecordOrder, RequestDescriptor,
    ViewConfig, ViewState,
};
use crate::error::{Result, ViewError};
use crate::layout::PageSize;
use crate::utils::reorder;

/// User commands understood by a trellis histogram view.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Refresh,
    ChooseBuckets(usize),
    SwapAxes,
    ToggleNormalization,
    /// Raw value from the group dialog; `None` when it did not parse.
    ChangeGroups(Option<i64>),
    Heatmap,
    Table,
    Exact,
    Resize(PageSize),
    Filter(FilterDescription),
}

/// Outcome of applying a command to a view state.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: ViewState,
    pub request: Option<RequestDescriptor>,
    /// Redraw from the cached result without contacting the server.
    pub redraw: bool,
}

impl Transition {
    fn request(state: ViewState, request: RequestDescriptor) -> Self {
        Self {
            state,
            request: Some(request),
            redraw: false,
        }
    }

    fn redraw(state: ViewState) -> Self {
        Self {
            state,
            request: None,
            redraw: true,
        }
    }
}

/// ViewController holds the business logic of the view commands
/// independently of any rendering surface to facilitate testing.
#[derive(Clone, Debug, Default)]
pub struct ViewController {
    config: ViewConfig,
}

impl ViewController {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Computes the state following `command` and the request it issues, if any.
    /// Invalid input yields an error and leaves `state` untouched.
    pub fn next_state(&self, state: &ViewState, command: Command) -> Result<Transition> {
        match command {
            Command::Refresh => Ok(Transition::request(state.clone(), self.refresh_request(state))),
            Command::ChooseBuckets(count) => self.choose_buckets(state, count),
            Command::SwapAxes => Ok(self.swap_axes(state)),
            Command::ToggleNormalization => Ok(self.toggle_normalization(state)),
            Command::ChangeGroups(groups) => self.change_groups(state, groups),
            Command::Heatmap => {
                let request = RequestDescriptor::new(
                    state.identity.remote_object_id.clone(),
                    ChartKind::TrellisHeatmap,
                    state.columns(),
                    vec![
                        state.default_buckets(&self.config),
                        state.legend_axis.bucket_count(),
                        state.shape.bucket_count,
                    ],
                    state.options(false, true),
                );
                Ok(Transition::request(state.clone(), request))
            }
            Command::Table => {
                let columns = state.columns();
                let request = RequestDescriptor::new(
                    state.identity.remote_object_id.clone(),
                    ChartKind::Table,
                    columns.clone(),
                    Vec::new(),
                    state.options(true, true),
                )
                .with_order(RecordOrder::ascending(&columns), self.config.table_rows_on_screen)
                .with_title("Table");
                Ok(Transition::request(state.clone(), request))
            }
            Command::Exact => Ok(self.exact(state.clone())),
            Command::Resize(window) => {
                let mut next = state.clone();
                next.window = window;
                next.shape = ViewState::layout_for(window, &self.config).resize(&state.shape);
                Ok(Transition::redraw(next))
            }
            Command::Filter(filter) => {
                Ok(Transition::request(state.clone(), self.filter_request(state, filter)))
            }
        }
    }

    /// Same columns, bucket counts and grouping.
    pub fn refresh_request(&self, state: &ViewState) -> RequestDescriptor {
        RequestDescriptor::new(
            state.identity.remote_object_id.clone(),
            ChartKind::Trellis2DHistogram,
            state.columns(),
            vec![
                state.x_axis.bucket_count(),
                state.legend_axis.bucket_count(),
                state.shape.bucket_count,
            ],
            state.options(true, state.is_exact()),
        )
    }

    /// Request against the dataset restricted by `filter`, shown on a new page.
    pub fn filter_request(&self, state: &ViewState, filter: FilterDescription) -> RequestDescriptor {
        let title = format!(
            "Filtered on {}",
            state.identity.schema.display_name(&filter.cd.name)
        );
        RequestDescriptor::new(
            state.identity.remote_object_id.clone(),
            ChartKind::Trellis2DHistogram,
            state.columns(),
            vec![0, 0, 0],
            state.options(false, state.is_exact()),
        )
        .with_filter(filter)
        .with_title(title)
    }

    /// Draws the result of a combine operation with this view's columns.
    pub fn combine_handler(&self, state: &ViewState, title: &str) -> CombineHandler {
        CombineHandler::new(title, state.columns(), state.options(false, state.is_exact()))
    }

    fn choose_buckets(&self, state: &ViewState, count: usize) -> Result<Transition> {
        if !self.config.is_valid_bucket_count(count) {
            let msg = format!(
                "Number of buckets must be between 1 and {}",
                self.config.max_bucket_count
            );
            warn!(count, "{}", msg);
            return Err(ViewError::user_input(msg));
        }
        let mut next = state.clone();
        next.x_axis = state.x_axis.with_bucket_count(count);
        if state.has_data() {
            return Ok(Transition::redraw(next));
        }
        let request = self.refresh_request(&next);
        Ok(Transition::request(next, request))
    }

    fn swap_axes(&self, state: &ViewState) -> Transition {
        let mut next = state.clone();
        next.x_axis = state
            .legend_axis
            .with_bucket_count(state.legend_axis.bucket_count());
        next.legend_axis = state
            .x_axis
            .with_bucket_count(state.default_buckets(&self.config));
        next.sampling_rate = 1.0;
        next.data = None;
        let request = RequestDescriptor::new(
            next.identity.remote_object_id.clone(),
            ChartKind::Trellis2DHistogram,
            next.columns(),
            vec![
                next.x_axis.bucket_count(),
                next.legend_axis.bucket_count(),
                next.shape.bucket_count,
            ],
            next.options(true, true),
        );
        Transition::request(next, request)
    }

    fn toggle_normalization(&self, state: &ViewState) -> Transition {
        let mut next = state.clone();
        next.relative = !state.relative;
        if next.relative && !state.is_exact() {
            // relative bars cannot be drawn from a sample
            return self.exact(next);
        }
        Transition::redraw(next)
    }

    fn exact(&self, mut next: ViewState) -> Transition {
        let buckets = next.default_buckets(&self.config);
        let request = RequestDescriptor::new(
            next.identity.remote_object_id.clone(),
            ChartKind::Trellis2DHistogram,
            next.columns(),
            vec![buckets, next.legend_axis.bucket_count(), next.shape.bucket_count],
            next.options(true, true),
        );
        next.x_axis = next.x_axis.with_bucket_count(buckets);
        next.sampling_rate = 1.0;
        next.data = None;
        Transition::request(next, request)
    }

    fn change_groups(&self, state: &ViewState, groups: Option<i64>) -> Result<Transition> {
        let max = self.config.max_bucket_count;
        let groups = match groups {
            Some(g) if g > 0 && g as u64 <= max as u64 => g as usize,
            Some(g) if g > 0 => {
                warn!(groups = g, max, "too many groups");
                return Err(ViewError::user_input(format!(
                    "Number of groups must be between 1 and {}",
                    max
                )));
            }
            _ => {
                warn!(?groups, "illegal group count");
                return Err(ViewError::user_input("Illegal group count"));
            }
        };
        let exact = state.is_exact();

        if groups == 1 {
            // a single group is an ordinary 2D histogram
            let request = RequestDescriptor::new(
                state.identity.remote_object_id.clone(),
                ChartKind::Histogram2D,
                vec![
                    state.x_axis.column().clone(),
                    state.legend_axis.column().clone(),
                ],
                vec![0, 0],
                state.options(true, exact),
            );
            return Ok(Transition::request(state.clone(), request));
        }

        let mut next = state.clone();
        next.shape = state.layout(&self.config).compute(groups);
        next.group_by_axis = state.group_by_axis.with_bucket_count(groups);
        next.data = None;
        let request = RequestDescriptor::new(
            next.identity.remote_object_id.clone(),
            ChartKind::Trellis2DHistogram,
            next.columns(),
            vec![
                next.x_axis.bucket_count(),
                next.legend_axis.bucket_count(),
                groups,
            ],
            next.options(true, exact),
        );
        Ok(Transition::request(next, request))
    }

    /// Filter over the axis values under two pixel offsets, or `None` when the
    /// axis cannot resolve them.
    pub fn range_filter(
        axis: &AxisDescriptor,
        a: f64,
        b: f64,
        extent: f64,
        complement: bool,
    ) -> Option<FilterDescription> {
        let (xl, xr) = reorder(a, b);
        let min = axis.invert_to_number(xl, extent)?;
        let max = axis.invert_to_number(xr, extent)?;
        if min > max {
            return None;
        }
        Some(FilterDescription {
            min,
            max,
            min_string: axis.invert(xl, extent),
            max_string: axis.invert(xr, extent),
            cd: axis.column().clone(),
            complement,
        })
    }

    /// Filter for a selection made on the legend strip.
    pub fn legend_filter(
        axis: &AxisDescriptor,
        a: f64,
        b: f64,
        extent: f64,
        complement: bool,
    ) -> Result<FilterDescription> {
        Self::range_filter(axis, a, b, extent, complement)
            .ok_or_else(|| ViewError::user_input("No data selected"))
    }

    /// Filter keeping the groups of panels `first..=last`.
    pub fn group_filter(
        axis: &AxisDescriptor,
        first: usize,
        last: usize,
        complement: bool,
    ) -> Option<FilterDescription> {
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        let (low, _) = axis.bucket_bounds(first)?;
        let (_, high) = axis.bucket_bounds(last)?;
        let (min, max) = match axis.range()? {
            DataRange::Numeric { .. } => (low, high),
            DataRange::Categorical { .. } => (low, (high - 1.0).max(low)),
        };
        Some(FilterDescription {
            min,
            max,
            min_string: axis.bucket_description(first, 0),
            max_string: axis.bucket_description(last, 0),
            cd: axis.column().clone(),
            complement,
        })
    }
}
