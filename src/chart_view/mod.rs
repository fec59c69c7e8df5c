pub mod actions;
pub mod input;
pub mod overlay;

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::aggregation;
use crate::chart::{CombineHandler, DataView, TrellisCapable};
use crate::data_types::{
    AxisDescriptor, FilterDescription, Heatmap3D, RemoteObjectId, RequestDescriptor, ViewConfig,
    ViewState,
};
use crate::error::Result;
use crate::layout::{PageSize, TrellisShape};
use crate::plot_types::{
    legend_handle, panel_handle, Histogram2DPlot, HistogramLegendPlot, LegendPlotHandle,
    PanelPlotHandle,
};
use crate::receiver::{result_channel, ReceiverEvent, ResultReceiver};
use crate::remote::{CombineOperator, Page, RequestLayer};
use crate::serialization::{self, TrellisHistogram2DSerialization};
use crate::view_controller::{Command, Transition, ViewController};

pub use actions::{build_menu, DialogKind, MenuAction, MenuItem, SubMenu, TopMenu};
pub use input::Selection;
pub use overlay::PointDescription;

/// Builds the plot of one panel for a given panel size.
pub type PanelFactory = Box<dyn Fn(PageSize) -> PanelPlotHandle>;

const Y_TICK_COUNT: usize = 5;

/// Axes drawn once for the whole trellis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SharedAxes {
    pub x_title: String,
    pub x_labels: Vec<String>,
    pub y_ticks: Vec<f64>,
}

/// A trellis of stacked 2D histograms, one panel per group-by bucket, with a
/// shared legend.
///
/// The view owns its `ViewState` and replaces it after every command. All
/// methods run on the page's event thread; results are picked up by [`poll`].
///
/// [`poll`]: TrellisHistogram2DView::poll
pub struct TrellisHistogram2DView {
    controller: ViewController,
    state: ViewState,
    page: Rc<dyn Page>,
    remote: Rc<dyn RequestLayer>,
    factory: PanelFactory,
    panels: Vec<PanelPlotHandle>,
    legend: LegendPlotHandle,
    receivers: Vec<ResultReceiver<Heatmap3D>>,
    combine: Option<(CombineHandler, ResultReceiver<RemoteObjectId>)>,
    overlay: PointDescription,
    axes: SharedAxes,
    selection: Option<Selection>,
}

impl TrellisHistogram2DView {
    /// View drawing into the in-crate plot implementations.
    pub fn new(
        state: ViewState,
        config: ViewConfig,
        page: Rc<dyn Page>,
        remote: Rc<dyn RequestLayer>,
    ) -> Self {
        let legend = legend_handle(HistogramLegendPlot::new(config.legend_bar_width));
        Self::with_plots(
            state,
            config,
            page,
            remote,
            Box::new(|size| panel_handle(Histogram2DPlot::new(size))),
            legend,
        )
    }

    pub fn with_plots(
        state: ViewState,
        config: ViewConfig,
        page: Rc<dyn Page>,
        remote: Rc<dyn RequestLayer>,
        factory: PanelFactory,
        legend: LegendPlotHandle,
    ) -> Self {
        let mut view = Self {
            controller: ViewController::new(config),
            state,
            page,
            remote,
            factory,
            panels: Vec::new(),
            legend,
            receivers: Vec::new(),
            combine: None,
            overlay: PointDescription::default(),
            axes: SharedAxes::default(),
            selection: None,
        };
        view.create_panels();
        view.page.set_menu(build_menu(&view.state));
        view
    }

    /// Restores a persisted view on `page`, laid out for the page's size. The
    /// axes come back unloaded and nothing is drawn until a request completes.
    pub fn reconstruct(
        record: TrellisHistogram2DSerialization,
        config: ViewConfig,
        page: Rc<dyn Page>,
        remote: Rc<dyn RequestLayer>,
    ) -> Result<Self> {
        let state = serialization::reconstruct(record, page.size(), &config)?;
        let x_axis = state.x_axis.clone();
        let legend_axis = state.legend_axis.clone();
        let group_by_axis = state.group_by_axis.clone();
        let relative = state.relative;

        let mut view = Self::new(state, config, page, remote);
        view.set_axes(x_axis, legend_axis, group_by_axis, relative);
        info!(
            id = %view.state.identity.remote_object_id,
            groups = view.state.shape.bucket_count,
            "view reconstructed"
        );
        Ok(view)
    }

    /// Installs new axes, typically once their ranges are known, and lays out
    /// one panel per group-by bucket. Cached data no longer matches and is dropped.
    pub fn set_axes(
        &mut self,
        x_axis: AxisDescriptor,
        legend_axis: AxisDescriptor,
        group_by_axis: AxisDescriptor,
        relative: bool,
    ) {
        let config = self.controller.config().clone();
        let mut state = ViewState::new(
            self.state.identity.clone(),
            self.state.window,
            self.state.sampling_rate,
            x_axis,
            legend_axis,
            group_by_axis,
            relative,
            &config,
        );
        if state.shape.bucket_count == self.state.shape.bucket_count {
            state.shape = self.state.shape;
        }
        self.state = state;
        self.create_panels();
        self.page.set_menu(build_menu(&self.state));
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn legend(&self) -> &LegendPlotHandle {
        &self.legend
    }

    pub fn overlay(&self) -> &PointDescription {
        &self.overlay
    }

    pub fn axes(&self) -> &SharedAxes {
        &self.axes
    }

    /// Requests whose results still flow into this view.
    pub fn pending_requests(&self) -> usize {
        self.receivers.iter().filter(|r| !r.is_finished()).count()
    }

    /// Runs a user command. Rejected input is reported to the page and leaves
    /// the view unchanged.
    pub fn execute(&mut self, command: Command) {
        debug!(?command, "executing command");
        match self.controller.next_state(&self.state, command) {
            Ok(transition) => self.apply(transition),
            Err(e) => {
                warn!(error = %e, "command rejected");
                self.page.report_error(&e.user_message());
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        let Transition {
            state,
            request,
            redraw,
        } = transition;
        let reshaped = state.shape != self.state.shape;
        let renormalized = state.relative != self.state.relative;
        self.state = state;

        if reshaped {
            self.create_panels();
        }
        if renormalized {
            self.page.set_menu(build_menu(&self.state));
        }
        if redraw {
            self.redraw();
        }
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    /// Sends a request to the server. Results of a trellis request reusing this
    /// page are received here; anything else opens elsewhere.
    pub fn dispatch(&mut self, request: RequestDescriptor) {
        let columns: Vec<&str> = request.columns.iter().map(|c| c.name.as_str()).collect();
        info!(
            kind = %request.chart_kind,
            ?columns,
            buckets = ?request.bucket_counts,
            exact = request.options.exact,
            "dispatching request"
        );
        let page = self.page.page_id();
        if !request.targets_current_view() {
            self.remote.open(request, page);
            return;
        }

        if self.controller.config().cancel_superseded {
            for mut previous in self.receivers.drain(..) {
                if !previous.is_finished() {
                    debug!("cancelling superseded request");
                    previous.cancel();
                }
            }
        }

        let mut operation = self.remote.create_request(&request, page);
        let (sink, mut receiver) = result_channel();
        operation.invoke(sink);
        receiver.attach(operation);
        self.receivers.push(receiver);
    }

    /// Renders every result that arrived since the last call. Returns the
    /// number of partial results drawn.
    pub fn poll(&mut self) -> usize {
        let mut drawn = 0;
        let mut receivers = std::mem::take(&mut self.receivers);
        for receiver in receivers.iter_mut() {
            for event in receiver.drain() {
                match event {
                    ReceiverEvent::Partial { done, data } => {
                        debug!(done, "partial result");
                        self.update_view(Some(data));
                        drawn += 1;
                    }
                    ReceiverEvent::Completed { elapsed } => self.update_completed(elapsed),
                }
            }
        }
        receivers.retain(|r| !r.is_finished());
        receivers.append(&mut self.receivers);
        self.receivers = receivers;

        self.poll_combine();
        drawn
    }

    /// Final notification of a request.
    pub fn update_completed(&mut self, elapsed: Duration) {
        info!(elapsed_ms = elapsed.as_millis() as u64, "request completed");
        self.page.report_time(elapsed);
    }

    /// Draws from the cached result, if any.
    pub fn redraw(&mut self) {
        match self.state.data.clone() {
            Some(data) => self.render(&data),
            None => {
                for panel in &self.panels {
                    panel.write().clear();
                }
            }
        }
    }

    fn render(&mut self, data: &Heatmap3D) {
        self.legend.write().clear();
        let max = aggregation::global_max(data);

        let x_buckets = self.state.x_axis.bucket_count();
        let shown = if data
            .buckets
            .iter()
            .all(|panel| panel.is_empty() || panel.len() == x_buckets)
        {
            Cow::Borrowed(data)
        } else {
            debug!(x_buckets, "rebucketing cached result");
            Cow::Owned(aggregation::rebucket(data, x_buckets))
        };

        let schema = &self.state.identity.schema;
        for (index, panel) in self.panels.iter().enumerate() {
            let mut plot = panel.write();
            plot.set_data(
                shown.panel(index),
                &self.state.x_axis,
                self.state.sampling_rate,
                self.state.relative,
                schema,
                max,
            );
            plot.draw();
        }

        // axes depend on the drawn panels
        self.axes = self.compute_axes();
        self.overlay = PointDescription::new(vec![
            schema.display_name(&self.state.x_axis.column().name),
            schema.display_name(&self.state.legend_axis.column().name),
            schema.display_name(&self.state.group_by_axis.column().name),
            "y".to_string(),
            "percent".to_string(),
            "count".to_string(),
        ]);

        let mut legend = self.legend.write();
        legend.set_data(&self.state.legend_axis, false, schema);
        legend.draw();
    }

    fn compute_axes(&self) -> SharedAxes {
        let x_axis = &self.state.x_axis;
        SharedAxes {
            x_title: self.state.identity.schema.display_name(&x_axis.column().name),
            x_labels: (0..x_axis.bucket_count())
                .map(|i| x_axis.bucket_description(i, 0))
                .collect(),
            y_ticks: self
                .panels
                .first()
                .map(|p| p.read().y_scale().ticks(Y_TICK_COUNT))
                .unwrap_or_default(),
        }
    }

    fn create_panels(&mut self) {
        let shape = self.state.shape;
        if self.panels.len() == shape.bucket_count {
            for panel in &self.panels {
                panel.write().set_size(shape.size);
            }
            return;
        }
        self.panels = (0..shape.bucket_count)
            .map(|_| (self.factory)(shape.size))
            .collect();
    }

    /// Starts combining this view's dataset with `other`; the combined dataset
    /// opens on a new page with the same columns once the server produces it.
    pub fn combine_with(&mut self, operator: &dyn CombineOperator, other: &RemoteObjectId) {
        let title = format!("{} ({})", self.state.identity.title, operator.name());
        let handler = self.combine_handler(&title);
        let mut operation = operator.combine(&self.state.identity.remote_object_id, other);
        let (sink, mut receiver) = result_channel();
        operation.invoke(sink);
        receiver.attach(operation);
        if let Some((_, mut previous)) = self.combine.replace((handler, receiver)) {
            previous.cancel();
        }
    }

    fn poll_combine(&mut self) {
        let Some((handler, mut receiver)) = self.combine.take() else {
            return;
        };
        let mut opened = false;
        for event in receiver.drain() {
            match event {
                ReceiverEvent::Partial { data, .. } if !opened => {
                    info!(combined = %data, "combined dataset ready");
                    self.remote
                        .open(handler.request_for(data), self.page.page_id());
                    opened = true;
                }
                ReceiverEvent::Partial { .. } => {}
                ReceiverEvent::Completed { elapsed } => self.page.report_time(elapsed),
            }
        }
        if opened {
            receiver.cancel();
        } else if !receiver.is_finished() {
            self.combine = Some((handler, receiver));
        }
    }
}

impl DataView for TrellisHistogram2DView {
    type Record = TrellisHistogram2DSerialization;

    /// Caches and draws a result. `None` leaves the view untouched.
    fn update_view(&mut self, data: Option<Heatmap3D>) {
        let Some(data) = data else {
            return;
        };
        // legend buckets cannot be rebucketed locally; follow the result
        if let Some(legend) = data.legend_bucket_count() {
            if legend != self.state.legend_axis.bucket_count() {
                debug!(
                    from = self.state.legend_axis.bucket_count(),
                    to = legend,
                    "legend buckets follow the result"
                );
                self.state.legend_axis = self.state.legend_axis.with_bucket_count(legend);
            }
        }
        let data = Arc::new(data);
        self.state.data = Some(data.clone());
        self.render(&data);
    }

    fn serialize(&self) -> TrellisHistogram2DSerialization {
        serialization::serialize(&self.state)
    }

    fn combine_handler(&self, title: &str) -> CombineHandler {
        self.controller.combine_handler(&self.state, title)
    }

    fn handle_filter(&mut self, filter: FilterDescription) {
        self.execute(Command::Filter(filter));
    }
}

impl TrellisCapable for TrellisHistogram2DView {
    fn shape(&self) -> &TrellisShape {
        &self.state.shape
    }

    fn panels(&self) -> &[PanelPlotHandle] {
        &self.panels
    }

    fn resize(&mut self, window: PageSize) {
        self.execute(Command::Resize(window));
    }
}
