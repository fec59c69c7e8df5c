#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use trellis_view::chart_view::TopMenu;
use trellis_view::data_types::{
    AxisDescriptor, ColumnDescription, ColumnSchema, ContentsKind, DataRange, Heatmap3D, PageId,
    RemoteObjectId, RequestDescriptor, Schema, ViewConfig, ViewIdentity, ViewState,
};
use trellis_view::layout::PageSize;
use trellis_view::receiver::{PartialResult, ResultSink};
use trellis_view::remote::{
    CancellableOperation, CombineOperator, CombineSelection, Page, RequestLayer,
};
use trellis_view::TrellisHistogram2DView;

pub const WINDOW: PageSize = PageSize {
    width: 1000.0,
    height: 700.0,
};

#[derive(Default)]
pub struct MockPage {
    pub errors: RefCell<Vec<String>>,
    pub times: RefCell<Vec<Duration>>,
    pub menus: RefCell<Vec<TopMenu>>,
    pub combine: RefCell<Option<CombineSelection>>,
}

impl Page for MockPage {
    fn page_id(&self) -> PageId {
        PageId(7)
    }

    fn size(&self) -> PageSize {
        WINDOW
    }

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn report_time(&self, elapsed: Duration) {
        self.times.borrow_mut().push(elapsed);
    }

    fn set_menu(&self, menu: TopMenu) {
        self.menus.borrow_mut().push(menu);
    }

    fn combine_selection(&self) -> Option<CombineSelection> {
        self.combine.borrow().clone()
    }
}

type Sinks<T> = Rc<RefCell<Vec<Option<ResultSink<T>>>>>;

/// Operation whose results are pushed by the test through the stored sink.
pub struct ManualOperation<T> {
    index: usize,
    sinks: Sinks<T>,
    cancelled: Rc<RefCell<Vec<usize>>>,
}

impl<T> CancellableOperation<T> for ManualOperation<T> {
    fn invoke(&mut self, sink: ResultSink<T>) {
        let mut sinks = self.sinks.borrow_mut();
        if sinks.len() <= self.index {
            sinks.resize_with(self.index + 1, || None);
        }
        sinks[self.index] = Some(sink);
    }

    fn cancel(&mut self) {
        self.cancelled.borrow_mut().push(self.index);
    }
}

#[derive(Default)]
pub struct MockRemote {
    pub created: RefCell<Vec<RequestDescriptor>>,
    pub opened: RefCell<Vec<RequestDescriptor>>,
    pub sinks: Sinks<Heatmap3D>,
    pub cancelled: Rc<RefCell<Vec<usize>>>,
}

impl MockRemote {
    pub fn send(&self, index: usize, data: Heatmap3D) -> bool {
        match self.sinks.borrow().get(index) {
            Some(Some(sink)) => sink.on_next(Some(PartialResult::new(0.5, data))),
            _ => false,
        }
    }

    pub fn tick(&self, index: usize) -> bool {
        match self.sinks.borrow().get(index) {
            Some(Some(sink)) => sink.on_next(None),
            _ => false,
        }
    }

    pub fn complete(&self, index: usize) {
        if let Some(sink) = self.sinks.borrow_mut().get_mut(index).and_then(Option::take) {
            sink.on_completed();
        }
    }

    pub fn last_created(&self) -> Option<RequestDescriptor> {
        self.created.borrow().last().cloned()
    }

    pub fn last_opened(&self) -> Option<RequestDescriptor> {
        self.opened.borrow().last().cloned()
    }
}

impl RequestLayer for MockRemote {
    fn create_request(
        &self,
        request: &RequestDescriptor,
        _page: PageId,
    ) -> Box<dyn CancellableOperation<Heatmap3D>> {
        let mut created = self.created.borrow_mut();
        let index = created.len();
        created.push(request.clone());
        Box::new(ManualOperation {
            index,
            sinks: self.sinks.clone(),
            cancelled: self.cancelled.clone(),
        })
    }

    fn open(&self, request: RequestDescriptor, _page: PageId) {
        self.opened.borrow_mut().push(request);
    }
}

/// Combine operator answering with a fixed dataset id as soon as invoked.
pub struct ImmediateCombine {
    pub result: RemoteObjectId,
}

struct ImmediateOperation(RemoteObjectId);

impl CancellableOperation<RemoteObjectId> for ImmediateOperation {
    fn invoke(&mut self, sink: ResultSink<RemoteObjectId>) {
        sink.on_next(Some(PartialResult::new(1.0, self.0.clone())));
        sink.on_completed();
    }

    fn cancel(&mut self) {}
}

impl CombineOperator for ImmediateCombine {
    fn name(&self) -> &str {
        "Union"
    }

    fn combine(
        &self,
        _left: &RemoteObjectId,
        _right: &RemoteObjectId,
    ) -> Box<dyn CancellableOperation<RemoteObjectId>> {
        Box::new(ImmediateOperation(self.result.clone()))
    }
}

pub fn x_column() -> ColumnDescription {
    ColumnDescription::new("A", ContentsKind::Double)
}

pub fn legend_column() -> ColumnDescription {
    ColumnDescription::new("B", ContentsKind::Category)
}

pub fn group_column() -> ColumnDescription {
    ColumnDescription::new("G", ContentsKind::Integer)
}

pub fn schema() -> Schema {
    Schema::new(vec![
        ColumnSchema {
            name: "A".to_string(),
            kind: ContentsKind::Double,
            display_name: Some("Alpha".to_string()),
        },
        ColumnSchema {
            name: "B".to_string(),
            kind: ContentsKind::Category,
            display_name: None,
        },
        ColumnSchema {
            name: "G".to_string(),
            kind: ContentsKind::Integer,
            display_name: Some("Group".to_string()),
        },
    ])
}

pub fn identity() -> ViewIdentity {
    ViewIdentity {
        remote_object_id: RemoteObjectId::from("r1"),
        row_count: 1000,
        schema: schema(),
        page_id: PageId(7),
        title: "Trellis".to_string(),
    }
}

pub fn x_axis(buckets: usize) -> AxisDescriptor {
    AxisDescriptor::new(
        x_column(),
        buckets,
        Some(DataRange::Numeric {
            min: 0.0,
            max: 100.0,
        }),
    )
}

pub fn legend_axis() -> AxisDescriptor {
    AxisDescriptor::new(
        legend_column(),
        4,
        Some(DataRange::Categorical {
            labels: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        }),
    )
}

pub fn group_axis(groups: usize) -> AxisDescriptor {
    AxisDescriptor::new(
        group_column(),
        groups,
        Some(DataRange::Numeric {
            min: 0.0,
            max: groups as f64,
        }),
    )
}

/// A 3-group trellis over (A, B, G) with 10 primary buckets.
pub fn state(sampling_rate: f64, relative: bool) -> ViewState {
    ViewState::new(
        identity(),
        WINDOW,
        sampling_rate,
        x_axis(10),
        legend_axis(),
        group_axis(3),
        relative,
        &ViewConfig::default(),
    )
}

/// Panel `p` holds `totals[p]` rows spread over the first x bucket.
pub fn heatmap(x_buckets: usize, totals: &[u64]) -> Heatmap3D {
    let buckets = totals
        .iter()
        .map(|&total| {
            let mut panel = vec![vec![0u64; 4]; x_buckets];
            panel[0][0] = total;
            panel
        })
        .collect();
    Heatmap3D {
        buckets,
        either_missing: 0,
        total_present: totals.iter().sum(),
    }
}

pub fn view(
    state: ViewState,
    config: ViewConfig,
) -> (TrellisHistogram2DView, Rc<MockPage>, Rc<MockRemote>) {
    let page = Rc::new(MockPage::default());
    let remote = Rc::new(MockRemote::default());
    let view = TrellisHistogram2DView::new(state, config, page.clone(), remote.clone());
    (view, page, remote)
}
