//! Interfaces of the collaborators living outside the view: the request
//! transport, the hosting page, and dataset combination.

use std::rc::Rc;
use std::time::Duration;

use crate::chart_view::actions::TopMenu;
use crate::data_types::{Heatmap3D, PageId, RemoteObjectId, RequestDescriptor};
use crate::layout::PageSize;
use crate::receiver::ResultSink;

/// A remote computation that streams results into a sink.
pub trait CancellableOperation<T> {
    fn invoke(&mut self, sink: ResultSink<T>);

    fn cancel(&mut self);
}

/// Starts aggregations on the server.
pub trait RequestLayer {
    /// Aggregation whose partial results flow back into the issuing view.
    fn create_request(
        &self,
        request: &RequestDescriptor,
        page: PageId,
    ) -> Box<dyn CancellableOperation<Heatmap3D>>;

    /// Request rendered elsewhere: another chart kind, a table, a filtered
    /// dataset or a new page.
    fn open(&self, request: RequestDescriptor, page: PageId);
}

/// Page chrome hosting a view.
pub trait Page {
    fn page_id(&self) -> PageId;

    fn size(&self) -> PageSize;

    fn report_error(&self, message: &str);

    fn report_time(&self, elapsed: Duration);

    fn set_menu(&self, menu: TopMenu);

    /// Operation and dataset picked in the page chrome for the "Combine..." entry.
    fn combine_selection(&self) -> Option<CombineSelection>;
}

#[derive(Clone)]
pub struct CombineSelection {
    pub operator: Rc<dyn CombineOperator>,
    pub other: RemoteObjectId,
}

/// Set operation between two datasets, computed remotely.
pub trait CombineOperator {
    fn name(&self) -> &str;

    fn combine(
        &self,
        left: &RemoteObjectId,
        right: &RemoteObjectId,
    ) -> Box<dyn CancellableOperation<RemoteObjectId>>;
}
