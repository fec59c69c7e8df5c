//! Delivery of streamed aggregation results.
//!
//! The remote layer writes into a [`ResultSink`]; the view polls the paired
//! [`ResultReceiver`] from its event loop. A request yields zero or more partial
//! results followed by one completion. Dropping the sink before completing, or
//! cancelling the receiver, ends the stream silently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::remote::CancellableOperation;

/// A snapshot of an aggregation in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialResult<T> {
    /// Completed fraction in [0, 1].
    pub done: f64,
    pub data: Option<T>,
}

impl<T> PartialResult<T> {
    pub fn new(done: f64, data: T) -> Self {
        Self {
            done,
            data: Some(data),
        }
    }

    /// A tick that carries no new data.
    pub fn empty(done: f64) -> Self {
        Self { done, data: None }
    }
}

enum Notification<T> {
    Next(Option<PartialResult<T>>),
    Completed,
}

/// What the view sees when polling its receiver.
#[derive(Clone, Debug, PartialEq)]
pub enum ReceiverEvent<T> {
    Partial { done: f64, data: T },
    Completed { elapsed: Duration },
}

/// Producer side, handed to the remote operation.
pub struct ResultSink<T> {
    tx: Sender<Notification<T>>,
    cancelled: Arc<AtomicBool>,
}

impl<T> ResultSink<T> {
    /// Forwards one partial result. Returns false once nobody listens anymore.
    pub fn on_next(&self, value: Option<PartialResult<T>>) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.tx.send(Notification::Next(value)).is_ok()
    }

    pub fn on_completed(self) {
        if !self.is_cancelled() {
            let _ = self.tx.send(Notification::Completed);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Consumer side, bound to exactly one operation.
pub struct ResultReceiver<T> {
    rx: Receiver<Notification<T>>,
    cancelled: Arc<AtomicBool>,
    started: Instant,
    finished: bool,
    operation: Option<Box<dyn CancellableOperation<T>>>,
}

/// Creates a connected sink/receiver pair.
pub fn result_channel<T>() -> (ResultSink<T>, ResultReceiver<T>) {
    let (tx, rx) = channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    (
        ResultSink {
            tx,
            cancelled: cancelled.clone(),
        },
        ResultReceiver {
            rx,
            cancelled,
            started: Instant::now(),
            finished: false,
            operation: None,
        },
    )
}

impl<T> ResultReceiver<T> {
    /// Keeps the operation so cancelling the receiver also cancels it upstream.
    pub fn attach(&mut self, operation: Box<dyn CancellableOperation<T>>) {
        self.operation = Some(operation);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Next event with data, skipping empty ticks. Non-blocking.
    pub fn try_next(&mut self) -> Option<ReceiverEvent<T>> {
        while !self.finished && !self.is_cancelled() {
            match self.rx.try_recv() {
                Ok(Notification::Next(Some(PartialResult {
                    done,
                    data: Some(data),
                }))) => return Some(ReceiverEvent::Partial { done, data }),
                Ok(Notification::Next(_)) => {
                    debug!("empty partial result");
                }
                Ok(Notification::Completed) => {
                    self.finished = true;
                    self.operation = None;
                    return Some(ReceiverEvent::Completed {
                        elapsed: self.elapsed(),
                    });
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    debug!("result stream closed without completion");
                    self.finished = true;
                    self.operation = None;
                }
            }
        }
        None
    }

    /// All events available right now.
    pub fn drain(&mut self) -> Vec<ReceiverEvent<T>> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Stops forwarding and cancels the underlying operation.
    pub fn cancel(&mut self) {
        if self.finished {
            return;
        }
        self.cancelled.store(true, Ordering::Release);
        self.finished = true;
        if let Some(mut operation) = self.operation.take() {
            operation.cancel();
        }
    }
}
