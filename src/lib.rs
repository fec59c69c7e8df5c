//! trellis_view crate: view state and request orchestration of a trellis of
//! 2D histograms backed by a remote aggregation server

pub mod aggregation;
pub mod chart;
pub mod chart_view;
pub mod data_types;
pub mod error;
pub mod layout;
pub mod plot_types;
pub mod receiver;
pub mod remote;
pub mod scales;
pub mod serialization;
pub mod utils;
pub mod view_controller;

pub use chart::{CombineHandler, DataView, TrellisCapable};
pub use chart_view::TrellisHistogram2DView;
pub use data_types::{AxisDescriptor, Heatmap3D, RequestDescriptor, ViewConfig, ViewState};
pub use error::{Result, ViewError};
pub use view_controller::{Command, Transition, ViewController};
