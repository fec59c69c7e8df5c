pub mod axis;
pub mod data;
pub mod plot_configs;
pub mod request;
pub mod schema;
pub mod state;

pub use axis::*;
pub use data::*;
pub use plot_configs::*;
pub use request::*;
pub use schema::*;
pub use state::*;
