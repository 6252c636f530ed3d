pub mod config;
pub mod error;
pub mod protocol;
pub mod server;

pub use config::DashboardConfig;
pub use error::{DashboardError, ParamError};
pub use server::DashboardServer;
