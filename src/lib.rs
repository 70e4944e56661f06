pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

pub use adapters::RpClient;
pub use config::{connection::ConnectionConfig, CliConfig, Commands};
pub use domain::ports::LaunchService;
pub use utils::error::{Result, RpError};
