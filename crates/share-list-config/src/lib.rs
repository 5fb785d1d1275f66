pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, ShareConfig};
pub use paths::{home_override, PathManager};
