//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;
pub(crate) mod render;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands, FilterArgs};
pub use config::{AppConfig, CreatedByField, DataConfig, ExportConfig, FilterConfig, UserConfig};
