pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::file_config::NotifierFileConfig;
pub use config::{state::JsonFileStore, CliConfig};
pub use core::{engine::NotifierEngine, pipeline::NotifyPipeline};
pub use utils::error::{NotifierError, Result};
