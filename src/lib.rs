pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{engine::StackEngine, pipeline::StackPipeline};
pub use utils::error::{Result, StackError};
