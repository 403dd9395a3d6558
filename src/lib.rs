pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::JaneHttpSource;
pub use app::chat::ChatBot;
pub use config::toml_config::TomlConfig;
pub use core::engine::{interpret, EngineSettings, QueryEngine};
pub use domain::model::{Mode, ParsePolicy};
pub use utils::error::{JaneError, Result};
