pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::http::{DEFAULT_GRAPH_ARTICLE_COUNT, DEFAULT_SERVICE_URL};
#[cfg(feature = "cli")]
use crate::core::formatter::DEFAULT_REFERENCE_BASE_URL;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{Mode, ParsePolicy};
#[cfg(feature = "cli")]
use crate::utils::error::{JaneError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_provider, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "jane-digest")]
#[command(about = "Ranked journal, author and article suggestions from the JANE service")]
pub struct CliConfig {
    #[arg(long, value_enum, help = "Query mode", conflicts_with = "message")]
    pub mode: Option<Mode>,

    #[arg(long, help = "Free-text query for --mode", default_value = "")]
    pub query: String,

    #[arg(long, help = "Chat message containing a (janey:<command>) token")]
    pub message: Option<String>,

    #[arg(long, help = "TOML settings file; replaces the service flags below")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    pub service_url: String,

    #[arg(long, default_value = DEFAULT_REFERENCE_BASE_URL)]
    pub reference_base_url: String,

    #[arg(long, default_value = "5")]
    pub top_n: usize,

    #[arg(long, default_value = "12")]
    pub max_edges: usize,

    #[arg(long, default_value_t = DEFAULT_GRAPH_ARTICLE_COUNT)]
    pub graph_article_count: usize,

    #[arg(long, value_enum, default_value = "abort")]
    pub parse_policy: ParsePolicy,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn service_url(&self) -> &str {
        &self.service_url
    }

    fn reference_base_url(&self) -> &str {
        &self.reference_base_url
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn max_edges(&self) -> usize {
        self.max_edges
    }

    fn graph_article_count(&self) -> usize {
        self.graph_article_count
    }

    fn parse_policy(&self) -> ParsePolicy {
        self.parse_policy
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.mode.is_none() && self.message.is_none() {
            return Err(JaneError::MissingConfigError {
                field: "--mode or --message".to_string(),
            });
        }
        validate_provider(self)
    }
}
