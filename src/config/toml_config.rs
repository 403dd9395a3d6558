use crate::adapters::http::{DEFAULT_GRAPH_ARTICLE_COUNT, DEFAULT_SERVICE_URL};
use crate::core::formatter::DEFAULT_REFERENCE_BASE_URL;
use crate::core::graph::DEFAULT_MAX_EDGES;
use crate::core::ConfigProvider;
use crate::domain::model::ParsePolicy;
use crate::utils::error::{JaneError, Result};
use crate::utils::validation::{validate_provider, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub output: OutputConfig,
    pub graph: GraphConfig,
    pub parsing: ParsingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub graph_article_count: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub top_n: Option<usize>,
    pub reference_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    pub max_edges: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingConfig {
    pub on_malformed_record: Option<ParsePolicy>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(JaneError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| JaneError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| JaneError::ConfigError {
            message: format!("bad substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn service_url(&self) -> &str {
        self.service.endpoint.as_deref().unwrap_or(DEFAULT_SERVICE_URL)
    }

    fn reference_base_url(&self) -> &str {
        self.output
            .reference_base_url
            .as_deref()
            .unwrap_or(DEFAULT_REFERENCE_BASE_URL)
    }

    fn top_n(&self) -> usize {
        self.output.top_n.unwrap_or(5)
    }

    fn max_edges(&self) -> usize {
        self.graph.max_edges.unwrap_or(DEFAULT_MAX_EDGES)
    }

    fn graph_article_count(&self) -> usize {
        self.service
            .graph_article_count
            .unwrap_or(DEFAULT_GRAPH_ARTICLE_COUNT)
    }

    fn parse_policy(&self) -> ParsePolicy {
        self.parsing.on_malformed_record.unwrap_or_default()
    }

    fn timeout_seconds(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(30)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
