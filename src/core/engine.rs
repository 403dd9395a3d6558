use crate::core::formatter::{format_edges, skipped_note, ReferenceLinker, ResultFormatter};
use crate::core::graph::{build_edges, DEFAULT_MAX_EDGES};
use crate::core::parser::ResponseParser;
use crate::domain::model::{Mode, ParsePolicy};
use crate::domain::ports::{ConfigProvider, DocumentSource};
use crate::utils::error::Result;
use tracing::Instrument;

/// Knobs of the interpretation pipeline, detached from where they were configured.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub top_n: usize,
    pub max_edges: usize,
    pub parse_policy: ParsePolicy,
    pub reference_base_url: String,
}

impl EngineSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            top_n: config.top_n(),
            max_edges: config.max_edges(),
            parse_policy: config.parse_policy(),
            reference_base_url: config.reference_base_url().to_string(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            top_n: 5,
            max_edges: DEFAULT_MAX_EDGES,
            parse_policy: ParsePolicy::Abort,
            reference_base_url: crate::core::formatter::DEFAULT_REFERENCE_BASE_URL.to_string(),
        }
    }
}

pub struct QueryEngine<S: DocumentSource> {
    source: S,
    settings: EngineSettings,
}

impl<S: DocumentSource> QueryEngine<S> {
    pub fn new(source: S, settings: EngineSettings) -> Self {
        Self { source, settings }
    }

    /// Fetches and interprets one query, returning typed errors.
    pub async fn run(&self, mode: Mode, query: &str) -> Result<String> {
        let span = tracing::info_span!("query", %mode, query_len = query.len());
        self.execute(mode, query).instrument(span).await
    }

    async fn execute(&self, mode: Mode, query: &str) -> Result<String> {
        tracing::info!("Fetching {} from JANE", mode.endpoint());
        let document = self.source.fetch(mode, query).await?;
        tracing::debug!("Fetched {} bytes", document.len());
        let text = interpret(mode, &document, &self.settings)?;
        tracing::info!("Rendered {} lines", text.lines().count());
        Ok(text)
    }

    /// Like `run`, but any failure becomes the short apology for its stage.
    pub async fn answer(&self, mode: Mode, query: &str) -> String {
        match self.run(mode, query).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    "{} query failed at {} stage: {}",
                    mode,
                    e.stage().as_str(),
                    e
                );
                e.user_message().to_string()
            }
        }
    }
}

/// Parses `document` for `mode` and renders the plain-text report.
pub fn interpret(mode: Mode, document: &str, settings: &EngineSettings) -> Result<String> {
    let parser = ResponseParser::new(settings.parse_policy);
    let formatter = ResultFormatter::new(
        settings.top_n,
        ReferenceLinker::new(settings.reference_base_url.clone()),
    );

    let text = match mode {
        Mode::Journals => {
            let decoded = parser.journals(document)?;
            formatter.journals(&decoded.records) + &skipped_note(decoded.skipped)
        }
        Mode::Authors => {
            let decoded = parser.authors(document)?;
            formatter.authors(&decoded.records) + &skipped_note(decoded.skipped)
        }
        Mode::Articles => {
            let decoded = parser.articles(document)?;
            formatter.articles(&decoded.records) + &skipped_note(decoded.skipped)
        }
        Mode::Graph => {
            let decoded = parser.articles(document)?;
            let edges = build_edges(&decoded.records, settings.max_edges);
            tracing::debug!(
                "Built {} edges from {} articles",
                edges.len(),
                decoded.records.len()
            );
            format_edges(&edges) + &skipped_note(decoded.skipped)
        }
    };

    Ok(text)
}
