use crate::domain::model::{Mode, ParsePolicy};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn service_url(&self) -> &str;
    fn reference_base_url(&self) -> &str;
    fn top_n(&self) -> usize;
    fn max_edges(&self) -> usize;
    fn graph_article_count(&self) -> usize;
    fn parse_policy(&self) -> ParsePolicy;
    fn timeout_seconds(&self) -> u64;
}

/// Fetches the raw JANE document for a query.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, mode: Mode, query: &str) -> Result<String>;
}
