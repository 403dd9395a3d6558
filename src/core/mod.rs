pub mod engine;
pub mod formatter;
pub mod graph;
pub mod parser;
pub mod ranking;
pub mod xml;

pub use crate::domain::model::{ArticleRecord, AuthorRecord, JournalRecord, Mode, RankKey};
pub use crate::domain::ports::{ConfigProvider, DocumentSource};
pub use crate::utils::error::Result;
