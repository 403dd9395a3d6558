use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub name: String,
    pub rank: u64,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// PubMed identifier.
    pub id: String,
    pub title: String,
    pub rank: u64,
    pub score: u64,
    pub year: i32,
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    pub rank: u64,
    pub score: u64,
    /// Evidence articles supporting this author's ranking.
    pub articles: Vec<ArticleRecord>,
}

/// Numeric key a record list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    Rank,
    Score,
}

impl RankKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankKey::Rank => "rank",
            RankKey::Score => "score",
        }
    }
}

/// Anything the service ranks: carries both metrics and a display label.
pub trait Ranked {
    fn rank(&self) -> u64;
    fn score(&self) -> u64;
    fn label(&self) -> &str;

    fn metric(&self, key: RankKey) -> u64 {
        match key {
            RankKey::Rank => self.rank(),
            RankKey::Score => self.score(),
        }
    }
}

impl Ranked for JournalRecord {
    fn rank(&self) -> u64 {
        self.rank
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Ranked for ArticleRecord {
    fn rank(&self) -> u64 {
        self.rank
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Ranked for AuthorRecord {
    fn rank(&self) -> u64 {
        self.rank
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Query mode; `Graph` reads the articles endpoint and builds co-authorship edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Journals,
    Authors,
    Articles,
    Graph,
}

impl Mode {
    /// Path segment of the JANE endpoint serving this mode.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Mode::Journals => "journals",
            Mode::Authors => "authors",
            Mode::Articles | Mode::Graph => "articles",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Journals => "journals",
            Mode::Authors => "authors",
            Mode::Articles => "articles",
            Mode::Graph => "graph",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "journals" => Ok(Mode::Journals),
            "authors" => Ok(Mode::Authors),
            "articles" => Ok(Mode::Articles),
            "graph" => Ok(Mode::Graph),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

/// What to do with a record whose rank, score or other required field is unreadable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Fail the whole decode on the first malformed record.
    #[default]
    Abort,
    /// Log the malformed record, count it and keep going.
    Skip,
}

/// Records from one decode plus the number of malformed records dropped under `ParsePolicy::Skip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Directed co-authorship relation between two articles of one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoAuthorEdge<'a> {
    pub source: &'a ArticleRecord,
    pub target: &'a ArticleRecord,
}
