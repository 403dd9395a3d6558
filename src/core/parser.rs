//! Decodes JANE documents into typed records.
//!
//! Journals and articles are labelled nodes found anywhere in the document.
//! Authors are not: the `<results>` element holds a flat run of siblings where
//! every three consecutive nodes (metric, name, evidence) describe one author.

use crate::core::xml::{parse_document, Element};
use crate::domain::model::{
    ArticleRecord, AuthorRecord, Decoded, JournalRecord, ParsePolicy,
};
use crate::utils::error::{JaneError, Result};
use std::str::FromStr;

const AUTHOR_STRIDE: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser {
    policy: ParsePolicy,
}

impl ResponseParser {
    pub fn new(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    pub fn journals(&self, document: &str) -> Result<Decoded<JournalRecord>> {
        let root = parse_document(document)?;
        self.collect("journal", root.find_all("journal"), decode_journal)
    }

    pub fn articles(&self, document: &str) -> Result<Decoded<ArticleRecord>> {
        let root = parse_document(document)?;
        self.articles_in(&root)
    }

    pub fn authors(&self, document: &str) -> Result<Decoded<AuthorRecord>> {
        let root = parse_document(document)?;
        let results = root
            .find("results")
            .ok_or_else(|| JaneError::decode("author response has no <results> element"))?;

        let siblings: Vec<&Element> = results.child_elements().collect();
        if siblings.len() % AUTHOR_STRIDE != 0 {
            return Err(JaneError::decode(format!(
                "author response has {} sibling nodes, expected a multiple of {} (metric, name, evidence)",
                siblings.len(),
                AUTHOR_STRIDE
            )));
        }

        let mut decoded = Decoded::default();
        for (index, group) in siblings.chunks_exact(AUTHOR_STRIDE).enumerate() {
            match self.decode_author(index, group[0], group[1], group[2]) {
                Ok((author, skipped_articles)) => {
                    decoded.skipped += skipped_articles;
                    decoded.records.push(author);
                }
                Err(err) => decoded.skipped += self.handle_malformed(err)?,
            }
        }

        tracing::debug!(
            "Decoded {} authors ({} malformed records skipped)",
            decoded.records.len(),
            decoded.skipped
        );
        Ok(decoded)
    }

    fn articles_in(&self, scope: &Element) -> Result<Decoded<ArticleRecord>> {
        self.collect("article", scope.find_all("article"), decode_article)
    }

    fn decode_author(
        &self,
        index: usize,
        metric: &Element,
        name: &Element,
        evidence: &Element,
    ) -> Result<(AuthorRecord, usize)> {
        let rank = number_attr(metric, "author", index, "rank")?;
        let score = number_attr(metric, "author", index, "score")?;
        let name = name
            .first_text()
            .ok_or_else(|| missing("author", index, "name"))?
            .to_string();
        let evidence = self.articles_in(evidence)?;

        Ok((
            AuthorRecord {
                name,
                rank,
                score,
                articles: evidence.records,
            },
            evidence.skipped,
        ))
    }

    fn collect<T>(
        &self,
        kind: &'static str,
        nodes: Vec<&Element>,
        decode: fn(usize, &Element) -> Result<T>,
    ) -> Result<Decoded<T>> {
        let mut decoded = Decoded::default();
        for (index, node) in nodes.into_iter().enumerate() {
            match decode(index, node) {
                Ok(record) => decoded.records.push(record),
                Err(err) => decoded.skipped += self.handle_malformed(err)?,
            }
        }
        tracing::debug!(
            "Decoded {} {} records ({} skipped)",
            decoded.records.len(),
            kind,
            decoded.skipped
        );
        Ok(decoded)
    }

    /// Returns how many records to count as skipped, or the error when the policy aborts.
    fn handle_malformed(&self, err: JaneError) -> Result<usize> {
        match (self.policy, &err) {
            (ParsePolicy::Skip, JaneError::FieldParseError { .. }) => {
                tracing::warn!("Skipping malformed record: {}", err);
                Ok(1)
            }
            _ => Err(err),
        }
    }
}

fn decode_journal(index: usize, node: &Element) -> Result<JournalRecord> {
    Ok(JournalRecord {
        name: child_text(node, "journal", index, "journalname")?,
        rank: number_attr(node, "journal", index, "rank")?,
        score: number_attr(node, "journal", index, "score")?,
    })
}

fn decode_article(index: usize, node: &Element) -> Result<ArticleRecord> {
    let id = child_text(node, "article", index, "pmid")?;
    let title = child_text(node, "article", index, "title")?;
    let rank = number_attr(node, "article", index, "rank")?;
    let score = number_attr(node, "article", index, "score")?;
    let year_text = child_text(node, "article", index, "year")?;
    let year = parse_number(&year_text, "article", index, "year")?;
    let authors = node
        .find_all("author")
        .into_iter()
        .filter_map(|author| author.first_text())
        .map(str::to_string)
        .collect();

    Ok(ArticleRecord {
        id,
        title,
        rank,
        score,
        year,
        authors,
    })
}

fn missing(record: &'static str, index: usize, field: &'static str) -> JaneError {
    JaneError::FieldParseError {
        record,
        index,
        field,
        reason: "is missing".to_string(),
    }
}

fn child_text(
    node: &Element,
    record: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String> {
    node.find(field)
        .and_then(|child| child.first_text())
        .map(str::to_string)
        .ok_or_else(|| missing(record, index, field))
}

fn number_attr<N: FromStr>(
    node: &Element,
    record: &'static str,
    index: usize,
    field: &'static str,
) -> Result<N> {
    let raw = node
        .attr(field)
        .ok_or_else(|| missing(record, index, field))?;
    parse_number(raw, record, index, field)
}

fn parse_number<N: FromStr>(
    raw: &str,
    record: &'static str,
    index: usize,
    field: &'static str,
) -> Result<N> {
    raw.trim().parse().map_err(|_| JaneError::FieldParseError {
        record,
        index,
        field,
        reason: format!("is not a number: '{}'", raw),
    })
}
