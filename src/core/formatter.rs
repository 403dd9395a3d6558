use crate::core::ranking::top_n;
use crate::domain::model::{
    ArticleRecord, AuthorRecord, CoAuthorEdge, JournalRecord, RankKey, Ranked,
};
use std::fmt::Write;

/// First line of a graph report; tells the downstream renderer the body is DOT.
pub const GRAPH_MARKER: &str = "#!dot";

pub const DEFAULT_REFERENCE_BASE_URL: &str = "http://www.ncbi.nlm.nih.gov/pubmed";

/// Maps an article identifier to its public reference page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLinker {
    base_url: String,
}

impl ReferenceLinker {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `<base>/<id>`, with `id` copied byte for byte.
    pub fn reference(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

impl Default for ReferenceLinker {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_BASE_URL)
    }
}

#[derive(Debug, Clone)]
pub struct ResultFormatter {
    top_n: usize,
    linker: ReferenceLinker,
}

impl ResultFormatter {
    pub fn new(top_n: usize, linker: ReferenceLinker) -> Self {
        Self { top_n, linker }
    }

    pub fn journals(&self, journals: &[JournalRecord]) -> String {
        self.ranked_blocks("journals", journals, |_, _| {})
    }

    pub fn authors(&self, authors: &[AuthorRecord]) -> String {
        self.ranked_blocks("authors", authors, |_, _| {})
    }

    pub fn articles(&self, articles: &[ArticleRecord]) -> String {
        self.ranked_blocks("articles", articles, |article, text| {
            let _ = writeln!(
                text,
                "{}({})",
                article.id,
                self.linker.reference(&article.id)
            );
        })
    }

    /// Score block then rank block; `after_line` may append lines under each record.
    fn ranked_blocks<T: Ranked>(
        &self,
        kind: &str,
        records: &[T],
        after_line: impl Fn(&T, &mut String),
    ) -> String {
        if records.is_empty() {
            return format!("no {} found\n", kind);
        }

        let mut text = String::new();
        for (position, key) in [RankKey::Score, RankKey::Rank].into_iter().enumerate() {
            if position > 0 {
                text.push('\n');
            }
            let _ = writeln!(text, "top {} {} by {}:", self.top_n, kind, key.as_str());
            for record in top_n(records, key, self.top_n) {
                let _ = writeln!(text, "{} {}", record.label(), record.metric(key));
                after_line(record, &mut text);
            }
        }
        text
    }
}

/// Renders edges as `"<id> <year>" -> "<id> <year>"` lines under the DOT marker.
pub fn format_edges(edges: &[CoAuthorEdge<'_>]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", GRAPH_MARKER);
    for edge in edges {
        let _ = writeln!(
            text,
            "\"{} {}\" -> \"{} {}\"",
            edge.source.id, edge.source.year, edge.target.id, edge.target.year
        );
    }
    text
}

/// Trailing note for records dropped under the skip policy.
pub fn skipped_note(skipped: usize) -> String {
    if skipped == 0 {
        String::new()
    } else {
        format!("({} malformed records skipped)\n", skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::build_edges;

    fn article(id: &str, title: &str, rank: u64, score: u64, year: i32) -> ArticleRecord {
        ArticleRecord {
            id: id.to_string(),
            title: title.to_string(),
            rank,
            score,
            year,
            authors: vec!["Smith".to_string()],
        }
    }

    #[test]
    fn test_reference_is_bit_exact() {
        assert_eq!(
            ReferenceLinker::default().reference("12345"),
            "http://www.ncbi.nlm.nih.gov/pubmed/12345"
        );
        let linker = ReferenceLinker::new("https://example.org/refs");
        assert_eq!(linker.reference("12345"), "https://example.org/refs/12345");
        assert_eq!(linker.reference("a b%20c"), "https://example.org/refs/a b%20c");
    }

    #[test]
    fn test_journal_blocks() {
        let journals = vec![
            JournalRecord {
                name: "Zebrafish".to_string(),
                rank: 1,
                score: 70,
            },
            JournalRecord {
                name: "Oncogene".to_string(),
                rank: 2,
                score: 90,
            },
        ];
        let text = ResultFormatter::new(5, ReferenceLinker::default()).journals(&journals);
        assert_eq!(
            text,
            "top 5 journals by score:\n\
             Oncogene 90\n\
             Zebrafish 70\n\
             \n\
             top 5 journals by rank:\n\
             Oncogene 2\n\
             Zebrafish 1\n"
        );
    }

    #[test]
    fn test_article_reference_lines() {
        let articles = vec![article("19001", "Fin regeneration", 1, 42, 2008)];
        let formatter = ResultFormatter::new(3, ReferenceLinker::new("http://refs.test"));
        let text = formatter.articles(&articles);
        assert_eq!(
            text,
            "top 3 articles by score:\n\
             Fin regeneration 42\n\
             19001(http://refs.test/19001)\n\
             \n\
             top 3 articles by rank:\n\
             Fin regeneration 1\n\
             19001(http://refs.test/19001)\n"
        );
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let articles: Vec<_> = (0..8)
            .map(|i| article(&i.to_string(), &format!("t{}", i), i % 3, 10 - i, 2000))
            .collect();
        let formatter = ResultFormatter::new(5, ReferenceLinker::default());
        assert_eq!(formatter.articles(&articles), formatter.articles(&articles));
        assert_eq!(formatter.articles(&articles).lines().count(), 2 * (1 + 5 * 2) + 1);
    }

    #[test]
    fn test_empty_list() {
        let formatter = ResultFormatter::new(5, ReferenceLinker::default());
        assert_eq!(formatter.authors(&[]), "no authors found\n");
    }

    #[test]
    fn test_edge_report() {
        let articles = vec![
            article("A", "a", 0, 0, 2001),
            article("B", "b", 0, 0, 2005),
        ];
        let edges = build_edges(&articles, 12);
        assert_eq!(format_edges(&edges), "#!dot\n\"A 2001\" -> \"B 2005\"\n");
        assert_eq!(format_edges(&[]), "#!dot\n");
    }

    #[test]
    fn test_skipped_note() {
        assert_eq!(skipped_note(0), "");
        assert_eq!(skipped_note(2), "(2 malformed records skipped)\n");
    }
}
