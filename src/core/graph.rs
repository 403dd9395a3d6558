use crate::domain::model::{ArticleRecord, CoAuthorEdge};

pub const DEFAULT_MAX_EDGES: usize = 12;

/// Co-authorship edges between articles, oldest first.
///
/// Articles are ordered by year (stable), then every pair (i, j) with i < j is
/// compared once. A pair yields a single edge i -> j when the two share any
/// author name, compared as exact text. Emission stops once `max_edges` edges
/// exist.
pub fn build_edges(articles: &[ArticleRecord], max_edges: usize) -> Vec<CoAuthorEdge<'_>> {
    let mut ordered: Vec<&ArticleRecord> = articles.iter().collect();
    ordered.sort_by_key(|article| article.year);

    let mut edges = Vec::new();
    if max_edges == 0 {
        return edges;
    }

    'sources: for i in 0..ordered.len() {
        for j in (i + 1)..ordered.len() {
            let (source, target) = (ordered[i], ordered[j]);
            if shares_author(source, target) {
                edges.push(CoAuthorEdge { source, target });
                if edges.len() == max_edges {
                    tracing::debug!("Edge cap of {} reached", max_edges);
                    break 'sources;
                }
            }
        }
    }

    edges
}

fn shares_author(a: &ArticleRecord, b: &ArticleRecord) -> bool {
    a.authors.iter().any(|name| b.authors.contains(name))
}
