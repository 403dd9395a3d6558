use crate::domain::model::{RankKey, Ranked};

/// Highest `n` records by `key`, descending. Ties keep their input order.
///
/// Orders a snapshot of references, so the same slice can be ranked by the
/// other key afterwards with identical results.
pub fn top_n<T: Ranked>(records: &[T], key: RankKey, n: usize) -> Vec<&T> {
    let mut ordered: Vec<&T> = records.iter().collect();
    ordered.sort_by(|a, b| b.metric(key).cmp(&a.metric(key)));
    ordered.truncate(n);
    ordered
}
