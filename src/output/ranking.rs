use crate::state::WordCounts;
use std::cmp::Ordering;

/// Returns the `n` most popular words
///
/// Entries are ordered by count descending, ties broken by word ascending, so
/// the output does not depend on the map's iteration order. If `n` exceeds
/// the number of distinct words, all of them are returned.
///
/// # Examples
///
/// ```
/// use web_ripple::output::top_words;
/// use web_ripple::state::WordCounts;
///
/// let counts: WordCounts = [("a", 3), ("b", 3), ("c", 1)]
///     .into_iter()
///     .map(|(w, c)| (w.to_string(), c))
///     .collect();
///
/// assert_eq!(
///     top_words(&counts, 2),
///     vec![("a".to_string(), 3), ("b".to_string(), 3)]
/// );
/// ```
pub fn top_words(counts: &WordCounts, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_unstable_by(|a, b| rank(a, b));

    entries
        .into_iter()
        .take(n)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

fn rank(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    b.1.cmp(a.1).then_with(|| a.0.cmp(b.0))
}
