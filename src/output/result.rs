use serde::ser::Serializer;
use serde::Serialize;

/// Final output of one crawl
///
/// Serialized as `{"wordCounts": {"word": count, ...}, "urlsVisited": n}`
/// with the word map in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most popular words, count descending then word ascending
    #[serde(serialize_with = "serialize_ranked")]
    pub word_counts: Vec<(String, u64)>,

    /// Number of distinct URLs visited
    pub urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Returns the reported count for `word`, if it made the ranking
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }
}

/// Serializes ranked pairs as a JSON object, keeping their order
fn serialize_ranked<S>(words: &[(String, u64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(words.iter().map(|(word, count)| (word, count)))
}
