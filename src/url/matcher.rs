use crate::{ConfigError, ConfigResult};
use regex::Regex;

/// A compiled list of full-match patterns
///
/// Every pattern is anchored at both ends when compiled, so a candidate is
/// matched only if the whole string matches, never a substring of it. The
/// crawler uses one list for ignored URLs and the page parser uses another
/// for ignored words.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    patterns: Vec<Regex>,
}

impl IgnoreList {
    /// Creates an empty list that ignores nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compiles a list of regular expressions
    ///
    /// # Arguments
    ///
    /// * `patterns` - Regular expressions in `regex` crate syntax
    ///
    /// # Returns
    ///
    /// * `Ok(IgnoreList)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed to compile
    ///
    /// # Examples
    ///
    /// ```
    /// use web_ripple::url::IgnoreList;
    ///
    /// let list = IgnoreList::compile(&["http://x/2".to_string()]).unwrap();
    /// assert!(list.matches("http://x/2"));
    /// assert!(!list.matches("http://x/23"));
    /// ```
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> ConfigResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(&format!("^(?:{})$", p))
                    .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if `candidate` fully matches any pattern
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Checks whether a URL must be skipped before it is claimed
///
/// Pure predicate with no shared state. An ignored URL is never fetched and
/// never counted as visited.
///
/// # Examples
///
/// ```
/// use web_ripple::url::{is_ignored, IgnoreList};
///
/// let patterns = IgnoreList::compile(&[r"http(s)?://.*\.png"]).unwrap();
/// assert!(is_ignored("https://example.com/logo.png", &patterns));
/// assert!(!is_ignored("https://example.com/logo.png?x=1", &patterns));
/// ```
pub fn is_ignored(url: &str, patterns: &IgnoreList) -> bool {
    patterns.matches(url)
}
