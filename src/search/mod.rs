//! Label matching and tree filtering for the search box.
//!
//! # Modules
//!
//! - [`filter`]: Tree filtering with expand-on-match
//!
//! Matching is case-insensitive and ignores surrounding whitespace on both the
//! label and the query. An empty query matches everything.
//!
//! # Example
//!
//! ```
//! use selectree::search::{matches, SearchStrategy};
//!
//! assert!(matches("Banana", "AN", SearchStrategy::Contains));
//! assert!(matches("Banana", " ban", SearchStrategy::StartsWith));
//! assert!(!matches("Banana", "ban", SearchStrategy::Exact));
//! assert!(matches("Anything", "", SearchStrategy::Exact));
//! ```

pub mod filter;

pub use filter::{filter_tree, FilterView};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

/// How a query is compared against an option label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Case-insensitive substring.
    #[default]
    Contains,
    /// Case-insensitive prefix.
    StartsWith,
    /// Case-insensitive full match.
    Exact,
    /// Skim-style subsequence match.
    Fuzzy,
}

impl SearchStrategy {
    /// Parses a strategy name, accepting the camel-case spellings used in
    /// element attributes as well.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "contains" => Some(Self::Contains),
            "starts_with" | "startswith" => Some(Self::StartsWith),
            "exact" => Some(Self::Exact),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

/// Lowercases and trims text for comparison.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `label` matches `query` under `strategy`.
#[must_use]
pub fn matches(label: &str, query: &str, strategy: SearchStrategy) -> bool {
    let query = normalize(query);
    if query.is_empty() {
        return true;
    }
    let label = normalize(label);

    match strategy {
        SearchStrategy::Contains => label.contains(&query),
        SearchStrategy::StartsWith => label.starts_with(&query),
        SearchStrategy::Exact => label == query,
        SearchStrategy::Fuzzy => SkimMatcherV2::default().fuzzy_match(&label, &query).is_some(),
    }
}
