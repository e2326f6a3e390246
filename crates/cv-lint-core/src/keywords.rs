//! Keyword frequency ranking.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of keywords reported by a full analysis.
pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// A token and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordCount {
    /// The lower-case token.
    pub word: String,
    /// Occurrences in the token stream.
    pub count: usize,
}

/// Return up to `limit` most frequent tokens, highest count first.
///
/// Ties keep first-encounter order: counts are accumulated in the order words
/// first appear and then stably sorted.
#[tracing::instrument(skip(tokens), fields(token_count = tokens.len()))]
pub fn top_keywords<S: AsRef<str>>(tokens: &[S], limit: usize) -> Vec<KeywordCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<KeywordCount> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        if let Some(&i) = index.get(token) {
            ranked[i].count += 1;
        } else {
            index.insert(token, ranked.len());
            ranked.push(KeywordCount {
                word: token.to_string(),
                count: 1,
            });
        }
    }

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
