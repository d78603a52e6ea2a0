use std::collections::HashSet;

use lazy_static::lazy_static;

use super::TokenizedLine;

/// PTB punctuation tokens removed from tokenizer output by default.
pub const DEFAULT_PUNCTUATION: &[&str] = &[
    "''", "'", "``", "`", "-LRB-", "-RRB-", "-LCB-", "-RCB-", ".", "?", "!", ",", ":", "-", "--",
    "...", ";", "\\",
];

lazy_static! {
    static ref DEFAULT_SET: PunctuationSet = PunctuationSet::new(DEFAULT_PUNCTUATION.iter().copied());
}

/// Tokens dropped from every tokenized line. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationSet {
    tokens: HashSet<String>,
}

impl PunctuationSet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Keep every token that is not in the set, in original order.
    pub fn filter_tokens<'a, S: AsRef<str>>(&self, tokens: &'a [S]) -> Vec<&'a str> {
        tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !self.contains(t))
            .collect()
    }

    /// Filter a tokenized line and re-join the survivors with single spaces.
    pub fn filter_line(&self, line: &TokenizedLine) -> String {
        self.filter_tokens(line.tokens()).join(" ")
    }
}

impl Default for PunctuationSet {
    fn default() -> Self {
        DEFAULT_SET.clone()
    }
}
