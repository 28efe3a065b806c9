//! Approximate substring matching.
//!
//! A [`Matcher`] scores how well a query occurs inside a text. Exact
//! case-insensitive occurrences score `0.0` and report every occurrence.
//! Otherwise every window of the text close to the query's length is compared
//! with [`strsim::generic_levenshtein`]; the best window's edit distance over
//! the longer length is the score. Scores above the threshold are rejected.
//!
//! Queries longer than [`MAX_FUZZY_QUERY_CHARS`] only match exactly, so a
//! field costs at most `O(text_len * MAX_FUZZY_QUERY_CHARS^2)`.
//!
//! Positions are character offsets into the original text. Lowercasing maps
//! each character to exactly one character so offsets stay aligned.

use std::ops::Range;

use crate::types::SearchConfig;

/// Longest query, in characters, that is matched approximately.
pub const MAX_FUZZY_QUERY_CHARS: usize = 32;

/// A successful match.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// In `[0, 1]`; `0.0` is an exact occurrence.
    pub score: f64,
    /// Matched character ranges, in text order.
    pub ranges: Vec<Range<usize>>,
}

/// A prepared query.
#[derive(Debug, Clone)]
pub struct Matcher {
    query: Vec<char>,
    threshold: f64,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

impl Matcher {
    /// Prepare `query`, or `None` when it is blank or shorter than the
    /// configured minimum.
    pub fn new(query: &str, config: &SearchConfig) -> Option<Self> {
        let query: Vec<char> = query.trim().chars().map(fold).collect();
        if query.is_empty() || query.len() < config.min_match_length {
            return None;
        }
        Some(Self {
            query,
            threshold: config.threshold,
        })
    }

    /// Returns `true` when the query is short enough for approximate
    /// matching.
    pub fn is_fuzzy(&self) -> bool {
        self.query.len() <= MAX_FUZZY_QUERY_CHARS
    }

    /// Query length in characters.
    pub fn len(&self) -> usize {
        self.query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Match the query against `text`.
    pub fn find(&self, text: &str) -> Option<FuzzyMatch> {
        let text: Vec<char> = text.chars().map(fold).collect();
        if text.is_empty() {
            return None;
        }

        let exact = self.occurrences(&text);
        if !exact.is_empty() {
            return Some(FuzzyMatch {
                score: 0.0,
                ranges: exact,
            });
        }

        if !self.is_fuzzy() {
            return None;
        }

        let (score, range) = self.best_window(&text);
        (score <= self.threshold).then(|| FuzzyMatch {
            score,
            ranges: vec![range],
        })
    }

    /// Non-overlapping exact occurrences.
    fn occurrences(&self, text: &[char]) -> Vec<Range<usize>> {
        let n = self.query.len();
        let mut ranges = Vec::new();
        let mut start = 0;
        while start + n <= text.len() {
            if text[start..start + n] == self.query[..] {
                ranges.push(start..start + n);
                start += n;
            } else {
                start += 1;
            }
        }
        ranges
    }

    /// Lowest-distance window whose length is within one of the query's.
    fn best_window(&self, text: &[char]) -> (f64, Range<usize>) {
        let n = self.query.len();
        let shortest = n.saturating_sub(1).max(1).min(text.len());
        let longest = (n + 1).min(text.len());

        let mut window: Vec<char> = Vec::with_capacity(longest);
        let mut best = (f64::INFINITY, 0..0);
        for len in shortest..=longest {
            for start in 0..=text.len() - len {
                window.clear();
                window.extend_from_slice(&text[start..start + len]);
                let distance = strsim::generic_levenshtein(&self.query, &window);
                let score = distance as f64 / n.max(len) as f64;
                if score < best.0 {
                    best = (score, start..start + len);
                }
            }
        }
        best
    }
}
