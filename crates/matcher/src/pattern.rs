//! Compilation of tenant-authored regex patterns.
//!
//! Patterns come from untrusted dashboard input. The `regex` crate matches in
//! linear time, so there is no catastrophic backtracking; on top of that the
//! source length and the compiled program size are capped by
//! [`MatcherConfig`].
//!
//! [`PatternCache`] keeps the compiled form of every pattern seen so far, so a
//! tenant's rules are compiled once rather than once per visitor message.

use dashmap::DashMap;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::types::MatcherConfig;

/// Why a pattern was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PatternError {
    #[error("pattern is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("invalid pattern: {0}")]
    Invalid(String),
}

/// Compile `pattern` case-insensitively under the limits in `config`.
pub fn compile_pattern(pattern: &str, config: &MatcherConfig) -> Result<Regex, PatternError> {
    if pattern.len() > config.max_pattern_len {
        return Err(PatternError::TooLong {
            len: pattern.len(),
            max: config.max_pattern_len,
        });
    }

    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(config.regex_size_limit)
        .build()
        .map_err(|err| PatternError::Invalid(err.to_string()))
}

/// Distinct patterns kept before the cache starts over.
pub const DEFAULT_PATTERN_CACHE_CAPACITY: usize = 4096;

/// Compiled patterns keyed by their source text.
///
/// Rejected patterns are cached as well, so a broken pattern is compiled once
/// however many messages it is evaluated against. Entries are only valid for
/// the [`MatcherConfig`] they were compiled under; each matcher owns its cache.
#[derive(Debug)]
pub struct PatternCache {
    entries: DashMap<String, Result<Regex, PatternError>>,
    capacity: usize,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PATTERN_CACHE_CAPACITY)
    }
}

impl PatternCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Return the compiled pattern, compiling and remembering it on first use.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        config: &MatcherConfig,
    ) -> Result<Regex, PatternError> {
        if let Some(entry) = self.entries.get(pattern) {
            return entry.value().clone();
        }

        let compiled = compile_pattern(pattern, config);
        // Full: drop everything rather than track recency.
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(pattern.to_string(), compiled.clone());
        compiled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_case_insensitive() {
        let re = compile_pattern("help|support", &MatcherConfig::default()).expect("valid");
        assert!(re.is_match("I need HELP"));
    }

    #[test]
    fn rejects_syntax_errors() {
        let err = compile_pattern("([a-z", &MatcherConfig::default()).unwrap_err();
        assert!(matches!(err, PatternError::Invalid(_)));
    }

    #[test]
    fn rejects_overlong_patterns() {
        let cfg = MatcherConfig {
            max_pattern_len: 8,
            ..Default::default()
        };
        let err = compile_pattern("abcdefghij", &cfg).unwrap_err();
        assert_eq!(err, PatternError::TooLong { len: 10, max: 8 });
    }

    #[test]
    fn rejects_patterns_exceeding_size_limit() {
        let cfg = MatcherConfig {
            regex_size_limit: 64,
            ..Default::default()
        };
        let err = compile_pattern(r"\w{100}", &cfg).unwrap_err();
        assert!(matches!(err, PatternError::Invalid(_)));
    }

    #[test]
    fn cache_compiles_each_pattern_once() {
        let cache = PatternCache::default();
        let cfg = MatcherConfig::default();

        let first = cache.get_or_compile("help|support", &cfg).expect("valid");
        let second = cache.get_or_compile("help|support", &cfg).expect("valid");
        assert_eq!(first.as_str(), second.as_str());
        assert_eq!(cache.len(), 1);

        cache.get_or_compile("billing", &cfg).expect("valid");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_remembers_rejected_patterns() {
        let cache = PatternCache::default();
        let cfg = MatcherConfig::default();

        let first = cache.get_or_compile("([a-z", &cfg).unwrap_err();
        let second = cache.get_or_compile("([a-z", &cfg).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn full_cache_starts_over() {
        let cache = PatternCache::with_capacity(2);
        let cfg = MatcherConfig::default();

        cache.get_or_compile("a", &cfg).expect("valid");
        cache.get_or_compile("b", &cfg).expect("valid");
        assert_eq!(cache.len(), 2);

        let re = cache.get_or_compile("c", &cfg).expect("valid");
        assert!(re.is_match("C"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
