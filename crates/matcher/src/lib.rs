//! # Keyword Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides, for one incoming visitor message, whether a tenant's
//! automated response should fire and which one. Rules are tenant-authored
//! keyword-to-response mappings, optionally extended with synonyms and a
//! regular expression.
//!
//! The matcher does not load rules, enforce tenant isolation or send
//! anything: the caller hands in the tenant's rule slice and acts on the
//! returned [`MatchResult`].
//!
//! ## Strategy cascade
//!
//! | Stage | Criterion | Confidence |
//! |-------|-----------|------------|
//! | exact | keyword equals message | `1.0` |
//! | regex | pattern matches message | `0.9` |
//! | synonym | a synonym equals message | `0.95` |
//! | fuzzy | bigram Dice similarity `> 0.7` | measured score |
//!
//! All comparisons are case-insensitive and ignore surrounding whitespace.
//! Stages are never reordered; within a stage the highest-priority rule wins.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{match_keyword, KeywordRule, MatchType};
//!
//! let rules = vec![
//!     KeywordRule::new("k-pricing", "pricing", "See /pricing"),
//!     KeywordRule::new("k-support", "support", "Contact support")
//!         .with_regex("help|support"),
//!     KeywordRule::new("k-cost", "cost", "Our cost is $9.99")
//!         .with_synonyms(["price", "fee"]),
//! ];
//!
//! assert_eq!(match_keyword("Pricing", &rules).match_type, MatchType::Exact);
//! assert_eq!(match_keyword("I need HELP", &rules).match_type, MatchType::Regex);
//! assert_eq!(match_keyword("fee", &rules).match_type, MatchType::Synonym);
//! assert_eq!(match_keyword("pricng", &rules).match_type, MatchType::Fuzzy);
//! assert!(!match_keyword("hello there", &rules).matched);
//! ```

pub mod engine;
pub mod normalize;
pub mod pattern;
pub mod similarity;
pub mod types;

pub use crate::engine::{match_keyword, KeywordMatcher};
pub use crate::normalize::normalize;
pub use crate::pattern::{compile_pattern, PatternCache, PatternError};
pub use crate::similarity::dice_coefficient;
pub use crate::types::{KeywordRule, MatchError, MatchResult, MatchType, MatcherConfig};
