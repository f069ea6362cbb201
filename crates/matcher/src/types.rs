use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tenant-authored keyword rule.
///
/// Rules are owned by the rule store; the matcher only reads them. Every
/// string comparison is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordRule {
    /// Opaque identifier reported back as `keywordId` when the rule wins.
    pub id: String,
    /// Canonical trigger phrase.
    pub keyword: String,
    /// Alternate trigger phrases, checked in list order.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Optional pattern tested against the normalized message.
    #[serde(default)]
    pub regex_pattern: Option<String>,
    /// Text returned verbatim when this rule wins.
    pub response: String,
    /// Higher values win within a stage. Ties keep list order.
    #[serde(default)]
    pub priority: i32,
    /// Inactive rules are never considered. Absent means active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl KeywordRule {
    /// Active rule with no synonyms, no pattern and priority `0`.
    pub fn new(
        id: impl Into<String>,
        keyword: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            keyword: keyword.into(),
            synonyms: Vec::new(),
            regex_pattern: None,
            response: response.into(),
            priority: 0,
            is_active: true,
        }
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex_pattern = Some(pattern.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The pattern to evaluate in the regex stage, if any. Empty patterns
    /// count as absent.
    pub fn pattern(&self) -> Option<&str> {
        self.regex_pattern.as_deref().filter(|p| !p.is_empty())
    }
}

/// Strategy that produced a match decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Regex,
    Synonym,
    Fuzzy,
    None,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Regex => "regex",
            MatchType::Synonym => "synonym",
            MatchType::Fuzzy => "fuzzy",
            MatchType::None => "none",
        }
    }
}

/// Outcome of matching one message against one rule set.
///
/// Serialized in camelCase (`matchType`, `keywordId`) because the widget and
/// dashboard consume it as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched: bool,
    pub response: Option<String>,
    pub confidence: f64,
    pub match_type: MatchType,
    pub keyword_id: Option<String>,
}

impl MatchResult {
    /// The "no match" decision.
    pub fn none() -> Self {
        Self {
            matched: false,
            response: None,
            confidence: 0.0,
            match_type: MatchType::None,
            keyword_id: None,
        }
    }

    pub(crate) fn hit(rule: &KeywordRule, match_type: MatchType, confidence: f64) -> Self {
        Self {
            matched: true,
            response: Some(rule.response.clone()),
            confidence,
            match_type,
            keyword_id: Some(rule.id.clone()),
        }
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::none()
    }
}

/// Tuning knobs for [`KeywordMatcher`](crate::KeywordMatcher).
///
/// The defaults reproduce the production behaviour: nominal confidences of
/// 1.0 / 0.9 / 0.95 for the exact, regex and synonym stages and a fuzzy
/// acceptance floor of 0.7.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    pub exact_confidence: f64,
    pub regex_confidence: f64,
    pub synonym_confidence: f64,
    /// A fuzzy candidate must score strictly above this value.
    pub fuzzy_threshold: f64,
    /// Patterns longer than this many bytes are skipped.
    pub max_pattern_len: usize,
    /// Upper bound on the compiled size of a single pattern, in bytes.
    pub regex_size_limit: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            exact_confidence: 1.0,
            regex_confidence: 0.9,
            synonym_confidence: 0.95,
            fuzzy_threshold: 0.7,
            max_pattern_len: 512,
            regex_size_limit: 1 << 20,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        let scores = [
            ("exact_confidence", self.exact_confidence),
            ("regex_confidence", self.regex_confidence),
            ("synonym_confidence", self.synonym_confidence),
            ("fuzzy_threshold", self.fuzzy_threshold),
        ];
        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidConfig(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        if self.max_pattern_len == 0 {
            return Err(MatchError::InvalidConfig(
                "max_pattern_len must be greater than zero".into(),
            ));
        }
        if self.regex_size_limit == 0 {
            return Err(MatchError::InvalidConfig(
                "regex_size_limit must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Errors surfaced by the matcher crate.
///
/// Matching itself never fails; only configuration can be rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchError {
    #[error("invalid matcher config: {0}")]
    InvalidConfig(String),
}
