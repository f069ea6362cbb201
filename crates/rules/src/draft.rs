//! User-supplied rule payloads and their validation.

use std::ops::RangeInclusive;

use matcher::{compile_pattern, KeywordRule, MatcherConfig};
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Priorities accepted from the dashboard.
pub const PRIORITY_RANGE: RangeInclusive<i32> = 0..=100;

/// Create/update payload for a keyword rule.
///
/// Everything except `keyword` and `response` is optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleDraft {
    pub keyword: String,
    pub response: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub regex_pattern: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
}

fn default_active() -> bool {
    true
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            response: String::new(),
            synonyms: Vec::new(),
            regex_pattern: None,
            is_active: true,
            priority: 0,
        }
    }
}

impl RuleDraft {
    pub fn new(keyword: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            response: response.into(),
            ..Default::default()
        }
    }

    /// Check the draft and return its cleaned-up form.
    ///
    /// - `keyword` is trimmed and must not be empty
    /// - `response` must not be blank and is kept verbatim
    /// - synonyms are trimmed and blank ones dropped
    /// - a blank `regex_pattern` becomes `None`; otherwise it must compile
    ///   under the same limits the matcher applies
    /// - `priority` must be within [`PRIORITY_RANGE`]
    pub fn validate(self, matcher_cfg: &MatcherConfig) -> Result<Self, RuleError> {
        let keyword = self.keyword.trim().to_string();
        if keyword.is_empty() {
            return Err(RuleError::Validation("keyword is required".into()));
        }
        if self.response.trim().is_empty() {
            return Err(RuleError::Validation("response is required".into()));
        }
        if !PRIORITY_RANGE.contains(&self.priority) {
            return Err(RuleError::Validation(format!(
                "priority must be between {} and {}, got {}",
                PRIORITY_RANGE.start(),
                PRIORITY_RANGE.end(),
                self.priority
            )));
        }

        let synonyms = self
            .synonyms
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let regex_pattern = match self.regex_pattern {
            Some(p) if !p.trim().is_empty() => {
                compile_pattern(&p, matcher_cfg)
                    .map_err(|err| RuleError::Validation(format!("regex_pattern: {err}")))?;
                Some(p)
            }
            _ => None,
        };

        Ok(Self {
            keyword,
            response: self.response,
            synonyms,
            regex_pattern,
            is_active: self.is_active,
            priority: self.priority,
        })
    }

    /// Turn a validated draft into a matcher rule with the given id.
    pub fn into_rule(self, id: impl Into<String>) -> KeywordRule {
        KeywordRule {
            id: id.into(),
            keyword: self.keyword,
            synonyms: self.synonyms,
            regex_pattern: self.regex_pattern,
            response: self.response,
            priority: self.priority,
            is_active: self.is_active,
        }
    }
}

impl From<&KeywordRule> for RuleDraft {
    fn from(rule: &KeywordRule) -> Self {
        Self {
            keyword: rule.keyword.clone(),
            response: rule.response.clone(),
            synonyms: rule.synonyms.clone(),
            regex_pattern: rule.regex_pattern.clone(),
            is_active: rule.is_active,
            priority: rule.priority,
        }
    }
}
