use std::cmp::Reverse;
use std::sync::{Arc, OnceLock};

use tracing::{debug, trace, warn};

use crate::normalize::normalize;
use crate::pattern::PatternCache;
use crate::similarity::dice_coefficient;
use crate::types::{KeywordRule, MatchError, MatchResult, MatchType, MatcherConfig};


/// Decides which keyword rule, if any, answers a visitor message.
///
/// Every call is a pure function of the message and the rule slice. The only
/// state is a cache of compiled regex patterns, shared by clones, so one
/// instance can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    config: MatcherConfig,
    patterns: Arc<PatternCache>,
}

impl KeywordMatcher {
    /// Construct a matcher from a validated configuration.
    pub fn new(config: MatcherConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            config,
            patterns: Arc::default(),
        })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn pattern_cache(&self) -> &PatternCache {
        &self.patterns
    }

    /// Run the strategy cascade over `rules` and return the single best
    /// decision.
    ///
    /// Stages run in a fixed order and the first stage with a hit wins:
    ///
    /// 1. exact: normalized keyword equals the normalized message
    /// 2. regex: the rule's pattern finds a match in the normalized message
    /// 3. synonym: a normalized synonym equals the normalized message
    /// 4. fuzzy: best bigram similarity above the acceptance floor
    ///
    /// Within stages 1-3 rules are visited by descending priority, keeping
    /// list order for equal priorities. Stage 4 keeps the highest score and
    /// only falls back to that order when scores are equal.
    ///
    /// Never fails. Empty messages, empty rule sets and broken patterns all
    /// degrade to [`MatchResult::none`] or to the remaining stages.
    pub fn match_keyword(&self, message: &str, rules: &[KeywordRule]) -> MatchResult {
        let message = normalize(message);
        if message.is_empty() || rules.is_empty() {
            return MatchResult::none();
        }

        let mut ordered: Vec<&KeywordRule> = rules.iter().filter(|r| r.is_active).collect();
        ordered.sort_by_key(|r| Reverse(r.priority));

        let result = self
            .match_exact(&message, &ordered)
            .or_else(|| self.match_regex(&message, &ordered))
            .or_else(|| self.match_synonym(&message, &ordered))
            .or_else(|| self.match_fuzzy(&message, &ordered))
            .unwrap_or_else(MatchResult::none);

        debug!(
            match_type = result.match_type.as_str(),
            confidence = result.confidence,
            keyword_id = result.keyword_id.as_deref().unwrap_or(""),
            rules = ordered.len(),
            "keyword match evaluated"
        );
        result
    }

    fn match_exact(&self, message: &str, rules: &[&KeywordRule]) -> Option<MatchResult> {
        rules
            .iter()
            .find(|rule| normalize(&rule.keyword) == message)
            .map(|rule| MatchResult::hit(rule, MatchType::Exact, self.config.exact_confidence))
    }

    fn match_regex(&self, message: &str, rules: &[&KeywordRule]) -> Option<MatchResult> {
        for rule in rules {
            let Some(pattern) = rule.pattern() else {
                continue;
            };
            match self.patterns.get_or_compile(pattern, &self.config) {
                Ok(re) => {
                    if re.is_match(message) {
                        return Some(MatchResult::hit(
                            rule,
                            MatchType::Regex,
                            self.config.regex_confidence,
                        ));
                    }
                }
                Err(err) => {
                    warn!(
                        rule_id = %rule.id,
                        pattern,
                        error = %err,
                        "skipping rule with unusable regex pattern"
                    );
                }
            }
        }
        None
    }

    fn match_synonym(&self, message: &str, rules: &[&KeywordRule]) -> Option<MatchResult> {
        rules
            .iter()
            .find(|rule| {
                rule.synonyms
                    .iter()
                    .any(|synonym| normalize(synonym) == message)
            })
            .map(|rule| MatchResult::hit(rule, MatchType::Synonym, self.config.synonym_confidence))
    }

    fn match_fuzzy(&self, message: &str, rules: &[&KeywordRule]) -> Option<MatchResult> {
        let floor = self.config.fuzzy_threshold;
        let mut best: Option<(&KeywordRule, f64)> = None;

        for &rule in rules {
            let candidates = std::iter::once(&rule.keyword).chain(rule.synonyms.iter());
            for candidate in candidates {
                let candidate = normalize(candidate);
                if candidate.is_empty() {
                    continue;
                }
                let score = dice_coefficient(message, &candidate);
                trace!(rule_id = %rule.id, candidate = %candidate, score, "fuzzy candidate");

                let best_score = best.map_or(0.0, |(_, s)| s);
                if score > floor && score > best_score {
                    best = Some((rule, score));
                }
            }
        }

        best.map(|(rule, score)| MatchResult::hit(rule, MatchType::Fuzzy, score))
    }
}

/// Match `message` against `rules` with the default configuration.
pub fn match_keyword(message: &str, rules: &[KeywordRule]) -> MatchResult {
    static DEFAULT: OnceLock<KeywordMatcher> = OnceLock::new();
    DEFAULT
        .get_or_init(KeywordMatcher::default)
        .match_keyword(message, rules)
}
