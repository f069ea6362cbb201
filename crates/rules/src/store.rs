//! Tenant-scoped rule storage.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use matcher::{KeywordRule, MatcherConfig};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::draft::RuleDraft;
use crate::error::RuleError;

/// A keyword rule as persisted for one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRule {
    pub tenant_id: String,
    #[serde(flatten)]
    pub rule: KeywordRule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Source of tenant rule sets.
///
/// Every operation is scoped to a tenant: a rule id belonging to another
/// tenant behaves exactly like a missing one.
pub trait RuleStore: Send + Sync {
    /// All rules of the tenant, highest priority first, insertion order
    /// among equal priorities.
    fn list(&self, tenant_id: &str) -> Vec<StoredRule>;

    /// The tenant's active rules in matching order.
    fn active_rules(&self, tenant_id: &str) -> Vec<KeywordRule> {
        self.list(tenant_id)
            .into_iter()
            .filter(|stored| stored.rule.is_active)
            .map(|stored| stored.rule)
            .collect()
    }

    fn get(&self, tenant_id: &str, rule_id: &str) -> Result<StoredRule, RuleError>;

    fn create(&self, tenant_id: &str, draft: RuleDraft) -> Result<StoredRule, RuleError>;

    fn update(
        &self,
        tenant_id: &str,
        rule_id: &str,
        draft: RuleDraft,
    ) -> Result<StoredRule, RuleError>;

    fn delete(&self, tenant_id: &str, rule_id: &str) -> Result<(), RuleError>;
}

/// Process-local [`RuleStore`].
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    tenants: DashMap<String, Vec<StoredRule>>,
    matcher_cfg: MatcherConfig,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate regex patterns against the limits of a specific matcher.
    pub fn with_matcher_config(matcher_cfg: MatcherConfig) -> Self {
        Self {
            tenants: DashMap::new(),
            matcher_cfg,
        }
    }

    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }

    fn not_found(tenant_id: &str, rule_id: &str) -> RuleError {
        RuleError::NotFound {
            tenant_id: tenant_id.to_string(),
            rule_id: rule_id.to_string(),
        }
    }
}

impl RuleStore for InMemoryRuleStore {
    fn list(&self, tenant_id: &str) -> Vec<StoredRule> {
        let mut rules = self
            .tenants
            .get(tenant_id)
            .map(|rules| rules.value().clone())
            .unwrap_or_default();
        rules.sort_by_key(|stored| Reverse(stored.rule.priority));
        rules
    }

    fn get(&self, tenant_id: &str, rule_id: &str) -> Result<StoredRule, RuleError> {
        self.tenants
            .get(tenant_id)
            .and_then(|rules| rules.iter().find(|r| r.rule.id == rule_id).cloned())
            .ok_or_else(|| Self::not_found(tenant_id, rule_id))
    }

    fn create(&self, tenant_id: &str, draft: RuleDraft) -> Result<StoredRule, RuleError> {
        if tenant_id.trim().is_empty() {
            return Err(RuleError::Validation("tenant_id is required".into()));
        }
        let draft = draft.validate(&self.matcher_cfg)?;
        let now = Utc::now();
        let stored = StoredRule {
            tenant_id: tenant_id.to_string(),
            rule: draft.into_rule(Uuid::new_v4().to_string()),
            created_at: now,
            updated_at: now,
        };

        self.tenants
            .entry(tenant_id.to_string())
            .or_default()
            .push(stored.clone());
        info!(tenant_id, rule_id = %stored.rule.id, keyword = %stored.rule.keyword, "keyword rule created");
        Ok(stored)
    }

    fn update(
        &self,
        tenant_id: &str,
        rule_id: &str,
        draft: RuleDraft,
    ) -> Result<StoredRule, RuleError> {
        let draft = draft.validate(&self.matcher_cfg)?;
        let mut rules = self
            .tenants
            .get_mut(tenant_id)
            .ok_or_else(|| Self::not_found(tenant_id, rule_id))?;
        let stored = rules
            .iter_mut()
            .find(|r| r.rule.id == rule_id)
            .ok_or_else(|| Self::not_found(tenant_id, rule_id))?;

        stored.rule = draft.into_rule(rule_id);
        stored.updated_at = Utc::now();
        info!(tenant_id, rule_id, "keyword rule updated");
        Ok(stored.clone())
    }

    fn delete(&self, tenant_id: &str, rule_id: &str) -> Result<(), RuleError> {
        let mut rules = self
            .tenants
            .get_mut(tenant_id)
            .ok_or_else(|| Self::not_found(tenant_id, rule_id))?;
        let before = rules.len();
        rules.retain(|r| r.rule.id != rule_id);
        if rules.len() == before {
            return Err(Self::not_found(tenant_id, rule_id));
        }
        info!(tenant_id, rule_id, "keyword rule deleted");
        Ok(())
    }
}
