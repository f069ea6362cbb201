use thiserror::Error;

/// Errors produced by rule validation, the rule store and CSV import.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    /// A draft violated a field constraint.
    #[error("invalid rule: {0}")]
    Validation(String),

    /// No rule with this id exists for the tenant.
    #[error("rule {rule_id} not found for tenant {tenant_id}")]
    NotFound { tenant_id: String, rule_id: String },

    /// The CSV document could not be turned into rules.
    #[error("invalid CSV: {0}")]
    Csv(String),
}
