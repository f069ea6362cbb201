//! Keyword rule management.
//!
//! The matcher only reads rules; this crate owns how they are written:
//!
//! - [`RuleDraft`]: create/update payload with field validation (required
//!   keyword and response, priority range, compilable regex).
//! - [`RuleStore`]: tenant-scoped storage contract, with
//!   [`InMemoryRuleStore`] as the process-local implementation.
//! - [`export_csv`] / [`import_csv`] / [`import_into`]: bulk exchange in the
//!   dashboard's CSV layout.
//!
//! ```
//! use rules::{InMemoryRuleStore, RuleDraft, RuleStore};
//!
//! let store = InMemoryRuleStore::new();
//! store.create("tenant-a", RuleDraft::new("pricing", "See /pricing")).unwrap();
//!
//! let active = store.active_rules("tenant-a");
//! assert_eq!(active.len(), 1);
//! assert!(store.active_rules("tenant-b").is_empty());
//! ```

mod csv;
mod draft;
mod error;
mod store;

pub use crate::csv::{export_csv, import_csv, import_into, ImportReport, CSV_HEADERS};
pub use crate::draft::{RuleDraft, PRIORITY_RANGE};
pub use crate::error::RuleError;
pub use crate::store::{InMemoryRuleStore, RuleStore, StoredRule};
