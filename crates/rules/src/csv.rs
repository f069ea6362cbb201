//! CSV exchange format for rule sets.
//!
//! Header: `keyword,response,synonyms,regex_pattern,is_active,priority`.
//! Text columns are wrapped in double quotes with embedded quotes doubled;
//! synonyms are joined with `;`. Import accepts any column order and only
//! requires `keyword` and `response`.

use matcher::KeywordRule;
use serde::Serialize;
use tracing::warn;

use crate::draft::RuleDraft;
use crate::error::RuleError;
use crate::store::{RuleStore, StoredRule};

pub const CSV_HEADERS: [&str; 6] = [
    "keyword",
    "response",
    "synonyms",
    "regex_pattern",
    "is_active",
    "priority",
];

const REQUIRED_HEADERS: [&str; 2] = ["keyword", "response"];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render rules in the dashboard's CSV layout, one row per rule.
pub fn export_csv(rules: &[KeywordRule]) -> String {
    let mut lines = Vec::with_capacity(rules.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for rule in rules {
        lines.push(
            [
                quote(&rule.keyword),
                quote(&rule.response),
                quote(&rule.synonyms.join(";")),
                quote(rule.regex_pattern.as_deref().unwrap_or("")),
                rule.is_active.to_string(),
                rule.priority.to_string(),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

/// Split CSV text into records, honouring quoted fields (which may contain
/// commas, doubled quotes and line breaks).
fn parse_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Parse a CSV document into rule drafts.
///
/// Rows without a keyword or response are skipped. `is_active` is `true` only
/// for the literal `true` (or when the column is absent); an unparseable
/// `priority` becomes `0`. Drafts are not validated here; the store does
/// that on insert.
pub fn import_csv(input: &str) -> Result<Vec<RuleDraft>, RuleError> {
    let mut records = parse_records(input).into_iter();
    let headers: Vec<String> = records
        .next()
        .unwrap_or_default()
        .into_iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect();
    if !missing.is_empty() {
        return Err(RuleError::Csv(format!(
            "missing headers: {}",
            missing.join(", ")
        )));
    }

    let mut drafts = Vec::new();
    for record in records {
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let values = record
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat(""));
        let mut draft = RuleDraft::default();
        for (header, value) in headers.iter().zip(values) {
            match header.as_str() {
                "keyword" => draft.keyword = value.to_string(),
                "response" => draft.response = value.to_string(),
                "synonyms" => {
                    draft.synonyms = value
                        .split(';')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "regex_pattern" => {
                    draft.regex_pattern = Some(value).filter(|v| !v.is_empty()).map(str::to_string);
                }
                "is_active" => draft.is_active = value.trim() == "true",
                "priority" => draft.priority = value.trim().parse().unwrap_or(0),
                _ => {}
            }
        }

        if draft.keyword.trim().is_empty() || draft.response.trim().is_empty() {
            continue;
        }
        drafts.push(draft);
    }

    if drafts.is_empty() {
        return Err(RuleError::Csv("no valid keyword responses found".into()));
    }
    Ok(drafts)
}

/// Outcome of importing a CSV document into a store.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub created: Vec<StoredRule>,
    pub skipped: usize,
}

/// Parse `input` and insert every row into `store` for `tenant_id`.
///
/// Rows the store rejects are logged and counted in
/// [`ImportReport::skipped`]; the remaining rows are still created.
pub fn import_into(
    store: &dyn RuleStore,
    tenant_id: &str,
    input: &str,
) -> Result<ImportReport, RuleError> {
    let drafts = import_csv(input)?;
    let mut report = ImportReport {
        created: Vec::with_capacity(drafts.len()),
        skipped: 0,
    };
    for draft in drafts {
        let keyword = draft.keyword.clone();
        match store.create(tenant_id, draft) {
            Ok(stored) => report.created.push(stored),
            Err(err) => {
                warn!(tenant_id, keyword = %keyword, error = %err, "skipping CSV row");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}
