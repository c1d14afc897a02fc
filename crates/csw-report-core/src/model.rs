//! Raw audit records as produced by the audit runner.
//!
//! Only the fields the report reads are typed; everything else is kept in
//! `attributes` so a view carries a faithful copy of its source.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Alias-keyed aggregate counts for a whole audit.
pub type AuditSummary = Map<String, Value>;

/// One completed audit run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Audit {
    /// Owning account id.
    pub account: String,

    /// Completion timestamp, `YYYY-MM-DDTHH:MM:SS...`.
    pub completed: String,

    #[serde(default)]
    pub summary: AuditSummary,

    #[serde(default)]
    pub checks: Vec<Check>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Audit {
    /// Find a check by id, comparing ids by their scalar text so that a
    /// numeric id matches the same id taken from a URL segment.
    pub fn find_check(&self, check_id: &Value) -> Option<&Check> {
        if !is_scalar(check_id) {
            return None;
        }
        let wanted = id_text(check_id);
        self.checks
            .iter()
            .find(|check| is_scalar(&check.id) && id_text(&check.id) == wanted)
    }
}

/// One evaluated compliance criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Check {
    pub id: Value,

    pub title: String,

    /// Keyed by the raw vocabulary (`compliant`, `applicable`, ...).
    #[serde(default)]
    pub summary: Map<String, Value>,

    #[serde(default)]
    pub resources: Vec<Resource>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Check {
    /// `summary[key].display_stat`, if both levels are present.
    pub fn display_stat(&self, key: &str) -> Option<&Value> {
        self.summary.get(key)?.get("display_stat")
    }
}

/// One scanned entity assessed against a check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub resource_compliance: ResourceCompliance,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Outcome of assessing a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceCompliance {
    pub status_id: i64,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Input for the per-check resource page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResourcesRequest {
    /// `"passed"` selects the passed page; anything else the failed page.
    pub status_name: String,

    pub account: String,

    pub audit: Audit,

    pub check_id: Value,

    pub audit_date: String,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Text form of an id: strings without quotes, anything else as JSON.
pub fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}
