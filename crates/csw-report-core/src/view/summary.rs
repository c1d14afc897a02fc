//! Audit summary page: per-check tallies plus audit-wide totals.

use serde::Serialize;
use serde_json::Value;

use super::breadcrumb::{summary_trail, Breadcrumb};
use super::AuditView;
use crate::model::{Audit, AuditSummary, Check};
use crate::status::alias_map;

/// Criterion reference as the templates expect it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CriterionRef {
    pub criterion_name: String,
    pub id: Value,
}

/// Display-vocabulary tallies for one check. A tally whose raw key is
/// missing from the check summary is left out of the output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckSummary {
    pub id: Value,
    pub criterion_id: CriterionRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tested: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Value>,
}

impl CheckSummary {
    pub fn from_check(check: &Check) -> Self {
        let mut summary = Self {
            id: check.id.clone(),
            criterion_id: CriterionRef {
                criterion_name: check.title.clone(),
                id: check.id.clone(),
            },
            passed: None,
            tested: None,
            failed: None,
            ignored: None,
        };
        for pair in alias_map() {
            let stat = check.display_stat(pair.raw).cloned();
            if let Some(slot) = summary.slot_mut(pair.display) {
                *slot = stat;
            }
        }
        summary
    }

    /// Tally by display key.
    pub fn get(&self, display: &str) -> Option<&Value> {
        match display {
            "passed" => self.passed.as_ref(),
            "tested" => self.tested.as_ref(),
            "failed" => self.failed.as_ref(),
            "ignored" => self.ignored.as_ref(),
            _ => None,
        }
    }

    fn slot_mut(&mut self, display: &str) -> Option<&mut Option<Value>> {
        match display {
            "passed" => Some(&mut self.passed),
            "tested" => Some(&mut self.tested),
            "failed" => Some(&mut self.failed),
            "ignored" => Some(&mut self.ignored),
            _ => None,
        }
    }
}

/// `audit_stats` block of the summary page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuditStats {
    /// Audit summary carrying both vocabularies.
    pub all: AuditSummary,
    pub criteria: Vec<CheckSummary>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuditSummaryView {
    pub audit: AuditView,
    pub audit_stats: AuditStats,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Add each display key next to its raw key. Raw keys stay in place; a
/// missing raw key leaves its display key absent too.
pub fn with_display_aliases(summary: &AuditSummary) -> AuditSummary {
    let mut out = summary.clone();
    for pair in alias_map() {
        if let Some(value) = summary.get(pair.raw) {
            out.insert(pair.display.to_string(), value.clone());
        }
    }
    out
}

pub fn build_audit_summary_view(audit: &Audit) -> AuditSummaryView {
    let criteria = audit.checks.iter().map(CheckSummary::from_check).collect();

    let mut copy = audit.clone();
    copy.summary = with_display_aliases(&audit.summary);
    let all = copy.summary.clone();
    let account = copy.account.clone();

    AuditSummaryView {
        audit: AuditView::new(copy, account),
        audit_stats: AuditStats { all, criteria },
        breadcrumbs: summary_trail(),
    }
}
