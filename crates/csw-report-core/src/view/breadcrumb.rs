//! Navigation trails for report pages.

use serde::Serialize;

use crate::date::format_timestamp;
use crate::error::Result;

pub const AUDIT_LIST_TITLE: &str = "Audit list";

/// Audit list link as seen from the audit summary page.
pub const SUMMARY_AUDIT_LIST_LINK: &str = "/../../../..";

/// Audit list link as seen from the raw and per-check pages.
pub const DETAIL_AUDIT_LIST_LINK: &str = "/../../../../../..";

pub const SELF_LINK: &str = "/.";

/// One `{title, link}` entry of a breadcrumb trail.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Breadcrumb {
    pub title: String,
    pub link: String,
}

impl Breadcrumb {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Trail for the audit summary page: back to the audit list.
pub fn summary_trail() -> Vec<Breadcrumb> {
    vec![Breadcrumb::new(AUDIT_LIST_TITLE, SUMMARY_AUDIT_LIST_LINK)]
}

/// Trail for pages below one audit: audit list, then the audit itself.
pub fn audit_trail(audit_date: &str) -> Result<Vec<Breadcrumb>> {
    Ok(vec![
        Breadcrumb::new(AUDIT_LIST_TITLE, DETAIL_AUDIT_LIST_LINK),
        Breadcrumb::new(format!("Audit: {}", format_timestamp(audit_date)?), SELF_LINK),
    ])
}
