//! View models for the three audit report pages.
//!
//! Each builder takes the raw record by reference and returns an owned view,
//! so editing a view never touches its source. Builders are pure: no I/O, no
//! logging, no shared mutable state.
//!
//! - [`build_audit_summary_view`]: pass/fail tallies per check
//! - [`build_audit_raw_view`]: raw dump of one audit
//! - [`build_check_resources_view`]: one check's resources, filtered by outcome

pub mod breadcrumb;
pub mod raw;
pub mod resources;
pub mod summary;

pub use breadcrumb::Breadcrumb;
pub use raw::{build_audit_raw_view, AuditRawView};
pub use resources::{build_check_resources_view, CheckResourcesView, ResourceView};
pub use summary::{build_audit_summary_view, AuditStats, CheckSummary, CriterionRef, AuditSummaryView};

use serde::Serialize;

use crate::model::Audit;

/// Account reference attached to audit views. The name is resolved by a
/// separate lookup before render.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AccountSubscription {
    pub account_id: String,
    pub account_name: Option<String>,
}

impl AccountSubscription {
    pub fn unresolved(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            account_name: None,
        }
    }
}

/// An audit copy augmented with the fields the audit templates read.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuditView {
    #[serde(flatten)]
    pub audit: Audit,

    pub account_subscription_id: AccountSubscription,

    pub date_completed: String,

    /// Always equal to `date_completed`; the source has no separate update time.
    pub date_updated: String,
}

/// Keys the view derives; copies of them in the source are replaced.
const DERIVED_KEYS: [&str; 3] = ["account_subscription_id", "date_completed", "date_updated"];

impl AuditView {
    pub fn new(mut audit: Audit, account_id: impl Into<String>) -> Self {
        for key in DERIVED_KEYS {
            audit.attributes.remove(key);
        }
        let completed = audit.completed.clone();
        Self {
            audit,
            account_subscription_id: AccountSubscription::unresolved(account_id),
            date_completed: completed.clone(),
            date_updated: completed,
        }
    }
}
