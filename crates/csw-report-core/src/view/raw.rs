//! Raw audit dump page.

use serde::Serialize;

use super::breadcrumb::{audit_trail, Breadcrumb};
use crate::error::Result;
use crate::model::Audit;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuditRawView {
    pub audit: Audit,
    pub audit_date: String,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Fails with `MalformedTimestamp` when `audit_date` cannot be formatted.
pub fn build_audit_raw_view(audit: &Audit, audit_date: &str) -> Result<AuditRawView> {
    Ok(AuditRawView {
        audit: audit.clone(),
        audit_date: audit_date.to_string(),
        breadcrumbs: audit_trail(audit_date)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use serde_json::json;

    fn audit() -> Audit {
        serde_json::from_value(json!({
            "account": "222",
            "completed": "2022-11-30T08:00:00Z",
            "checks": []
        }))
        .expect("audit")
    }

    #[test]
    fn test_raw_view_has_two_breadcrumbs() {
        let view = build_audit_raw_view(&audit(), "2022-11-30T08:00:00Z").expect("view");
        assert_eq!(view.breadcrumbs.len(), 2);
        assert_eq!(view.breadcrumbs[1].title, "Audit: 30 Nov 2022, 08:00:00");
        assert_eq!(view.audit, audit());
    }

    #[test]
    fn test_raw_view_rejects_bad_date() {
        let err = build_audit_raw_view(&audit(), "30/11/2022").expect_err("bad date");
        assert!(matches!(err, ReportError::MalformedTimestamp { .. }));
    }
}
