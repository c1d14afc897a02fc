//! Per-check resource page, filtered to one compliance outcome.

use serde::Serialize;
use serde_json::Value;

use super::breadcrumb::{audit_trail, Breadcrumb};
use super::AuditView;
use crate::error::{ReportError, Result};
use crate::model::{id_text, Check, CheckResourcesRequest, Resource, ResourceCompliance};
use crate::status::{find_status_by_id, Status};

/// Which outcome page is being rendered.
///
/// Business rule: the passed page also lists Exception resources, while the
/// failed page lists Fail resources only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomePage {
    Passed,
    Failed,
}

impl OutcomePage {
    /// `"passed"` selects the passed page; any other name the failed page.
    pub fn from_status_name(name: &str) -> Self {
        if name == "passed" {
            OutcomePage::Passed
        } else {
            OutcomePage::Failed
        }
    }

    pub fn primary_status_id(self) -> i64 {
        match self {
            OutcomePage::Passed => Status::PASS.id,
            OutcomePage::Failed => Status::FAIL.id,
        }
    }

    pub fn included_status_ids(self) -> &'static [i64] {
        match self {
            OutcomePage::Passed => &[2, 4],
            OutcomePage::Failed => &[3],
        }
    }

    pub fn includes(self, status_id: i64) -> bool {
        self.included_status_ids().contains(&status_id)
    }
}

/// One listed resource. `status` is `None` when the id is not in the
/// catalogue.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceView {
    pub compliance: ResourceCompliance,
    pub resource: Resource,
    pub status: Option<Status>,
}

impl ResourceView {
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            compliance: resource.resource_compliance.clone(),
            resource: resource.clone(),
            status: find_status_by_id(resource.resource_compliance.status_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckResourcesView {
    pub account: String,
    pub check_id: Value,
    pub status_name: String,
    pub audit_date: String,
    pub audit: AuditView,
    pub check: Check,
    pub resources: Vec<ResourceView>,
    pub status: Option<Status>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Resources whose status falls on `page`, in source order.
pub fn resources_for_page(resources: &[Resource], page: OutcomePage) -> Vec<ResourceView> {
    resources
        .iter()
        .filter(|resource| page.includes(resource.resource_compliance.status_id))
        .map(ResourceView::from_resource)
        .collect()
}

/// Fails with `CheckNotFound` when `check_id` is not in the audit, and with
/// `MalformedTimestamp` when `audit_date` cannot be formatted.
pub fn build_check_resources_view(data: &CheckResourcesRequest) -> Result<CheckResourcesView> {
    let page = OutcomePage::from_status_name(&data.status_name);
    let status = find_status_by_id(page.primary_status_id());

    let check = data
        .audit
        .find_check(&data.check_id)
        .ok_or_else(|| ReportError::CheckNotFound {
            check_id: id_text(&data.check_id),
        })?;
    let resources = resources_for_page(&check.resources, page);
    let breadcrumbs = audit_trail(&data.audit_date)?;

    Ok(CheckResourcesView {
        account: data.account.clone(),
        check_id: data.check_id.clone(),
        status_name: data.status_name.clone(),
        audit_date: data.audit_date.clone(),
        audit: AuditView::new(data.audit.clone(), data.account.clone()),
        check: check.clone(),
        resources,
        status,
        breadcrumbs,
    })
}
