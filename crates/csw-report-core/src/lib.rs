//! CSW Report Core
//!
//! Turns raw compliance audit records into view models for the report
//! pages: the audit summary, the raw audit dump, and the per-check resource
//! listing. Also collates statistics across accounts and teams.

pub mod collator;
pub mod date;
pub mod error;
pub mod model;
pub mod obs;
pub mod status;
pub mod telemetry;
pub mod view;

pub use collator::{
    Account, AccountCriterionStats, AuditCriterion, AuditIndex, AuditTotals, Collator, Criterion,
    CriterionStats, CriterionTotals, LatestAudit, LatestAuditSource, ProductTeam,
    TeamCriterionStats,
};
pub use date::{format_timestamp, parse_timestamp};
pub use error::{ReportError, Result};
pub use model::{
    id_text, Audit, AuditSummary, Check, CheckResourcesRequest, Resource, ResourceCompliance,
};
pub use obs::{
    emit_raw_built, emit_resources_built, emit_summary_built, emit_unresolved_status,
    emit_view_failed, ViewSpan,
};
pub use status::{alias_map, find_status_by_id, list_statuses, AliasPair, Status};
pub use telemetry::init_tracing;
pub use view::resources::OutcomePage;
pub use view::{
    build_audit_raw_view, build_audit_summary_view, build_check_resources_view,
    AccountSubscription, AuditRawView, AuditStats, AuditSummaryView, AuditView, Breadcrumb,
    CheckResourcesView, CheckSummary, CriterionRef, ResourceView,
};

/// CSW report version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
