//! Structured observability hooks for view-model builds.
//!
//! The builders themselves stay silent; callers wrap a build in a
//! [`ViewSpan`] and report the outcome through the `emit_*` functions.

use tracing::info;

/// RAII guard that enters a view-scoped span for the duration of a build.
///
/// ```ignore
/// let _span = ViewSpan::enter("summary", "123456789012");
/// ```
pub struct ViewSpan {
    _span: tracing::span::EnteredSpan,
}

impl ViewSpan {
    pub fn enter(view: &str, account: &str) -> Self {
        let span = tracing::info_span!("csw.view", view = %view, account = %account);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: audit summary view built.
pub fn emit_summary_built(account: &str, checks: usize) {
    info!(event = "view.built", view = "summary", account = %account, checks = checks);
}

/// Emit event: raw audit view built.
pub fn emit_raw_built(account: &str, audit_date: &str) {
    info!(event = "view.built", view = "raw", account = %account, audit_date = %audit_date);
}

/// Emit event: per-check resource view built.
pub fn emit_resources_built(account: &str, check_id: &str, status_name: &str, resources: usize) {
    info!(
        event = "view.built",
        view = "resources",
        account = %account,
        check_id = %check_id,
        status_name = %status_name,
        resources = resources,
    );
}

/// Emit event: a resource referenced a status id missing from the catalogue.
pub fn emit_unresolved_status(check_id: &str, status_id: i64) {
    tracing::warn!(event = "view.unresolved_status", check_id = %check_id, status_id = status_id);
}

/// Emit event: a build failed (warning level).
pub fn emit_view_failed(view: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "view.failed", view = %view, error = %error);
}
