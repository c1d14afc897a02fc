use csw_report_core::{
    alias_map, build_audit_raw_view, build_audit_summary_view, build_check_resources_view,
    find_status_by_id, format_timestamp, Audit, CheckResourcesRequest, ReportError, Status,
};
use serde_json::{json, Value};

fn stat(n: u64) -> Value {
    json!({"display_stat": n, "raw": n})
}

fn sample_audit() -> Audit {
    serde_json::from_value(json!({
        "account": "123456789012",
        "completed": "2023-05-04T13:02:09.000Z",
        "active_criteria": 2,
        "summary": {
            "compliant": {"display_stat": 1},
            "applicable": {"display_stat": 3},
            "non_compliant": {"display_stat": 1},
            "not_applicable": {"display_stat": 0}
        },
        "checks": [
            {
                "id": 1,
                "title": "S3 Buckets: Bucket Versioning Enabled",
                "summary": {
                    "compliant": stat(1),
                    "applicable": stat(3),
                    "non_compliant": stat(1),
                    "not_applicable": stat(0)
                },
                "resources": [
                    {"resource_id": "bucket-pass", "resource_compliance": {"status_id": 2}},
                    {"resource_id": "bucket-fail", "resource_compliance": {"status_id": 3}},
                    {"resource_id": "bucket-exception", "resource_compliance": {"status_id": 4}}
                ]
            },
            {
                "id": 2,
                "title": "CloudTrail: Logging Enabled",
                "summary": {
                    "compliant": stat(2),
                    "applicable": stat(2),
                    "non_compliant": stat(0),
                    "not_applicable": stat(1)
                },
                "resources": []
            }
        ]
    }))
    .expect("valid audit")
}

fn request(status_name: &str, check_id: Value) -> CheckResourcesRequest {
    CheckResourcesRequest {
        status_name: status_name.to_string(),
        account: "123456789012".to_string(),
        audit: sample_audit(),
        check_id,
        audit_date: "2023-05-04T13:02:09.000Z".to_string(),
        attributes: Default::default(),
    }
}

fn resource_ids(view: &csw_report_core::CheckResourcesView) -> Vec<Value> {
    view.resources
        .iter()
        .map(|r| r.resource.attributes["resource_id"].clone())
        .collect()
}

// ── Status taxonomy ──────────────────────────────────────────────────────

#[test]
fn status_lookup_matches_catalogue() {
    assert_eq!(find_status_by_id(2).map(|s| s.status_name), Some("Pass"));
    assert_eq!(find_status_by_id(3).map(|s| s.status_name), Some("Fail"));
    assert!(find_status_by_id(99).is_none());
}

// ── Date formatter ───────────────────────────────────────────────────────

#[test]
fn format_timestamp_renders_day_year_and_time() {
    let out = format_timestamp("2023-05-04T13:02:09.000Z").expect("format");
    assert!(out.contains('4'));
    assert!(out.contains("2023"));
    assert!(out.contains("13:02:09"));
}

#[test]
fn format_timestamp_rejects_garbage() {
    let err = format_timestamp("not-a-date").expect_err("garbage");
    assert!(matches!(err, ReportError::MalformedTimestamp { .. }));
}

// ── Audit summary view ───────────────────────────────────────────────────

#[test]
fn summary_view_carries_both_vocabularies() {
    let view = build_audit_summary_view(&sample_audit());
    let all = &view.audit_stats.all;
    for pair in alias_map() {
        assert!(all.contains_key(pair.raw), "missing raw key {}", pair.raw);
        assert_eq!(all.get(pair.raw), all.get(pair.display), "pair {}", pair.raw);
    }
}

#[test]
fn summary_view_builds_check_summaries_in_order() {
    let view = build_audit_summary_view(&sample_audit());
    let criteria = &view.audit_stats.criteria;
    assert_eq!(criteria.len(), 2);
    assert_eq!(criteria[0].id, json!(1));
    assert_eq!(criteria[0].criterion_id.criterion_name, "S3 Buckets: Bucket Versioning Enabled");
    assert_eq!(criteria[0].passed, Some(json!(1)));
    assert_eq!(criteria[0].tested, Some(json!(3)));
    assert_eq!(criteria[1].id, json!(2));
    assert_eq!(criteria[1].ignored, Some(json!(1)));
}

#[test]
fn summary_view_json_contract() {
    let view = build_audit_summary_view(&sample_audit());
    let v = serde_json::to_value(&view).expect("serialize");

    assert_eq!(
        v["audit"]["account_subscription_id"],
        json!({"account_id": "123456789012", "account_name": null})
    );
    assert_eq!(v["audit"]["date_completed"], json!("2023-05-04T13:02:09.000Z"));
    assert_eq!(v["audit"]["date_updated"], json!("2023-05-04T13:02:09.000Z"));
    assert_eq!(v["audit"]["active_criteria"], json!(2));
    assert_eq!(v["audit"]["summary"]["passed"], v["audit"]["summary"]["compliant"]);
    assert_eq!(v["audit_stats"]["criteria"][0]["criterion_id"]["id"], json!(1));
    assert_eq!(v["audit_stats"]["criteria"][0]["failed"], json!(1));
    assert_eq!(v["breadcrumbs"], json!([{"title": "Audit list", "link": "/../../../.."}]));
}

#[test]
fn summary_view_is_idempotent_and_leaves_source_untouched() {
    let audit = sample_audit();
    let first = build_audit_summary_view(&audit);
    let second = build_audit_summary_view(&audit);

    assert_eq!(first.audit_stats, second.audit_stats);
    assert_eq!(audit, sample_audit());
    assert!(!audit.summary.contains_key("passed"));
}

#[test]
fn summary_view_has_one_breadcrumb() {
    let view = build_audit_summary_view(&sample_audit());
    assert_eq!(view.breadcrumbs.len(), 1);
}

#[test]
fn editing_a_view_does_not_change_the_audit() {
    let audit = sample_audit();
    let mut view = build_audit_summary_view(&audit);
    view.audit.audit.checks.clear();
    view.audit_stats.all.insert("compliant".to_string(), json!(999));

    assert_eq!(audit.checks.len(), 2);
    assert_eq!(audit.summary["compliant"], json!({"display_stat": 1}));
}

// ── Raw view ─────────────────────────────────────────────────────────────

#[test]
fn raw_view_has_two_breadcrumbs() {
    let view = build_audit_raw_view(&sample_audit(), "2023-05-04T13:02:09.000Z").expect("view");
    assert_eq!(view.breadcrumbs.len(), 2);
    assert_eq!(view.breadcrumbs[0].title, "Audit list");
    assert_eq!(view.breadcrumbs[0].link, "/../../../../../..");
    assert_eq!(view.breadcrumbs[1].title, "Audit: 4 May 2023, 13:02:09");
    assert_eq!(view.breadcrumbs[1].link, "/.");
}

#[test]
fn raw_view_fails_on_malformed_date() {
    let err = build_audit_raw_view(&sample_audit(), "not-a-date").expect_err("bad date");
    assert!(matches!(err, ReportError::MalformedTimestamp { .. }));
}

// ── Check resources view ─────────────────────────────────────────────────

#[test]
fn passed_view_includes_pass_and_exception() {
    let view = build_check_resources_view(&request("passed", json!(1))).expect("view");
    assert_eq!(resource_ids(&view), vec![json!("bucket-pass"), json!("bucket-exception")]);
    assert_eq!(view.status, Some(Status::PASS));
    assert_eq!(view.resources[1].status, Some(Status::EXCEPTION));
}

#[test]
fn failed_view_includes_fail_only() {
    let view = build_check_resources_view(&request("failed", json!(1))).expect("view");
    assert_eq!(resource_ids(&view), vec![json!("bucket-fail")]);
    assert_eq!(view.status, Some(Status::FAIL));
}

#[test]
fn other_status_names_render_the_failed_view() {
    let view = build_check_resources_view(&request("anything", json!(1))).expect("view");
    assert_eq!(resource_ids(&view), vec![json!("bucket-fail")]);
}

#[test]
fn resources_view_matches_check_id_given_as_text() {
    let view = build_check_resources_view(&request("passed", json!("1"))).expect("view");
    assert_eq!(view.check.id, json!(1));
    assert_eq!(view.check_id, json!("1"));
}

#[test]
fn resources_view_missing_check_is_not_found() {
    let err = build_check_resources_view(&request("passed", json!(42))).expect_err("missing");
    assert_eq!(
        err,
        ReportError::CheckNotFound {
            check_id: "42".to_string()
        }
    );
}

#[test]
fn resources_view_fails_on_malformed_audit_date() {
    let mut req = request("passed", json!(1));
    req.audit_date = "04/05/2023".to_string();
    let err = build_check_resources_view(&req).expect_err("bad date");
    assert!(matches!(err, ReportError::MalformedTimestamp { .. }));
}

#[test]
fn resources_view_json_contract() {
    let view = build_check_resources_view(&request("passed", json!(1))).expect("view");
    let v = serde_json::to_value(&view).expect("serialize");
    let obj = v.as_object().expect("object");

    for key in ["audit", "check", "resources", "status", "breadcrumbs", "account", "check_id"] {
        assert!(obj.contains_key(key), "missing key: {}", key);
    }
    assert_eq!(v["status"], json!({"id": 2, "status_name": "Pass"}));
    assert_eq!(v["resources"][0]["compliance"], json!({"status_id": 2}));
    assert_eq!(v["resources"][0]["resource"]["resource_id"], json!("bucket-pass"));
    assert_eq!(v["resources"][0]["status"]["status_name"], json!("Pass"));
    assert_eq!(v["audit"]["account_subscription_id"]["account_id"], json!("123456789012"));
    assert_eq!(v["audit"]["date_updated"], v["audit"]["completed"]);
    assert_eq!(v["breadcrumbs"].as_array().map(Vec::len), Some(2));
}

#[test]
fn resources_outside_both_pages_are_never_listed() {
    let mut req = request("passed", json!(1));
    req.audit.checks[0].resources[0].resource_compliance.status_id = 1;
    req.audit.checks[0].resources[2].resource_compliance.status_id = 99;

    let passed = build_check_resources_view(&req).expect("view");
    assert!(passed.resources.is_empty());

    req.status_name = "failed".to_string();
    let failed = build_check_resources_view(&req).expect("view");
    assert_eq!(resource_ids(&failed), vec![json!("bucket-fail")]);
}

#[test]
fn derived_audit_fields_appear_once_and_win_over_source() {
    let audit: Audit = serde_json::from_value(json!({
        "account": "123",
        "completed": "2023-05-04T13:02:09Z",
        "account_subscription_id": 7,
        "date_completed": "2023-05-04T13:05:00Z",
        "date_updated": "2023-05-06T00:00:00Z"
    }))
    .expect("audit");

    let view = build_audit_summary_view(&audit);
    let text = serde_json::to_string(&view.audit).expect("serialize");
    for key in ["account_subscription_id", "date_completed", "date_updated"] {
        assert_eq!(text.matches(&format!("\"{}\"", key)).count(), 1, "key {}", key);
    }

    let v: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(v["account_subscription_id"], json!({"account_id": "123", "account_name": null}));
    assert_eq!(v["date_completed"], json!("2023-05-04T13:02:09Z"));
    assert_eq!(v["date_updated"], json!("2023-05-04T13:02:09Z"));
}

#[test]
fn resources_view_also_replaces_source_copies_of_derived_fields() {
    let mut req = request("failed", json!(1));
    req.audit
        .attributes
        .insert("account_subscription_id".to_string(), json!("stale"));

    let view = build_check_resources_view(&req).expect("view");
    let text = serde_json::to_string(&view.audit).expect("serialize");
    assert_eq!(text.matches("\"account_subscription_id\"").count(), 1);
    assert!(!text.contains("stale"));
}
