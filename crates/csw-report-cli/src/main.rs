//! CSW Report CLI
//!
//! The `csw-report` command builds report view models from raw audit JSON
//! and writes them as JSON for the rendering layer.
//!
//! ## Commands
//!
//! - `summary`: audit summary page
//! - `raw`: raw audit dump page
//! - `resources`: one check's resources, filtered by outcome
//! - `format-date`: render an audit timestamp
//! - `statuses`: show the status catalogue and alias map
//! - `team-stats` / `criteria-stats`: collate latest audits across accounts

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

use csw_report_core::{
    alias_map, build_audit_raw_view, build_audit_summary_view, build_check_resources_view,
    emit_raw_built, emit_resources_built, emit_summary_built, emit_unresolved_status,
    emit_view_failed, find_status_by_id, format_timestamp, id_text, list_statuses, Account,
    Audit, AuditIndex, CheckResourcesRequest, Collator, Criterion, LatestAudit, ProductTeam,
    ViewSpan,
};

#[derive(Parser)]
#[command(name = "csw-report")]
#[command(author = "CSW Engineering")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build CSW compliance report view models", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true, env = "CSW_REPORT_LOG_JSON")]
    json: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true, env = "CSW_REPORT_OUTPUT")]
    output: Option<PathBuf>,

    /// Emit single-line JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the audit summary view
    Summary {
        /// Audit JSON file
        #[arg(short, long)]
        audit: PathBuf,
    },

    /// Build the raw audit view
    Raw {
        /// Audit JSON file
        #[arg(short, long)]
        audit: PathBuf,

        /// Audit date shown in the breadcrumb (YYYY-MM-DDTHH:MM:SS...)
        #[arg(long)]
        audit_date: String,
    },

    /// Build the per-check resource view
    Resources {
        /// Request JSON file ({status_name, account, audit, check_id, audit_date})
        #[arg(long, conflicts_with_all = ["audit", "account", "check_id", "status", "audit_date"])]
        request: Option<PathBuf>,

        /// Audit JSON file
        #[arg(short, long)]
        audit: Option<PathBuf>,

        /// Account id
        #[arg(long)]
        account: Option<String>,

        /// Check id
        #[arg(long)]
        check_id: Option<String>,

        /// Outcome page: "passed", anything else renders the failed page
        #[arg(long, default_value = "failed")]
        status: String,

        /// Audit date shown in the breadcrumb
        #[arg(long)]
        audit_date: Option<String>,
    },

    /// Render an audit timestamp the way the report shows it
    FormatDate {
        /// Timestamp (YYYY-MM-DDTHH:MM:SS...)
        timestamp: String,
    },

    /// Show the status catalogue and alias map
    Statuses,

    /// Sum latest audit totals across active accounts
    TeamStats {
        /// Collation input JSON file ({accounts, teams, criteria, latest_audits})
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Per-criterion totals by product team and account
    CriteriaStats {
        /// Collation input JSON file ({accounts, teams, criteria, latest_audits})
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Collation input file layout.
#[derive(Debug, Deserialize)]
struct CollationInput {
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    teams: Vec<ProductTeam>,
    #[serde(default)]
    criteria: Vec<Criterion>,
    #[serde(default)]
    latest_audits: Vec<LatestAudit>,
}

#[derive(Serialize)]
struct StatusCatalogue {
    statuses: Vec<csw_report_core::Status>,
    aliases: Vec<csw_report_core::AliasPair>,
}

/// Output settings shared by every command.
struct OutputConfig {
    path: Option<PathBuf>,
    compact: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    csw_report_core::init_tracing(cli.json, level);

    let out = OutputConfig {
        path: cli.output,
        compact: cli.compact,
    };

    match cli.command {
        Commands::Summary { audit } => cmd_summary(&audit, &out),
        Commands::Raw { audit, audit_date } => cmd_raw(&audit, &audit_date, &out),
        Commands::Resources {
            request,
            audit,
            account,
            check_id,
            status,
            audit_date,
        } => {
            let request = match request {
                Some(path) => read_json_file(&path)?,
                None => assemble_request(audit, account, check_id, status, audit_date)?,
            };
            cmd_resources(&request, &out)
        }
        Commands::FormatDate { timestamp } => cmd_format_date(&timestamp),
        Commands::Statuses => cmd_statuses(&out),
        Commands::TeamStats { input } => cmd_team_stats(&input, &out),
        Commands::CriteriaStats { input } => cmd_criteria_stats(&input, &out),
    }
}

// ========== View Commands ==========

fn cmd_summary(path: &Path, out: &OutputConfig) -> Result<()> {
    let audit: Audit = read_json_file(path)?;
    let _span = ViewSpan::enter("summary", &audit.account);

    let view = build_audit_summary_view(&audit);
    emit_summary_built(&audit.account, view.audit_stats.criteria.len());
    write_output(&view, out)
}

fn cmd_raw(path: &Path, audit_date: &str, out: &OutputConfig) -> Result<()> {
    let audit: Audit = read_json_file(path)?;
    let _span = ViewSpan::enter("raw", &audit.account);

    let view = build_audit_raw_view(&audit, audit_date).inspect_err(|e| emit_view_failed("raw", e))?;
    emit_raw_built(&audit.account, audit_date);
    write_output(&view, out)
}

fn cmd_resources(request: &CheckResourcesRequest, out: &OutputConfig) -> Result<()> {
    let _span = ViewSpan::enter("resources", &request.account);

    let view = build_check_resources_view(request)
        .inspect_err(|e| emit_view_failed("resources", e))?;

    let check_id = id_text(&request.check_id);
    // Unresolved ids never land on either page; report them from the whole check.
    for resource in view
        .check
        .resources
        .iter()
        .filter(|r| find_status_by_id(r.resource_compliance.status_id).is_none())
    {
        emit_unresolved_status(&check_id, resource.resource_compliance.status_id);
    }
    emit_resources_built(&request.account, &check_id, &request.status_name, view.resources.len());
    write_output(&view, out)
}

/// Build a resources request from individual flags.
fn assemble_request(
    audit: Option<PathBuf>,
    account: Option<String>,
    check_id: Option<String>,
    status: String,
    audit_date: Option<String>,
) -> Result<CheckResourcesRequest> {
    let Some(audit_path) = audit else {
        bail!("either --request or --audit is required");
    };
    let Some(check_id) = check_id else {
        bail!("--check-id is required with --audit");
    };
    let audit: Audit = read_json_file(&audit_path)?;
    let account = account.unwrap_or_else(|| audit.account.clone());
    let audit_date = audit_date.unwrap_or_else(|| audit.completed.clone());
    debug!(account = %account, check_id = %check_id, "assembled resources request from flags");

    Ok(CheckResourcesRequest {
        status_name: status,
        account,
        audit,
        check_id: Value::String(check_id),
        audit_date,
        attributes: Default::default(),
    })
}

// ========== Reference Commands ==========

fn cmd_format_date(timestamp: &str) -> Result<()> {
    let formatted = format_timestamp(timestamp)?;
    println!("{}", formatted);
    Ok(())
}

fn cmd_statuses(out: &OutputConfig) -> Result<()> {
    let catalogue = StatusCatalogue {
        statuses: list_statuses().to_vec(),
        aliases: alias_map().to_vec(),
    };
    write_output(&catalogue, out)
}

// ========== Collation Commands ==========

fn load_collation(path: &Path) -> Result<(CollationInput, AuditIndex)> {
    let mut input: CollationInput = read_json_file(path)?;
    let index: AuditIndex = std::mem::take(&mut input.latest_audits).into_iter().collect();
    debug!(
        accounts = input.accounts.len(),
        latest_audits = index.len(),
        "loaded collation input"
    );
    Ok((input, index))
}

fn cmd_team_stats(path: &Path, out: &OutputConfig) -> Result<()> {
    let (input, index) = load_collation(path)?;
    let totals = Collator::new(index).team_stats(&input.accounts);
    write_output(&totals, out)
}

fn cmd_criteria_stats(path: &Path, out: &OutputConfig) -> Result<()> {
    let (input, index) = load_collation(path)?;
    let stats = Collator::new(index).criteria_stats(&input.criteria, &input.accounts, &input.teams);
    write_output(&stats, out)
}

// ========== Helpers ==========

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", path))
}

fn write_output<T: Serialize>(value: &T, out: &OutputConfig) -> Result<()> {
    let rendered = if out.compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };

    match &out.path {
        Some(path) => {
            std::fs::write(path, rendered + "\n")
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            debug!(path = ?path, "wrote view model");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
