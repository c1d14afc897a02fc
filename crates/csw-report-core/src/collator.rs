//! Cross-account aggregation of audit statistics.
//!
//! Totals are collated from each account's latest audit, per product team
//! and per criterion. Latest audits are looked up through
//! [`LatestAuditSource`] so callers can back it with whatever store they
//! have; [`AuditIndex`] is the in-memory implementation.

use std::collections::HashMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Audit-wide counters of a single audit, or a sum of several.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditTotals {
    #[serde(default)]
    pub active_criteria: u64,
    #[serde(default)]
    pub criteria_processed: u64,
    #[serde(default)]
    pub criteria_passed: u64,
    #[serde(default)]
    pub criteria_failed: u64,
    #[serde(default)]
    pub issues_found: u64,
}

impl AddAssign for AuditTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.active_criteria += rhs.active_criteria;
        self.criteria_processed += rhs.criteria_processed;
        self.criteria_passed += rhs.criteria_passed;
        self.criteria_failed += rhs.criteria_failed;
        self.issues_found += rhs.issues_found;
    }
}

/// Per-criterion resource counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriterionTotals {
    #[serde(default)]
    pub resources: u64,
    #[serde(default)]
    pub tested: u64,
    #[serde(default)]
    pub passed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub ignored: u64,
}

impl AddAssign for CriterionTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.resources += rhs.resources;
        self.tested += rhs.tested;
        self.passed += rhs.passed;
        self.failed += rhs.failed;
        self.ignored += rhs.ignored;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: String,
    pub product_team_id: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, Value>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductTeam {
    pub id: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Criterion {
    pub id: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, Value>,
}

/// Counters for one criterion within an audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditCriterion {
    pub criterion_id: String,
    #[serde(flatten)]
    pub totals: CriterionTotals,
}

/// The most recent audit of an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatestAudit {
    pub account_id: String,
    #[serde(flatten)]
    pub totals: AuditTotals,
    #[serde(default)]
    pub audit_criteria: Vec<AuditCriterion>,
}

/// Lookup of an account's latest audit.
pub trait LatestAuditSource {
    fn latest_audit(&self, account_id: &str) -> Option<&LatestAudit>;
}

/// In-memory [`LatestAuditSource`], keyed by account id.
#[derive(Debug, Clone, Default)]
pub struct AuditIndex {
    latest: HashMap<String, LatestAudit>,
}

impl AuditIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `audit` as its account's latest, replacing any earlier one.
    pub fn insert(&mut self, audit: LatestAudit) {
        self.latest.insert(audit.account_id.clone(), audit);
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

impl FromIterator<LatestAudit> for AuditIndex {
    fn from_iter<I: IntoIterator<Item = LatestAudit>>(iter: I) -> Self {
        let mut index = AuditIndex::new();
        for audit in iter {
            index.insert(audit);
        }
        index
    }
}

impl LatestAuditSource for AuditIndex {
    fn latest_audit(&self, account_id: &str) -> Option<&LatestAudit> {
        self.latest.get(account_id)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamCriterionStats {
    pub product_team: ProductTeam,
    pub stats: CriterionTotals,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountCriterionStats {
    pub account_subscription: Account,
    pub stats: CriterionTotals,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CriterionStats {
    pub criterion: Criterion,
    pub product_teams: Vec<TeamCriterionStats>,
    pub account_subscriptions: Vec<AccountCriterionStats>,
}

/// Collates statistics over a [`LatestAuditSource`].
pub struct Collator<S> {
    source: S,
}

impl<S: LatestAuditSource> Collator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Sum of the latest audit totals of every active account.
    pub fn team_stats(&self, accounts: &[Account]) -> AuditTotals {
        let mut totals = AuditTotals::default();
        for account in accounts.iter().filter(|a| a.active) {
            match self.source.latest_audit(&account.id) {
                Some(latest) => {
                    debug!(account_id = %account.id, "folding latest audit into team stats");
                    totals += latest.totals;
                }
                None => warn!(account_id = %account.id, "latest audit not found for account"),
            }
        }
        totals
    }

    /// Criterion counters of one account's latest audit.
    pub fn account_criterion_stats(&self, account: &Account, criterion_id: &str) -> Option<CriterionTotals> {
        let Some(latest) = self.source.latest_audit(&account.id) else {
            warn!(account_id = %account.id, criterion_id, "latest audit not found for account");
            return None;
        };
        let mut totals = CriterionTotals::default();
        for audit_criterion in latest
            .audit_criteria
            .iter()
            .filter(|c| c.criterion_id == criterion_id)
        {
            totals += audit_criterion.totals;
        }
        Some(totals)
    }

    /// Per-criterion totals broken down by product team and by account.
    ///
    /// An account belongs to the team whose id equals its `product_team_id`.
    /// Accounts are not filtered on `active` here.
    pub fn criteria_stats(
        &self,
        criteria: &[Criterion],
        accounts: &[Account],
        teams: &[ProductTeam],
    ) -> Vec<CriterionStats> {
        let mut out = Vec::with_capacity(criteria.len());
        for criterion in criteria {
            let mut product_teams = Vec::with_capacity(teams.len());
            let mut account_subscriptions = Vec::new();

            for team in teams {
                let mut team_totals = CriterionTotals::default();
                for account in accounts.iter().filter(|a| a.product_team_id == team.id) {
                    let Some(stats) = self.account_criterion_stats(account, &criterion.id) else {
                        continue;
                    };
                    debug!(criterion_id = %criterion.id, account_id = %account.id, "collated criterion");
                    team_totals += stats;
                    account_subscriptions.push(AccountCriterionStats {
                        account_subscription: account.clone(),
                        stats,
                    });
                }
                product_teams.push(TeamCriterionStats {
                    product_team: team.clone(),
                    stats: team_totals,
                });
            }

            out.push(CriterionStats {
                criterion: criterion.clone(),
                product_teams,
                account_subscriptions,
            });
        }
        out
    }
}
