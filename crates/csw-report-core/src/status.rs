//! Compliance status taxonomy.
//!
//! Four fixed statuses identified by numeric id, plus the alias map between
//! the raw audit-summary vocabulary (`compliant`, `applicable`, ...) and the
//! report display vocabulary (`passed`, `tested`, ...).

use serde::Serialize;

/// One of the four fixed compliance outcomes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct Status {
    pub id: i64,
    pub status_name: &'static str,
}

impl Status {
    pub const UNKNOWN: Status = Status {
        id: 1,
        status_name: "Unknown",
    };
    pub const PASS: Status = Status {
        id: 2,
        status_name: "Pass",
    };
    pub const FAIL: Status = Status {
        id: 3,
        status_name: "Fail",
    };
    pub const EXCEPTION: Status = Status {
        id: 4,
        status_name: "Exception",
    };
}

static STATUSES: [Status; 4] = [
    Status::UNKNOWN,
    Status::PASS,
    Status::FAIL,
    Status::EXCEPTION,
];

/// A raw-vocabulary key and its display-vocabulary counterpart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AliasPair {
    pub raw: &'static str,
    pub display: &'static str,
}

static ALIASES: [AliasPair; 4] = [
    AliasPair {
        raw: "compliant",
        display: "passed",
    },
    AliasPair {
        raw: "applicable",
        display: "tested",
    },
    AliasPair {
        raw: "non_compliant",
        display: "failed",
    },
    AliasPair {
        raw: "not_applicable",
        display: "ignored",
    },
];

/// The status catalogue, ordered by id.
pub fn list_statuses() -> &'static [Status] {
    &STATUSES
}

/// Look up a status by id. `None` means the id is not in the catalogue,
/// which is distinct from [`Status::UNKNOWN`].
pub fn find_status_by_id(id: i64) -> Option<Status> {
    STATUSES.iter().find(|status| status.id == id).copied()
}

/// The raw → display key mapping, in the order the report lists it.
pub fn alias_map() -> &'static [AliasPair] {
    &ALIASES
}
