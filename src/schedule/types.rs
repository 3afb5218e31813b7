use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single scheduled unlock event releasing a fixed token amount at or
/// after `thaw_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thaw {
    /// Amount in the smallest token unit
    pub amount: u64,
    pub queue_position: Option<u32>,
    pub status: ThawStatus,
    pub thaw_start: DateTime<Utc>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThawStatus {
    Upcoming,
    Available,
    Claimed,
}

impl std::fmt::Display for ThawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThawStatus::Upcoming => write!(f, "upcoming"),
            ThawStatus::Available => write!(f, "available"),
            ThawStatus::Claimed => write!(f, "claimed"),
        }
    }
}

/// Full thaw schedule for one address, as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThawSchedule {
    pub claimed_count: u32,
    pub thaws: Vec<Thaw>,
}

impl ThawSchedule {
    /// Schedule reported by the API as having no redeemable thaws.
    pub fn empty() -> Self {
        Self {
            claimed_count: 0,
            thaws: Vec::new(),
        }
    }

    pub fn has_thaws(&self) -> bool {
        !self.thaws.is_empty()
    }
}

/// Terminal (or in-flight) state of one address within a check run.
///
/// `Skipped` is a dedicated variant rather than an error string so that
/// consumers can render never-attempted addresses differently from ones
/// whose fetch actually failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ResultState {
    Loading,
    Fetched { schedule: ThawSchedule },
    Failed { error: String },
    Skipped,
}

/// Per-address record of a check run. Created in bulk at run start in
/// entry order; each record transitions independently as its fetch
/// completes, fails, or is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressResult {
    pub address: String,
    pub label: String,
    #[serde(flatten)]
    pub state: ResultState,
}

impl AddressResult {
    pub fn loading(address: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            label: label.into(),
            state: ResultState::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResultState::Loading)
    }

    pub fn schedule(&self) -> Option<&ThawSchedule> {
        match &self.state {
            ResultState::Fetched { schedule } => Some(schedule),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ResultState::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Snapshot describing why a run terminated before checking every address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoppedEarlyInfo {
    pub checked_count: usize,
    pub total_count: usize,
    pub consecutive_empty_threshold: u32,
}
