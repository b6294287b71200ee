//! Execution data model shared by the transport and the recovery controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecoverError;

/// Status of a state machine execution as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Aborted,
    PendingRedrive,
    /// A status value this build does not know about
    Unknown(String),
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Succeeded => "SUCCEEDED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::TimedOut => "TIMED_OUT",
            ExecutionStatus::Aborted => "ABORTED",
            ExecutionStatus::PendingRedrive => "PENDING_REDRIVE",
            ExecutionStatus::Unknown(other) => other,
        }
    }

    /// Server-side status filter to send with a listing call.
    ///
    /// Only the two terminal-failure statuses are forwarded. Anything else
    /// lists without a status filter rather than one that matches nothing.
    pub fn server_filter(&self) -> Option<ExecutionStatus> {
        match self {
            ExecutionStatus::Failed | ExecutionStatus::TimedOut => Some(self.clone()),
            _ => None,
        }
    }
}

impl From<&str> for ExecutionStatus {
    fn from(value: &str) -> Self {
        match value {
            "RUNNING" => ExecutionStatus::Running,
            "SUCCEEDED" => ExecutionStatus::Succeeded,
            "FAILED" => ExecutionStatus::Failed,
            "TIMED_OUT" => ExecutionStatus::TimedOut,
            "ABORTED" => ExecutionStatus::Aborted,
            "PENDING_REDRIVE" => ExecutionStatus::PendingRedrive,
            other => ExecutionStatus::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal-failure statuses that make an execution eligible for recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailedStatus {
    Failed,
    TimedOut,
}

impl From<FailedStatus> for ExecutionStatus {
    fn from(status: FailedStatus) -> Self {
        match status {
            FailedStatus::Failed => ExecutionStatus::Failed,
            FailedStatus::TimedOut => ExecutionStatus::TimedOut,
        }
    }
}

impl fmt::Display for FailedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailedStatus::Failed => f.write_str("FAILED"),
            FailedStatus::TimedOut => f.write_str("TIMED_OUT"),
        }
    }
}

impl FromStr for FailedStatus {
    type Err = RecoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "failed" => Ok(FailedStatus::Failed),
            "timed-out" | "timedout" => Ok(FailedStatus::TimedOut),
            _ => Err(RecoverError::invalid_input(format!(
                "Invalid status: {s}. Must be one of: failed, timed-out"
            ))),
        }
    }
}

/// One entry of a listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub execution_arn: String,
    pub name: String,
    pub status: ExecutionStatus,
    pub start_date: DateTime<Utc>,
    pub stop_date: Option<DateTime<Utc>>,
    pub redrive_count: Option<i32>,
}

/// Execution summary plus the input it was started with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDetail {
    pub execution_arn: String,
    pub status: ExecutionStatus,
    pub start_date: DateTime<Utc>,
    /// Original input as the JSON text the service returned
    pub input: Option<String>,
}

/// Parameters for one listing call
#[derive(Debug, Clone, PartialEq)]
pub struct ListExecutionsRequest {
    pub state_machine_arn: String,
    pub status_filter: Option<ExecutionStatus>,
    pub next_token: Option<String>,
    pub max_results: i32,
}

impl ListExecutionsRequest {
    pub fn new(state_machine_arn: impl Into<String>, max_results: i32) -> Self {
        Self {
            state_machine_arn: state_machine_arn.into(),
            status_filter: None,
            next_token: None,
            max_results,
        }
    }

    /// Attach a status filter; only terminal-failure statuses are kept
    pub fn with_status(mut self, status: impl Into<ExecutionStatus>) -> Self {
        self.status_filter = status.into().server_filter();
        self
    }

    /// Attach a continuation token; empty tokens are ignored
    pub fn with_next_token(mut self, token: Option<String>) -> Self {
        self.next_token = token.filter(|t| !t.is_empty());
        self
    }
}

/// One page returned by the service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionPage {
    pub executions: Vec<ExecutionSummary>,
    pub next_token: Option<String>,
}

/// Result of starting a new execution
#[derive(Debug, Clone, PartialEq)]
pub struct StartedExecution {
    pub execution_arn: String,
    pub start_date: DateTime<Utc>,
}

/// Inclusive bounds on execution start time, in whole Unix seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl TimeWindow {
    /// Build a window from raw Unix timestamps where 0 means unbounded
    pub fn from_unix(from: i64, to: i64) -> Self {
        Self {
            from: (from != 0).then_some(from),
            to: (to != 0).then_some(to),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, start_date: &DateTime<Utc>) -> bool {
        let started = start_date.timestamp();
        self.from.map_or(true, |from| started >= from) && self.to.map_or(true, |to| started <= to)
    }

    /// Drop executions that started outside the window, keeping page order
    pub fn filter(&self, executions: Vec<ExecutionSummary>) -> Vec<ExecutionSummary> {
        if self.is_unbounded() {
            return executions;
        }
        executions
            .into_iter()
            .filter(|exec| self.contains(&exec.start_date))
            .collect()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (None, None) => f.write_str("unbounded"),
            (Some(from), None) => write!(f, "[{from}, ∞)"),
            (None, Some(to)) => write!(f, "(-∞, {to}]"),
            (Some(from), Some(to)) => write!(f, "[{from}, {to}]"),
        }
    }
}

/// Parse a window bound given as Unix seconds or an RFC 3339 timestamp.
///
/// `0` keeps its meaning of "unbounded".
pub fn parse_timestamp(value: &str) -> Result<i64, RecoverError> {
    let trimmed = value.trim();
    if let Ok(secs) = trimmed.parse::<i64>() {
        return Ok(secs);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.timestamp())
        .map_err(|e| {
            RecoverError::invalid_input(format!(
                "Invalid timestamp '{value}': expected Unix seconds or RFC 3339 ({e})"
            ))
        })
}
