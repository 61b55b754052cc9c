use chrono::{DateTime, Utc};
use domain::{Command, ConveyorLine};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum ActuationOutcome {
    Completed,
    Failed(String),
}

/// Out-of-band record of one dispatched actuation
#[derive(Debug, Clone, Serialize)]
pub struct ActuationReport {
    pub id: Uuid,
    pub command: Command,
    pub line: ConveyorLine,
    pub outcome: ActuationOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ActuationReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ActuationOutcome::Completed)
    }
}
