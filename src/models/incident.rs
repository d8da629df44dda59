use serde::{Deserialize, Serialize};

use super::StatusTone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Monitoring,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Monitoring => "Monitoring",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Severity::Critical => StatusTone::Danger,
            Severity::Warning => StatusTone::Warning,
            Severity::Monitoring => StatusTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Open,
    Investigating,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub start_time: String,
    pub duration: String,
    pub status: IncidentStatus,
}
