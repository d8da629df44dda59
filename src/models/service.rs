use serde::{Deserialize, Serialize};

use super::StatusTone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Operational,
    Degraded,
    Outage,
    Maintenance,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::Operational => "Operational",
            ServiceStatus::Degraded => "Degraded",
            ServiceStatus::Outage => "Outage",
            ServiceStatus::Maintenance => "Maintenance",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            ServiceStatus::Operational => StatusTone::Success,
            ServiceStatus::Degraded => StatusTone::Warning,
            ServiceStatus::Outage => StatusTone::Danger,
            ServiceStatus::Maintenance => StatusTone::Neutral,
        }
    }
}

// A downstream dependency of the bus, replaced wholesale on every refresh
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub status: ServiceStatus,
}

impl Service {
    pub fn new(id: &str, name: &str, status: ServiceStatus) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Operational,
    PartialOutage,
    MajorOutage,
}

impl OverallStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::Operational => "Operational",
            OverallStatus::PartialOutage => "Partial Outage",
            OverallStatus::MajorOutage => "Major Outage",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            OverallStatus::Operational => StatusTone::Success,
            OverallStatus::PartialOutage => StatusTone::Warning,
            OverallStatus::MajorOutage => StatusTone::Danger,
        }
    }
}

// Derived from the current service set, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: OverallStatus,
    pub percentage: u8,
}

/// What the dashboard shows for overall health at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemHealth {
    /// Services have not been fetched yet
    Loading,
    /// Services were fetched but the collection was empty
    Unknown,
    Known(SystemStatus),
}
