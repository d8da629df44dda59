use serde::{Deserialize, Serialize};

pub mod activity;
pub mod dashboard;
pub mod incident;
pub mod log;
pub mod packet;
pub mod service;

// Indicator colour shared by every status-like value on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Warning,
    Danger,
    Neutral,
}
