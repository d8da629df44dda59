use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconColor {
    Primary,
    Success,
    Warning,
    Danger,
    Secondary,
    Muted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub user: String,
    pub icon: String,
    pub icon_color: IconColor,
}
