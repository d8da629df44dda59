use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatColor {
    Primary,
    Success,
    Warning,
    Danger,
    Secondary,
}

/// Stat cards carry either preformatted text ("18/20") or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStat {
    pub id: String,
    pub title: String,
    pub value: StatValue,
    pub change: f64,
    pub change_text: String,
    pub icon: String,
    pub color: StatColor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataPoint {
    pub label: String,
    pub sent: u64,
    pub received: u64,
    pub failed: u64,
}

// Totals shown under the data exchange chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeSummary {
    pub sent: u64,
    pub received: u64,
    pub failed: u64,
    /// No collection carries pending counts, so this stays empty until one does
    pub pending: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_value_accepts_text_and_numbers() {
        let text: StatValue = serde_json::from_str("\"18/20\"").unwrap();
        assert_eq!(text, StatValue::Text("18/20".to_string()));

        let number: StatValue = serde_json::from_str("42").unwrap();
        assert_eq!(number, StatValue::Number(42.0));
    }

    #[test]
    fn test_dashboard_stat_uses_camel_case() {
        let stat = DashboardStat {
            id: "error-rate".to_string(),
            title: "Error Rate".to_string(),
            value: StatValue::Text("0.24%".to_string()),
            change: -3.2,
            change_text: "vs last period".to_string(),
            icon: "ri-error-warning-line".to_string(),
            color: StatColor::Danger,
        };

        let value = serde_json::to_value(&stat).unwrap();
        assert_eq!(value["changeText"], "vs last period");
        assert_eq!(value["color"], "danger");
        assert_eq!(value["value"], "0.24%");
    }
}
