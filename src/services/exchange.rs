use crate::models::dashboard::{ChartDataPoint, ExchangeSummary};
use crate::models::incident::{Incident, Severity};

/// Totals under the data exchange chart.
pub fn summarize_exchange(points: &[ChartDataPoint]) -> ExchangeSummary {
    points.iter().fold(
        ExchangeSummary {
            sent: 0,
            received: 0,
            failed: 0,
            pending: None,
        },
        |mut summary, point| {
            summary.sent += point.sent;
            summary.received += point.received;
            summary.failed += point.failed;
            summary
        },
    )
}

/// Incidents of the given severity; `None` keeps all of them.
pub fn filter_incidents(incidents: &[Incident], severity: Option<Severity>) -> Vec<Incident> {
    incidents
        .iter()
        .filter(|incident| severity.is_none_or(|severity| incident.severity == severity))
        .cloned()
        .collect()
}

/// Parse the incident page's filter buttons ("all", "critical", ...).
pub fn parse_severity_filter(value: &str) -> Option<Severity> {
    match value.to_lowercase().as_str() {
        "critical" => Some(Severity::Critical),
        "warning" => Some(Severity::Warning),
        "monitoring" => Some(Severity::Monitoring),
        _ => None,
    }
}
