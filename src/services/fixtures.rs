//! Sample collections served by the API

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::errors::Result;
use crate::models::activity::{Activity, IconColor};
use crate::models::dashboard::{ChartDataPoint, DashboardStat, StatColor, StatValue};
use crate::models::incident::{Incident, IncidentStatus, Severity};
use crate::models::log::{LogEntry, LogLevel};
use crate::models::packet::{Packet, PacketStatus};
use crate::models::service::{Service, ServiceStatus};

/// Every collection the dashboard reads, replaced as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    pub dashboard_stats: Vec<DashboardStat>,
    pub chart_data: Vec<ChartDataPoint>,
    pub services: Vec<Service>,
    pub incidents: Vec<Incident>,
    pub logs: Vec<LogEntry>,
    pub activities: Vec<Activity>,
    pub recent_packets: Vec<Packet>,
}

// Shape of a data file; absent collections keep the built-in samples
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureFile {
    dashboard_stats: Option<Vec<DashboardStat>>,
    chart_data: Option<Vec<ChartDataPoint>>,
    services: Option<Vec<Service>>,
    incidents: Option<Vec<Incident>>,
    logs: Option<Vec<LogEntry>>,
    activities: Option<Vec<Activity>>,
    recent_packets: Option<Vec<Packet>>,
}

impl Fixtures {
    /// Load from `path`, or the built-in samples when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: FixtureFile = serde_json::from_str(&raw)?;
        let builtin = Self::builtin();

        let fixtures = Self {
            dashboard_stats: file.dashboard_stats.unwrap_or(builtin.dashboard_stats),
            chart_data: file.chart_data.unwrap_or(builtin.chart_data),
            services: file.services.unwrap_or(builtin.services),
            incidents: file.incidents.unwrap_or(builtin.incidents),
            logs: file.logs.unwrap_or(builtin.logs),
            activities: file.activities.unwrap_or(builtin.activities),
            recent_packets: file.recent_packets.unwrap_or(builtin.recent_packets),
        };

        info!(
            "Loaded data file {}: {} services, {} incidents, {} logs",
            path.display(),
            fixtures.services.len(),
            fixtures.incidents.len(),
            fixtures.logs.len()
        );

        Ok(fixtures)
    }

    pub fn builtin() -> Self {
        Self {
            dashboard_stats: builtin_stats(),
            chart_data: builtin_chart_data(),
            services: builtin_services(),
            incidents: builtin_incidents(),
            logs: builtin_logs(),
            activities: builtin_activities(),
            recent_packets: builtin_packets(),
        }
    }
}

fn stat(
    id: &str,
    title: &str,
    value: &str,
    change: f64,
    change_text: &str,
    icon: &str,
    color: StatColor,
) -> DashboardStat {
    DashboardStat {
        id: id.to_string(),
        title: title.to_string(),
        value: StatValue::Text(value.to_string()),
        change,
        change_text: change_text.to_string(),
        icon: icon.to_string(),
        color,
    }
}

fn builtin_stats() -> Vec<DashboardStat> {
    vec![
        stat(
            "total-messages",
            "Total Messages",
            "247,892",
            12.5,
            "vs last period",
            "ri-mail-line",
            StatColor::Primary,
        ),
        stat(
            "error-rate",
            "Error Rate",
            "0.24%",
            -3.2,
            "vs last period",
            "ri-error-warning-line",
            StatColor::Danger,
        ),
        stat(
            "active-services",
            "Active Services",
            "18/20",
            -2.0,
            "services down",
            "ri-service-line",
            StatColor::Success,
        ),
        stat(
            "response-time",
            "Avg. Response Time",
            "128ms",
            4.7,
            "vs last period",
            "ri-time-line",
            StatColor::Secondary,
        ),
    ]
}

fn builtin_chart_data() -> Vec<ChartDataPoint> {
    [
        ("00:00", 1200, 1150, 50),
        ("03:00", 1900, 1850, 70),
        ("06:00", 3000, 2950, 120),
        ("09:00", 5400, 5300, 180),
        ("12:00", 8200, 8000, 210),
        ("15:00", 12500, 12300, 250),
        ("18:00", 14200, 14000, 200),
        ("21:00", 15600, 15400, 180),
    ]
    .into_iter()
    .map(|(label, sent, received, failed)| ChartDataPoint {
        label: label.to_string(),
        sent,
        received,
        failed,
    })
    .collect()
}

fn builtin_services() -> Vec<Service> {
    vec![
        Service::new("1", "Order Service", ServiceStatus::Operational),
        Service::new("2", "Customer Service", ServiceStatus::Operational),
        Service::new("3", "Payment Service", ServiceStatus::Outage),
        Service::new("4", "Product Service", ServiceStatus::Operational),
        Service::new("5", "Inventory Service", ServiceStatus::Degraded),
        Service::new("6", "Notification Service", ServiceStatus::Operational),
    ]
}

fn builtin_incidents() -> Vec<Incident> {
    let incident = |id: &str,
                    title: &str,
                    description: &str,
                    severity,
                    start_time: &str,
                    duration: &str,
                    status| Incident {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        severity,
        start_time: start_time.to_string(),
        duration: duration.to_string(),
        status,
    };

    vec![
        incident(
            "1",
            "Payment Service Connection Failure",
            "Connection to payment service interrupted. Retry attempts failing.",
            Severity::Critical,
            "Today, 09:32 AM",
            "1h 28m",
            IncidentStatus::Open,
        ),
        incident(
            "2",
            "Inventory Data Synchronization Delay",
            "Inventory updates are delayed by approximately 5 minutes.",
            Severity::Warning,
            "Today, 10:15 AM",
            "45m",
            IncidentStatus::Investigating,
        ),
        incident(
            "3",
            "Analytics Service High CPU Usage",
            "CPU utilization above 85% for more than 15 minutes.",
            Severity::Monitoring,
            "Today, 11:02 AM",
            "5m",
            IncidentStatus::Investigating,
        ),
    ]
}

fn builtin_logs() -> Vec<LogEntry> {
    use LogLevel::*;

    let gateway_timeout = |attempt: u32| {
        format!(
            "Failed to establish connection to payment gateway. Connection timeout after 30s. Retry attempt {} of 5.",
            attempt
        )
    };

    vec![
        LogEntry::new(
            "1",
            "2023-07-21 11:03:12",
            Error,
            "PaymentService",
            &gateway_timeout(3),
        ),
        LogEntry::new(
            "2",
            "2023-07-21 11:02:42",
            Error,
            "PaymentService",
            &gateway_timeout(2),
        ),
        LogEntry::new(
            "3",
            "2023-07-21 11:02:12",
            Error,
            "PaymentService",
            &gateway_timeout(1),
        ),
        LogEntry::new(
            "4",
            "2023-07-21 11:01:42",
            Warn,
            "PaymentService",
            "Connection to payment gateway is taking longer than expected (25s).",
        ),
        LogEntry::new(
            "5",
            "2023-07-21 10:55:18",
            Warn,
            "InventoryService",
            "Data synchronization delayed. Current lag: 5m 12s.",
        ),
        LogEntry::new(
            "6",
            "2023-07-21 10:52:36",
            Info,
            "OrderService",
            "Processed 150 orders in the last 5 minutes. Average processing time: 235ms.",
        ),
        LogEntry::new(
            "7",
            "2023-07-21 10:45:12",
            Debug,
            "SystemMonitor",
            "Memory usage at 62%, CPU at 48%.",
        ),
        LogEntry::new(
            "8",
            "2023-07-21 10:43:05",
            Info,
            "CustomerService",
            "Customer data update batch #45281 completed successfully. 423 records processed.",
        ),
        LogEntry::new(
            "9",
            "2023-07-21 10:38:17",
            Info,
            "NotificationService",
            "Sent 56 email notifications and 78 push notifications in the last 10 minutes.",
        ),
        LogEntry::new(
            "10",
            "2023-07-21 10:36:22",
            Debug,
            "DatabaseService",
            "Connection pool statistics: active=12, idle=8, waiting=0.",
        ),
        LogEntry::new(
            "11",
            "2023-07-21 10:35:14",
            Debug,
            "ApiGateway",
            "Request rate: 42.3 req/s, average response time: 128ms.",
        ),
        LogEntry::new(
            "12",
            "2023-07-21 10:30:00",
            Info,
            "SchedulerService",
            "Started daily maintenance tasks.",
        ),
        LogEntry::new(
            "13",
            "2023-07-21 10:25:33",
            Warn,
            "ProductService",
            "Slow query detected. Query ID: 8932, execution time: 1243ms.",
        ),
        LogEntry::new(
            "14",
            "2023-07-21 10:20:15",
            Info,
            "AuthService",
            "134 new user sessions created in the last hour.",
        ),
    ]
}

fn builtin_activities() -> Vec<Activity> {
    [
        (
            "1",
            "Payment Service Restart Attempted",
            "12 minutes ago",
            "Admin User",
            "ri-restart-line",
            IconColor::Primary,
        ),
        (
            "2",
            "Critical Alert: Connection Failure",
            "1 hour ago",
            "System",
            "ri-error-warning-line",
            IconColor::Danger,
        ),
        (
            "3",
            "Order Service Recovered",
            "3 hours ago",
            "System",
            "ri-check-line",
            IconColor::Success,
        ),
        (
            "4",
            "System Configuration Updated",
            "Yesterday",
            "Admin User",
            "ri-settings-line",
            IconColor::Muted,
        ),
    ]
    .into_iter()
    .map(|(id, title, timestamp, user, icon, icon_color)| Activity {
        id: id.to_string(),
        title: title.to_string(),
        timestamp: timestamp.to_string(),
        user: user.to_string(),
        icon: icon.to_string(),
        icon_color,
    })
    .collect()
}

fn builtin_packets() -> Vec<Packet> {
    [
        ("PKT-8294", "Today, 10:45 AM", PacketStatus::Success),
        ("PKT-8293", "Today, 10:32 AM", PacketStatus::Success),
        ("PKT-8292", "Today, 10:28 AM", PacketStatus::Failed),
        ("PKT-8291", "Today, 09:53 AM", PacketStatus::Success),
    ]
    .into_iter()
    .map(|(id, timestamp, status)| Packet {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        status,
    })
    .collect()
}
