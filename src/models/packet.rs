use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::StatusTone;
use crate::errors::{MonitorError, Result};

pub const MISSING_FIELDS_MESSAGE: &str = "Packet ID and service are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketStatus {
    Success,
    Failed,
    Pending,
}

impl PacketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PacketStatus::Success => "Success",
            PacketStatus::Failed => "Failed",
            PacketStatus::Pending => "Pending",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            PacketStatus::Success => StatusTone::Success,
            PacketStatus::Failed => StatusTone::Danger,
            PacketStatus::Pending => StatusTone::Warning,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Packet {
    pub id: String,
    pub timestamp: String,
    pub status: PacketStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResendOptions {
    #[serde(deserialize_with = "truthy_flag")]
    pub force_resend: bool,
    #[serde(deserialize_with = "truthy_flag")]
    pub skip_validation: bool,
    #[serde(deserialize_with = "truthy_flag")]
    pub notify_on_completion: bool,
}

/// Body of `POST /api/packets/resend` as it arrives on the wire.
///
/// Only a missing id or service is an error. Scalar ids are taken as text,
/// an unknown or null priority falls back to normal, and options that are
/// not an object fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResendRequest {
    #[serde(deserialize_with = "present_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "present_text")]
    pub service: Option<String>,
    #[serde(deserialize_with = "lenient_priority")]
    pub priority: Priority,
    #[serde(deserialize_with = "lenient_options")]
    pub options: ResendOptions,
}

// null, false, 0 and "" read as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

fn present_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !is_truthy(&value) {
        return Ok(None);
    }

    Ok(Some(match value {
        Value::String(s) => s,
        other => other.to_string(),
    }))
}

fn lenient_priority<'de, D>(deserializer: D) -> std::result::Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().unwrap_or_default(),
        _ => Priority::default(),
    })
}

fn lenient_options<'de, D>(deserializer: D) -> std::result::Result<ResendOptions, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => ResendOptions::default(),
    })
}

/// A resend request whose id and service are both present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResendData {
    pub id: String,
    pub service: String,
    pub priority: Priority,
    pub options: ResendOptions,
}

impl ResendRequest {
    /// Empty strings count as missing.
    pub fn validate(self) -> Result<ResendData> {
        let id = self.id.filter(|id| !id.is_empty());
        let service = self.service.filter(|service| !service.is_empty());

        match (id, service) {
            (Some(id), Some(service)) => Ok(ResendData {
                id,
                service,
                priority: self.priority,
                options: self.options,
            }),
            _ => Err(MonitorError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResendResponse {
    pub success: bool,
    pub message: String,
    pub data: ResendData,
}

impl ResendResponse {
    pub fn queued(data: ResendData) -> Self {
        Self {
            success: true,
            message: format!(
                "Packet {} has been queued for resending to {} service",
                data.id, data.service
            ),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: ResendRequest =
            serde_json::from_str(r#"{"id":"PKT-8292","service":"payment"}"#).unwrap();

        assert_eq!(request.priority, Priority::Normal);
        assert_eq!(request.options, ResendOptions::default());
    }

    #[test]
    fn test_request_options_camel_case() {
        let request: ResendRequest = serde_json::from_str(
            r#"{"id":"PKT-1","service":"order","priority":"critical","options":{"forceResend":true}}"#,
        )
        .unwrap();

        assert_eq!(request.priority, Priority::Critical);
        assert!(request.options.force_resend);
        assert!(!request.options.skip_validation);
    }

    #[test]
    fn test_validate_rejects_missing_or_empty_fields() {
        let missing_service = ResendRequest {
            id: Some("PKT-1".to_string()),
            ..Default::default()
        };
        let empty_id = ResendRequest {
            id: Some(String::new()),
            service: Some("order".to_string()),
            ..Default::default()
        };

        for request in [missing_service, empty_id] {
            match request.validate() {
                Err(MonitorError::Validation(msg)) => assert_eq!(msg, MISSING_FIELDS_MESSAGE),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_request_tolerates_loose_fields() {
        let request: ResendRequest = serde_json::from_str(
            r#"{"id":8292,"service":"payment","priority":"urgent","options":null}"#,
        )
        .unwrap();

        assert_eq!(request.id.as_deref(), Some("8292"));
        assert_eq!(request.priority, Priority::Normal);
        assert_eq!(request.options, ResendOptions::default());

        let request: ResendRequest = serde_json::from_str(
            r#"{"id":"PKT-1","service":"order","priority":null,"options":{"forceResend":null,"notifyOnCompletion":1}}"#,
        )
        .unwrap();

        assert_eq!(request.priority, Priority::Normal);
        assert!(!request.options.force_resend);
        assert!(request.options.notify_on_completion);
    }

    #[test]
    fn test_falsy_id_counts_as_missing() {
        let request: ResendRequest =
            serde_json::from_str(r#"{"id":0,"service":"payment"}"#).unwrap();

        assert_eq!(request.id, None);
        assert!(matches!(request.validate(), Err(MonitorError::Validation(_))));
    }

    #[test]
    fn test_queued_message() {
        let data = ResendRequest {
            id: Some("PKT-8292".to_string()),
            service: Some("payment".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let response = ResendResponse::queued(data);
        assert!(response.success);
        assert_eq!(
            response.message,
            "Packet PKT-8292 has been queued for resending to payment service"
        );
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_packet_status_tones() {
        assert_eq!(PacketStatus::Failed.tone(), StatusTone::Danger);
        assert_eq!(PacketStatus::Pending.label(), "Pending");
    }
}
