use crate::errors::{MonitorError, Result};
use crate::models::packet::{Priority, ResendOptions, ResendRequest};

pub const MISSING_PACKET_ID: &str = "Please enter a packet ID or reference";
pub const MISSING_SERVICE: &str = "Please select a target service";

/// Packet resend form as filled in by an operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResendForm {
    pub packet_id: String,
    pub service: String,
    pub priority: Priority,
    pub options: ResendOptions,
}

impl ResendForm {
    pub fn new(packet_id: &str, service: &str) -> Self {
        Self {
            packet_id: packet_id.to_string(),
            service: service.to_string(),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_options(mut self, options: ResendOptions) -> Self {
        self.options = options;
        self
    }

    /// Local checks run before anything is sent. The packet id is trimmed.
    pub fn validate(&self) -> Result<ResendRequest> {
        let packet_id = self.packet_id.trim();
        if packet_id.is_empty() {
            return Err(MonitorError::Validation(MISSING_PACKET_ID.to_string()));
        }

        if self.service.is_empty() {
            return Err(MonitorError::Validation(MISSING_SERVICE.to_string()));
        }

        Ok(ResendRequest {
            id: Some(packet_id.to_string()),
            service: Some(self.service.clone()),
            priority: self.priority,
            options: self.options,
        })
    }
}
