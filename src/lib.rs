//! Datareon Bus Monitor
//!
//! JSON API serving service health, incidents, logs, exchange metrics and a
//! packet-resend endpoint, plus the dashboard client that reads it through a
//! query cache and derives the overall status and paged log views.

pub mod client;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;

pub use client::{DashboardClient, ResendForm};
pub use config::Config;
pub use errors::{MonitorError, Result};
pub use services::fixtures::Fixtures;
pub use state::AppState;
