pub mod exchange;
pub mod fixtures;
pub mod health;
pub mod log_filter;
pub mod status;
