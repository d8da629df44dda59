use actix_web::{web, HttpRequest};

use crate::errors::MonitorError;
use crate::services::health::health_check;

// Test service over the built-in fixtures; defined ahead of the submodules so they can use it
#[cfg(test)]
macro_rules! test_app {
    () => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(crate::state::AppState::new(
                    crate::services::fixtures::Fixtures::builtin(),
                )))
                .configure(crate::controllers::configure),
        )
        .await
    };
}

pub mod dashboard;
pub mod incidents;
pub mod logs;
pub mod packets;
pub mod service;

/// Register every route of the monitoring API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/dashboard/stats", web::get().to(dashboard::get_stats))
                .route("/dashboard/metrics", web::get().to(dashboard::get_metrics))
                .route("/services/status", web::get().to(service::get_services_status))
                .route("/incidents", web::get().to(incidents::get_incidents))
                .route("/logs", web::get().to(logs::get_logs))
                .route("/activities/recent", web::get().to(dashboard::get_recent_activities))
                .route("/packets/recent", web::get().to(packets::get_recent_packets))
                .route("/packets/resend", web::post().to(packets::resend_packet)),
        );
}

// Malformed bodies get the same {message} shape as missing fields
fn json_error(err: actix_web::error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!("Rejected JSON body for {}: {}", req.path(), err);
    MonitorError::Validation(format!("Invalid request body: {}", err)).into()
}
