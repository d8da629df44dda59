use actix_web::{web, HttpResponse, Responder};
use tracing::{info, warn};

use crate::errors::MonitorError;
use crate::models::packet::{ResendRequest, ResendResponse};
use crate::state::AppState;

pub async fn get_recent_packets(data: web::Data<AppState>) -> impl Responder {
    info!("Request for recent packets");
    HttpResponse::Ok().json(&data.fixtures.recent_packets)
}

// Acknowledge a resend; nothing is transmitted
pub async fn resend_packet(
    request: web::Json<ResendRequest>,
) -> Result<HttpResponse, MonitorError> {
    let data = request.into_inner().validate().inspect_err(|e| {
        warn!("Rejected resend request: {}", e);
    })?;

    info!(
        "Queued packet {} for resend to {} (priority {:?})",
        data.id, data.service, data.priority
    );

    Ok(HttpResponse::Ok().json(ResendResponse::queued(data)))
}
