use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::state::AppState;

// List every monitored service with its current status
pub async fn get_services_status(data: web::Data<AppState>) -> impl Responder {
    info!("Request to list service status");
    let services = &data.fixtures.services;
    info!("Returning status of {} services", services.len());

    HttpResponse::Ok().json(services)
}
