use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::state::AppState;

pub async fn get_incidents(data: web::Data<AppState>) -> impl Responder {
    info!("Request for incidents");
    HttpResponse::Ok().json(&data.fixtures.incidents)
}
