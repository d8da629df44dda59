use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::state::AppState;

// Full collection; filtering and paging happen on the client
pub async fn get_logs(data: web::Data<AppState>) -> impl Responder {
    info!("Request for logs");
    HttpResponse::Ok().json(&data.fixtures.logs)
}
