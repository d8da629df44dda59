use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::state::AppState;

// Stat cards at the top of the dashboard
pub async fn get_stats(data: web::Data<AppState>) -> impl Responder {
    info!("Request for dashboard stats");
    HttpResponse::Ok().json(&data.fixtures.dashboard_stats)
}

// Sent/received/failed series for the exchange chart
pub async fn get_metrics(data: web::Data<AppState>) -> impl Responder {
    info!("Request for data exchange metrics");
    HttpResponse::Ok().json(&data.fixtures.chart_data)
}

pub async fn get_recent_activities(data: web::Data<AppState>) -> impl Responder {
    info!("Request for recent activity");
    HttpResponse::Ok().json(&data.fixtures.activities)
}
