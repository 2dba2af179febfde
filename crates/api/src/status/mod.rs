use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
struct StatusResponse {
    message: String,
}

async fn status() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        message: "Subtrack reminder service is running".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status));
}
