use actix_web::web::{self, get};
use actix_web::{HttpResponse, Responder};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", get().to(process));
}

async fn process() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "service": "ecoledger" }))
}
