use actix_web::{web, HttpResponse};

use crate::error::AppResult;
use crate::state::AppState;

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": true }))
}

async fn health_check_db(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    sqlx::query("SELECT 1").execute(state.db.pool()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": true })))
}

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health_check))
        .route("/db", web::get().to(health_check_db));
}
