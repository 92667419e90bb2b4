pub mod employees;
pub mod health;

use actix_web::web;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(employees::create_routes))
        .service(web::scope("/health").configure(health::create_routes));
}
