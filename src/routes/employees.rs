use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::employee::UpdateFlagsForm;
use crate::services::EmployeeService;
use crate::state::AppState;

// GET /employees - All employees with their resolved department
async fn list_employees(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let departments = state.departments().await?;
    let service = EmployeeService::new(&state.db);

    let employees = service.list_employees(&departments).await?;
    Ok(HttpResponse::Ok().json(employees))
}

// GET /employee/{id}
async fn get_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let departments = state.departments().await?;
    let service = EmployeeService::new(&state.db);

    service
        .get_employee(employee_id.into_inner(), &departments)
        .await?
        .map(|employee| HttpResponse::Ok().json(employee))
        .ok_or_else(|| AppError::NotFound("not found".to_string()))
}

// PATCH /employee/{id}/flags - Replace the flag list
async fn update_employee_flags(
    state: web::Data<AppState>,
    employee_id: web::Path<i64>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let payload = json_body(&req, &body)
        .ok_or_else(|| AppError::Validation("expected json body".to_string()))?;
    let form = UpdateFlagsForm::from_json(&payload)?;

    let departments = state.departments().await?;
    let service = EmployeeService::new(&state.db);

    let response = service
        .update_flags(employee_id.into_inner(), form.flags, &departments)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Decodes the body when the request declares a JSON content type
/// (`application/json` or `application/*+json`).
fn json_body(req: &HttpRequest, body: &[u8]) -> Option<Value> {
    let content_type = req.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let is_json = mime == "application/json"
        || (mime.starts_with("application/") && mime.ends_with("+json"));
    if !is_json {
        return None;
    }

    serde_json::from_slice(body).ok()
}

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/employees", web::get().to(list_employees))
        .route("/employee/{employee_id}", web::get().to(get_employee))
        .route(
            "/employee/{employee_id}/flags",
            web::patch().to(update_employee_flags),
        );
}
