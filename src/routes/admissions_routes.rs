use crate::models::catalog::find_course;
use crate::models::{AdmissionsApplication, ServiceError};
use crate::services::admissions::AdmissionsDesk;
use actix_web::{get, post, web, HttpResponse};
use log::info;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
struct PrefillQuery {
    course_id: Option<String>,
}

fn flow_state(
    desk: &AdmissionsDesk,
    query: &PrefillQuery,
) -> Result<HttpResponse, ServiceError> {
    let (state, draft) = desk.state()?;
    let selected_course = query.course_id.as_deref().and_then(find_course);

    Ok(HttpResponse::Ok().json(json!({
        "state": state,
        "draft": draft,
        "selected_course": selected_course
    })))
}

// Current state of the admissions flow. A course id passed from a course
// page pre-selects that course on the form.
#[get("/admissions")]
async fn admissions_state(
    desk: web::Data<AdmissionsDesk>,
    query: web::Query<PrefillQuery>,
) -> Result<HttpResponse, ServiceError> {
    flow_state(&desk, &query)
}

// The application form lives at /apply as well
#[get("/apply")]
async fn apply_state(
    desk: web::Data<AdmissionsDesk>,
    query: web::Query<PrefillQuery>,
) -> Result<HttpResponse, ServiceError> {
    flow_state(&desk, &query)
}

// Submit intent: store the application and ask for confirmation. Nothing
// is final until /admissions/confirm.
#[post("/admissions/apply")]
async fn apply(
    desk: web::Data<AdmissionsDesk>,
    application: web::Json<AdmissionsApplication>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Admissions application from: {}", application.full_name);

    let state = desk.request_submit(application.into_inner())?;

    Ok(HttpResponse::Ok().json(json!({
        "state": state,
        "message": "Please ensure all your details are correct before proceeding."
    })))
}

#[post("/admissions/confirm")]
async fn confirm(desk: web::Data<AdmissionsDesk>) -> Result<HttpResponse, ServiceError> {
    let receipt = desk.confirm()?;

    info!("✅ Admissions application confirmed: {}", receipt.reference_id);

    Ok(HttpResponse::Ok().json(json!({
        "state": "submitted",
        "receipt": receipt
    })))
}

#[post("/admissions/cancel")]
async fn cancel(desk: web::Data<AdmissionsDesk>) -> Result<HttpResponse, ServiceError> {
    let state = desk.cancel()?;
    Ok(HttpResponse::Ok().json(json!({ "state": state })))
}

// Start a fresh application after a submission
#[post("/admissions/reset")]
async fn reset(desk: web::Data<AdmissionsDesk>) -> Result<HttpResponse, ServiceError> {
    let state = desk.reset()?;
    Ok(HttpResponse::Ok().json(json!({ "state": state })))
}

// Register all admissions routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(admissions_state)
        .service(apply_state)
        .service(apply)
        .service(confirm)
        .service(cancel)
        .service(reset);
}
