use crate::models::{LoginRequest, LoginResponse, ServiceError};
use crate::utils::session::SessionController;
use crate::utils::validation;
use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

// Login entry point. An already-authenticated visitor is sent straight
// to the dashboard: the login and dashboard views are mutually exclusive.
#[get("/login")]
async fn login_page(
    controller: web::Data<SessionController>,
) -> Result<HttpResponse, ServiceError> {
    if controller.restore()?.is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/dashboard"))
            .finish());
    }

    Ok(HttpResponse::Ok().json(json!({
        "title": "Welcome Back",
        "prompt": "Choose your role and enter credentials",
        "roles": [
            { "id": "student", "label": "Student", "desc": "Access your lessons and progress" },
            { "id": "teacher", "label": "Teacher", "desc": "Manage your classes and students" },
            { "id": "admin", "label": "Admin", "desc": "System statistics and management" }
        ]
    })))
}

// Validate the form and open a session for the selected role
#[post("/login")]
async fn login(
    controller: web::Data<SessionController>,
    credentials: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    info!("🔑 Login request for email: {}", credentials.email);

    let role = validation::validate_login(
        credentials.role,
        &credentials.email,
        &credentials.password,
    )
    .map_err(|e| {
        error!("❌ Login validation failed for: {}", credentials.email);
        e
    })?;

    let session = controller.login(role)?;

    info!("✅ Session opened for {}: {}", session.role, session.name);

    Ok(HttpResponse::Ok().json(LoginResponse {
        session,
        redirect: "/dashboard".to_string(),
    }))
}

// Current session, restoring the persisted record if needed. A missing
// session is the logged-out state, not an error.
#[get("/auth/session")]
async fn current_session(
    controller: web::Data<SessionController>,
) -> Result<HttpResponse, ServiceError> {
    let session = controller.restore()?;
    Ok(HttpResponse::Ok().json(json!({ "session": session })))
}

// Sign-out opens a confirmation dialog first
#[post("/auth/logout")]
async fn request_logout(
    controller: web::Data<SessionController>,
) -> Result<HttpResponse, ServiceError> {
    controller.request_logout()?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "confirm_pending",
        "message": "Are you sure you want to sign out?"
    })))
}

#[post("/auth/logout/confirm")]
async fn confirm_logout(
    controller: web::Data<SessionController>,
) -> Result<HttpResponse, ServiceError> {
    controller.confirm_logout()?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "logged_out",
        "redirect": "/"
    })))
}

#[post("/auth/logout/cancel")]
async fn cancel_logout(
    controller: web::Data<SessionController>,
) -> Result<HttpResponse, ServiceError> {
    controller.cancel_logout()?;

    Ok(HttpResponse::Ok().json(json!({ "status": "cancelled" })))
}

#[derive(Deserialize, Debug)]
struct ForgotPasswordRequest {
    email: String,
}

// Simulated reset flow: the response is the same whether or not the
// address is known.
#[post("/forgot-password")]
async fn forgot_password(
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ServiceError> {
    if !validation::is_valid_email(&request.email) {
        return Err(ServiceError::BadRequest(
            "Please enter a valid email address.".to_string(),
        ));
    }

    info!("📧 Password reset requested for: {}", request.email);

    Ok(HttpResponse::Ok().json(json!({
        "message": "If an account exists for this address, a reset link has been sent."
    })))
}

// Register all auth routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_page)
        .service(login)
        .service(current_session)
        .service(request_logout)
        .service(confirm_logout)
        .service(cancel_logout)
        .service(forgot_password);
}
