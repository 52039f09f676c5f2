use crate::models::{Permissions, ServiceError};
use crate::services::directory::{DirectoryFilter, UserDirectory};
use actix_web::{delete, get, put, web, HttpResponse};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

// List the directory, optionally filtered by a search term and a role.
// Matching is a case-insensitive substring check on name or email.
#[get("/users")]
async fn list_users(
    directory: web::Data<UserDirectory>,
    filter: web::Query<DirectoryFilter>,
) -> Result<HttpResponse, ServiceError> {
    let users = directory.list(&filter)?;

    info!("📋 Directory listing returned {} user(s)", users.len());

    Ok(HttpResponse::Ok().json(json!({
        "users": users,
        "total": directory.count()?
    })))
}

#[derive(Deserialize, Debug)]
struct DeleteQuery {
    confirm: Option<bool>,
}

// Remove a user. The interactive confirmation dialog maps to an explicit
// confirm flag; without it the deletion is refused. No undo.
#[delete("/users/{id}")]
async fn delete_user(
    directory: web::Data<UserDirectory>,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = path.into_inner();

    if query.confirm != Some(true) {
        return Err(ServiceError::BadRequest(
            "Deleting a user requires confirmation".to_string(),
        ));
    }

    if !directory.delete(&user_id)? {
        error!("❌ User not found for deletion: {}", user_id);
        return Err(ServiceError::NotFound);
    }

    info!("✅ User deleted: {}", user_id);

    Ok(HttpResponse::Ok().json(json!({
        "deleted": user_id,
        "remaining": directory.count()?
    })))
}

// Replace one user's permission set; every other record stays untouched
#[put("/users/{id}/permissions")]
async fn update_permissions(
    directory: web::Data<UserDirectory>,
    path: web::Path<String>,
    permissions: web::Json<Permissions>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = path.into_inner();

    let updated = directory.update_permissions(&user_id, permissions.into_inner())?;

    info!("✅ Permissions updated for user: {}", user_id);

    Ok(HttpResponse::Ok().json(updated))
}

// Register the admin user-directory routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(delete_user)
        .service(update_permissions);
}
