// academy-service/src/models/mod.rs
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;

// Admissions application models
pub mod admissions;
pub use admissions::*;

// Static course catalog
pub mod catalog;
pub use catalog::*;

// The three account roles. Closed set: every role-keyed decision in the
// service is an exhaustive match over this enum.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "teacher")]
    Teacher,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    // Display name used when a session is created for a role
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Student => "Ahmed Khan",
            Role::Teacher => "Sheikh Ahmed Hassan",
            Role::Admin => "Amira Ahmed",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Teacher => write!(f, "teacher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

// The record of "who is logged in". Simulated identity: there is no
// credential verification behind it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub role: Role,
    pub name: String,
}

impl Session {
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            name: role.display_name().to_string(),
        }
    }
}

// One sidebar entry in the dashboard navigation
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NavigationEntry {
    pub label: &'static str,
    pub route_segment: &'static str,
    pub icon: &'static str,
}

// Per-user capability flags. Defaulted by role, individually overridable
// by an admin through the user directory.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub can_manage_users: bool,
    pub can_edit_courses: bool,
    pub can_view_revenue: bool,
    pub can_manage_schedule: bool,
    pub can_access_settings: bool,
    pub can_message_all: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "inactive")]
    Inactive,
}

// A user as seen in the admin directory. In-memory only: edits last for
// the lifetime of the process.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub joined_date: DateTime<Utc>,
    pub status: UserStatus,
    pub permissions: Permissions,
}

// Chat models for the assistant widget
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// Login form payload. Role stays optional so a missing selection surfaces
// as a field-level validation error rather than a deserialization failure.
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub role: Option<Role>,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub session: Session,
    pub redirect: String,
}

// Custom error types
#[derive(Debug)]
pub enum ServiceError {
    InternalServerError,
    BadRequest(String),
    Unauthorized,
    NotFound,
    Forbidden,
    Conflict(String),
    Validation(HashMap<String, String>),
}

// Implement Display for ServiceError
impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::InternalServerError => write!(f, "Internal Server Error"),
            ServiceError::BadRequest(msg) => write!(f, "BadRequest: {}", msg),
            ServiceError::Unauthorized => write!(f, "Unauthorized"),
            ServiceError::NotFound => write!(f, "Not Found"),
            ServiceError::Forbidden => write!(f, "Forbidden"),
            ServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ServiceError::Validation(errors) => {
                write!(f, "Validation failed: {} field(s)", errors.len())
            }
        }
    }
}

// Implement std::error::Error for ServiceError
impl std::error::Error for ServiceError {}

// Implement ResponseError for ServiceError
impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::InternalServerError => {
                HttpResponse::InternalServerError().json("Internal Server Error")
            }
            ServiceError::BadRequest(ref message) => HttpResponse::BadRequest().json(message),
            ServiceError::Unauthorized => HttpResponse::Unauthorized().json("Unauthorized"),
            ServiceError::NotFound => HttpResponse::NotFound().json("Not Found"),
            ServiceError::Forbidden => HttpResponse::Forbidden()
                .json("Forbidden: You don't have permission to access this resource"),
            ServiceError::Conflict(ref message) => HttpResponse::Conflict().json(message),
            ServiceError::Validation(ref errors) => {
                HttpResponse::BadRequest().json(json!({ "errors": errors }))
            }
        }
    }
}
