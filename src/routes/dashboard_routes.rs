use crate::models::{Role, ServiceError};
use crate::utils::{get_session_from_request, registry};
use actix_web::{get, web, HttpRequest, HttpResponse};
use log::debug;
use serde_json::{json, Value};

// Role-specific landing view for the dashboard root
#[get("")]
async fn overview(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    let session = get_session_from_request(&req)?;

    debug!("👤 Dashboard overview for {}: {}", session.role, session.name);

    let body = match session.role {
        Role::Student => student_overview(),
        Role::Teacher => teacher_overview(),
        Role::Admin => admin_overview(),
    };

    Ok(HttpResponse::Ok().json(json!({
        "welcome": format!("Welcome, {}", session.name),
        "role": session.role,
        "overview": body
    })))
}

// Sidebar navigation for the active role
#[get("/menu")]
async fn menu(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    let session = get_session_from_request(&req)?;
    Ok(HttpResponse::Ok().json(json!({ "items": registry::menu_for(session.role) })))
}

// Sections that are navigable but not built out yet
#[get("/courses")]
async fn my_courses() -> HttpResponse {
    placeholder("My Courses")
}

#[get("/schedule")]
async fn schedule() -> HttpResponse {
    placeholder("Schedule")
}

#[get("/profile")]
async fn profile() -> HttpResponse {
    placeholder("My Profile")
}

#[get("/students")]
async fn students() -> HttpResponse {
    placeholder("Student Management")
}

#[get("/performance")]
async fn performance() -> HttpResponse {
    placeholder("Teacher Performance")
}

#[get("/stats")]
async fn stats() -> HttpResponse {
    placeholder("Global Stats")
}

#[get("/settings")]
async fn settings() -> HttpResponse {
    placeholder("System Settings")
}

fn placeholder(title: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "title": title,
        "status": "under_development",
        "message": "We are currently building this feature. Please check back later for updates."
    }))
}

fn student_overview() -> Value {
    json!({
        "progress": {
            "course": "Tajweed Mastery",
            "lessons_completed": 12,
            "percent": 75,
            "next_lesson": "Lesson 13"
        },
        "achievements": { "juz_memorized": 12, "learning_hours": 42 },
        "upcoming_classes": [
            { "title": "Tajweed Mastery", "time": "Today, 4:00 PM", "instructor": "Sheikh Ahmed" },
            { "title": "Quran Reading", "time": "Tomorrow, 10:00 AM", "instructor": "Ustadha Sarah" },
            { "title": "Islamic Studies", "time": "Wed, 2:30 PM", "instructor": "Imam Yusuf" }
        ]
    })
}

fn teacher_overview() -> Value {
    json!({
        "todays_classes": [
            { "student": "Zaid Al-Harbi", "level": "Intermediate", "time": "09:00 - 10:00", "status": "Completed" },
            { "student": "Layla Bakri", "level": "Beginner", "time": "11:00 - 12:00", "status": "Upcoming" },
            { "student": "Omar Bakir", "level": "Hifz", "time": "14:00 - 15:30", "status": "Upcoming" }
        ],
        "quick_stats": { "total_students": 18, "hours_taught": 142, "parent_rating": 4.9 }
    })
}

fn admin_overview() -> Value {
    json!({
        "academy_stats": [
            { "label": "Total Students", "value": "1,540", "change": "+12%" },
            { "label": "Active Teachers", "value": "54", "change": "+2" },
            { "label": "Monthly Revenue", "value": "$12,450", "change": "+5%" },
            { "label": "System Health", "value": "99.9%", "change": "Stable" }
        ],
        "pending_enrollments": [
            { "name": "Sami Yusuf", "country": "United Kingdom", "date": "2 hours ago" },
            { "name": "Amira Ahmed", "country": "United States", "date": "5 hours ago" },
            { "name": "Zain Bakri", "country": "UAE", "date": "1 day ago" }
        ]
    })
}

// Register the dashboard shell routes. The user directory lives in its
// own module and is registered alongside these under the guarded scope.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(overview)
        .service(menu)
        .service(my_courses)
        .service(schedule)
        .service(profile)
        .service(students)
        .service(performance)
        .service(stats)
        .service(settings);
}
