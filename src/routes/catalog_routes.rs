use crate::models::catalog::{find_course, COURSES};
use actix_web::{get, web, HttpResponse, Responder};
use log::info;
use serde_json::json;

// GET ROUTES

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body(
        "Welcome to Darul Quran Academy!\nBrowse /courses for the catalog or /admissions to apply for a free trial.",
    )
}

#[get("/about")]
async fn about() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "title": "About Our Academy",
        "mission": "Darul Quran Academy was founded with the mission of providing accessible, high-quality Quranic and Islamic education to the global Muslim community.",
        "teachers": "Our teachers are certified from world-renowned Islamic institutions, ensuring that every student receives authentic and expert guidance."
    }))
}

#[get("/contact")]
async fn contact() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "email": "admissions@darulquran.academy",
        "message": "Reach out to schedule a free trial session with our expert instructors."
    }))
}

// The published course catalog
#[get("/courses")]
async fn list_courses() -> impl Responder {
    HttpResponse::Ok().json(json!({ "courses": &*COURSES }))
}

// A single course page. An unknown id gets a dedicated not-found view
// with a way back home rather than a bare error.
#[get("/course/{id}")]
async fn course_detail(path: web::Path<String>) -> impl Responder {
    let course_id = path.into_inner();

    match find_course(&course_id) {
        Some(course) => HttpResponse::Ok().json(course),
        None => {
            info!("🔍 Course not found: {}", course_id);
            HttpResponse::NotFound().json(json!({
                "error": "course_not_found",
                "message": "We couldn't find the course you were looking for.",
                "recovery": { "label": "Return to Homepage", "path": "/" }
            }))
        }
    }
}

// Register all catalog routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(about)
        .service(contact)
        .service(list_courses)
        .service(course_detail);
}
