//Third-party-dependencies
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::error;
use std::env;
use std::sync::Arc;

use academy_service::routes::{
    admissions_routes, assistant_routes, auth_routes, catalog_routes, dashboard_routes,
    directory_routes,
};
use academy_service::services::admissions::AdmissionsDesk;
use academy_service::services::assistant::{AssistantSession, GeminiClient, TextGenerator};
use academy_service::services::directory::UserDirectory;
use academy_service::utils::session::SessionController;
use academy_service::utils::session_store::FileStore;
use academy_service::utils::SessionGuard;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:9090".to_string());
    let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".to_string());

    // Shared state: one session slot, the seeded user roster, the
    // admissions flow and the assistant chat session
    let controller = web::Data::new(SessionController::new(Box::new(FileStore::new(
        &storage_dir,
    ))));
    if let Err(e) = controller.restore() {
        error!("Failed to restore persisted session: {}", e);
    }

    let directory = web::Data::new(UserDirectory::with_seed_users());
    let admissions = web::Data::new(AdmissionsDesk::new());
    let assistant = web::Data::new(AssistantSession::new());
    let generator: web::Data<dyn TextGenerator> =
        web::Data::from(Arc::new(GeminiClient::from_env()) as Arc<dyn TextGenerator>);

    println!("Server started at {}", address);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(controller.clone())
            .app_data(directory.clone())
            .app_data(admissions.clone())
            .app_data(assistant.clone())
            .app_data(generator.clone())
            .configure(catalog_routes::init_routes)
            .configure(auth_routes::init_routes)
            .configure(admissions_routes::init_routes)
            .configure(assistant_routes::init_routes)
            .service(
                web::scope("/dashboard")
                    .wrap(SessionGuard)
                    .configure(dashboard_routes::init_routes)
                    .configure(directory_routes::init_routes),
            )
    })
    .bind(address)?
    .run()
    .await
}
