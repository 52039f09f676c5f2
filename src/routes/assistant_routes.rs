use crate::models::ServiceError;
use crate::services::assistant::{AssistantSession, TextGenerator};
use actix_web::{get, post, web, HttpResponse};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
struct AssistantRequest {
    text: String,
}

// One chat turn. The send is rejected while a previous request is still
// pending; a collaborator failure is swallowed into a fallback message
// after being logged, it never clears the history.
#[post("/assistant/message")]
async fn send_message(
    session: web::Data<AssistantSession>,
    generator: web::Data<dyn TextGenerator>,
    request: web::Json<AssistantRequest>,
) -> Result<HttpResponse, ServiceError> {
    session.begin(&request.text)?;

    info!("💬 Assistant request: {} chars", request.text.trim().len());

    let message = match generator.generate(request.text.trim()).await {
        Ok(reply) => session.complete(reply)?,
        Err(e) => {
            // Recorded for diagnostics, then recovered locally
            error!("❌ Assistant collaborator failed: {}", e);
            session.fail()?
        }
    };

    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

// Full message history for the widget
#[get("/assistant/history")]
async fn history(session: web::Data<AssistantSession>) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(json!({
        "messages": session.history()?,
        "pending": session.is_pending()?
    })))
}

// Register all assistant routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(send_message).service(history);
}
