// academy-service/src/services/assistant.rs
use crate::models::{ChatMessage, ChatRole, ServiceError};
use async_trait::async_trait;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::sync::Mutex;

// Fixed academy context sent with every generation request
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful and polite virtual assistant for \"Darul Quran Academy\". \
Our academy offers:\n\
- Noorani Qaida (Beginner level)\n\
- Tajweed (Pronunciation rules)\n\
- Hifz (Quran Memorization)\n\
- Arabic Language\n\
- Islamic Studies (Fiqh, Hadith, Seerah)\n\n\
Your goal is to help prospective students and parents with information about courses, \
the enrollment process, and our certified teachers. Keep your tone respectful and spiritual. \
Always try to encourage the user to sign up for a free trial session.";

pub const GREETING: &str =
    "As-salamu alaykum! How can I help you today regarding our Quranic programs?";
pub const EMPTY_REPLY_FALLBACK: &str =
    "I apologize, I could not process that request. Please try again.";
pub const FAILURE_FALLBACK: &str =
    "Sorry, I am having trouble connecting. Please try again later.";

// The external text-generation collaborator. One stateless request per
// call: the full system instruction plus the user text as the sole turn.
// Ok(None) means the collaborator answered without any text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, user_text: &str) -> Result<Option<String>, ServiceError>;
}

// Gemini generateContent client
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.to_string(),
        }
    }

    // API key is supplied out-of-band via the environment
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            error!("GEMINI_API_KEY is not set, assistant requests will fail");
        }
        Self::new(api_key, "gemini-3-flash-preview")
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, user_text: &str) -> Result<Option<String>, ServiceError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_text }] }]
        });

        // Single attempt, no retry policy
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Assistant request failed: {:?}", e);
                ServiceError::InternalServerError
            })?;

        if !response.status().is_success() {
            error!("Assistant collaborator returned status: {}", response.status());
            return Err(ServiceError::InternalServerError);
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Failed to parse assistant response: {:?}", e);
            ServiceError::InternalServerError
        })?;

        let text = parsed
            .candidates
            .and_then(|mut candidates| candidates.drain(..).next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().find_map(|part| part.text))
            .filter(|text| !text.is_empty());

        Ok(text)
    }
}

// Chat state for the assistant widget: an append-only message history
// and a pending flag gating concurrent sends.
pub struct AssistantSession {
    inner: Mutex<AssistantState>,
}

struct AssistantState {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl AssistantSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(AssistantState {
                messages: vec![ChatMessage {
                    role: ChatRole::Assistant,
                    content: GREETING.to_string(),
                }],
                pending: false,
            }),
        }
    }

    // Accept a user message and enter the pending state. While a request
    // is in flight further sends are rejected: no queueing, no cancellation.
    pub fn begin(&self, user_text: &str) -> Result<(), ServiceError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ServiceError::BadRequest(
                "Message text is required".to_string(),
            ));
        }

        let mut state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;

        if state.pending {
            return Err(ServiceError::Conflict(
                "The assistant is still answering a previous message".to_string(),
            ));
        }

        state.messages.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });
        state.pending = true;
        Ok(())
    }

    // Record the collaborator's answer. An empty answer gets the fixed
    // fallback so exactly one assistant message lands per accepted send.
    pub fn complete(&self, reply: Option<String>) -> Result<ChatMessage, ServiceError> {
        self.append_assistant(reply.unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
    }

    // Collaborator failure: the error has already been logged, the session
    // recovers with a fixed apology and keeps its history.
    pub fn fail(&self) -> Result<ChatMessage, ServiceError> {
        self.append_assistant(FAILURE_FALLBACK.to_string())
    }

    pub fn history(&self) -> Result<Vec<ChatMessage>, ServiceError> {
        let state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        Ok(state.messages.clone())
    }

    pub fn is_pending(&self) -> Result<bool, ServiceError> {
        let state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        Ok(state.pending)
    }

    fn append_assistant(&self, content: String) -> Result<ChatMessage, ServiceError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;

        let message = ChatMessage {
            role: ChatRole::Assistant,
            content,
        };
        state.messages.push(message.clone());
        state.pending = false;

        info!("💬 Assistant replied ({} messages in history)", state.messages.len());
        Ok(message)
    }
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new()
    }
}
