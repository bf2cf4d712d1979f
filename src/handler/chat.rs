//! Chat endpoint
//!
//! `POST /chat` with `{"message": "...", "lang": "en"}`, answered with
//! `{"reply": "..."}`. Both fields are optional: a missing or null message is
//! empty, a missing or null lang is the configured default.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::{Request, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppState;
use crate::http::{self, HttpResponse};
use crate::knowledge::{KnowledgeBase, Language, LanguageError};
use crate::logger;
use crate::responder::{self, Reply};

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error(transparent)]
    Language(#[from] LanguageError),
    #[error("request body too large (max: {max} bytes)")]
    TooLarge { max: u64 },
    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl ChatError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidBody(_) | Self::NotAnObject | Self::Language(_) | Self::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

/// Result of answering one chat body
#[derive(Debug)]
pub struct ChatOutcome {
    pub lang: Language,
    pub reply: Reply,
    pub message_chars: usize,
}

/// Parse a request body and produce the reply
pub fn answer(
    body: &[u8],
    kb: &KnowledgeBase,
    default_lang: Language,
) -> Result<ChatOutcome, ChatError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ChatError::NotAnObject);
    }
    let request: ChatRequest = serde_json::from_value(value)?;

    let lang = match request.lang.as_deref() {
        Some(code) => code.parse::<Language>()?,
        None => default_lang,
    };
    let message = request.message.unwrap_or_default();

    Ok(ChatOutcome {
        lang,
        reply: responder::reply(kb, &message, lang),
        message_chars: message.chars().count(),
    })
}

/// Collect the body, failing once it grows past `max_body_size`
async fn read_body(req: Request<Incoming>, max_body_size: u64) -> Result<Bytes, ChatError> {
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ChatError::TooLarge { max: max_body_size })
        }
        Err(e) => Err(ChatError::BodyRead(e.to_string())),
    }
}

/// JSON `{"error": ...}` for a rejected chat request
pub fn error_response(err: &ChatError, enable_cors: bool) -> HttpResponse {
    logger::log_warning(&format!("[Chat] Rejected request: {err}"));
    http::build_json_error(err.status(), &err.to_string(), enable_cors)
}

pub async fn handle_chat(req: Request<Incoming>, state: &AppState) -> HttpResponse {
    let enable_cors = state.config.http.enable_cors;

    let body = match read_body(req, state.config.http.max_body_size).await {
        Ok(body) => body,
        Err(e) => return error_response(&e, enable_cors),
    };

    match answer(&body, state.knowledge, state.default_lang) {
        Ok(outcome) => {
            logger::log_chat_reply(outcome.lang, outcome.reply.kind, outcome.message_chars);
            let response = ChatResponse {
                reply: outcome.reply.text,
            };
            http::build_json_response(StatusCode::OK, &response, enable_cors)
        }
        Err(e) => error_response(&e, enable_cors),
    }
}
