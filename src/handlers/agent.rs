//! Reference handler for the signed agent chat endpoint.

use actix_web::{web, App, HttpRequest, HttpResponse};

use crate::{
    models::{ChatRequest, ChatResponse},
    services::{require_signature, Verifier},
};

/// Test-harness header selecting a canned backend behavior.
pub const TEST_MODE_HEADER: &str = "x-test-mode";

/// Handle `POST /agent/chat`.
///
/// The signature is checked against the raw body bytes before they are
/// parsed; a tampered body fails verification rather than JSON parsing.
/// The `x-test-mode` header selects `stub` (fixed reply) or `echo`
/// (mirror the last user message) behavior for test traffic.
pub async fn chat(
    req: HttpRequest,
    body: web::Bytes,
    verifier: web::Data<Verifier>,
) -> HttpResponse {
    if let Err(resp) = require_signature(&req, &body, verifier.get_ref()) {
        return resp;
    }

    let chat_request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(parsed) => parsed,
        Err(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Bad Request",
                "message": "Request body is not a valid chat request"
            }))
        }
    };

    let mode = req
        .headers()
        .get(TEST_MODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("stub");

    let reply = match mode {
        "echo" => chat_request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
            .unwrap_or_default(),
        _ => "ok".to_string(),
    };

    HttpResponse::Ok().json(ChatResponse {
        reply,
        mode: mode.to_string(),
    })
}

/// Build an application exposing the signed agent routes.
///
/// Shared by the demo server and the integration tests so both exercise
/// the same wiring.
pub fn create_agent_app(
    verifier: Verifier,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(verifier))
        .service(web::resource("/agent/chat").route(web::post().to(chat)))
}
