//! HTTP-layer glue for request verification.

use actix_web::{HttpRequest, HttpResponse};
use tracing::warn;

use crate::{models::Rejection, services::verifier::Verifier};

/// Verify the signature on an incoming request, producing a ready-made
/// error response on rejection.
///
/// Handlers call this with the raw body bytes before doing any work:
///
/// ```ignore
/// if let Err(resp) = require_signature(&req, &body, &verifier) {
///     return resp;
/// }
/// ```
///
/// Status mapping: `MalformedRequest` is a 400; everything else is a 401.
/// `UnknownClient` and `BadSignature` share one response body so a caller
/// cannot probe which client ids exist.
pub fn require_signature(
    req: &HttpRequest,
    body: &[u8],
    verifier: &Verifier,
) -> Result<(), HttpResponse> {
    let method = req.method().as_str();
    let path = req.path();

    verifier
        .verify(method, path, req.headers(), body)
        .map_err(|rejection| {
            warn!(%path, kind = ?rejection, "rejected signed request");
            rejection_response(rejection)
        })
}

/// Map a rejection kind to its HTTP response.
pub fn rejection_response(rejection: Rejection) -> HttpResponse {
    match rejection {
        Rejection::MalformedRequest => HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Bad Request",
            "message": "Missing or malformed authentication headers"
        })),
        Rejection::StaleTimestamp => HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Unauthorized",
            "message": "Timestamp outside the accepted window"
        })),
        Rejection::UnknownClient | Rejection::BadSignature => {
            HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Unauthorized",
                "message": "Invalid signature"
            }))
        }
    }
}
