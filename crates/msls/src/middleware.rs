//! Request dump middleware.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Largest request body the dump will buffer.
pub const MAX_DUMP_BYTES: usize = 1024 * 1024;

/// Log every request verbatim (method, URI, headers, body) before handling it.
///
/// The body is buffered and handed on unchanged.
pub async fn dump_request(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_DUMP_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                error = %e,
                method = %parts.method,
                uri = %parts.uri,
                "Unreadable request body"
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, e.to_string()).into_response();
        }
    };

    tracing::debug!(
        method = %parts.method,
        uri = %parts.uri,
        version = ?parts.version,
        headers = ?parts.headers,
        body = %String::from_utf8_lossy(&bytes),
        "Incoming request"
    );

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
