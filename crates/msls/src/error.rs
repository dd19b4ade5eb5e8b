use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use msls_core::identity::CodecError;
use thiserror::Error;

/// Errors raised by the login flow handlers.
///
/// Each one ends the current request; nothing is retried.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The authorization code could not be decoded.
    #[error(transparent)]
    MalformedArtifact(#[from] CodecError),

    /// The code exchange body is not JSON or lacks the code field.
    #[error("bad request body: {0}")]
    BadRequestBody(String),

    /// The `redirect_uri` submitted with the login form is not a URL.
    #[error("invalid redirect_uri: {0}")]
    BadRedirectTarget(#[from] url::ParseError),

    /// Missing or malformed bearer credentials on the userinfo endpoint.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
}

impl FlowError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FlowError::MalformedArtifact(_) | FlowError::BadRequestBody(_) => {
                StatusCode::BAD_REQUEST
            }
            FlowError::BadRedirectTarget(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FlowError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for FlowError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Login flow error");
        } else {
            tracing::warn!(error = %self, "Rejected login flow request");
        }

        let mut response = (
            status,
            Json(serde_json::json!({ "message": self.to_string() })),
        )
            .into_response();

        if let FlowError::Unauthenticated(_) = self {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
