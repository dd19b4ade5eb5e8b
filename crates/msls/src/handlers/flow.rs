//! Request plumbing shared by both provider flavors.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use url::{form_urlencoded, Url};

use crate::error::FlowError;

/// Build the 302 redirect back to the client after login.
///
/// `params` are appended to whatever query `redirect_uri` already carries.
pub fn redirect_with_params(
    redirect_uri: &str,
    params: &[(&str, &str)],
) -> Result<Response, FlowError> {
    let mut url = Url::parse(redirect_uri)?;
    url.query_pairs_mut().extend_pairs(params);

    tracing::debug!(location = %url, "Redirecting to client callback");

    Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
}

/// Pull the authorization code out of a JSON exchange request body.
pub fn code_from_body(body: &[u8], field: &str) -> Result<String, FlowError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| FlowError::BadRequestBody(e.to_string()))?;

    value
        .get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            FlowError::BadRequestBody(format!("missing request token field `{field}`"))
        })
}

/// Form or query parameters with first-value lookup.
///
/// Accepts any `application/x-www-form-urlencoded` input: repeated keys,
/// unknown keys and a missing content type are all fine.
#[derive(Debug, Default)]
pub struct FormValues(Vec<(String, String)>);

impl FormValues {
    pub fn parse(input: &[u8]) -> Self {
        Self(form_urlencoded::parse(input).into_owned().collect())
    }

    pub fn from_query(query: Option<&str>) -> Self {
        query.map(|q| Self::parse(q.as_bytes())).unwrap_or_default()
    }

    /// Append `other` after these values, so lookups prefer `self`.
    pub fn or(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// First value for `key`, if present.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or an empty string.
    pub fn value(&self, key: &str) -> String {
        self.first(key).unwrap_or_default().to_string()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, FlowError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| FlowError::Unauthenticated("missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| {
            FlowError::Unauthenticated("Authorization header is not valid ASCII".to_string())
        })?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(FlowError::Unauthenticated(
            "malformed Authorization header, expected `Bearer <token>`".to_string(),
        )),
    }
}
