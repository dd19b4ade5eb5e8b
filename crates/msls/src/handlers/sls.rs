//! SLS flavor of the login flow.
//!
//! - `GET /` - login form
//! - `POST /login` - encode the form into a code and redirect with `code` and `state`
//! - `POST /token` - exchange `{"code": ...}` for `{"sub", "access_token"}`
//! - `GET /userinfo` - decode the bearer token into the identity document

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::HeaderMap,
    response::{Html, Response},
    Json,
};
use msls_core::identity::{self, SlsIdentity};
use serde::Serialize;

use crate::{
    error::FlowError,
    handlers::flow::{self, FormValues},
    state::AppState,
    templates,
};

/// Fields posted by the SLS login form. Absent fields are empty strings.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub name: String,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub pt_identity: String,
    pub identity_type: String,
    pub state: String,
    pub redirect_uri: String,
}

impl LoginForm {
    /// `pt_identity` wins over its older `usr_identity` name when both are posted.
    pub fn from_values(values: &FormValues) -> Self {
        Self {
            username: values.value("username"),
            name: values.value("name"),
            given_name: values.value("given_name"),
            family_name: values.value("family_name"),
            email: values.value("email"),
            pt_identity: values
                .first("pt_identity")
                .or_else(|| values.first("usr_identity"))
                .unwrap_or_default()
                .to_string(),
            identity_type: values.value("beneficiary_identity"),
            state: values.value("state"),
            redirect_uri: values.value("redirect_uri"),
        }
    }

    fn identity(&self) -> SlsIdentity {
        SlsIdentity {
            sub: self.username.clone(),
            name: self.name.clone(),
            given_name: self.given_name.clone(),
            family_name: self.family_name.clone(),
            email: self.email.clone(),
            pt_identity: self.pt_identity.clone(),
            identity_type: self.identity_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub sub: String,
    pub access_token: String,
}

/// GET / - Render the login form.
pub async fn login_page(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Html<String> {
    let query = FormValues::from_query(query.as_deref());

    Html(templates::sls_login_page(
        &query.value("state"),
        &query.value("redirect_uri"),
        state.samples(),
    ))
}

/// POST /login - Issue a code and send the browser back to the client.
///
/// Fields are read from the url-encoded body first, then the query string.
pub async fn submit_login(
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, FlowError> {
    let values = FormValues::parse(&body).or(FormValues::from_query(query.as_deref()));
    let form = LoginForm::from_values(&values);
    let code = identity::encode(&form.identity());
    tracing::info!(sub = %form.username, "Issued SLS authorization code");

    flow::redirect_with_params(
        &form.redirect_uri,
        &[("code", code.as_str()), ("state", form.state.as_str())],
    )
}

/// POST /token - Exchange a code for an access token.
///
/// The access token is the code itself; `/userinfo` decodes it directly.
pub async fn exchange_code(body: Bytes) -> Result<Json<TokenResponse>, FlowError> {
    let code = flow::code_from_body(&body, "code")?;
    let sub = identity::decode_subject::<SlsIdentity>(&code)?;

    tracing::debug!(sub = %sub, "Exchanged SLS authorization code");

    Ok(Json(TokenResponse {
        sub,
        access_token: code,
    }))
}

/// GET /userinfo - Return the identity carried by the bearer token.
pub async fn userinfo(headers: HeaderMap) -> Result<Json<SlsIdentity>, FlowError> {
    let token = flow::bearer_token(&headers)?;
    let identity = identity::decode::<SlsIdentity>(token)
        .map_err(|e| FlowError::Unauthenticated(e.to_string()))?;

    Ok(Json(identity))
}
