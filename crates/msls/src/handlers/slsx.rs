//! SLSx flavor of the login flow.
//!
//! - `GET /sso/authorize` - login form
//! - `POST /login/` - encode the form into a request token and redirect with `req_token` and `relay`
//! - `POST /sso/session` - exchange `{"request_token": ...}` for `{"user_id", "auth_token"}`
//! - `GET /v1/users/{user_id}` - decode the bearer token into `{"data": {"user": ...}}`
//! - `GET /sso/signout` - acknowledge a sign-out

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use msls_core::identity::{self, SlsxIdentity};
use serde::Serialize;

use crate::{
    error::FlowError,
    handlers::flow::{self, FormValues},
    state::AppState,
    templates,
};

/// Value the real provider echoes when a query parameter is absent.
const MISSING: &str = "missing";

/// Fields posted by the SLSx login form. Absent fields are empty strings.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hicn: String,
    pub mbi: String,
    pub relay: String,
    pub redirect_uri: String,
}

impl LoginForm {
    pub fn from_values(values: &FormValues) -> Self {
        Self {
            username: values.value("username"),
            name: values.value("name"),
            first_name: values.value("first_name"),
            last_name: values.value("last_name"),
            email: values.value("email"),
            hicn: values.value("hicn"),
            mbi: values.value("mbi"),
            relay: values.value("relay"),
            redirect_uri: values.value("redirect_uri"),
        }
    }

    fn identity(&self) -> SlsxIdentity {
        SlsxIdentity {
            usr: self.username.clone(),
            name: self.name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            hicn: self.hicn.clone(),
            mbi: self.mbi.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub auth_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserinfoResponse {
    pub data: UserinfoData,
}

#[derive(Debug, Serialize)]
pub struct UserinfoData {
    pub user: User,
}

/// Public shape of an SLSx user. Note `username` carries the display name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub hicn: String,
    pub mbi: String,
}

impl From<SlsxIdentity> for User {
    fn from(identity: SlsxIdentity) -> Self {
        Self {
            id: identity.usr,
            username: identity.name,
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            hicn: identity.hicn,
            mbi: identity.mbi,
        }
    }
}

/// GET /sso/authorize - Render the login form.
pub async fn authorize(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Html<String> {
    let query = FormValues::from_query(query.as_deref());

    Html(templates::slsx_login_page(
        query.first("relay").unwrap_or(MISSING),
        query.first("redirect_uri").unwrap_or(MISSING),
        state.samples(),
    ))
}

/// POST /login/ - Issue a request token and send the browser back to the client.
pub async fn submit_login(
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, FlowError> {
    let values = FormValues::parse(&body).or(FormValues::from_query(query.as_deref()));
    let form = LoginForm::from_values(&values);
    let code = identity::encode(&form.identity());
    tracing::info!(usr = %form.username, "Issued SLSx request token");

    flow::redirect_with_params(
        &form.redirect_uri,
        &[("req_token", code.as_str()), ("relay", form.relay.as_str())],
    )
}

/// POST /sso/session - Exchange a request token for an auth token.
///
/// The auth token is the request token itself; `/v1/users/{id}` decodes it directly.
pub async fn session(body: Bytes) -> Result<Json<SessionResponse>, FlowError> {
    let request_token = flow::code_from_body(&body, "request_token")?;
    let user_id = identity::decode_subject::<SlsxIdentity>(&request_token)?;

    tracing::debug!(user_id = %user_id, "Exchanged SLSx request token");

    Ok(Json(SessionResponse {
        user_id,
        auth_token: request_token,
    }))
}

/// GET /v1/users/{user_id} - Return the user carried by the bearer token.
///
/// The path id is informational; the token alone decides the response.
pub async fn user(
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<UserinfoResponse>, FlowError> {
    let token = flow::bearer_token(&headers)?;
    let identity = identity::decode::<SlsxIdentity>(token)
        .map_err(|e| FlowError::Unauthenticated(e.to_string()))?;

    if identity.usr != user_id {
        tracing::debug!(
            path_user_id = %user_id,
            token_user_id = %identity.usr,
            "User id in path does not match token"
        );
    }

    Ok(Json(UserinfoResponse {
        data: UserinfoData {
            user: identity.into(),
        },
    }))
}

/// GET /sso/signout - Nothing to tear down; mirrors the real provider's reply.
pub async fn signout() -> Response {
    (
        StatusCode::FOUND,
        Json(serde_json::json!({ "message": "signed out." })),
    )
        .into_response()
}
