use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::Flavor,
    handlers::{health::health, sls, slsx},
    middleware::dump_request,
    state::AppState,
};

/// Create the application router for the configured flavor.
pub fn create_app(state: AppState) -> Router {
    let routes = match state.flavor() {
        Flavor::Sls => sls_routes(),
        Flavor::Slsx => slsx_routes(),
    };

    routes
        .route("/health", get(health))
        .layer(from_fn(dump_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn sls_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sls::login_page))
        .route("/login", post(sls::submit_login))
        .route("/token", post(sls::exchange_code))
        .route("/userinfo", get(sls::userinfo))
}

fn slsx_routes() -> Router<AppState> {
    Router::new()
        .route("/sso/authorize", get(slsx::authorize))
        .route("/login/", post(slsx::submit_login))
        .route("/sso/session", post(slsx::session))
        .route("/v1/users/{user_id}", get(slsx::user))
        .route("/sso/signout", get(slsx::signout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use url::Url;

    fn app(flavor: Flavor) -> Router {
        create_app(AppState::new(Config::new(flavor)))
    }

    async fn body_string(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_bearer(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        request.body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> Url {
        let location = response.headers().get(header::LOCATION).unwrap();
        Url::parse(location.to_str().unwrap()).unwrap()
    }

    fn query_param(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[tokio::test]
    async fn test_health() {
        for flavor in [Flavor::Sls, Flavor::Slsx] {
            let response = app(flavor)
                .oneshot(get_with_bearer("/health", None))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                body_json(response).await,
                serde_json::json!({ "message": "all's well" })
            );
        }
    }

    #[tokio::test]
    async fn test_sls_login_page_renders_query_values() {
        let response = app(Flavor::Sls)
            .oneshot(get_with_bearer(
                "/?state=xyz&redirect_uri=http%3A%2F%2Fclient.example%2Fcb",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(r#"name="state" value="xyz""#));
        assert!(html.contains(r#"name="redirect_uri" value="http://client.example/cb""#));
    }

    #[tokio::test]
    async fn test_login_page_with_mismatched_samples_still_renders() {
        let config = Config::new(Flavor::Sls).with_sample_lists("a,b", "h1", "m1,m2");
        let response = create_app(AppState::new(config))
            .oneshot(get_with_bearer("/", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<form"));
        assert!(!html.contains("Sample beneficiaries"));
    }

    #[tokio::test]
    async fn test_login_page_with_samples_shows_help() {
        let config = Config::new(Flavor::Slsx).with_sample_lists(
            "-20140000008325",
            "1000044680",
            "2SW4N00AA00",
        );
        let response = create_app(AppState::new(config))
            .oneshot(get_with_bearer("/sso/authorize", None))
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains("Sample beneficiaries"));
        assert!(html.contains("2SW4N00AA00"));
        assert!(html.contains(r#"name="relay" value="missing""#));
    }

    #[tokio::test]
    async fn test_sls_end_to_end() {
        let app = app(Flavor::Sls);

        // Submit login with only the subject filled in
        let response = app
            .clone()
            .oneshot(form_post(
                "/login",
                "username=alice&state=&redirect_uri=http%3A%2F%2Fclient.example%2Fcb",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://client.example/cb?code=YWxpY2U......&state="
        );
        let code = query_param(&location(&response), "code").unwrap();

        // Exchange the code
        let response = app
            .clone()
            .oneshot(json_post("/token", serde_json::json!({ "code": code })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await;
        assert_eq!(token["sub"], "alice");
        let access_token = token["access_token"].as_str().unwrap().to_string();
        assert_eq!(access_token, code);

        // Fetch userinfo with the returned bearer
        let response = app
            .oneshot(get_with_bearer(
                "/userinfo",
                Some(&format!("Bearer {access_token}")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "sub": "alice",
                "name": "",
                "given_name": "",
                "family_name": "",
                "email": "",
                "pt_identity": "",
                "identity_type": "",
            })
        );
    }

    #[tokio::test]
    async fn test_sls_login_maps_form_field_names() {
        let app = app(Flavor::Sls);

        let response = app
            .clone()
            .oneshot(form_post(
                "/login",
                "username=bob&usr_identity=1000044680&beneficiary_identity=H&given_name=Bob\
                 &family_name=Smith&name=Bob+Smith&email=bob%40example.com&state=s1\
                 &redirect_uri=http%3A%2F%2Fclient.example%2Fcb",
            ))
            .await
            .unwrap();

        let code = query_param(&location(&response), "code").unwrap();
        let response = app
            .oneshot(get_with_bearer("/userinfo", Some(&format!("Bearer {code}"))))
            .await
            .unwrap();

        let info = body_json(response).await;
        assert_eq!(info["sub"], "bob");
        assert_eq!(info["name"], "Bob Smith");
        assert_eq!(info["email"], "bob@example.com");
        assert_eq!(info["pt_identity"], "1000044680");
        assert_eq!(info["identity_type"], "H");
    }

    #[tokio::test]
    async fn test_sls_login_preserves_redirect_query() {
        let response = app(Flavor::Sls)
            .oneshot(form_post(
                "/login",
                "username=alice&state=R&redirect_uri=http%3A%2F%2Fx%2Fcb%3Fa%3D1",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let url = location(&response);
        assert_eq!(url.path(), "/cb");
        assert_eq!(query_param(&url, "a").as_deref(), Some("1"));
        assert_eq!(query_param(&url, "state").as_deref(), Some("R"));
        assert!(query_param(&url, "code").unwrap().starts_with("YWxpY2U"));
    }

    #[tokio::test]
    async fn test_sls_login_with_bad_redirect_is_server_error() {
        let response = app(Flavor::Sls)
            .oneshot(form_post("/login", "username=alice&redirect_uri=not%20a%20url"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid redirect_uri"));
    }

    #[tokio::test]
    async fn test_token_rejects_malformed_body() {
        let app = app(Flavor::Sls);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/token")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_post("/token", serde_json::json!({ "request_token": "x" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_rejects_malformed_code() {
        let response = app(Flavor::Sls)
            .oneshot(json_post("/token", serde_json::json!({ "code": "YWxpY2U" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            "malformed authorization code: expected 7 segments, found 1"
        );
    }

    #[tokio::test]
    async fn test_userinfo_unauthenticated() {
        let app = app(Flavor::Sls);

        for authorization in [None, Some("Bearer"), Some("YWxpY2U......"), Some("Bearer YWxpY2U")] {
            let response = app
                .clone()
                .oneshot(get_with_bearer("/userinfo", authorization))
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "authorization: {authorization:?}"
            );
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );
        }
    }

    #[tokio::test]
    async fn test_slsx_end_to_end() {
        let app = app(Flavor::Slsx);

        let response = app
            .clone()
            .oneshot(form_post(
                "/login/",
                "username=-20140000008325&name=Jane+Doe&first_name=Jane&last_name=Doe\
                 &email=jane%40example.com&hicn=1000044680&mbi=2SW4N00AA00\
                 &relay=relay-123&redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Fmymedicare%2Fsls-callback",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let url = location(&response);
        assert_eq!(url.path(), "/mymedicare/sls-callback");
        assert_eq!(query_param(&url, "relay").as_deref(), Some("relay-123"));
        let req_token = query_param(&url, "req_token").unwrap();

        let response = app
            .clone()
            .oneshot(json_post(
                "/sso/session",
                serde_json::json!({ "request_token": req_token }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let session = body_json(response).await;
        assert_eq!(session["user_id"], "-20140000008325");
        let auth_token = session["auth_token"].as_str().unwrap().to_string();

        let response = app
            .oneshot(get_with_bearer(
                "/v1/users/-20140000008325",
                Some(&format!("Bearer {auth_token}")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "data": {
                    "user": {
                        "id": "-20140000008325",
                        "username": "Jane Doe",
                        "email": "jane@example.com",
                        "firstName": "Jane",
                        "lastName": "Doe",
                        "hicn": "1000044680",
                        "mbi": "2SW4N00AA00",
                    }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_slsx_session_requires_request_token() {
        let response = app(Flavor::Slsx)
            .oneshot(json_post("/sso/session", serde_json::json!({ "code": "x" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            "bad request body: missing request token field `request_token`"
        );
    }

    #[tokio::test]
    async fn test_slsx_user_rejects_missing_bearer() {
        let response = app(Flavor::Slsx)
            .oneshot(get_with_bearer("/v1/users/alice", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_slsx_signout() {
        let response = app(Flavor::Slsx)
            .oneshot(get_with_bearer("/sso/signout", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "signed out." })
        );
    }

    #[tokio::test]
    async fn test_flavors_do_not_share_routes() {
        let response = app(Flavor::Slsx)
            .oneshot(get_with_bearer("/userinfo", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app(Flavor::Sls)
            .oneshot(get_with_bearer("/sso/authorize", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_pages_accept_repeated_and_unknown_query_keys() {
        let response = app(Flavor::Sls)
            .oneshot(get_with_bearer("/?state=a&state=b&prompt=login", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response)
            .await
            .contains(r#"name="state" value="a""#));

        let response = app(Flavor::Slsx)
            .oneshot(get_with_bearer("/sso/authorize?relay=a&relay=b&x=1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(r#"name="relay" value="a""#));
        assert!(html.contains(r#"name="redirect_uri" value="missing""#));
    }

    #[tokio::test]
    async fn test_sls_login_takes_first_of_repeated_fields() {
        let response = app(Flavor::Sls)
            .oneshot(form_post(
                "/login",
                "username=alice&username=bob&state=s&redirect_uri=http%3A%2F%2Fclient.example%2Fcb",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://client.example/cb?code=YWxpY2U......&state=s"
        );
    }

    #[tokio::test]
    async fn test_sls_login_prefers_pt_identity_over_usr_identity() {
        let app = app(Flavor::Sls);

        let response = app
            .clone()
            .oneshot(form_post(
                "/login",
                "username=alice&usr_identity=2&pt_identity=1\
                 &redirect_uri=http%3A%2F%2Fclient.example%2Fcb",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);

        let code = query_param(&location(&response), "code").unwrap();
        let response = app
            .oneshot(get_with_bearer("/userinfo", Some(&format!("Bearer {code}"))))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["pt_identity"], "1");
    }

    #[tokio::test]
    async fn test_slsx_login_reads_query_without_form_content_type() {
        let response = app(Flavor::Slsx)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login/?username=alice&relay=r&redirect_uri=http%3A%2F%2Fclient.example%2Fcb")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let url = location(&response);
        assert_eq!(query_param(&url, "relay").as_deref(), Some("r"));
        assert!(query_param(&url, "req_token")
            .unwrap()
            .starts_with("YWxpY2U."));
    }

    #[tokio::test]
    async fn test_slsx_login_page_lists_csv_users() {
        let path = std::env::temp_dir().join(format!("msls-app-{}-users.csv", std::process::id()));
        std::fs::write(
            &path,
            "username,hicn,mbi,name,first_name,last_name,email\n\
             -20140000008325,1000044680,2SW4N00AA00,Jane Doe,Jane,Doe,jane@example.com\n",
        )
        .unwrap();
        let config = Config::new(Flavor::Slsx).with_sample_users_csv(&path);
        std::fs::remove_file(&path).unwrap();

        let response = create_app(AppState::new(config))
            .oneshot(get_with_bearer("/sso/authorize", None))
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains("Sample beneficiaries"));
        assert!(html.contains("<td>jane@example.com</td>"));
        assert!(html.contains(r#"<option value="-20140000008325"></option>"#));
    }
}
