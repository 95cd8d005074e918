#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hashapi_domain::ClientConfig;
use hashapi_infra::AuthenticatingHttpClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EXPIRED_MESSAGE: &str = "Your access token has expired.";
pub const REFRESH_TOKEN: &str = "refresh-0f3a";

/// Expiry claim carried by [`stale_token`]; long past.
pub const STALE_EXP: i64 = 1_469_134_464;
/// Expiry claim carried by [`fresh_token`].
pub const FRESH_EXP: i64 = 4_102_444_800;

/// Unsigned JWT whose payload is `claims`.
pub fn jwt(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

pub fn stale_token() -> String {
    jwt(&json!({ "id": "user-1", "exp": STALE_EXP }))
}

pub fn fresh_token() -> String {
    jwt(&json!({ "id": "user-1", "exp": FRESH_EXP }))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Client against `server` holding the stale access token and a valid
/// refresh token.
pub fn stale_client(server: &MockServer) -> AuthenticatingHttpClient {
    AuthenticatingHttpClient::new(
        ClientConfig::with_base_url(server.uri()),
        Some(stale_token()),
        Some(REFRESH_TOKEN.to_string()),
    )
    .expect("client should build")
}

pub fn expired_response() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({ "error": EXPIRED_MESSAGE }))
}

/// `/auth/refresh` exchanging [`REFRESH_TOKEN`] for [`fresh_token`],
/// expected exactly `times` times.
pub async fn mount_refresh(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": REFRESH_TOKEN })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": fresh_token(),
            "refresh_token": REFRESH_TOKEN,
        })))
        .expect(times)
        .mount(server)
        .await;
}
