//! HTTP Basic authentication for admin endpoints.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Challenge sent with every 401 from the admin gate.
pub const CHALLENGE: &str = r#"Basic realm="Admin Area""#;

/// The single administrator credential pair.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check a decoded `user:password` pair. Both halves are always compared.
    fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_compare(username, &self.username);
        let pass_ok = constant_time_compare(password, &self.password);
        user_ok & pass_ok
    }
}

/// Basic auth layer function that takes the expected credentials as a parameter.
pub async fn basic_auth_layer(
    credentials: AdminCredentials,
    request: Request,
    next: Next,
) -> Response {
    let Some(header_value) = request.headers().get(header::AUTHORIZATION) else {
        return unauthorized_response("Authorization required");
    };

    let authorized = header_value
        .to_str()
        .ok()
        .and_then(decode_basic)
        .is_some_and(|(user, pass)| credentials.matches(&user, &pass));

    if authorized {
        next.run(request).await
    } else {
        tracing::warn!(path = %request.uri().path(), "Rejected admin credentials");
        unauthorized_response("Invalid credentials")
    }
}

/// Decode `Basic <base64(user:password)>` into its two parts.
///
/// The password is everything after the first colon.
fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(token.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response carrying the Basic challenge.
fn unauthorized_response(message: &str) -> Response {
    let mut response = AppError::Unauthorized(message.to_string()).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    response
}
