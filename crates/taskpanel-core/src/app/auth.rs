//! Bearer token 認証
//!
//! `/api` 配下のすべてのルートに掛かる middleware。
//! 不一致・欠落なら 401 を返し、handler には到達しない。

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use super::error::ApiError;
use super::state::AppState;

pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !bearer_is_valid(request.headers(), &state.token) {
        debug!(
            method = %request.method(),
            uri = %request.uri(),
            "rejected request without valid bearer token"
        );
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// `Authorization` が厳密に `Bearer <expected>` かどうか
pub fn bearer_is_valid(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|candidate| candidate == expected)
}

/// ログ出力用に token を伏せる（先頭 2 文字だけ残す）
pub fn redact_token(token: &str) -> String {
    if token.chars().count() <= 4 {
        return "[REDACTED]".to_string();
    }
    let head: String = token.chars().take(2).collect();
    format!("{head}[REDACTED]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        }
        headers
    }

    #[rstest]
    #[case::exact(Some("Bearer s3cret"), true)]
    #[case::missing(None, false)]
    #[case::wrong_token(Some("Bearer other"), false)]
    #[case::no_scheme(Some("s3cret"), false)]
    #[case::lowercase_scheme(Some("bearer s3cret"), false)]
    #[case::trailing_space(Some("Bearer s3cret "), false)]
    #[case::basic(Some("Basic s3cret"), false)]
    fn bearer_must_match_exactly(#[case] value: Option<&'static str>, #[case] expected: bool) {
        assert_eq!(bearer_is_valid(&headers(value), "s3cret"), expected);
    }

    #[rstest]
    #[case::long("secret123", "se[REDACTED]")]
    #[case::short("abcd", "[REDACTED]")]
    #[case::empty("", "[REDACTED]")]
    fn redacts_token(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(redact_token(token), expected);
    }
}
