//! Request authentication.
//!
//! The credential is an access token, read from `Authorization: Bearer <token>`
//! or, for WebSocket clients that cannot set headers, the `token` query
//! parameter.

use std::{collections::HashMap, convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRequestParts, Query},
    http::{HeaderMap, Uri, header::AUTHORIZATION, request::Parts},
};

use crate::domain::Principal;

use super::{error::ApiError, state::AppState};

/// Extract the raw credential from headers or query string.
pub fn credential_from(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let from_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());
    if from_header.is_some() {
        return from_header;
    }

    Query::<HashMap<String, String>>::try_from_uri(uri)
        .ok()
        .and_then(|Query(mut params)| params.remove("token"))
        .filter(|token| !token.is_empty())
}

/// The caller, if a valid credential was presented
pub struct CurrentUser(pub Option<Principal>);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let principal = match credential_from(&parts.headers, &parts.uri) {
            Some(credential) => state.chat.identity.authenticate(&credential).await,
            None => None,
        };
        Ok(Self(principal))
    }
}

/// The caller; rejects with 401 when unauthenticated
pub struct RequireUser(pub Principal);

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(principal) = CurrentUser::from_request_parts(parts, state)
            .await
            .unwrap_or(CurrentUser(None));
        principal.map(Self).ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_credential_from_bearer_header() {
        // テスト項目: Authorization ヘッダーの Bearer トークンが優先される
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        let uri: Uri = "/ws/groups/1/chat?token=other".parse().unwrap();

        // when (操作):
        let credential = credential_from(&headers, &uri);

        // then (期待する結果):
        assert_eq!(credential.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_credential_from_query() {
        // テスト項目: ヘッダーが無い場合は token クエリパラメータが使われる
        // given (前提条件):
        let headers = HeaderMap::new();
        let uri: Uri = "/ws/groups/1/chat?token=abc123".parse().unwrap();

        // when (操作):
        let credential = credential_from(&headers, &uri);

        // then (期待する結果):
        assert_eq!(credential.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_credential_missing() {
        // テスト項目: 認証情報が無い・空の場合は None
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        let uri: Uri = "/ws/groups/1/chat?token=".parse().unwrap();

        // when (操作):
        let credential = credential_from(&headers, &uri);

        // then (期待する結果):
        assert!(credential.is_none());
    }
}
