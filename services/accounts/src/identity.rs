//! Bearer session-token extractor.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;

use crate::error::AccountServiceError;
use crate::state::AppState;
use crate::usecase::session::validate_session_token;

/// The caller's account id, recovered from `Authorization: Bearer <token>`.
///
/// Rejects with `Unauthenticated` (401) when the header is absent, malformed,
/// or the token fails validation.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub account_id: i64,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AccountServiceError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send`, not `async fn`;
    // extract synchronously and return a 'static async block to satisfy it.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);
        let secret = state.jwt_secret.clone();

        async move {
            let token = token.ok_or(AccountServiceError::Unauthenticated)?;
            let account_id = validate_session_token(&token, &secret)?;
            Ok(Self { account_id })
        }
    }
}
