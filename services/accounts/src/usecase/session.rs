use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::types::SESSION_TOKEN_TTL_SECS;
use crate::error::AccountServiceError;

/// Claims for a session token. `sub` is the account id in decimal form.
///
/// The only time-varying input is `iat`/`exp` at second resolution: two tokens
/// issued for the same account within the same second are byte-identical.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_session_token(account_id: i64, secret: &str) -> Result<String, AccountServiceError> {
    let iat = now_secs();
    let claims = SessionClaims {
        sub: account_id.to_string(),
        iat,
        exp: iat + SESSION_TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AccountServiceError::Internal(e.into()))
}

/// Validate a session token and return the account id it was issued for.
/// Any defect (bad signature, expired, malformed sub) maps to `Unauthenticated`.
pub fn validate_session_token(token: &str, secret: &str) -> Result<i64, AccountServiceError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AccountServiceError::Unauthenticated)?;

    data.claims
        .sub
        .parse()
        .map_err(|_| AccountServiceError::Unauthenticated)
}
