use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AccountServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::verification::{
    SendVerifyEmailUseCase, VerifyEmailInput, VerifyEmailUseCase,
};

// ── POST /accounts/verification/email ────────────────────────────────────────

pub async fn send_verify_email(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<StatusCode, AccountServiceError> {
    let usecase = SendVerifyEmailUseCase {
        accounts: state.account_repo(),
        links: state.signed_links(),
        mailer: state.mailer.clone(),
        app_name: state.app_name.clone(),
    };
    usecase.execute(identity.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /accounts/verification ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub sign: String,
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<VerifyEmailRequest>,
) -> Result<StatusCode, AccountServiceError> {
    let usecase = VerifyEmailUseCase {
        accounts: state.account_repo(),
        links: state.signed_links(),
    };
    usecase.execute(VerifyEmailInput { sign: body.sign }).await?;
    Ok(StatusCode::NO_CONTENT)
}
