use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AccountServiceError;
use crate::state::AppState;
use crate::usecase::password::{
    ResetPasswordInput, ResetPasswordUseCase, SendResetEmailInput, SendResetEmailUseCase,
};

// ── POST /accounts/password/email ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendResetEmailRequest {
    pub email: String,
}

pub async fn send_reset_email(
    State(state): State<AppState>,
    Json(body): Json<SendResetEmailRequest>,
) -> Result<StatusCode, AccountServiceError> {
    let usecase = SendResetEmailUseCase {
        accounts: state.account_repo(),
        links: state.signed_links(),
        mailer: state.mailer.clone(),
        app_name: state.app_name.clone(),
    };
    usecase
        .execute(SendResetEmailInput { email: body.email })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /accounts/password/reset ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub sign: String,
    pub password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AccountServiceError> {
    let usecase = ResetPasswordUseCase {
        accounts: state.account_repo(),
        links: state.signed_links(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            sign: body.sign,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
