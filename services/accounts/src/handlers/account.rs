use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::Account;
use crate::error::AccountServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::account::{
    GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};

/// Account as exposed over HTTP. The credential hash has no field here, so it
/// cannot leak by construction.
#[derive(Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: Option<String>,
    #[serde(serialize_with = "gantry_core::serde::to_rfc3339_ms_opt")]
    pub email_verified_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "gantry_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "gantry_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            token: account.session_token,
            email_verified_at: account.email_verified_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

// ── POST /accounts ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AccountResponse>, AccountServiceError> {
    let usecase = RegisterUseCase {
        accounts: state.account_repo(),
        mail_queue: state.mail_queue.clone(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let account = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(account.into()))
}

// ── POST /accounts/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, AccountServiceError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let account = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(account.into()))
}

// ── GET /accounts/@me ────────────────────────────────────────────────────────

pub async fn get_profile(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, AccountServiceError> {
    let usecase = GetProfileUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(identity.account_id).await?;
    Ok(Json(account.into()))
}
