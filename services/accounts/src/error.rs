use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service error variants.
///
/// Three classes: request-shape errors (malformed input), domain errors
/// (business-rule violations), and `Internal` for store/cache/SMTP faults.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("name must be 3 to 15 characters")]
    InvalidName,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be 6 to 15 characters")]
    InvalidPassword,
    #[error("signature is required")]
    MissingSignature,
    #[error("name already taken")]
    NameTaken,
    #[error("email already registered")]
    EmailTaken,
    #[error("account not found")]
    AccountNotFound,
    #[error("wrong password")]
    WrongCredential,
    #[error("unknown link purpose")]
    InvalidLinkPurpose,
    #[error("link is expired or unknown")]
    ExpiredOrUnknownLink,
    #[error("link was issued for a different email")]
    LinkEmailMismatch,
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::MissingSignature => "MISSING_SIGNATURE",
            Self::NameTaken => "NAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::WrongCredential => "WRONG_CREDENTIAL",
            Self::InvalidLinkPurpose => "INVALID_LINK_PURPOSE",
            Self::ExpiredOrUnknownLink => "EXPIRED_OR_UNKNOWN_LINK",
            Self::LinkEmailMismatch => "LINK_EMAIL_MISMATCH",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidName
            | Self::InvalidEmail
            | Self::InvalidPassword
            | Self::MissingSignature
            | Self::InvalidLinkPurpose
            | Self::ExpiredOrUnknownLink
            | Self::LinkEmailMismatch => StatusCode::BAD_REQUEST,
            Self::NameTaken | Self::EmailTaken => StatusCode::CONFLICT,
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::WrongCredential | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests, and 4xx are expected client errors. Internal errors
        // need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
