use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::AccountServiceError;

/// A registered account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Latest issued session token; `None` until the first issuance.
    pub session_token: Option<String>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create an account; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A transactional email ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Purpose of a signed link. The cache key and the destination URL both
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPurpose {
    Verify,
    Reset,
}

impl LinkPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Reset => "reset",
        }
    }
}

impl FromStr for LinkPurpose {
    type Err = AccountServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verify" => Ok(Self::Verify),
            "reset" => Ok(Self::Reset),
            _ => Err(AccountServiceError::InvalidLinkPurpose),
        }
    }
}

/// Signed-link time-to-live in seconds (30 minutes).
pub const LINK_TTL_SECS: u64 = 1800;

/// Session-token lifetime in seconds (24 hours).
pub const SESSION_TOKEN_TTL_SECS: u64 = 86400;

/// Validate an account name: 3 to 15 characters.
pub fn validate_name(name: &str) -> bool {
    (3..=15).contains(&name.chars().count())
}

/// Validate email syntax: one `@` with a non-empty local part and a dotted,
/// non-empty domain, no whitespace. Deliverability is the SMTP server's problem.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Validate a password: 6 to 15 characters.
pub fn validate_password(password: &str) -> bool {
    (6..=15).contains(&password.chars().count())
}
