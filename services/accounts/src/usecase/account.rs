use chrono::Utc;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{
    Account, NewAccount, validate_email, validate_name, validate_password,
};
use crate::error::AccountServiceError;
use crate::mail::{MailJob, MailQueue};
use crate::usecase::credential::hash_password;
use crate::usecase::session::issue_session_token;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<R: AccountRepository> {
    pub accounts: R,
    pub mail_queue: MailQueue,
    pub jwt_secret: String,
}

impl<R: AccountRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<Account, AccountServiceError> {
        if !validate_name(&input.name) {
            return Err(AccountServiceError::InvalidName);
        }
        if !validate_email(&input.email) {
            return Err(AccountServiceError::InvalidEmail);
        }
        if !validate_password(&input.password) {
            return Err(AccountServiceError::InvalidPassword);
        }

        // Fast-path duplicate checks. The unique constraints in the store are
        // the actual guard; `create` maps a violation to the same errors.
        if self.accounts.find_by_name(&input.name).await?.is_some() {
            return Err(AccountServiceError::NameTaken);
        }
        if self.accounts.find_by_email(&input.email).await?.is_some() {
            return Err(AccountServiceError::EmailTaken);
        }

        let now = Utc::now();
        let mut account = self
            .accounts
            .create(&NewAccount {
                name: input.name,
                email: input.email,
                password_hash: hash_password(&input.password),
                created_at: now,
                updated_at: now,
            })
            .await?;

        // Welcome mail (with its verify link) is built and sent entirely in
        // the background worker; a full queue or a dispatch failure never
        // reaches the caller.
        self.mail_queue.enqueue(MailJob::Welcome {
            name: account.name.clone(),
            email: account.email.clone(),
        });

        let token = issue_session_token(account.id, &self.jwt_secret)?;
        account.session_token = Some(token);
        account.updated_at = Utc::now();
        self.accounts.save(&account).await?;

        Ok(account)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: AccountRepository> {
    pub accounts: R,
    pub jwt_secret: String,
}

impl<R: AccountRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<Account, AccountServiceError> {
        if !validate_email(&input.email) {
            return Err(AccountServiceError::InvalidEmail);
        }
        if !validate_password(&input.password) {
            return Err(AccountServiceError::InvalidPassword);
        }

        let mut account = self
            .accounts
            .find_by_email(&input.email)
            .await?
            .ok_or(AccountServiceError::AccountNotFound)?;

        if account.password_hash != hash_password(&input.password) {
            return Err(AccountServiceError::WrongCredential);
        }

        let token = issue_session_token(account.id, &self.jwt_secret)?;
        account.session_token = Some(token);
        account.updated_at = Utc::now();
        self.accounts.save(&account).await?;

        Ok(account)
    }
}

// ── Profile ──────────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> GetProfileUseCase<R> {
    /// `account_id` comes from a validated session token; a missing row means
    /// the token outlived its account.
    pub async fn execute(&self, account_id: i64) -> Result<Account, AccountServiceError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountServiceError::Unauthenticated)
    }
}
