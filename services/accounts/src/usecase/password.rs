use chrono::Utc;

use crate::domain::repository::{AccountRepository, MailSender, SignedLinkCache};
use crate::domain::types::{LinkPurpose, validate_email, validate_password};
use crate::error::AccountServiceError;
use crate::mail::reset_mail;
use crate::usecase::credential::hash_password;
use crate::usecase::link::SignedLinks;

// ── SendResetEmail ───────────────────────────────────────────────────────────

pub struct SendResetEmailInput {
    pub email: String,
}

pub struct SendResetEmailUseCase<R, C, M>
where
    R: AccountRepository,
    C: SignedLinkCache,
    M: MailSender,
{
    pub accounts: R,
    pub links: SignedLinks<C>,
    pub mailer: M,
    pub app_name: String,
}

impl<R, C, M> SendResetEmailUseCase<R, C, M>
where
    R: AccountRepository,
    C: SignedLinkCache,
    M: MailSender,
{
    /// Sends synchronously: unlike the welcome mail, a dispatch failure here
    /// must reach the caller.
    pub async fn execute(&self, input: SendResetEmailInput) -> Result<(), AccountServiceError> {
        if !validate_email(&input.email) {
            return Err(AccountServiceError::InvalidEmail);
        }

        let account = self
            .accounts
            .find_by_email(&input.email)
            .await?
            .ok_or(AccountServiceError::AccountNotFound)?;

        let link = self.links.issue(LinkPurpose::Reset, &account.email).await?;
        let mail = reset_mail(&self.app_name, &account.name, &account.email, &link);
        self.mailer.send(&mail).await
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub sign: String,
    pub password: String,
}

pub struct ResetPasswordUseCase<R, C>
where
    R: AccountRepository,
    C: SignedLinkCache,
{
    pub accounts: R,
    pub links: SignedLinks<C>,
}

impl<R, C> ResetPasswordUseCase<R, C>
where
    R: AccountRepository,
    C: SignedLinkCache,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AccountServiceError> {
        if !validate_email(&input.email) {
            return Err(AccountServiceError::InvalidEmail);
        }
        if input.sign.is_empty() {
            return Err(AccountServiceError::MissingSignature);
        }
        if !validate_password(&input.password) {
            return Err(AccountServiceError::InvalidPassword);
        }

        let mut account = self
            .links
            .redeem(&self.accounts, LinkPurpose::Reset, &input.sign)
            .await?;

        // The signature alone is not enough: the submitted email must match
        // the redeemed subject, or a leaked link resets someone else's guess.
        if account.email != input.email {
            return Err(AccountServiceError::LinkEmailMismatch);
        }

        account.password_hash = hash_password(&input.password);
        account.updated_at = Utc::now();
        self.accounts.save(&account).await
    }
}
