use chrono::Utc;

use crate::domain::repository::{AccountRepository, MailSender, SignedLinkCache};
use crate::domain::types::LinkPurpose;
use crate::error::AccountServiceError;
use crate::mail::verify_mail;
use crate::usecase::link::SignedLinks;

// ── SendVerifyEmail ──────────────────────────────────────────────────────────

pub struct SendVerifyEmailUseCase<R, C, M>
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

impl<R, C, M> SendVerifyEmailUseCase<R, C, M>
where
    R: AccountRepository,
    C: SignedLinkCache,
    M: MailSender,
{
    /// `account_id` comes from the caller's session token.
    pub async fn execute(&self, account_id: i64) -> Result<(), AccountServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountServiceError::Unauthenticated)?;

        let link = self
            .links
            .issue(LinkPurpose::Verify, &account.email)
            .await?;
        let mail = verify_mail(&self.app_name, &account.email, &link);
        self.mailer.send(&mail).await
    }
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

pub struct VerifyEmailInput {
    pub sign: String,
}

pub struct VerifyEmailUseCase<R, C>
where
    R: AccountRepository,
    C: SignedLinkCache,
{
    pub accounts: R,
    pub links: SignedLinks<C>,
}

impl<R, C> VerifyEmailUseCase<R, C>
where
    R: AccountRepository,
    C: SignedLinkCache,
{
    pub async fn execute(&self, input: VerifyEmailInput) -> Result<(), AccountServiceError> {
        if input.sign.is_empty() {
            return Err(AccountServiceError::MissingSignature);
        }

        let mut account = self
            .links
            .redeem(&self.accounts, LinkPurpose::Verify, &input.sign)
            .await?;

        account.email_verified_at = Some(Utc::now());
        account.updated_at = Utc::now();
        self.accounts.save(&account).await
    }
}
