use url::Url;

use crate::domain::repository::{AccountRepository, SignedLinkCache};
use crate::domain::types::{Account, LINK_TTL_SECS, LinkPurpose};
use crate::error::AccountServiceError;
use crate::usecase::credential::email_signature;

fn cache_key(purpose: LinkPurpose, signature: &str) -> String {
    format!("account:sign:{}:{}", purpose.as_str(), signature)
}

/// Issues and redeems time-limited signed links for email verification and
/// password reset.
///
/// The signature is derived from the subject's email, so there is only ever
/// one live link per (purpose, email): re-issuing overwrites the cache entry
/// and resets its 30-minute window. Redeeming reads the entry without
/// consuming it.
pub struct SignedLinks<C: SignedLinkCache> {
    pub cache: C,
    pub base_url: Url,
}

impl<C: SignedLinkCache> SignedLinks<C> {
    /// Compose the destination URL for `purpose` and persist the link record.
    ///
    /// Reset links carry the plaintext email as a query parameter (the reset
    /// form needs it); verify links carry only the signature.
    pub async fn issue(
        &self,
        purpose: LinkPurpose,
        email: &str,
    ) -> Result<Url, AccountServiceError> {
        let signature = email_signature(email);
        let mut url = self.base_url.clone();
        match purpose {
            LinkPurpose::Reset => {
                url.set_path("/password/reset");
                url.query_pairs_mut()
                    .append_pair("email", email)
                    .append_pair("sign", &signature);
            }
            LinkPurpose::Verify => {
                url.set_path("/verification");
                url.query_pairs_mut().append_pair("sign", &signature);
            }
        }
        self.cache
            .put(&cache_key(purpose, &signature), email, LINK_TTL_SECS)
            .await?;
        Ok(url)
    }

    /// Resolve a signature back to its account.
    ///
    /// A missing cache entry and a dangling signature (entry exists, account
    /// does not) both map to `ExpiredOrUnknownLink` — a stale link is a client
    /// problem, not a server fault.
    pub async fn redeem<R: AccountRepository>(
        &self,
        accounts: &R,
        purpose: LinkPurpose,
        signature: &str,
    ) -> Result<Account, AccountServiceError> {
        let email = self
            .cache
            .get(&cache_key(purpose, signature))
            .await?
            .ok_or(AccountServiceError::ExpiredOrUnknownLink)?;
        accounts
            .find_by_email(&email)
            .await?
            .ok_or(AccountServiceError::ExpiredOrUnknownLink)
    }
}
