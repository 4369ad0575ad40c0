#![allow(async_fn_in_trait)]

use std::future::Future;

use crate::domain::types::{Account, NewAccount, OutboundMail};
use crate::error::AccountServiceError;

/// Repository for account rows. Lookups are single-row by a unique key.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, AccountServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountServiceError>;

    /// Insert a new account and return it with its assigned id. A unique
    /// violation maps to `NameTaken`/`EmailTaken`, not `Internal` — the
    /// constraint is the backstop for the check-then-create race.
    async fn create(&self, account: &NewAccount) -> Result<Account, AccountServiceError>;

    /// Full-row update keyed by id.
    async fn save(&self, account: &Account) -> Result<(), AccountServiceError>;
}

// The two ports below are awaited inside the spawned mail worker, so their
// futures carry an explicit `Send` bound; implementations still write
// plain `async fn`.

/// Expiring key-value store for signed links (Redis, 30-minute TTL).
pub trait SignedLinkCache: Send + Sync {
    /// Write `key -> email` with the given TTL, overwriting any prior entry
    /// (which resets its expiry window).
    fn put(
        &self,
        key: &str,
        email: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = Result<(), AccountServiceError>> + Send;

    /// Non-destructive read; `None` once expired or never written.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, AccountServiceError>> + Send;
}

/// Port for outbound transactional email.
pub trait MailSender: Send + Sync {
    fn send(
        &self,
        mail: &OutboundMail,
    ) -> impl Future<Output = Result<(), AccountServiceError>> + Send;
}
