use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::SignedLinkCache;
use crate::error::AccountServiceError;

/// Redis-backed signed-link store. Expiry is delegated to Redis via SET EX;
/// reads are plain GET so redeeming a link does not consume it.
#[derive(Clone)]
pub struct RedisSignedLinkCache {
    pub pool: Pool,
}

impl SignedLinkCache for RedisSignedLinkCache {
    async fn put(
        &self,
        key: &str,
        email: &str,
        ttl_secs: u64,
    ) -> Result<(), AccountServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AccountServiceError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(key, email, ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AccountServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AccountServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AccountServiceError::Internal(e.into()))?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AccountServiceError::Internal(e.into()))?;
        Ok(value)
    }
}
