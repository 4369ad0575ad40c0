use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;
use url::Url;

use crate::infra::cache::RedisSignedLinkCache;
use crate::infra::db::DbAccountRepository;
use crate::infra::smtp::AnyMailer;
use crate::mail::MailQueue;
use crate::usecase::link::SignedLinks;

/// Shared application state passed to every handler via axum `State`.
///
/// All external handles (DB, Redis, SMTP, mail worker) are constructed once
/// in `main` and injected here; nothing reaches for a global client.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub mailer: AnyMailer,
    pub mail_queue: MailQueue,
    pub jwt_secret: String,
    pub app_name: String,
    pub base_url: Url,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn link_cache(&self) -> RedisSignedLinkCache {
        RedisSignedLinkCache {
            pool: self.redis.clone(),
        }
    }

    pub fn signed_links(&self) -> SignedLinks<RedisSignedLinkCache> {
        SignedLinks {
            cache: self.link_cache(),
            base_url: self.base_url.clone(),
        }
    }

    /// State with lazy, never-dialed pools, for extractor and handler tests.
    #[cfg(test)]
    pub fn for_tests(jwt_secret: &str) -> Self {
        use crate::infra::smtp::LogMailer;
        use crate::mail::spawn_mail_worker;

        let redis = deadpool_redis::Config::from_url("redis://127.0.0.1")
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .expect("redis pool");
        let base_url = Url::parse("https://example.com").unwrap();
        let links = SignedLinks {
            cache: RedisSignedLinkCache {
                pool: redis.clone(),
            },
            base_url: base_url.clone(),
        };
        let mail_queue = spawn_mail_worker(links, AnyMailer::Log(LogMailer), "Gantry".into(), 4);
        Self {
            db: DatabaseConnection::default(),
            redis,
            mailer: AnyMailer::Log(LogMailer),
            mail_queue,
            jwt_secret: jwt_secret.to_owned(),
            app_name: "Gantry".into(),
            base_url,
        }
    }
}
