use sea_orm::Database;
use tracing::info;
use url::Url;

use gantry_accounts::config::AccountsConfig;
use gantry_accounts::infra::smtp::{AnyMailer, LogMailer, SmtpConfig, SmtpMailer};
use gantry_accounts::mail::spawn_mail_worker;
use gantry_accounts::router::build_router;
use gantry_accounts::state::AppState;
use gantry_accounts::usecase::link::SignedLinks;

#[tokio::main]
async fn main() {
    gantry_core::tracing::init_tracing();

    let config = AccountsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let base_url = Url::parse(&config.app_url).expect("invalid APP_URL");

    let mailer = match SmtpConfig::from_env() {
        Some(smtp) => AnyMailer::Smtp(SmtpMailer::new(smtp).expect("invalid SMTP configuration")),
        None => AnyMailer::Log(LogMailer),
    };

    let mail_queue = spawn_mail_worker(
        SignedLinks {
            cache: gantry_accounts::infra::cache::RedisSignedLinkCache {
                pool: redis.clone(),
            },
            base_url: base_url.clone(),
        },
        mailer.clone(),
        config.app_name.clone(),
        config.mail_queue_depth,
    );

    let state = AppState {
        db,
        redis,
        mailer,
        mail_queue,
        jwt_secret: config.jwt_secret,
        app_name: config.app_name,
        base_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("accounts service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutdown signal received");
}
