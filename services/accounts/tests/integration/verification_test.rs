use gantry_accounts::domain::types::LinkPurpose;
use gantry_accounts::error::AccountServiceError;
use gantry_accounts::usecase::credential::email_signature;
use gantry_accounts::usecase::verification::{
    SendVerifyEmailUseCase, VerifyEmailInput, VerifyEmailUseCase,
};

use crate::helpers::{
    APP_NAME, MemorySignedLinkCache, MockAccountRepo, MockMailSender, links, test_account,
};

#[tokio::test]
async fn should_send_verify_mail_for_authenticated_account() {
    let mailer = MockMailSender::new();
    let sent = mailer.sent_handle();
    let uc = SendVerifyEmailUseCase {
        accounts: MockAccountRepo::with(vec![test_account(7, "alice123", "alice@x.com", "secret1")]),
        links: links(MemorySignedLinkCache::new()),
        mailer,
        app_name: APP_NAME.to_owned(),
    };

    uc.execute(7).await.unwrap();

    let mails = sent.lock().unwrap();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, "alice@x.com");
    assert!(mails[0].html_body.contains("/verification"));
    assert!(mails[0].html_body.contains(&email_signature("alice@x.com")));
}

#[tokio::test]
async fn send_verify_for_unknown_account_is_unauthenticated() {
    // A valid token whose account row is gone.
    let uc = SendVerifyEmailUseCase {
        accounts: MockAccountRepo::empty(),
        links: links(MemorySignedLinkCache::new()),
        mailer: MockMailSender::new(),
        app_name: APP_NAME.to_owned(),
    };

    let result = uc.execute(7).await;
    assert!(matches!(result, Err(AccountServiceError::Unauthenticated)));
}

#[tokio::test]
async fn send_verify_surfaces_dispatch_failure() {
    let uc = SendVerifyEmailUseCase {
        accounts: MockAccountRepo::with(vec![test_account(7, "alice123", "alice@x.com", "secret1")]),
        links: links(MemorySignedLinkCache::new()),
        mailer: MockMailSender::failing(),
        app_name: APP_NAME.to_owned(),
    };

    let result = uc.execute(7).await;
    assert!(matches!(result, Err(AccountServiceError::Internal(_))));
}

#[tokio::test]
async fn should_stamp_email_verified_at() {
    let cache = MemorySignedLinkCache::new();
    links(cache.clone())
        .issue(LinkPurpose::Verify, "alice@x.com")
        .await
        .unwrap();

    let repo = MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]);
    let store = repo.handle();
    let uc = VerifyEmailUseCase {
        accounts: repo,
        links: links(cache),
    };

    uc.execute(VerifyEmailInput {
        sign: email_signature("alice@x.com"),
    })
    .await
    .unwrap();

    let persisted = store.lock().unwrap()[0].clone();
    assert!(persisted.email_verified_at.is_some());
}

#[tokio::test]
async fn verify_with_empty_signature_fails() {
    let uc = VerifyEmailUseCase {
        accounts: MockAccountRepo::empty(),
        links: links(MemorySignedLinkCache::new()),
    };

    let result = uc.execute(VerifyEmailInput { sign: String::new() }).await;
    assert!(matches!(result, Err(AccountServiceError::MissingSignature)));
}

#[tokio::test]
async fn verify_with_expired_link_fails_and_stamps_nothing() {
    let cache = MemorySignedLinkCache::new();
    links(cache.clone())
        .issue(LinkPurpose::Verify, "alice@x.com")
        .await
        .unwrap();
    cache.advance(3600);

    let repo = MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]);
    let store = repo.handle();
    let uc = VerifyEmailUseCase {
        accounts: repo,
        links: links(cache),
    };

    let result = uc
        .execute(VerifyEmailInput {
            sign: email_signature("alice@x.com"),
        })
        .await;
    assert!(matches!(
        result,
        Err(AccountServiceError::ExpiredOrUnknownLink)
    ));
    assert!(store.lock().unwrap()[0].email_verified_at.is_none());
}
