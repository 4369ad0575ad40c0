use gantry_accounts::domain::types::LinkPurpose;
use gantry_accounts::error::AccountServiceError;
use gantry_accounts::usecase::credential::{email_signature, hash_password};
use gantry_accounts::usecase::password::{
    ResetPasswordInput, ResetPasswordUseCase, SendResetEmailInput, SendResetEmailUseCase,
};

use crate::helpers::{
    APP_NAME, MemorySignedLinkCache, MockAccountRepo, MockMailSender, links, test_account,
};

#[tokio::test]
async fn should_send_reset_mail_with_link() {
    let cache = MemorySignedLinkCache::new();
    let mailer = MockMailSender::new();
    let sent = mailer.sent_handle();
    let uc = SendResetEmailUseCase {
        accounts: MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]),
        links: links(cache.clone()),
        mailer,
        app_name: APP_NAME.to_owned(),
    };

    uc.execute(SendResetEmailInput {
        email: "alice@x.com".to_owned(),
    })
    .await
    .unwrap();

    let mails = sent.lock().unwrap();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, "alice@x.com");
    assert!(mails[0].html_body.contains("/password/reset"));
    assert!(mails[0].html_body.contains(&email_signature("alice@x.com")));

    // The link is live in the cache right away.
    drop(mails);
    let repo = MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]);
    links(cache)
        .redeem(&repo, LinkPurpose::Reset, &email_signature("alice@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn send_reset_for_unknown_email_fails() {
    let uc = SendResetEmailUseCase {
        accounts: MockAccountRepo::empty(),
        links: links(MemorySignedLinkCache::new()),
        mailer: MockMailSender::new(),
        app_name: APP_NAME.to_owned(),
    };

    let result = uc
        .execute(SendResetEmailInput {
            email: "nobody@x.com".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountServiceError::AccountNotFound)));
}

#[tokio::test]
async fn send_reset_surfaces_dispatch_failure() {
    // Unlike the welcome mail, reset mail is synchronous: the caller must see this.
    let uc = SendResetEmailUseCase {
        accounts: MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]),
        links: links(MemorySignedLinkCache::new()),
        mailer: MockMailSender::failing(),
        app_name: APP_NAME.to_owned(),
    };

    let result = uc
        .execute(SendResetEmailInput {
            email: "alice@x.com".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountServiceError::Internal(_))));
}

#[tokio::test]
async fn should_reset_password_with_valid_link() {
    let cache = MemorySignedLinkCache::new();
    let sl = links(cache.clone());
    sl.issue(LinkPurpose::Reset, "alice@x.com").await.unwrap();

    let repo = MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]);
    let store = repo.handle();
    let uc = ResetPasswordUseCase {
        accounts: repo,
        links: links(cache),
    };

    uc.execute(ResetPasswordInput {
        email: "alice@x.com".to_owned(),
        sign: email_signature("alice@x.com"),
        password: "newpass1".to_owned(),
    })
    .await
    .unwrap();

    let persisted = store.lock().unwrap()[0].clone();
    assert_eq!(persisted.password_hash, hash_password("newpass1"));
}

#[tokio::test]
async fn reset_with_mismatched_email_fails_even_with_valid_link() {
    let cache = MemorySignedLinkCache::new();
    let sl = links(cache.clone());
    sl.issue(LinkPurpose::Reset, "alice@x.com").await.unwrap();

    let repo = MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]);
    let store = repo.handle();
    let uc = ResetPasswordUseCase {
        accounts: repo,
        links: links(cache),
    };

    let result = uc
        .execute(ResetPasswordInput {
            email: "bob@x.com".to_owned(),
            sign: email_signature("alice@x.com"),
            password: "newpass1".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountServiceError::LinkEmailMismatch)));

    // Fails closed: nothing was persisted.
    let persisted = store.lock().unwrap()[0].clone();
    assert_eq!(persisted.password_hash, hash_password("secret1"));
}

#[tokio::test]
async fn reset_with_empty_signature_fails() {
    let uc = ResetPasswordUseCase {
        accounts: MockAccountRepo::empty(),
        links: links(MemorySignedLinkCache::new()),
    };

    let result = uc
        .execute(ResetPasswordInput {
            email: "alice@x.com".to_owned(),
            sign: String::new(),
            password: "newpass1".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountServiceError::MissingSignature)));
}

#[tokio::test]
async fn reset_with_expired_link_fails() {
    let cache = MemorySignedLinkCache::new();
    let sl = links(cache.clone());
    sl.issue(LinkPurpose::Reset, "alice@x.com").await.unwrap();
    cache.advance(1801);

    let uc = ResetPasswordUseCase {
        accounts: MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]),
        links: links(cache),
    };

    let result = uc
        .execute(ResetPasswordInput {
            email: "alice@x.com".to_owned(),
            sign: email_signature("alice@x.com"),
            password: "newpass1".to_owned(),
        })
        .await;
    assert!(matches!(
        result,
        Err(AccountServiceError::ExpiredOrUnknownLink)
    ));
}
