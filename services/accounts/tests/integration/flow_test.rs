//! The register → duplicate → bad login → good login sequence, end to end
//! over the in-memory store.

use std::sync::{Arc, Mutex};

use gantry_accounts::domain::types::Account;
use gantry_accounts::error::AccountServiceError;
use gantry_accounts::mail::spawn_mail_worker;
use gantry_accounts::usecase::account::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use gantry_accounts::usecase::session::validate_session_token;

use crate::helpers::{
    APP_NAME, JWT_SECRET, MemorySignedLinkCache, MockAccountRepo, MockMailSender, links,
};

fn shared_repo(store: &Arc<Mutex<Vec<Account>>>) -> MockAccountRepo {
    MockAccountRepo {
        accounts: Arc::clone(store),
    }
}

#[tokio::test]
async fn register_duplicate_then_login_flow() {
    let store = MockAccountRepo::empty().handle();
    let queue = spawn_mail_worker(
        links(MemorySignedLinkCache::new()),
        MockMailSender::new(),
        APP_NAME.to_owned(),
        8,
    );

    // Register alice.
    let register = RegisterUseCase {
        accounts: shared_repo(&store),
        mail_queue: queue.clone(),
        jwt_secret: JWT_SECRET.to_owned(),
    };
    let account = register
        .execute(RegisterInput {
            name: "alice123".to_owned(),
            email: "alice@x.com".to_owned(),
            password: "secret1".to_owned(),
        })
        .await
        .unwrap();
    let first_token = account.session_token.clone().unwrap();
    assert!(!first_token.is_empty());

    // Same email, different name: domain error, nothing persisted.
    let result = register
        .execute(RegisterInput {
            name: "alice456".to_owned(),
            email: "alice@x.com".to_owned(),
            password: "secret1".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountServiceError::EmailTaken)));
    assert_eq!(store.lock().unwrap().len(), 1);

    // Wrong password: credential mismatch, not "not found".
    let login = LoginUseCase {
        accounts: shared_repo(&store),
        jwt_secret: JWT_SECRET.to_owned(),
    };
    let result = login
        .execute(LoginInput {
            email: "alice@x.com".to_owned(),
            password: "wrong12".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountServiceError::WrongCredential)));

    // Correct password: fresh valid token. Issuance time is the only varying
    // claim, so equality with the first token is not asserted either way.
    let account = login
        .execute(LoginInput {
            email: "alice@x.com".to_owned(),
            password: "secret1".to_owned(),
        })
        .await
        .unwrap();
    let second_token = account.session_token.unwrap();
    assert_eq!(
        validate_session_token(&second_token, JWT_SECRET).unwrap(),
        account.id
    );
}
