use gantry_accounts::error::AccountServiceError;
use gantry_accounts::usecase::account::{LoginInput, LoginUseCase};
use gantry_accounts::usecase::session::validate_session_token;

use crate::helpers::{JWT_SECRET, MockAccountRepo, test_account};

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_login_and_persist_fresh_token() {
    let repo = MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]);
    let store = repo.handle();
    let uc = LoginUseCase {
        accounts: repo,
        jwt_secret: JWT_SECRET.to_owned(),
    };

    let account = uc.execute(login_input("alice@x.com", "secret1")).await.unwrap();

    let token = account.session_token.as_deref().unwrap();
    assert_eq!(validate_session_token(token, JWT_SECRET).unwrap(), 1);
    let persisted = store.lock().unwrap()[0].clone();
    assert_eq!(persisted.session_token.as_deref(), Some(token));
}

#[tokio::test]
async fn unknown_email_fails_with_not_found() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::empty(),
        jwt_secret: JWT_SECRET.to_owned(),
    };

    let result = uc.execute(login_input("nobody@x.com", "secret1")).await;
    assert!(matches!(result, Err(AccountServiceError::AccountNotFound)));
}

#[tokio::test]
async fn wrong_password_fails_with_credential_mismatch_not_not_found() {
    let repo = MockAccountRepo::with(vec![test_account(1, "alice123", "alice@x.com", "secret1")]);
    let uc = LoginUseCase {
        accounts: repo,
        jwt_secret: JWT_SECRET.to_owned(),
    };

    let result = uc.execute(login_input("alice@x.com", "wrong12")).await;
    assert!(matches!(result, Err(AccountServiceError::WrongCredential)));
}

#[tokio::test]
async fn should_reject_malformed_fields() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::empty(),
        jwt_secret: JWT_SECRET.to_owned(),
    };

    let result = uc.execute(login_input("nonsense", "secret1")).await;
    assert!(matches!(result, Err(AccountServiceError::InvalidEmail)));

    let result = uc.execute(login_input("alice@x.com", "12345")).await;
    assert!(matches!(result, Err(AccountServiceError::InvalidPassword)));
}
