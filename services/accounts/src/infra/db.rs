use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    SqlErr,
};

use gantry_accounts_schema::accounts;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, NewAccount};
use crate::error::AccountServiceError;

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, AccountServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find account by name")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, AccountServiceError> {
        let result = accounts::ActiveModel {
            name: Set(account.name.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            session_token: Set(None),
            email_verified_at: Set(None),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(model) => Ok(account_from_model(model)),
            // A violation here means a concurrent registration won the race
            // past the pre-checks: still a client-visible conflict, not a 500.
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
                    Err(AccountServiceError::EmailTaken)
                }
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AccountServiceError::NameTaken),
                _ => Err(anyhow::Error::new(e).context("create account").into()),
            },
        }
    }

    async fn save(&self, account: &Account) -> Result<(), AccountServiceError> {
        accounts::ActiveModel {
            id: Set(account.id),
            name: Set(account.name.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            session_token: Set(account.session_token.clone()),
            email_verified_at: Set(account.email_verified_at),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .update(&self.db)
        .await
        .context("save account")?;
        Ok(())
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        session_token: model.session_token,
        email_verified_at: model.email_verified_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
