use super::error::{EntityApiErrorKind, Error};
use async_trait::async_trait;
use axum_login::{AuthnBackend, UserId};
use chrono::Utc;

use entity::users::{ActiveModel, Column, Entity, Model};
use entity::{profiles, sex::Sex, Id};
use log::*;
use password_auth;
use sea_orm::{
    entity::prelude::*, ConnectionTrait, DatabaseConnection, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

pub async fn create(db: &impl ConnectionTrait, user_model: Model) -> Result<Model, Error> {
    debug!("New User Model to be inserted: {user_model:?}");

    let now = Utc::now();
    let user_active_model: ActiveModel = ActiveModel {
        email: Set(user_model.email),
        username: Set(user_model.username),
        password: Set(generate_hash(user_model.password)),
        is_staff: Set(user_model.is_staff),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(user_active_model.insert(db).await?)
}

/// Creates a user and its one-to-one profile in a single transaction.
/// A user row never exists without its profile row.
pub async fn create_with_profile(
    db: &impl TransactionTrait,
    user_model: Model,
    first_name: String,
    last_name: String,
    sex: Sex,
) -> Result<(Model, profiles::Model), Error> {
    let txn = db.begin().await?;

    let user = create(&txn, user_model).await?;
    let now = Utc::now();

    let profile = profiles::ActiveModel {
        user_id: Set(user.id),
        first_name: Set(first_name),
        last_name: Set(last_name),
        sex: Set(sex),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok((user, profile))
}

pub async fn find_by_email(db: &impl ConnectionTrait, email: &str) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn find_by_username(
    db: &impl ConnectionTrait,
    username: &str,
) -> Result<Model, Error> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn delete(db: &impl ConnectionTrait, user_id: Id) -> Result<(), Error> {
    Entity::delete_by_id(user_id).exec(db).await?;
    Ok(())
}

pub async fn verify_password(password_to_verify: &str, password_hash: &str) -> Result<(), Error> {
    match password_auth::verify_password(password_to_verify, password_hash) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordUnauthenticated,
        }),
    }
}

pub fn generate_hash(password: String) -> String {
    password_auth::generate_hash(password)
}

async fn authenticate_user(creds: Credentials, user: Model) -> Result<Option<Model>, Error> {
    match password_auth::verify_password(creds.password, &user.password) {
        Ok(_) => Ok(Some(user)),
        Err(_) => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordUnauthenticated,
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Backend {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, ToSchema, IntoParams, Deserialize)]
#[schema(as = domain::user::Credentials)] // OpenAPI schema
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

impl Backend {
    pub fn new(db: &Arc<DatabaseConnection>) -> Self {
        Self {
            // Arc is cloned, but the source DatabaseConnection refers to the same instance
            // as the one passed in to new() (see the Arc documentation for more info)
            db: Arc::clone(db),
        }
    }
}

#[async_trait]
impl AuthnBackend for Backend {
    type User = Model;
    type Credentials = Credentials;
    type Error = Error;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        match find_by_email(self.db.as_ref(), &creds.email).await? {
            Some(user) => authenticate_user(creds, user).await,
            None => Err(Error {
                source: None,
                error_kind: EntityApiErrorKind::RecordUnauthenticated,
            }),
        }
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        Ok(Entity::find_by_id(*user_id).one(self.db.as_ref()).await?)
    }
}

pub type AuthSession = axum_login::AuthSession<Backend>;

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod test {
    use super::*;
    use entity::Id;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(email: &str, username: &str) -> Model {
        let now = Utc::now();
        Model {
            id: Id::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            password: generate_hash("password".to_string()),
            is_staff: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_by_email_returns_the_matching_record() -> Result<(), Error> {
        let user = test_user("test@test.com", "test");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();

        let found = find_by_email(&db, "test@test.com").await?;
        assert_eq!(found, Some(user));

        Ok(())
    }

    #[tokio::test]
    async fn find_by_username_errors_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let result = find_by_username(&db, "grace").await;
        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn verify_password_rejects_wrong_password() {
        let hash = generate_hash("right-password".to_string());
        let result = verify_password("wrong-password", &hash).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn verify_password_accepts_correct_password() {
        let hash = generate_hash("right-password".to_string());
        let result = verify_password("right-password", &hash).await;
        assert!(result.is_ok());
    }
}
