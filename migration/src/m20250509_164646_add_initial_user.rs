use chrono::Utc;
use password_auth::generate_hash;
use sea_orm::{DbBackend, Statement, Value};
use sea_orm_migration::prelude::*;
use service::config::RustEnv;
use std::env;
use std::str::FromStr;
use uuid::Uuid;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let rust_env: RustEnv = RustEnv::from_str(
            env::var("RUST_ENV")
                .unwrap_or_else(|_| "development".to_string())
                .as_str(),
        )
        .unwrap();

        match rust_env {
            RustEnv::Development | RustEnv::Staging => insert_initial_staff_user(manager).await,
            RustEnv::Production => {
                // Production gets its staff accounts through a separate provisioning process
                Ok(())
            }
        }
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        delete_initial_staff_user(manager).await
    }
}

// NOTE: We use raw SQL here to avoid issues with entity type changes in future migrations.
// Using the ORM can break if new fields are added later, but raw SQL remains compatible.
async fn insert_initial_staff_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let now = Utc::now();

    let password_hash = generate_hash("password");

    let user_sql = r#"
        INSERT INTO parea.users (
            email, username, password, is_staff, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
    "#;
    let user_row = db
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            user_sql,
            vec![
                Value::String(Some(Box::new("admin@parea.example".to_owned()))),
                Value::String(Some(Box::new("admin".to_owned()))),
                Value::String(Some(Box::new(password_hash))),
                Value::Bool(Some(true)),
                Value::ChronoDateTimeUtc(Some(Box::new(now))),
                Value::ChronoDateTimeUtc(Some(Box::new(now))),
            ],
        ))
        .await?;
    let staff_user_id: Uuid = user_row
        .ok_or_else(|| DbErr::Custom("initial staff user insert returned no row".to_owned()))?
        .try_get("", "id")?;

    let profile_sql = r#"
        INSERT INTO parea.profiles (
            user_id, first_name, last_name, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5)
    "#;
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        profile_sql,
        vec![
            Value::Uuid(Some(Box::new(staff_user_id))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
        ],
    ))
    .await?;

    Ok(())
}

async fn delete_initial_staff_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();

    // The profile row goes with the user via ON DELETE CASCADE
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "DELETE FROM parea.users WHERE email = $1",
        vec![Value::String(Some(Box::new(
            "admin@parea.example".to_owned(),
        )))],
    ))
    .await?;

    Ok(())
}
