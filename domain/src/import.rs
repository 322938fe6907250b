//! Bulk JSON imports of users and events from fixture files under the
//! configured fixtures path. Staff only; records that already exist
//! (matched by their unique email or name) are skipped so imports can
//! be re-run safely.

use crate::error::Error;
use crate::{event_status::EventStatus, events, sex::Sex, users};
use entity_api::{event, user};
use log::*;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use service::config::Config;
use tokio::fs;
use utoipa::ToSchema;

/// Result of one import run.
#[derive(Debug, Default, PartialEq, serde::Serialize, ToSchema)]
#[schema(as = domain::import::ImportOutcome)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct UserFixture {
    email: String,
    username: String,
    password: String,
    #[serde(default)]
    is_staff: bool,
    first_name: String,
    last_name: String,
    #[serde(default)]
    sex: Sex,
}

#[derive(Debug, Deserialize)]
struct EventFixture {
    name: String,
    acronym: String,
}

/// Imports users (and their profiles) from `<fixtures_path>/users.json`.
pub async fn import_users(db: &DatabaseConnection, config: &Config) -> Result<ImportOutcome, Error> {
    let path = config.fixtures_path().join("users.json");
    let fixtures: Vec<UserFixture> = serde_json::from_slice(&fs::read(&path).await?)?;

    let mut outcome = ImportOutcome::default();
    for fixture in fixtures {
        if user::find_by_email(db, &fixture.email).await?.is_some() {
            debug!("Skipping existing user {}", fixture.email);
            outcome.skipped += 1;
            continue;
        }

        let now = chrono::Utc::now();
        let user_model = users::Model {
            id: crate::Id::new_v4(),
            email: fixture.email,
            username: fixture.username,
            password: fixture.password,
            is_staff: fixture.is_staff,
            created_at: now.into(),
            updated_at: now.into(),
        };
        user::create_with_profile(
            db,
            user_model,
            fixture.first_name,
            fixture.last_name,
            fixture.sex,
        )
        .await?;
        outcome.imported += 1;
    }

    info!(
        "User import finished: {} imported, {} skipped",
        outcome.imported, outcome.skipped
    );
    Ok(outcome)
}

/// Imports events from `<fixtures_path>/events.json`.
pub async fn import_events(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<ImportOutcome, Error> {
    let path = config.fixtures_path().join("events.json");
    let fixtures: Vec<EventFixture> = serde_json::from_slice(&fs::read(&path).await?)?;

    let mut outcome = ImportOutcome::default();
    for fixture in fixtures {
        if event::find_by_name(db, &fixture.name).await?.is_some() {
            debug!("Skipping existing event {}", fixture.name);
            outcome.skipped += 1;
            continue;
        }

        let now = chrono::Utc::now();
        let event_model = events::Model {
            id: crate::Id::new_v4(),
            name: fixture.name,
            slug: String::new(), // derived by the entity layer at insert
            acronym: fixture.acronym,
            status: EventStatus::Open,
            created_at: now.into(),
            updated_at: now.into(),
        };
        event::create(db, event_model).await?;
        outcome.imported += 1;
    }

    info!(
        "Event import finished: {} imported, {} skipped",
        outcome.imported, outcome.skipped
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_fixtures_deserialize_with_defaults() {
        let fixtures: Vec<UserFixture> = serde_json::from_str(
            r#"[{
                "email": "ada@parea.example",
                "username": "ada",
                "password": "hunter2",
                "first_name": "Ada",
                "last_name": "Lovelace"
            }]"#,
        )
        .unwrap();

        assert_eq!(fixtures.len(), 1);
        assert!(!fixtures[0].is_staff);
        assert_eq!(fixtures[0].sex, Sex::NotSpecified);
    }

    #[test]
    fn event_fixtures_deserialize() {
        let fixtures: Vec<EventFixture> = serde_json::from_str(
            r#"[{"name": "ICSE 2024", "acronym": "ICSE24"}]"#,
        )
        .unwrap();

        assert_eq!(fixtures[0].acronym, "ICSE24");
    }
}
