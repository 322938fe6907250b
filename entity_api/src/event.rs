use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::event_status::EventStatus;
use entity::events::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
    TryIntoModel,
};
use slugify::slugify;

use log::*;

/// Maximum length of a derived event slug.
const SLUG_MAX_LEN: usize = 99;

/// Derives the URL slug for an event from its name. Done exactly once,
/// at creation; the slug never changes afterwards.
pub fn derive_slug(name: &str) -> String {
    slugify!(name, max_length = SLUG_MAX_LEN)
}

pub async fn create(db: &impl ConnectionTrait, event_model: Model) -> Result<Model, Error> {
    debug!("New Event Model to be inserted: {event_model:?}");

    let now = Utc::now();
    let name = event_model.name;

    let event_active_model: ActiveModel = ActiveModel {
        slug: Set(derive_slug(name.as_str())),
        name: Set(name),
        acronym: Set(event_model.acronym),
        status: Set(EventStatus::Open),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(event_active_model.insert(db).await?)
}

/// Updates mutable event fields. Slug, acronym and lifecycle status are
/// deliberately carried over unchanged; status moves only through
/// `update_status`.
pub async fn update(db: &impl ConnectionTrait, id: Id, model: Model) -> Result<Model, Error> {
    let event = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(event.id),
        name: Set(model.name),
        slug: Unchanged(event.slug),
        acronym: Unchanged(event.acronym),
        status: Unchanged(event.status),
        created_at: Unchanged(event.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Sets the lifecycle status and nothing else.
pub async fn update_status(
    db: &impl ConnectionTrait,
    id: Id,
    status: EventStatus,
) -> Result<Model, Error> {
    let event = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(event.id),
        name: Unchanged(event.name),
        slug: Unchanged(event.slug),
        acronym: Unchanged(event.acronym),
        status: Set(status),
        created_at: Unchanged(event.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn find_all(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    Ok(Entity::find().order_by_asc(Column::CreatedAt).all(db).await?)
}

pub async fn find_by_status(
    db: &impl ConnectionTrait,
    status: EventStatus,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Status.eq(status))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find_by_name(
    db: &impl ConnectionTrait,
    name: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

#[cfg(test)]
mod slug_tests {
    use super::*;

    #[test]
    fn derive_slug_lowercases_and_hyphenates() {
        assert_eq!(derive_slug("ICSE 2024"), "icse-2024");
    }

    #[test]
    fn derive_slug_truncates_to_ninety_nine_chars() {
        let name = "x".repeat(300);
        let slug = derive_slug(&name);
        assert_eq!(slug.len(), 99);
    }

    #[test]
    fn derive_slug_strips_punctuation() {
        assert_eq!(
            derive_slug("Workshop on Systems & Storage!"),
            "workshop-on-systems-storage"
        );
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_event(status: EventStatus) -> Model {
        let now = Utc::now();
        Model {
            id: Id::new_v4(),
            name: "ICSE 2024".to_string(),
            slug: "icse-2024".to_string(),
            acronym: "ICSE24".to_string(),
            status,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn update_preserves_slug_and_status() -> Result<(), Error> {
        let existing = test_event(EventStatus::Open);
        let mut renamed = existing.clone();
        renamed.name = "ICSE 2024 (rescheduled)".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing.clone()]]) // find_by_id
            .append_query_results([[Model {
                name: renamed.name.clone(),
                ..existing.clone()
            }]]) // returning row from update
            .into_connection();

        let updated = update(&db, existing.id, renamed).await?;
        assert_eq!(updated.slug, existing.slug);
        assert_eq!(updated.status, EventStatus::Open);
        assert_eq!(updated.name, "ICSE 2024 (rescheduled)");

        Ok(())
    }

    #[tokio::test]
    async fn update_status_changes_only_the_status() -> Result<(), Error> {
        let existing = test_event(EventStatus::Open);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing.clone()]]) // find_by_id
            .append_query_results([[Model {
                status: EventStatus::Closed,
                ..existing.clone()
            }]]) // returning row from update
            .into_connection();

        let closed = update_status(&db, existing.id, EventStatus::Closed).await?;
        assert_eq!(closed.status, EventStatus::Closed);
        assert_eq!(closed.name, existing.name);
        assert_eq!(closed.slug, existing.slug);
        assert_eq!(closed.acronym, existing.acronym);

        Ok(())
    }
}
