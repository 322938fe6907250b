use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::paper_status::PaperStatus;
use entity::papers::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
    TryIntoModel,
};
use slugify::slugify;

use log::*;

/// Derives the URL slug for a paper from its title.
pub fn derive_slug(title: &str) -> String {
    slugify!(title)
}

pub async fn create(
    db: &impl ConnectionTrait,
    paper_model: Model,
    submitted_by: Id,
) -> Result<Model, Error> {
    debug!("New Paper Model to be inserted: {paper_model:?}");

    let now = Utc::now();
    let title = paper_model.title;

    let paper_active_model: ActiveModel = ActiveModel {
        event_id: Set(paper_model.event_id),
        slug: Set(derive_slug(title.as_str())),
        title: Set(title),
        abstract_text: Set(paper_model.abstract_text),
        file_path: Set(paper_model.file_path),
        status: Set(PaperStatus::UnderReview),
        locked: Set(false),
        submitted_by: Set(submitted_by),
        decided_by: Set(None),
        decided_at: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(paper_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_event(db: &impl ConnectionTrait, event_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::EventId.eq(event_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Applies a full decision-state change in one atomic UPDATE: status,
/// locked flag and the decided_by/decided_at pair always move together.
pub async fn update_status(
    db: &impl ConnectionTrait,
    paper: Model,
    status: PaperStatus,
    locked: bool,
    decided_by: Option<Id>,
    decided_at: Option<DateTimeWithTimeZone>,
) -> Result<Model, Error> {
    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(paper.id),
        event_id: Unchanged(paper.event_id),
        title: Unchanged(paper.title),
        slug: Unchanged(paper.slug),
        abstract_text: Unchanged(paper.abstract_text),
        file_path: Unchanged(paper.file_path),
        status: Set(status),
        locked: Set(locked),
        submitted_by: Unchanged(paper.submitted_by),
        decided_by: Set(decided_by),
        decided_at: Set(decided_at),
        created_at: Unchanged(paper.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?.try_into_model()?)
}

#[cfg(test)]
mod slug_tests {
    use super::*;

    #[test]
    fn derive_slug_hyphenates_title() {
        assert_eq!(derive_slug("Fast Caches"), "fast-caches");
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

    pub(crate) fn test_paper(status: PaperStatus, locked: bool) -> Model {
        let now = Utc::now();
        Model {
            id: Id::new_v4(),
            event_id: Id::new_v4(),
            title: "Fast Caches".to_string(),
            slug: "fast-caches".to_string(),
            abstract_text: "A study of cache eviction.".to_string(),
            file_path: "papers/fast-caches.html".to_string(),
            status,
            locked,
            submitted_by: Id::new_v4(),
            decided_by: None,
            decided_at: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn update_status_returns_decided_paper() -> Result<(), Error> {
        let paper = test_paper(PaperStatus::AwaitingDecision, false);
        let chair_id = Id::new_v4();
        let now: DateTimeWithTimeZone = Utc::now().into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[Model {
                status: PaperStatus::Accepted,
                locked: true,
                decided_by: Some(chair_id),
                decided_at: Some(now),
                ..paper.clone()
            }]])
            .into_connection();

        let decided = update_status(
            &db,
            paper,
            PaperStatus::Accepted,
            true,
            Some(chair_id),
            Some(now),
        )
        .await?;

        assert_eq!(decided.status, PaperStatus::Accepted);
        assert!(decided.locked);
        assert_eq!(decided.decided_by, Some(chair_id));
        assert!(decided.decided_at.is_some());

        Ok(())
    }
}
