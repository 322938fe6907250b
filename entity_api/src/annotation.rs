use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::annotations::{ActiveModel, Column, Entity, Model};
use entity::{ranges, Id};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
    TryIntoModel,
};

use log::*;

pub async fn create(
    db: &impl ConnectionTrait,
    annotation_model: Model,
    user_id: Id,
    user_username: String,
) -> Result<Model, Error> {
    debug!("New Annotation Model to be inserted: {annotation_model:?}");

    let now = Utc::now();

    let annotation_active_model: ActiveModel = ActiveModel {
        id: Set(Id::new_v4()),
        schema_version: Set(annotation_model.schema_version),
        text: Set(annotation_model.text),
        quote: Set(annotation_model.quote),
        uri: Set(annotation_model.uri),
        user_id: Set(user_id),
        user_username: Set(user_username),
        consumer: Set(annotation_model.consumer),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    Ok(annotation_active_model.insert(db).await?)
}

pub async fn add_range(
    db: &impl ConnectionTrait,
    annotation_id: Id,
    range_model: ranges::Model,
) -> Result<ranges::Model, Error> {
    let range_active_model = ranges::ActiveModel {
        annotation_id: Set(annotation_id),
        start: Set(range_model.start),
        end: Set(range_model.end),
        start_offset: Set(range_model.start_offset),
        end_offset: Set(range_model.end_offset),
        ..Default::default()
    };
    Ok(range_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_ranges(
    db: &impl ConnectionTrait,
    annotation_id: Id,
) -> Result<Vec<ranges::Model>, Error> {
    Ok(ranges::Entity::find()
        .filter(ranges::Column::AnnotationId.eq(annotation_id))
        .all(db)
        .await?)
}

/// All annotations anchored to one page, oldest first, each with its
/// ranges attached.
pub async fn find_by_uri_with_ranges(
    db: &impl ConnectionTrait,
    uri: &str,
) -> Result<Vec<(Model, Vec<ranges::Model>)>, Error> {
    Ok(Entity::find()
        .filter(Column::Uri.eq(uri))
        .find_with_related(ranges::Entity)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Updates the text fields of an annotation. Ranges are deliberately
/// not touched here: range updates are not supported yet.
pub async fn update(db: &impl ConnectionTrait, id: Id, model: Model) -> Result<Model, Error> {
    let annotation = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(annotation.id),
        schema_version: Unchanged(annotation.schema_version),
        text: Set(model.text),
        quote: Set(model.quote),
        uri: Set(model.uri),
        user_id: Unchanged(annotation.user_id),
        user_username: Unchanged(annotation.user_username),
        consumer: Unchanged(annotation.consumer),
        created_at: Unchanged(annotation.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?.try_into_model()?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod test {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_annotation(uri: &str) -> Model {
        let now = Utc::now();
        Model {
            id: Id::new_v4(),
            schema_version: "v1.0".to_string(),
            text: "needs a citation".to_string(),
            quote: "caches are always faster".to_string(),
            uri: uri.to_string(),
            user_id: Id::new_v4(),
            user_username: "grace".to_string(),
            consumer: "parea".to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn update_preserves_identity_and_author_fields() -> Result<(), Error> {
        let existing = test_annotation("/review/paper/1");
        let mut edited = existing.clone();
        edited.text = "citation added in v2".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing.clone()]]) // find_by_id
            .append_query_results([[Model {
                text: edited.text.clone(),
                ..existing.clone()
            }]]) // returning row from update
            .into_connection();

        let updated = update(&db, existing.id, edited).await?;
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.user_username, existing.user_username);
        assert_eq!(updated.text, "citation added in v2");

        Ok(())
    }
}
