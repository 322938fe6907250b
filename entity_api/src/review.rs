use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::reviews::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, QueryOrder};

use log::*;

pub async fn create(
    db: &impl ConnectionTrait,
    review_model: Model,
    paper_id: Id,
    event_id: Id,
    reviewer_id: Id,
) -> Result<Model, Error> {
    debug!("New Review Model to be inserted: {review_model:?}");

    let now = Utc::now();

    let review_active_model: ActiveModel = ActiveModel {
        paper_id: Set(paper_id),
        event_id: Set(event_id),
        reviewer_id: Set(reviewer_id),
        decision: Set(review_model.decision),
        rate: Set(review_model.rate),
        comment: Set(review_model.comment),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(review_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_paper(db: &impl ConnectionTrait, paper_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::PaperId.eq(paper_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find_by_event(db: &impl ConnectionTrait, event_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::EventId.eq(event_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find_by_paper_and_reviewer(
    db: &impl ConnectionTrait,
    paper_id: Id,
    reviewer_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::PaperId.eq(paper_id))
        .filter(Column::ReviewerId.eq(reviewer_id))
        .one(db)
        .await?)
}

pub async fn count_by_paper(db: &impl ConnectionTrait, paper_id: Id) -> Result<u64, Error> {
    Ok(Entity::find()
        .filter(Column::PaperId.eq(paper_id))
        .count(db)
        .await?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Removes a reviewer's review of a paper if one exists. Used when the
/// reviewer assignment itself is withdrawn.
pub async fn delete_by_paper_and_reviewer(
    db: &impl ConnectionTrait,
    paper_id: Id,
    reviewer_id: Id,
) -> Result<u64, Error> {
    let result = Entity::delete_many()
        .filter(Column::PaperId.eq(paper_id))
        .filter(Column::ReviewerId.eq(reviewer_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod test {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    #[tokio::test]
    async fn delete_by_paper_and_reviewer_filters_on_both_columns() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let paper_id = Id::new_v4();
        let reviewer_id = Id::new_v4();
        let affected = delete_by_paper_and_reviewer(&db, paper_id, reviewer_id).await?;
        assert_eq!(affected, 1);

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"DELETE FROM "parea"."reviews" WHERE "reviews"."paper_id" = $1 AND "reviews"."reviewer_id" = $2"#,
                [paper_id.into(), reviewer_id.into()]
            )]
        );

        Ok(())
    }
}
