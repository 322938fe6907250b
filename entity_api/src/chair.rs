use super::error::Error;
use chrono::Utc;
use entity::chairs::{ActiveModel, Column, Entity, Model};
use entity::{events, users, Id};
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait};

use log::*;

pub async fn find_by_event_and_user(
    db: &impl ConnectionTrait,
    event_id: Id,
    user_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::EventId.eq(event_id))
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

pub async fn exists(db: &impl ConnectionTrait, event_id: Id, user_id: Id) -> Result<bool, Error> {
    Ok(find_by_event_and_user(db, event_id, user_id)
        .await?
        .is_some())
}

/// Inserts a chair membership only when it does not exist yet. Adding
/// an existing chair is a successful no-op that returns the existing
/// row, so no duplicate memberships can accumulate.
pub async fn add_if_absent(
    db: &impl ConnectionTrait,
    event_id: Id,
    user_id: Id,
) -> Result<Model, Error> {
    if let Some(existing) = find_by_event_and_user(db, event_id, user_id).await? {
        debug!("User {user_id} is already a chair of event {event_id}");
        return Ok(existing);
    }

    let now = Utc::now();
    let membership = ActiveModel {
        event_id: Set(event_id),
        user_id: Set(user_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };
    Ok(membership.insert(db).await?)
}

/// Deletes the membership when present; removing a non-member is a
/// successful no-op. Returns the number of rows removed (0 or 1).
pub async fn remove_if_present(
    db: &impl ConnectionTrait,
    event_id: Id,
    user_id: Id,
) -> Result<u64, Error> {
    let result = Entity::delete_many()
        .filter(Column::EventId.eq(event_id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn find_users_by_event(
    db: &impl ConnectionTrait,
    event_id: Id,
) -> Result<Vec<users::Model>, Error> {
    let rows = Entity::find()
        .filter(Column::EventId.eq(event_id))
        .find_also_related(users::Entity)
        .all(db)
        .await?;
    Ok(rows.into_iter().filter_map(|(_, user)| user).collect())
}

pub async fn find_events_by_user(
    db: &impl ConnectionTrait,
    user_id: Id,
) -> Result<Vec<events::Model>, Error> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .find_also_related(events::Entity)
        .all(db)
        .await?;
    Ok(rows.into_iter().filter_map(|(_, event)| event).collect())
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
    async fn add_if_absent_does_not_insert_a_duplicate_row() -> Result<(), Error> {
        let event_id = Id::new_v4();
        let user_id = Id::new_v4();
        let now = Utc::now();
        let existing = Model {
            id: Id::new_v4(),
            event_id,
            user_id,
            created_at: now.into(),
            updated_at: now.into(),
        };

        // Only the lookup result is queued: any attempted INSERT would
        // hit an empty mock queue and fail the test.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing.clone()]])
            .into_connection();

        let membership = add_if_absent(&db, event_id, user_id).await?;
        assert_eq!(membership, existing);
        assert_eq!(db.into_transaction_log().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_if_present_is_a_noop_for_non_members() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let event_id = Id::new_v4();
        let user_id = Id::new_v4();
        let affected = remove_if_present(&db, event_id, user_id).await?;
        assert_eq!(affected, 0);

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"DELETE FROM "parea"."chairs" WHERE "chairs"."event_id" = $1 AND "chairs"."user_id" = $2"#,
                [event_id.into(), user_id.into()]
            )]
        );

        Ok(())
    }
}
