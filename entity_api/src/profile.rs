use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::profiles::{ActiveModel, Column, Entity, Model};
use entity::{sex::Sex, Id};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, TryIntoModel,
};

pub async fn find_by_user_id(db: &impl ConnectionTrait, user_id: Id) -> Result<Model, Error> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

/// Updates the editable profile fields; the user link never changes.
pub async fn update(
    db: &impl ConnectionTrait,
    user_id: Id,
    first_name: String,
    last_name: String,
    sex: Sex,
) -> Result<Model, Error> {
    let profile = find_by_user_id(db, user_id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(profile.id),
        user_id: Unchanged(profile.user_id),
        first_name: Set(first_name),
        last_name: Set(last_name),
        sex: Set(sex),
        created_at: Unchanged(profile.created_at),
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
    use chrono::Utc;
    use entity::sex::Sex;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn find_by_user_id_returns_the_matching_record() -> Result<(), Error> {
        let now = Utc::now();
        let user_id = Id::new_v4();
        let profile = Model {
            id: Id::new_v4(),
            user_id,
            first_name: "Grace".to_string(),
            last_name: "Kim".to_string(),
            sex: Sex::Female,
            created_at: now.into(),
            updated_at: now.into(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[profile.clone()]])
            .into_connection();

        assert_eq!(find_by_user_id(&db, user_id).await?, profile);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_user_id_errors_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let result = find_by_user_id(&db, Id::new_v4()).await;
        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }
}
