//! Centralized authorization: one place that answers whether an acting
//! user may perform an administrative action, independent of any
//! request handler. The web layer's protect middleware delegates here
//! and turns a deny into a 403.

use crate::error::Error;
use crate::{users, Id};
use entity_api::{chair, paper};
use log::*;
use sea_orm::DatabaseConnection;

/// An administrative action on a concrete resource. Plain reads,
/// submissions and annotation writes are open to any authenticated
/// user and never reach the policy layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Edit an event's mutable fields.
    UpdateEvent(Id),
    /// Close an event and write its archival snapshot.
    CloseEvent(Id),
    /// Reopen a closed event.
    ReopenEvent(Id),
    /// Download an event's pre-built archive.
    DownloadArchive(Id),
    /// Add or remove chairs and PC members of an event.
    ManageEventRoles(Id),
    /// Add or remove reviewers and authors of a paper.
    ManagePaperRoles(Id),
    /// Accept, reject or reopen a paper's decision.
    DecidePaper(Id),
    /// Run the bulk JSON fixture imports.
    ImportFixtures,
    /// Edit the profile of the user with the given id.
    EditProfile(Id),
}

/// Evaluates whether `actor` may perform `action`. Staff accounts may
/// do everything; chairs hold event-scoped administrative rights over
/// their event and its papers.
pub async fn evaluate(
    db: &DatabaseConnection,
    actor: &users::Model,
    action: Action,
) -> Result<bool, Error> {
    if actor.is_staff {
        return Ok(true);
    }

    let allowed = match action {
        Action::UpdateEvent(event_id)
        | Action::CloseEvent(event_id)
        | Action::DownloadArchive(event_id)
        | Action::ManageEventRoles(event_id) => chair::exists(db, event_id, actor.id).await?,
        Action::ManagePaperRoles(paper_id) | Action::DecidePaper(paper_id) => {
            chairs_owning_event(db, paper_id, actor.id).await?
        }
        // Everything past this point is reserved for staff.
        Action::ReopenEvent(_) | Action::ImportFixtures => false,
        Action::EditProfile(user_id) => actor.id == user_id,
    };

    Ok(allowed)
}

/// Like [`evaluate`] but turns a deny into a forbidden error, for
/// callers that want `?` semantics.
pub async fn authorize(
    db: &DatabaseConnection,
    actor: &users::Model,
    action: Action,
) -> Result<(), Error> {
    if evaluate(db, actor, action).await? {
        Ok(())
    } else {
        debug!("Policy denied {action:?} for user {}", actor.id);
        Err(Error::forbidden(format!("{action:?} denied")))
    }
}

/// Is the actor a chair of the event the paper belongs to.
async fn chairs_owning_event(
    db: &DatabaseConnection,
    paper_id: Id,
    user_id: Id,
) -> Result<bool, Error> {
    let paper = paper::find_by_id(db, paper_id).await?;
    Ok(chair::exists(db, paper.event_id, user_id).await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::chairs;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(is_staff: bool) -> users::Model {
        let now = Utc::now();
        users::Model {
            id: Id::new_v4(),
            email: "grace@parea.example".to_string(),
            username: "grace".to_string(),
            password: "unused".to_string(),
            is_staff,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn chair_row(event_id: Id, user_id: Id) -> chairs::Model {
        let now = Utc::now();
        chairs::Model {
            id: Id::new_v4(),
            event_id,
            user_id,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn staff_may_do_anything_without_touching_the_db() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let staff = test_user(true);

        assert!(evaluate(&db, &staff, Action::ReopenEvent(Id::new_v4())).await?);
        assert!(evaluate(&db, &staff, Action::ImportFixtures).await?);
        assert!(evaluate(&db, &staff, Action::EditProfile(Id::new_v4())).await?);

        Ok(())
    }

    #[tokio::test]
    async fn chair_of_event_may_close_it() -> Result<(), Error> {
        let user = test_user(false);
        let event_id = Id::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[chair_row(event_id, user.id)]])
            .into_connection();

        assert!(evaluate(&db, &user, Action::CloseEvent(event_id)).await?);

        Ok(())
    }

    #[tokio::test]
    async fn non_chair_may_not_close_an_event() -> Result<(), Error> {
        let user = test_user(false);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<chairs::Model>::new()])
            .into_connection();

        assert!(!evaluate(&db, &user, Action::CloseEvent(Id::new_v4())).await?);

        Ok(())
    }

    #[tokio::test]
    async fn reopen_is_reserved_for_staff() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let user = test_user(false);

        assert!(!evaluate(&db, &user, Action::ReopenEvent(Id::new_v4())).await?);

        Ok(())
    }

    #[tokio::test]
    async fn users_may_only_edit_their_own_profile() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let user = test_user(false);

        assert!(evaluate(&db, &user, Action::EditProfile(user.id)).await?);
        assert!(!evaluate(&db, &user, Action::EditProfile(Id::new_v4())).await?);

        Ok(())
    }

    #[tokio::test]
    async fn authorize_maps_a_deny_to_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let user = test_user(false);

        let err = authorize(&db, &user, Action::ImportFixtures)
            .await
            .unwrap_err();
        assert!(matches!(
            err.error_kind,
            crate::error::DomainErrorKind::Forbidden(_)
        ));
    }
}
