use crate::error::Error;
use crate::{pc_members::Model, Id};
use entity_api::{event, pc_member};
use sea_orm::{DatabaseConnection, TransactionTrait};

pub use entity_api::pc_member::{exists, find_events_by_user, find_users_by_event};

/// Adds a user to an event's program committee. Idempotent.
pub async fn add(db: &DatabaseConnection, event_id: Id, user_id: Id) -> Result<Model, Error> {
    let txn = db.begin().await?;

    event::find_by_id(&txn, event_id).await?;
    let membership = pc_member::add_if_absent(&txn, event_id, user_id).await?;

    txn.commit().await?;
    Ok(membership)
}

/// Removes a user from an event's program committee. Removing a
/// non-member is a successful no-op.
pub async fn remove(db: &DatabaseConnection, event_id: Id, user_id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    event::find_by_id(&txn, event_id).await?;
    pc_member::remove_if_present(&txn, event_id, user_id).await?;

    txn.commit().await?;
    Ok(())
}
