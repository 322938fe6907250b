use crate::error::Error;
use crate::{chairs::Model, Id};
use entity_api::{chair, event};
use sea_orm::{DatabaseConnection, TransactionTrait};

pub use entity_api::chair::{exists, find_events_by_user, find_users_by_event};

/// Makes a user a chair of an event. Idempotent: adding an existing
/// chair returns the existing membership row untouched.
pub async fn add(db: &DatabaseConnection, event_id: Id, user_id: Id) -> Result<Model, Error> {
    let txn = db.begin().await?;

    // Surface a not-found error for a bogus event id up front.
    event::find_by_id(&txn, event_id).await?;
    let membership = chair::add_if_absent(&txn, event_id, user_id).await?;

    txn.commit().await?;
    Ok(membership)
}

/// Removes a user's chair membership of an event. Removing a
/// non-member is a successful no-op.
pub async fn remove(db: &DatabaseConnection, event_id: Id, user_id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    event::find_by_id(&txn, event_id).await?;
    chair::remove_if_present(&txn, event_id, user_id).await?;

    txn.commit().await?;
    Ok(())
}
