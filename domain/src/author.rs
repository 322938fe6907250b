use crate::error::Error;
use crate::{authors::Model, Id};
use entity_api::{author, paper};
use sea_orm::{DatabaseConnection, TransactionTrait};

pub use entity_api::author::{exists, find_papers_by_user, find_users_by_paper};

/// Records a user as an author of a paper. Idempotent.
pub async fn add(db: &DatabaseConnection, paper_id: Id, user_id: Id) -> Result<Model, Error> {
    let txn = db.begin().await?;

    paper::find_by_id(&txn, paper_id).await?;
    let membership = author::add_if_absent(&txn, paper_id, user_id).await?;

    txn.commit().await?;
    Ok(membership)
}

/// Removes an author from a paper. Removing a non-author is a
/// successful no-op.
pub async fn remove(db: &DatabaseConnection, paper_id: Id, user_id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    paper::find_by_id(&txn, paper_id).await?;
    author::remove_if_present(&txn, paper_id, user_id).await?;

    txn.commit().await?;
    Ok(())
}
