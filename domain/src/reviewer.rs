use crate::error::Error;
use crate::{paper, reviewers::Model, Id};
use entity_api::{paper as paper_api, review, reviewer};
use log::*;
use sea_orm::{DatabaseConnection, TransactionTrait};

pub use entity_api::reviewer::{exists, find_papers_by_user, find_users_by_paper};

/// Assigns a reviewer to a paper. Idempotent; the paper's status is
/// re-derived in the same transaction since a fully-reviewed paper
/// stops being fully reviewed when a new reviewer joins.
pub async fn add(db: &DatabaseConnection, paper_id: Id, user_id: Id) -> Result<Model, Error> {
    let txn = db.begin().await?;

    paper_api::find_by_id(&txn, paper_id).await?;
    let membership = reviewer::add_if_absent(&txn, paper_id, user_id).await?;
    paper::sync_undecided_status(&txn, paper_id).await?;

    txn.commit().await?;
    Ok(membership)
}

/// Withdraws a reviewer assignment. Any review that reviewer already
/// submitted is cascade-deleted in the same transaction, and the
/// paper's status is re-derived from the remaining counts.
pub async fn remove(db: &DatabaseConnection, paper_id: Id, user_id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    paper_api::find_by_id(&txn, paper_id).await?;
    reviewer::remove_if_present(&txn, paper_id, user_id).await?;

    let deleted_reviews = review::delete_by_paper_and_reviewer(&txn, paper_id, user_id).await?;
    if deleted_reviews > 0 {
        debug!("Cascade-deleted {deleted_reviews} review(s) of withdrawn reviewer {user_id}");
    }
    paper::sync_undecided_status(&txn, paper_id).await?;

    txn.commit().await?;
    Ok(())
}
