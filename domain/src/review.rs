use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::reviews::Model;
use crate::{paper, Id};
use entity_api::{paper as paper_api, review, reviewer};
use log::*;
use sea_orm::{DatabaseConnection, TransactionTrait};

pub use entity_api::review::{find_by_event, find_by_id, find_by_paper};

/// Valid star ratings are 0 through 5 inclusive.
const MAX_RATE: i16 = 5;

fn invalid() -> Error {
    Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid)),
    }
}

/// Submits a reviewer's review of a paper. The whole operation is one
/// transaction: validation, the insert, and the paper's resulting
/// status transition to awaiting_decision when this was the last
/// outstanding review.
pub async fn submit(
    db: &DatabaseConnection,
    review_model: Model,
    paper_id: Id,
    reviewer_id: Id,
) -> Result<Model, Error> {
    if review_model.rate < 0 || review_model.rate > MAX_RATE {
        warn!("Rejecting review with out-of-range rate {}", review_model.rate);
        return Err(invalid());
    }

    let txn = db.begin().await?;

    let paper = paper_api::find_by_id(&txn, paper_id).await?;
    if paper.locked {
        warn!("Rejecting review of decided paper {}", paper.slug);
        return Err(invalid());
    }

    if !reviewer::exists(&txn, paper_id, reviewer_id).await? {
        warn!("User {reviewer_id} is not an assigned reviewer of paper {}", paper.slug);
        return Err(Error::forbidden("not an assigned reviewer of this paper"));
    }

    if review::find_by_paper_and_reviewer(&txn, paper_id, reviewer_id)
        .await?
        .is_some()
    {
        warn!("User {reviewer_id} already reviewed paper {}", paper.slug);
        return Err(invalid());
    }

    let created = review::create(&txn, review_model, paper_id, paper.event_id, reviewer_id).await?;
    paper::sync_undecided_status(&txn, paper_id).await?;

    txn.commit().await?;

    Ok(created)
}

/// Deletes a review and re-derives the paper's status in the same
/// transaction; a paper awaiting decision drops back to under_review
/// when its counts no longer match.
pub async fn delete(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    let review = review::find_by_id(&txn, id).await?;
    review::delete_by_id(&txn, id).await?;
    paper::sync_undecided_status(&txn, review.paper_id).await?;

    txn.commit().await?;

    Ok(())
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::review_decision::ReviewDecision;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_review(rate: i16) -> Model {
        let now = Utc::now();
        Model {
            id: Id::new_v4(),
            paper_id: Id::new_v4(),
            event_id: Id::new_v4(),
            reviewer_id: Id::new_v4(),
            decision: ReviewDecision::Accept,
            rate,
            comment: "Solid evaluation section.".to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn submit_rejects_rate_above_five() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = submit(&db, test_review(6), Id::new_v4(), Id::new_v4()).await;
        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }

    #[tokio::test]
    async fn submit_rejects_negative_rate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = submit(&db, test_review(-1), Id::new_v4(), Id::new_v4()).await;
        assert!(result.is_err());
    }
}
