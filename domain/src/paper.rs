use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::papers::Model;
use crate::{event_status::EventStatus, paper_status::PaperStatus, Id};
use chrono::Utc;
use entity_api::{event, paper, review, reviewer};
use log::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

pub use entity_api::paper::{find_by_event, find_by_id};

fn invalid(source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Error {
    Error {
        source,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid)),
    }
}

/// Submits a new paper. Submissions are only accepted into open events.
pub async fn create(
    db: &DatabaseConnection,
    paper_model: Model,
    submitted_by: Id,
) -> Result<Model, Error> {
    let event = event::find_by_id(db, paper_model.event_id).await?;
    if event.status != EventStatus::Open {
        warn!(
            "Rejecting submission to closed event {} ({})",
            event.name, event.acronym
        );
        return Err(invalid(None));
    }

    Ok(paper::create(db, paper_model, submitted_by).await?)
}

/// Chair decision: accept or reject. Status, the lock flag and the
/// decided_by/decided_at pair move together in one atomic update.
pub async fn decide(
    db: &DatabaseConnection,
    id: Id,
    status: PaperStatus,
    decided_by: Id,
) -> Result<Model, Error> {
    if !matches!(status, PaperStatus::Accepted | PaperStatus::Rejected) {
        return Err(invalid(None));
    }

    let paper = paper::find_by_id(db, id).await?;
    let decided = paper::update_status(
        db,
        paper,
        status,
        true,
        Some(decided_by),
        Some(Utc::now().into()),
    )
    .await?;

    info!("Paper {} decided: {:?}", decided.slug, decided.status);
    Ok(decided)
}

/// Chair action that reverses a decision: the paper returns to review,
/// unlocks, and the decision audit fields are cleared. The paper lands
/// in whichever undecided state its review counts currently call for.
pub async fn reopen(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    let txn = db.begin().await?;

    let paper = paper::find_by_id(&txn, id).await?;
    let status = undecided_status(&txn, paper.id).await?;
    let reopened = paper::update_status(&txn, paper, status, false, None, None).await?;

    txn.commit().await?;

    info!("Paper {} reopened: {:?}", reopened.slug, reopened.status);
    Ok(reopened)
}

/// The undecided status a paper's review counts currently justify:
/// awaiting_decision exactly when at least one reviewer is assigned and
/// every assigned reviewer has submitted a review.
async fn undecided_status(db: &impl ConnectionTrait, paper_id: Id) -> Result<PaperStatus, Error> {
    let reviewer_count = reviewer::count_by_paper(db, paper_id).await?;
    let review_count = review::count_by_paper(db, paper_id).await?;

    if reviewer_count > 0 && review_count == reviewer_count {
        Ok(PaperStatus::AwaitingDecision)
    } else {
        Ok(PaperStatus::UnderReview)
    }
}

/// Re-derives an undecided paper's status from its review counts.
/// Called whenever a review or reviewer assignment changes; decided
/// (locked) papers are left alone.
pub(crate) async fn sync_undecided_status(
    db: &impl ConnectionTrait,
    paper_id: Id,
) -> Result<Model, Error> {
    let paper = paper::find_by_id(db, paper_id).await?;
    if paper.status.is_decided() {
        return Ok(paper);
    }

    let status = undecided_status(db, paper_id).await?;
    if status == paper.status {
        return Ok(paper);
    }

    debug!("Paper {} moving to {status:?}", paper.slug);
    Ok(paper::update_status(db, paper, status, false, None, None).await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_paper(status: PaperStatus, locked: bool) -> Model {
        let now = Utc::now();
        Model {
            id: Id::new_v4(),
            event_id: Id::new_v4(),
            title: "Fast Caches".to_string(),
            slug: "fast-caches".to_string(),
            abstract_text: "A study of cache eviction.".to_string(),
            file_path: "papers/fast-caches.html".to_string(),
            status,
            locked,
            submitted_by: Id::new_v4(),
            decided_by: None,
            decided_at: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn decide_rejects_non_decision_statuses() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = decide(&db, Id::new_v4(), PaperStatus::UnderReview, Id::new_v4()).await;
        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }

    #[tokio::test]
    async fn sync_undecided_status_leaves_decided_papers_alone() -> Result<(), Error> {
        let paper = test_paper(PaperStatus::Accepted, true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[paper.clone()]])
            .into_connection();

        let unchanged = sync_undecided_status(&db, paper.id).await?;
        assert_eq!(unchanged.status, PaperStatus::Accepted);
        assert!(unchanged.locked);

        Ok(())
    }
}
