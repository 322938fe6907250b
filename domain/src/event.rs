use crate::error::Error;
use crate::events::Model;
use crate::{archive, event_status::EventStatus, Id};
use entity_api::{chair, event, paper, pc_member, review};
use log::*;
use sea_orm::{DatabaseConnection, TransactionTrait};
use service::config::Config;

pub use entity_api::event::{find_all, find_by_id, find_by_status};

pub async fn create(db: &DatabaseConnection, event_model: Model) -> Result<Model, Error> {
    Ok(event::create(db, event_model).await?)
}

/// Updates an event's mutable fields. The slug stays whatever it was
/// derived to at creation time.
pub async fn update(db: &DatabaseConnection, id: Id, event_model: Model) -> Result<Model, Error> {
    Ok(event::update(db, id, event_model).await?)
}

/// Closes an event and writes its archival snapshot under the media
/// root in the same transaction. If the snapshot cannot be written the
/// status change is rolled back.
pub async fn close(db: &DatabaseConnection, config: &Config, id: Id) -> Result<Model, Error> {
    let txn = db.begin().await?;

    let event = event::update_status(&txn, id, EventStatus::Closed).await?;
    archive::export_snapshot(&txn, config, &event).await?;

    txn.commit().await?;

    info!("Closed event {} ({})", event.name, event.acronym);
    Ok(event)
}

/// Reopens a closed event. Staff only; enforced by the policy layer.
pub async fn reopen(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    let event = event::update_status(db, id, EventStatus::Open).await?;
    info!("Reopened event {} ({})", event.name, event.acronym);
    Ok(event)
}

/// Everything the event detail page needs: the event itself plus its
/// role memberships, papers and event-scoped reviews. Purely a read;
/// paper status transitions happen at review submission time instead.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
#[schema(as = domain::event::EventDetail)]
pub struct EventDetail {
    pub event: Model,
    pub chairs: Vec<crate::users::Model>,
    pub pc_members: Vec<crate::users::Model>,
    pub papers: Vec<crate::papers::Model>,
    pub reviews: Vec<crate::reviews::Model>,
}

pub async fn find_detail(db: &DatabaseConnection, id: Id) -> Result<EventDetail, Error> {
    let event = event::find_by_id(db, id).await?;
    let chairs = chair::find_users_by_event(db, id).await?;
    let pc_members = pc_member::find_users_by_event(db, id).await?;
    let papers = paper::find_by_event(db, id).await?;
    let reviews = review::find_by_event(db, id).await?;

    Ok(EventDetail {
        event,
        chairs,
        pc_members,
        papers,
        reviews,
    })
}
