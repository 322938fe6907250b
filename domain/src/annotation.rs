use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::{annotations, ranges, users, Id};
use entity_api::annotation;
use log::*;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

/// An annotation together with the character-offset ranges anchoring
/// it to the rendered paper content.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = domain::annotation::AnnotationWithRanges)]
pub struct AnnotationWithRanges {
    #[serde(flatten)]
    pub annotation: annotations::Model,
    pub ranges: Vec<ranges::Model>,
}

fn validate_ranges(range_models: &[ranges::Model]) -> Result<(), Error> {
    for range in range_models {
        if range.start_offset < 0 || range.end_offset < 0 {
            warn!(
                "Rejecting annotation range with negative offsets ({}, {})",
                range.start_offset, range.end_offset
            );
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                    EntityErrorKind::Invalid,
                )),
            });
        }
    }
    Ok(())
}

/// Persists an annotation and its ranges in one transaction.
pub async fn create(
    db: &DatabaseConnection,
    annotation_model: annotations::Model,
    range_models: Vec<ranges::Model>,
    author: &users::Model,
) -> Result<AnnotationWithRanges, Error> {
    validate_ranges(&range_models)?;

    let txn = db.begin().await?;

    let annotation =
        annotation::create(&txn, annotation_model, author.id, author.username.clone()).await?;

    let mut ranges = Vec::with_capacity(range_models.len());
    for range_model in range_models {
        ranges.push(annotation::add_range(&txn, annotation.id, range_model).await?);
    }

    txn.commit().await?;

    Ok(AnnotationWithRanges { annotation, ranges })
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<AnnotationWithRanges, Error> {
    let annotation = annotation::find_by_id(db, id).await?;
    let ranges = annotation::find_ranges(db, id).await?;
    Ok(AnnotationWithRanges { annotation, ranges })
}

/// All annotations anchored to one page URI, oldest first.
pub async fn find_by_uri(
    db: &DatabaseConnection,
    uri: &str,
) -> Result<Vec<AnnotationWithRanges>, Error> {
    let annotations = annotation::find_by_uri_with_ranges(db, uri).await?;
    Ok(annotations
        .into_iter()
        .map(|(annotation, ranges)| AnnotationWithRanges { annotation, ranges })
        .collect())
}

/// Updates an annotation's text fields. Ranges are not modified by
/// update; this is a known limitation of the annotation API.
pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    annotation_model: annotations::Model,
) -> Result<AnnotationWithRanges, Error> {
    let annotation = annotation::update(db, id, annotation_model).await?;
    let ranges = annotation::find_ranges(db, id).await?;
    Ok(AnnotationWithRanges { annotation, ranges })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_range(start_offset: i32, end_offset: i32) -> ranges::Model {
        ranges::Model {
            id: Id::new_v4(),
            annotation_id: Id::new_v4(),
            start: "/div[1]/p[2]".to_string(),
            end: "/div[1]/p[2]".to_string(),
            start_offset,
            end_offset,
        }
    }

    #[test]
    fn validate_ranges_accepts_zero_offsets() {
        assert!(validate_ranges(&[test_range(0, 0)]).is_ok());
    }

    #[test]
    fn validate_ranges_rejects_negative_offsets() {
        let err = validate_ranges(&[test_range(4, -2)]).unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }
}
