//! Archival export for closed events and retrieval of pre-built
//! downloadable event archives.
//!
//! Closing an event writes a JSON snapshot of the event, its papers and
//! their reviews to `<media_root>/<acronym>/<acronym>.json`. The
//! downloadable `<acronym>.tar` bundle (snapshot plus uploaded paper
//! files) is built out of band and only served from here.

use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::events::Model;
use entity_api::{paper, review};
use log::*;
use sea_orm::ConnectionTrait;
use serde_json::json;
use service::config::Config;
use std::path::PathBuf;
use tokio::fs;

/// Path the pre-built archive tarball for an event is expected at.
pub fn archive_path(config: &Config, acronym: &str) -> PathBuf {
    config
        .media_root()
        .join(acronym)
        .join(format!("{acronym}.tar"))
}

fn snapshot_path(config: &Config, acronym: &str) -> PathBuf {
    config
        .media_root()
        .join(acronym)
        .join(format!("{acronym}.json"))
}

/// Writes the archival JSON snapshot for an event being closed.
pub async fn export_snapshot(
    db: &impl ConnectionTrait,
    config: &Config,
    event: &Model,
) -> Result<(), Error> {
    let papers = paper::find_by_event(db, event.id).await?;
    let reviews = review::find_by_event(db, event.id).await?;

    let snapshot = json!({
        "event": event,
        "papers": papers,
        "reviews": reviews,
    });

    let path = snapshot_path(config, &event.acronym);
    let parent = path.parent().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;
    fs::create_dir_all(parent).await?;
    fs::write(&path, serde_json::to_vec_pretty(&snapshot)?).await?;

    info!("Exported archival snapshot for event {} to {path:?}", event.acronym);
    Ok(())
}

/// Loads the pre-built archive tarball for an event. A missing file is
/// reported as a not-found error rather than surfacing the raw I/O
/// failure.
pub async fn load_archive(config: &Config, acronym: &str) -> Result<Vec<u8>, Error> {
    let path = archive_path(config, acronym);

    match fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("No archive found for event {acronym} at {path:?}");
            Err(Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                    EntityErrorKind::NotFound,
                )),
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Download filename for an event's archive, named after its acronym.
pub fn archive_file_name(acronym: &str) -> String {
    format!("{acronym}.tar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::config::Config;

    #[test]
    fn archive_file_name_uses_acronym() {
        assert_eq!(archive_file_name("ICSE24"), "ICSE24.tar");
    }

    #[test]
    fn archive_path_is_nested_under_the_acronym_directory() {
        let config = Config::default();
        let path = archive_path(&config, "ICSE24");
        assert!(path.ends_with("ICSE24/ICSE24.tar"));
    }

    #[tokio::test]
    async fn load_archive_maps_missing_file_to_not_found() {
        let config = Config::default();

        let result = load_archive(&config, "NO-SUCH-EVENT").await;
        let err = result.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound))
        );
    }
}
