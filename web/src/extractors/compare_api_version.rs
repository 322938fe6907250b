use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use log::*;
use semver::Version;
use service::config::ApiVersion;

/// Extracts and validates the `x-version` request header against the
/// list of API versions this server exposes. Requests carrying an
/// unknown or unparsable version are rejected before the handler runs.
pub(crate) struct CompareApiVersion(pub Version);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(ApiVersion::field_name())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing {} header", ApiVersion::field_name()),
                )
            })?
            .to_str()
            .map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid {} header value", ApiVersion::field_name()),
                )
            })?;

        let version = Version::parse(header_value).map_err(|e| {
            warn!("Failed to parse {} header: {e}", ApiVersion::field_name());
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid semantic version: {header_value}"),
            )
        })?;

        if !ApiVersion::versions()
            .iter()
            .any(|supported| *supported == header_value)
        {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {version}"),
            ));
        }

        Ok(CompareApiVersion(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_version_is_supported() {
        assert!(ApiVersion::versions()
            .iter()
            .any(|supported| *supported == ApiVersion::default_version()));
    }
}
