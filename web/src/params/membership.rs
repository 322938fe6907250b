use domain::Id;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of the role-membership creation endpoints. The parent (event
/// or paper) id comes from the path; only the member is in the body.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = web::params::membership::MembershipParams)]
pub struct MembershipParams {
    pub user_id: Id,
}
