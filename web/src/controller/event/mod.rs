//! Controllers nested under a parent Event: the role memberships that
//! are scoped to a single conference.

pub(crate) mod chair_controller;
pub(crate) mod pc_member_controller;
