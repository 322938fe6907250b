//! Controllers nested under a parent Paper: the author and reviewer
//! role memberships scoped to a single submission.

pub(crate) mod author_controller;
pub(crate) mod reviewer_controller;
