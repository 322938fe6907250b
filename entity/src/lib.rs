use uuid::Uuid;

// Conference entities
pub mod authors;
pub mod chairs;
pub mod event_status;
pub mod events;
pub mod paper_status;
pub mod papers;
pub mod pc_members;
pub mod profiles;
pub mod review_decision;
pub mod reviewers;
pub mod reviews;
pub mod sex;
pub mod users;

// Annotation store entities
pub mod annotations;
pub mod ranges;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
