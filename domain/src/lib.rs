//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with query filters within the domain layer, while encapsulating
//! the underlying implementation details remain in the `entity_api` crate.
pub use entity_api::{
    mutate::{IntoUpdateMap, UpdateMap},
    IntoQueryFilterMap, QueryFilterMap,
};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{
    annotations, authors, chairs, event_status, events, paper_status, papers, pc_members, profiles,
    ranges, review_decision, reviewers, reviews, sex, users, Id,
};

pub mod annotation;
pub mod archive;
pub mod author;
pub mod chair;
pub mod error;
pub mod event;
pub mod import;
pub mod paper;
pub mod pc_member;
pub mod policy;
pub mod profile;
pub mod review;
pub mod reviewer;
pub mod user;
