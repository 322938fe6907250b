use chrono::Utc;
use password_auth::generate_hash;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, Value};
use std::collections::HashMap;

pub use entity::{
    annotations, authors, chairs, event_status, events, paper_status, papers, pc_members,
    profiles, ranges, review_decision, reviewers, reviews, sex, users, Id,
};

pub mod annotation;
pub mod author;
pub mod chair;
pub mod error;
pub mod event;
pub mod mutate;
pub mod paper;
pub mod pc_member;
pub mod profile;
pub mod query;
pub mod review;
pub mod reviewer;
pub mod user;

pub(crate) fn uuid_parse_str(uuid_str: &str) -> Result<Id, error::Error> {
    Id::parse_str(uuid_str).map_err(|_| error::Error {
        source: None,
        error_kind: error::EntityApiErrorKind::InvalidQueryTerm,
    })
}

/// `QueryFilterMap` is a data structure that serves as a bridge for translating filter parameters
/// between different layers of the application. It is essentially a wrapper around a `HashMap`
/// where the keys are filter parameter names (as `String`) and the values are optional `Value` types
/// from `sea_orm`.
///
/// This structure is particularly useful in scenarios where you need to pass filter parameters
/// from a web request down to the database query layer in a type-safe and organized manner.
///
/// # Example
///
/// ```
/// use sea_orm::Value;
/// use entity_api::QueryFilterMap;
///
/// let mut query_filter_map = QueryFilterMap::new();
/// query_filter_map.insert("uri".to_string(), Some(Value::String(Some(Box::new("https://parea.example/review/paper/1".to_string())))));
/// let filter_value = query_filter_map.get("uri");
/// ```
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // HashMap.get returns an Option and so we need to "flatten" this to a single Option
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// `IntoQueryFilterMap` is a trait that provides a method for converting a struct into a `QueryFilterMap`.
/// This is particularly useful for translating data between different layers of the application,
/// such as from web request parameters to database query filters.
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();

    let staff_user = users::ActiveModel {
        email: Set("staff@parea.example".to_owned()),
        username: Set("parea-staff".to_owned()),
        password: Set(generate_hash("q7GzyL#kd92x&fUuj3vM11dW")),
        is_staff: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    profiles::ActiveModel {
        user_id: Set(staff_user.id.clone().unwrap()),
        first_name: Set("Parea".to_owned()),
        last_name: Set("Staff".to_owned()),
        sex: Set(sex::Sex::NotSpecified),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let chair_user = users::ActiveModel {
        email: Set("grace@parea.example".to_owned()),
        username: Set("grace".to_owned()),
        password: Set(generate_hash("password")),
        is_staff: Set(false),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    profiles::ActiveModel {
        user_id: Set(chair_user.id.clone().unwrap()),
        first_name: Set("Grace".to_owned()),
        last_name: Set("Kim".to_owned()),
        sex: Set(sex::Sex::Female),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let icse = events::ActiveModel {
        name: Set("ICSE 2024".to_owned()),
        slug: Set("icse-2024".to_owned()),
        acronym: Set("ICSE24".to_owned()),
        status: Set(event_status::EventStatus::Open),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    chairs::ActiveModel {
        event_id: Set(icse.id.clone().unwrap()),
        user_id: Set(chair_user.id.clone().unwrap()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    pc_members::ActiveModel {
        event_id: Set(icse.id.clone().unwrap()),
        user_id: Set(chair_user.id.clone().unwrap()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    papers::ActiveModel {
        event_id: Set(icse.id.clone().unwrap()),
        title: Set("Fast Caches".to_owned()),
        slug: Set("fast-caches".to_owned()),
        abstract_text: Set("A study of cache eviction under adversarial workloads.".to_owned()),
        file_path: Set("papers/fast-caches.html".to_owned()),
        status: Set(paper_status::PaperStatus::UnderReview),
        locked: Set(false),
        submitted_by: Set(chair_user.id.clone().unwrap()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uuid_parse_str_parses_valid_uuid() {
        let uuid_str = "a98c3295-0933-44cb-89db-7db0f7250fb1";
        let uuid = uuid_parse_str(uuid_str).unwrap();
        assert_eq!(uuid.to_string(), uuid_str);
    }

    #[tokio::test]
    async fn uuid_parse_str_returns_error_for_invalid_uuid() {
        let uuid_str = "invalid";
        let result = uuid_parse_str(uuid_str);
        assert!(result.is_err());
    }
}
