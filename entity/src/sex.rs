use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sex")]
pub enum Sex {
    #[sea_orm(string_value = "not_specified")]
    #[default]
    NotSpecified,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "male")]
    Male,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::NotSpecified => write!(fmt, "not_specified"),
            Sex::Female => write!(fmt, "female"),
            Sex::Male => write!(fmt, "male"),
        }
    }
}
