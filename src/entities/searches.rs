use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "searches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Normalized city name, see `parser::city::normalize_city`
    #[sea_orm(unique)]
    pub city: String,

    pub temp: Option<f64>,

    pub description: Option<String>,

    pub icon: Option<String>,

    /// UTC offset in seconds as reported by the provider
    pub timezone: Option<i32>,

    pub searched_at: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
