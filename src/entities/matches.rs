use sea_orm::entity::prelude::*;

// Written once by the seeder; the dashboards compute their own matches.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub match_id: i32,
    pub investor_id: i32,
    pub startup_id: i32,
    pub match_score: i32,
    pub match_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
