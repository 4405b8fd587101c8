use sea_orm::entity::prelude::*;

/// Startup sector reference data (FinTech, HealthTech, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "domains")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub domain_id: i32,
    #[sea_orm(unique)]
    pub domain_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::startup::Entity")]
    Startup,
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Startup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
