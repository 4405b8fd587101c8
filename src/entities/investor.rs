use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "investors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub investor_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub investment_min: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub investment_max: Decimal,
    pub preferred_domains: String, // "1,2,5"
    pub phone: Option<String>,
    pub location: Option<String>,
    pub portfolio_size: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::funding::Entity")]
    Funding,
}

impl Related<super::funding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Funding.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
