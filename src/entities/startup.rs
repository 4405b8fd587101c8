use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "startups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub startup_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub domain_id: i32,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub funding_required: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub founded_date: Option<Date>,
    pub location: Option<String>,
    pub website: Option<String>,
    // Derived from the funding ledger, see ledger::refresh_aggregates.
    pub is_funded: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::domain::Entity",
        from = "Column::DomainId",
        to = "super::domain::Column::DomainId"
    )]
    Domain,
    #[sea_orm(has_many = "super::funding::Entity")]
    Funding,
}

impl Related<super::domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Domain.def()
    }
}

impl Related<super::funding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Funding.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
