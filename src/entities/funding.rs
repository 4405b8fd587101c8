use sea_orm::entity::prelude::*;

/// Append-only funding ledger. Nothing in the application updates or deletes rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "funding")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub funding_id: i32,
    pub investor_id: i32,
    pub startup_id: i32,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub funding_date: Date,
    pub funding_round: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::investor::Entity",
        from = "Column::InvestorId",
        to = "super::investor::Column::InvestorId"
    )]
    Investor,
    #[sea_orm(
        belongs_to = "super::startup::Entity",
        from = "Column::StartupId",
        to = "super::startup::Column::StartupId"
    )]
    Startup,
}

impl Related<super::investor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investor.def()
    }
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Startup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
