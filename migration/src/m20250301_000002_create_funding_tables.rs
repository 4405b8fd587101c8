use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_account_tables::{Investors, Startups};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Funding::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Funding::FundingId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Funding::InvestorId).integer().not_null())
                    .col(ColumnDef::new(Funding::StartupId).integer().not_null())
                    .col(ColumnDef::new(Funding::Amount).decimal_len(15, 2).not_null())
                    .col(ColumnDef::new(Funding::FundingDate).date().not_null())
                    .col(ColumnDef::new(Funding::FundingRound).string_len(50).null())
                    .col(ColumnDef::new(Funding::Notes).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funding_investor")
                            .from(Funding::Table, Funding::InvestorId)
                            .to(Investors::Table, Investors::InvestorId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funding_startup")
                            .from(Funding::Table, Funding::StartupId)
                            .to(Startups::Table, Startups::StartupId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::MatchId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Matches::InvestorId).integer().not_null())
                    .col(ColumnDef::new(Matches::StartupId).integer().not_null())
                    .col(ColumnDef::new(Matches::MatchScore).integer().not_null())
                    .col(ColumnDef::new(Matches::MatchReason).string_len(255).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_investor")
                            .from(Matches::Table, Matches::InvestorId)
                            .to(Investors::Table, Investors::InvestorId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_startup")
                            .from(Matches::Table, Matches::StartupId)
                            .to(Startups::Table, Startups::StartupId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Funding::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Funding {
    Table,
    FundingId,
    InvestorId,
    StartupId,
    Amount,
    FundingDate,
    FundingRound,
    Notes,
}

#[derive(DeriveIden)]
enum Matches {
    Table,
    MatchId,
    InvestorId,
    StartupId,
    MatchScore,
    MatchReason,
}
