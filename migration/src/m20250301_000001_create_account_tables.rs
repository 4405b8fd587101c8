use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Domains::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Domains::DomainId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Domains::DomainName).string_len(100).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Startups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Startups::StartupId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Startups::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Startups::Email).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(Startups::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Startups::DomainId).integer().not_null())
                    .col(ColumnDef::new(Startups::FundingRequired).decimal_len(15, 2).not_null())
                    .col(ColumnDef::new(Startups::Description).text().null())
                    .col(ColumnDef::new(Startups::FoundedDate).date().null())
                    .col(ColumnDef::new(Startups::Location).string_len(100).null())
                    .col(ColumnDef::new(Startups::Website).string_len(255).null())
                    .col(ColumnDef::new(Startups::IsFunded).boolean().not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_startups_domain")
                            .from(Startups::Table, Startups::DomainId)
                            .to(Domains::Table, Domains::DomainId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Investors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Investors::InvestorId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Investors::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Investors::Email).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(Investors::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Investors::InvestmentMin).decimal_len(15, 2).not_null())
                    .col(ColumnDef::new(Investors::InvestmentMax).decimal_len(15, 2).not_null())
                    // comma-separated domain ids, e.g. "1,2,5"
                    .col(ColumnDef::new(Investors::PreferredDomains).string_len(255).not_null())
                    .col(ColumnDef::new(Investors::Phone).string_len(30).null())
                    .col(ColumnDef::new(Investors::Location).string_len(100).null())
                    .col(ColumnDef::new(Investors::PortfolioSize).integer().not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Investors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Startups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Domains::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Domains {
    Table,
    DomainId,
    DomainName,
}

#[derive(DeriveIden)]
pub(crate) enum Startups {
    Table,
    StartupId,
    Name,
    Email,
    PasswordHash,
    DomainId,
    FundingRequired,
    Description,
    FoundedDate,
    Location,
    Website,
    IsFunded,
}

#[derive(DeriveIden)]
pub(crate) enum Investors {
    Table,
    InvestorId,
    Name,
    Email,
    PasswordHash,
    InvestmentMin,
    InvestmentMax,
    PreferredDomains,
    Phone,
    Location,
    PortfolioSize,
}
