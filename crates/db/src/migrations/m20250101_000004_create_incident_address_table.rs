//! Create incident address table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IncidentAddress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IncidentAddress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IncidentAddress::RegistrationNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(IncidentAddress::Province).string_len(128).not_null())
                    .col(ColumnDef::new(IncidentAddress::City).string_len(128).not_null())
                    .col(ColumnDef::new(IncidentAddress::District).string_len(128).not_null())
                    .col(ColumnDef::new(IncidentAddress::Village).string_len(128).not_null())
                    .col(ColumnDef::new(IncidentAddress::PostalCode).string_len(16))
                    .col(ColumnDef::new(IncidentAddress::Detail).string_len(1024))
                    .to_owned(),
            )
            .await?;

        // Unique index: one address per report
        manager
            .create_index(
                Index::create()
                    .name("idx_incident_address_registration_number")
                    .table(IncidentAddress::Table)
                    .col(IncidentAddress::RegistrationNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncidentAddress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IncidentAddress {
    Table,
    Id,
    RegistrationNumber,
    Province,
    City,
    District,
    Village,
    PostalCode,
    Detail,
}
