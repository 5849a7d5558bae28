//! Create perpetrator table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Perpetrator::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Perpetrator::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Perpetrator::RegistrationNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Perpetrator::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Perpetrator::Age).integer().not_null())
                    .col(ColumnDef::new(Perpetrator::Gender).string_len(32).not_null())
                    .col(ColumnDef::new(Perpetrator::Occupation).string_len(128))
                    .col(ColumnDef::new(Perpetrator::Relationship).string_len(128))
                    .col(ColumnDef::new(Perpetrator::Address).string_len(1024))
                    .to_owned(),
            )
            .await?;

        // Index: registration_number
        manager
            .create_index(
                Index::create()
                    .name("idx_perpetrator_registration_number")
                    .table(Perpetrator::Table)
                    .col(Perpetrator::RegistrationNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Perpetrator::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Perpetrator {
    Table,
    Id,
    RegistrationNumber,
    Name,
    Age,
    Gender,
    Occupation,
    Relationship,
    Address,
}
