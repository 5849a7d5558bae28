//! Create victim table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Victim::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Victim::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Victim::RegistrationNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Victim::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Victim::Nik).string_len(32))
                    .col(ColumnDef::new(Victim::Age).integer().not_null())
                    .col(ColumnDef::new(Victim::Gender).string_len(32).not_null())
                    .col(ColumnDef::new(Victim::Occupation).string_len(128))
                    .col(ColumnDef::new(Victim::Relationship).string_len(128))
                    .col(ColumnDef::new(Victim::Address).string_len(1024))
                    .to_owned(),
            )
            .await?;

        // Index: registration_number
        manager
            .create_index(
                Index::create()
                    .name("idx_victim_registration_number")
                    .table(Victim::Table)
                    .col(Victim::RegistrationNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Victim::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Victim {
    Table,
    Id,
    RegistrationNumber,
    Name,
    Nik,
    Age,
    Gender,
    Occupation,
    Relationship,
    Address,
}
