//! Create emergency contact table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmergencyContact::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmergencyContact::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmergencyContact::Phone).string_len(32).not_null())
                    .col(
                        ColumnDef::new(EmergencyContact::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmergencyContact::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EmergencyContact {
    Table,
    Id,
    Phone,
    UpdatedAt,
}
