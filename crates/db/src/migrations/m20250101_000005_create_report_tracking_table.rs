//! Create report tracking table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReportTracking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportTracking::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReportTracking::RegistrationNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReportTracking::Note).text().not_null())
                    .col(
                        ColumnDef::new(ReportTracking::DocumentUrls)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(ReportTracking::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: registration_number + created_at (case history in order)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_tracking_registration_number_created_at")
                    .table(ReportTracking::Table)
                    .col(ReportTracking::RegistrationNumber)
                    .col(ReportTracking::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReportTracking::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReportTracking {
    Table,
    Id,
    RegistrationNumber,
    Note,
    DocumentUrls,
    CreatedAt,
}
