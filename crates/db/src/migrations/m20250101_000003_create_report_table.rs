//! Create report table migration.
//!
//! The registration number is the primary key; its uniqueness constraint is
//! the hard guarantee behind number allocation.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::RegistrationNumber)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Report::UserId).integer().not_null())
                    .col(ColumnDef::new(Report::CategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(Report::ReportedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Report::IncidentAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Report::IncidentLocation)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Report::Narrative).text().not_null())
                    .col(
                        ColumnDef::new(Report::Status)
                            .string_len(32)
                            .not_null()
                            .default("submitted"),
                    )
                    .col(ColumnDef::new(Report::CancelReason).string_len(1024))
                    .col(ColumnDef::new(Report::ViewedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Report::ViewedBy).integer())
                    .col(ColumnDef::new(Report::ProcessingAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Report::CancelledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Report::EvidenceUrls)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Report::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: user_id (owner listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_user_id")
                    .table(Report::Table)
                    .col(Report::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: category_id
        manager
            .create_index(
                Index::create()
                    .name("idx_report_category_id")
                    .table(Report::Table)
                    .col(Report::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Index: status + created_at (admin dashboards)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_status_created_at")
                    .table(Report::Table)
                    .col(Report::Status)
                    .col(Report::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (latest-first listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_created_at")
                    .table(Report::Table)
                    .col(Report::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    Table,
    RegistrationNumber,
    UserId,
    CategoryId,
    ReportedAt,
    IncidentAt,
    IncidentLocation,
    Narrative,
    Status,
    CancelReason,
    ViewedAt,
    ViewedBy,
    ProcessingAt,
    CancelledAt,
    EvidenceUrls,
    CreatedAt,
    UpdatedAt,
}
