//! Create appointment table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointment::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Appointment::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointment::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appointment::Purpose).text().not_null())
                    .col(
                        ColumnDef::new(Appointment::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending_approval"),
                    )
                    .col(ColumnDef::new(Appointment::ResolverId).integer())
                    .col(ColumnDef::new(Appointment::RejectionReason).string_len(1024))
                    .col(ColumnDef::new(Appointment::CancelReason).string_len(1024))
                    .col(
                        ColumnDef::new(Appointment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Appointment::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: user_id + created_at (owner listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_user_id_created_at")
                    .table(Appointment::Table)
                    .col(Appointment::UserId)
                    .col(Appointment::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: status (admin pending queue)
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_status")
                    .table(Appointment::Table)
                    .col(Appointment::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Appointment {
    Table,
    Id,
    UserId,
    StartTime,
    EndTime,
    Purpose,
    Status,
    ResolverId,
    RejectionReason,
    CancelReason,
    CreatedAt,
    UpdatedAt,
}
