//! Create violence category table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ViolenceCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ViolenceCategory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ViolenceCategory::Name).string_len(256).not_null())
                    .col(ColumnDef::new(ViolenceCategory::ImageUrl).string_len(1024))
                    .col(
                        ColumnDef::new(ViolenceCategory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ViolenceCategory::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: name
        manager
            .create_index(
                Index::create()
                    .name("idx_violence_category_name")
                    .table(ViolenceCategory::Table)
                    .col(ViolenceCategory::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ViolenceCategory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ViolenceCategory {
    Table,
    Id,
    Name,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
