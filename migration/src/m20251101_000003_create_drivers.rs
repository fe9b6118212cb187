use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drivers::Table)
                    .if_not_exists()
                    .col(uuid(Drivers::Id).primary_key())
                    .col(string(Drivers::Name))
                    .col(string_null(Drivers::Phone))
                    .col(boolean(Drivers::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Drivers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drivers_active_name")
                    .table(Drivers::Table)
                    .col(Drivers::IsActive)
                    .col(Drivers::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drivers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Drivers {
    Table,
    Id,
    Name,
    Phone,
    IsActive,
    CreatedAt,
}
