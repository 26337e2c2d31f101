//! Creates the `sales` table.
//!
//! `id` is the only storage-generated column. The bounded text columns are
//! `VARCHAR(100)`; `field_of_activity`, `quantity` and `discount` are nullable.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::Date).timestamp().not_null())
                    .col(ColumnDef::new(Sales::FieldOfActivity).string())
                    .col(ColumnDef::new(Sales::DoctorName).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::Country).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::State).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::Application).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::ProductName).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::Sales).double().not_null())
                    .col(ColumnDef::new(Sales::Quantity).integer())
                    .col(ColumnDef::new(Sales::Discount).double())
                    .col(ColumnDef::new(Sales::Profit).double().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Sales {
    Table,
    Id,
    Date,
    FieldOfActivity,
    DoctorName,
    Country,
    State,
    Application,
    ProductName,
    Sales,
    Quantity,
    Discount,
    Profit,
}
