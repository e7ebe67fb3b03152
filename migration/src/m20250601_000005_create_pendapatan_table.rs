use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pendapatan::Table)
                    .if_not_exists()
                    .col(pk_uuid(Pendapatan::Id))
                    .col(uuid(Pendapatan::MitraId))
                    .col(uuid(Pendapatan::BookingId))
                    .col(decimal_len(Pendapatan::Amount, 10, 2))
                    .col(decimal_len(Pendapatan::CommissionRate, 5, 2).default(10.00))
                    .col(decimal_len(Pendapatan::CommissionAmount, 10, 2).default(0.00))
                    .col(decimal_len(Pendapatan::NetAmount, 10, 2).default(0.00))
                    .col(string_len(Pendapatan::PaymentStatus, 20).default("pending"))
                    .col(timestamp_null(Pendapatan::PaidAt))
                    .col(text_null(Pendapatan::Notes))
                    .col(timestamp(Pendapatan::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Pendapatan::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pendapatan_mitra_id")
                            .from(Pendapatan::Table, Pendapatan::MitraId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pendapatan_booking_id")
                            .from(Pendapatan::Table, Pendapatan::BookingId)
                            .to(Bookings::Table, Bookings::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pendapatan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pendapatan {
    Table,
    Id,
    MitraId,
    BookingId,
    Amount,
    CommissionRate,
    CommissionAmount,
    NetAmount,
    PaymentStatus,
    PaidAt,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
}
