use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(pk_uuid(Bookings::Id))
                    .col(uuid(Bookings::UserId))
                    .col(integer(Bookings::CourtId))
                    .col(integer_null(Bookings::SessionId))
                    .col(date(Bookings::BookingDate))
                    .col(time(Bookings::StartTime))
                    .col(time(Bookings::EndTime))
                    .col(decimal_len(Bookings::DurationHours, 4, 2))
                    .col(decimal_len(Bookings::TotalPrice, 10, 2))
                    .col(string_len(Bookings::BookingStatus, 10).default("pending"))
                    .col(string_len(Bookings::PaymentStatus, 10).default("unpaid"))
                    .col(text_null(Bookings::Notes))
                    .col(text_null(Bookings::CancellationReason))
                    .col(timestamp(Bookings::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Bookings::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user_id")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_court_id")
                            .from(Bookings::Table, Bookings::CourtId)
                            .to(Courts::Table, Courts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_session_id")
                            .from(Bookings::Table, Bookings::SessionId)
                            .to(CourtSessions::Table, CourtSessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Last line of defense against two concurrent creates for the same
        // slot: the losing insert fails with a unique violation.
        manager
            .create_index(
                Index::create()
                    .name("uq_bookings_court_date_start")
                    .table(Bookings::Table)
                    .col(Bookings::CourtId)
                    .col(Bookings::BookingDate)
                    .col(Bookings::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_uuid(Payments::Id))
                    .col(uuid(Payments::BookingId).unique_key())
                    .col(decimal_len(Payments::Amount, 10, 2))
                    .col(string_len(Payments::PaymentMethod, 20))
                    .col(string_null(Payments::TransactionId))
                    .col(text_null(Payments::Notes))
                    .col(timestamp_null(Payments::PaidAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_booking_id")
                            .from(Payments::Table, Payments::BookingId)
                            .to(Bookings::Table, Bookings::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    UserId,
    CourtId,
    SessionId,
    BookingDate,
    StartTime,
    EndTime,
    DurationHours,
    TotalPrice,
    BookingStatus,
    PaymentStatus,
    Notes,
    CancellationReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    BookingId,
    Amount,
    PaymentMethod,
    TransactionId,
    Notes,
    PaidAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum CourtSessions {
    Table,
    Id,
}
