use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courts::Table)
                    .if_not_exists()
                    .col(pk_auto(Courts::Id))
                    .col(uuid(Courts::VenueId))
                    .col(string_len(Courts::Name, 100))
                    .col(integer_null(Courts::CategoryId))
                    .col(decimal_len(Courts::PricePerHour, 10, 2).default(0.00))
                    .col(boolean(Courts::IsActive).default(true))
                    .col(text_null(Courts::MaintenanceNotes))
                    .col(text_null(Courts::Description))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_courts_venue_id")
                            .from(Courts::Table, Courts::VenueId)
                            .to(Venues::Table, Venues::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_courts_category_id")
                            .from(Courts::Table, Courts::CategoryId)
                            .to(SportsCategories::Table, SportsCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_courts_venue_name")
                    .table(Courts::Table)
                    .col(Courts::VenueId)
                    .col(Courts::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourtSessions::Table)
                    .if_not_exists()
                    .col(pk_auto(CourtSessions::Id))
                    .col(integer(CourtSessions::CourtId))
                    .col(string_len(CourtSessions::SessionName, 100))
                    .col(time(CourtSessions::StartTime))
                    .col(time(CourtSessions::EndTime))
                    .col(boolean(CourtSessions::IsActive).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_court_sessions_court_id")
                            .from(CourtSessions::Table, CourtSessions::CourtId)
                            .to(Courts::Table, Courts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_court_sessions_court_start")
                    .table(CourtSessions::Table)
                    .col(CourtSessions::CourtId)
                    .col(CourtSessions::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourtSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Courts {
    Table,
    Id,
    VenueId,
    Name,
    CategoryId,
    PricePerHour,
    IsActive,
    MaintenanceNotes,
    Description,
}

#[derive(DeriveIden)]
enum CourtSessions {
    Table,
    Id,
    CourtId,
    SessionName,
    StartTime,
    EndTime,
    IsActive,
}

#[derive(DeriveIden)]
enum Venues {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum SportsCategories {
    Table,
    Id,
}
