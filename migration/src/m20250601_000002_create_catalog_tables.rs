use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SportsCategories::Table)
                    .if_not_exists()
                    .col(pk_auto(SportsCategories::Id))
                    .col(string_len(SportsCategories::Name, 20).unique_key())
                    .col(text_null(SportsCategories::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Facilities::Table)
                    .if_not_exists()
                    .col(pk_auto(Facilities::Id))
                    .col(string_len(Facilities::Name, 100).unique_key())
                    .col(text_null(Facilities::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Venues::Table)
                    .if_not_exists()
                    .col(pk_uuid(Venues::Id))
                    .col(string(Venues::Name))
                    .col(uuid(Venues::OwnerId))
                    .col(text(Venues::Address))
                    .col(string_len_null(Venues::LocationUrl, 500))
                    .col(string_len_null(Venues::Contact, 20))
                    .col(text_null(Venues::Description))
                    .col(integer(Venues::NumberOfCourts).default(0))
                    .col(string_len(Venues::VerificationStatus, 10).default("pending"))
                    .col(text_null(Venues::RejectionReason))
                    .col(timestamp(Venues::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Venues::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venues_owner_id")
                            .from(Venues::Table, Venues::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VenueFacilities::Table)
                    .if_not_exists()
                    .col(pk_auto(VenueFacilities::Id))
                    .col(uuid(VenueFacilities::VenueId))
                    .col(integer(VenueFacilities::FacilityId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venue_facilities_venue_id")
                            .from(VenueFacilities::Table, VenueFacilities::VenueId)
                            .to(Venues::Table, Venues::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venue_facilities_facility_id")
                            .from(VenueFacilities::Table, VenueFacilities::FacilityId)
                            .to(Facilities::Table, Facilities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_venue_facilities_venue_facility")
                    .table(VenueFacilities::Table)
                    .col(VenueFacilities::VenueId)
                    .col(VenueFacilities::FacilityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OperationalHours::Table)
                    .if_not_exists()
                    .col(pk_auto(OperationalHours::Id))
                    .col(uuid(OperationalHours::VenueId))
                    .col(integer(OperationalHours::DayOfWeek))
                    .col(time(OperationalHours::OpenTime))
                    .col(time(OperationalHours::CloseTime))
                    .col(boolean(OperationalHours::IsClosed).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operational_hours_venue_id")
                            .from(OperationalHours::Table, OperationalHours::VenueId)
                            .to(Venues::Table, Venues::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_operational_hours_venue_day")
                    .table(OperationalHours::Table)
                    .col(OperationalHours::VenueId)
                    .col(OperationalHours::DayOfWeek)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OperationalHours::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VenueFacilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Venues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Facilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SportsCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SportsCategories {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Facilities {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Venues {
    Table,
    Id,
    Name,
    OwnerId,
    Address,
    LocationUrl,
    Contact,
    Description,
    NumberOfCourts,
    VerificationStatus,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VenueFacilities {
    Table,
    Id,
    VenueId,
    FacilityId,
}

#[derive(DeriveIden)]
enum OperationalHours {
    Table,
    Id,
    VenueId,
    DayOfWeek,
    OpenTime,
    CloseTime,
    IsClosed,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
