use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityLogs::Id))
                    .col(uuid(ActivityLogs::UserId))
                    .col(string_len(ActivityLogs::ActionType, 20))
                    .col(text(ActivityLogs::Description))
                    .col(string_len_null(ActivityLogs::IpAddress, 45))
                    .col(text_null(ActivityLogs::UserAgent))
                    .col(timestamp(ActivityLogs::Timestamp).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_logs_user_id")
                            .from(ActivityLogs::Table, ActivityLogs::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    UserId,
    ActionType,
    Description,
    IpAddress,
    UserAgent,
    Timestamp,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
