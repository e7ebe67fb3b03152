use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_uuid(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::Email))
                    .col(string(Users::PasswordHash))
                    .col(string_len(Users::Role, 10).default("user"))
                    .col(string_len_null(Users::PhoneNumber, 20))
                    .col(text_null(Users::Address))
                    .col(boolean(Users::IsVerified).default(false))
                    .col(boolean(Users::IsActive).default(true))
                    .col(timestamp(Users::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Users::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    PhoneNumber,
    Address,
    IsVerified,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
