use sea_orm_migration::{prelude::*, schema::*};

static IDX_USERS_EMAIL: &str = "idx_users_email";

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
                    .col(string_len(Users::FirstName, 50))
                    .col(string_len(Users::LastName, 50))
                    .col(string_len(Users::Email, 200))
                    .col(string_len(Users::PasswordHash, 200))
                    .col(string_len(Users::Location, 100))
                    .col(boolean(Users::IsBlocked).default(false))
                    .col(uuid_null(Users::CreatedBy))
                    .col(timestamp(Users::CreatedDate))
                    .col(uuid_null(Users::UpdatedBy))
                    .col(timestamp(Users::UpdatedDate))
                    .to_owned(),
            )
            .await?;

        // Uniqueness is store-enforced so a concurrent duplicate register
        // fails on commit rather than slipping past the service check.
        manager
            .create_index(
                Index::create()
                    .name(IDX_USERS_EMAIL)
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Location,
    IsBlocked,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
