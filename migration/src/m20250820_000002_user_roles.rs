use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250820_000001_users::Users;

static FK_USER_ROLES_USER_ID: &str = "fk_user_roles_user_id";
static IDX_USER_ROLES_USER_ROLE: &str = "idx_user_roles_user_role";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(pk_uuid(UserRoles::Id))
                    .col(uuid(UserRoles::UserId))
                    .col(string_len(UserRoles::Role, 20))
                    .col(uuid_null(UserRoles::CreatedBy))
                    .col(timestamp(UserRoles::CreatedDate))
                    .col(uuid_null(UserRoles::UpdatedBy))
                    .col(timestamp(UserRoles::UpdatedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_ROLES_USER_ID)
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_ROLES_USER_ROLE)
                    .table(UserRoles::Table)
                    .col(UserRoles::UserId)
                    .col(UserRoles::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserRoles {
    Table,
    Id,
    UserId,
    Role,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
