use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250820_000001_users::Users;

static FK_MEMBERSHIPS_USER_ID: &str = "fk_memberships_user_id";
static IDX_MEMBERSHIPS_USER_ID: &str = "idx_memberships_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Memberships::Table)
                    .if_not_exists()
                    .col(pk_uuid(Memberships::Id))
                    .col(uuid(Memberships::UserId))
                    .col(string_len(Memberships::MembershipType, 10))
                    .col(decimal_len(Memberships::Price, 18, 2))
                    .col(timestamp(Memberships::StartDate))
                    .col(timestamp(Memberships::EndDate))
                    .col(uuid_null(Memberships::CreatedBy))
                    .col(timestamp(Memberships::CreatedDate))
                    .col(uuid_null(Memberships::UpdatedBy))
                    .col(timestamp(Memberships::UpdatedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MEMBERSHIPS_USER_ID)
                            .from(Memberships::Table, Memberships::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One membership row per user at a time.
        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBERSHIPS_USER_ID)
                    .table(Memberships::Table)
                    .col(Memberships::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Memberships::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Memberships {
    Table,
    Id,
    UserId,
    MembershipType,
    Price,
    StartDate,
    EndDate,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
