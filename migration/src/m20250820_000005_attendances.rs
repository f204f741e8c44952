use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250820_000001_users::Users, m20250820_000004_events::Events};

static FK_ATTENDANCES_USER_ID: &str = "fk_attendances_user_id";
static FK_ATTENDANCES_EVENT_ID: &str = "fk_attendances_event_id";
static IDX_ATTENDANCES_USER_EVENT: &str = "idx_attendances_user_event";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(pk_uuid(Attendances::Id))
                    .col(uuid(Attendances::UserId))
                    .col(uuid(Attendances::EventId))
                    .col(string_len(Attendances::State, 10))
                    .col(uuid_null(Attendances::CreatedBy))
                    .col(timestamp(Attendances::CreatedDate))
                    .col(uuid_null(Attendances::UpdatedBy))
                    .col(timestamp(Attendances::UpdatedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ATTENDANCES_USER_ID)
                            .from(Attendances::Table, Attendances::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ATTENDANCES_EVENT_ID)
                            .from(Attendances::Table, Attendances::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the duplicate-attendance check so two concurrent creates
        // cannot both commit.
        manager
            .create_index(
                Index::create()
                    .name(IDX_ATTENDANCES_USER_EVENT)
                    .table(Attendances::Table)
                    .col(Attendances::UserId)
                    .col(Attendances::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendances::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Attendances {
    Table,
    Id,
    UserId,
    EventId,
    State,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
