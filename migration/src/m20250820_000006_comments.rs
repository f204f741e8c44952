use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250820_000001_users::Users, m20250820_000004_events::Events};

static FK_COMMENTS_USER_ID: &str = "fk_comments_user_id";
static FK_COMMENTS_EVENT_ID: &str = "fk_comments_event_id";
static FK_COMMENTS_PARENT_ID: &str = "fk_comments_parent_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(pk_uuid(Comments::Id))
                    .col(uuid(Comments::UserId))
                    .col(uuid(Comments::EventId))
                    .col(uuid_null(Comments::ParentId))
                    .col(string_len(Comments::Content, 200))
                    .col(timestamp(Comments::PublicationDate))
                    .col(uuid_null(Comments::CreatedBy))
                    .col(timestamp(Comments::CreatedDate))
                    .col(uuid_null(Comments::UpdatedBy))
                    .col(timestamp(Comments::UpdatedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMENTS_USER_ID)
                            .from(Comments::Table, Comments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMENTS_EVENT_ID)
                            .from(Comments::Table, Comments::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Restrict on the self reference forces the reply tree to
                    // be pruned children-first by the application.
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMENTS_PARENT_ID)
                            .from(Comments::Table, Comments::ParentId)
                            .to(Comments::Table, Comments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Comments {
    Table,
    Id,
    UserId,
    EventId,
    ParentId,
    Content,
    PublicationDate,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
