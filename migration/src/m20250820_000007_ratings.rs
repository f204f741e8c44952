use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250820_000001_users::Users, m20250820_000004_events::Events};

static FK_RATINGS_RATER_ID: &str = "fk_ratings_rater_id";
static FK_RATINGS_ORGANIZER_ID: &str = "fk_ratings_organizer_id";
static FK_RATINGS_EVENT_ID: &str = "fk_ratings_event_id";
static IDX_RATINGS_RATER_ORGANIZER_EVENT: &str = "idx_ratings_rater_organizer_event";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(pk_uuid(Ratings::Id))
                    .col(uuid(Ratings::RaterId))
                    .col(uuid(Ratings::OrganizerId))
                    .col(uuid(Ratings::EventId))
                    .col(decimal_len(Ratings::Score, 2, 1))
                    .col(timestamp(Ratings::RatingDate))
                    .col(uuid_null(Ratings::CreatedBy))
                    .col(timestamp(Ratings::CreatedDate))
                    .col(uuid_null(Ratings::UpdatedBy))
                    .col(timestamp(Ratings::UpdatedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RATINGS_RATER_ID)
                            .from(Ratings::Table, Ratings::RaterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RATINGS_ORGANIZER_ID)
                            .from(Ratings::Table, Ratings::OrganizerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RATINGS_EVENT_ID)
                            .from(Ratings::Table, Ratings::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RATINGS_RATER_ORGANIZER_EVENT)
                    .table(Ratings::Table)
                    .col(Ratings::RaterId)
                    .col(Ratings::OrganizerId)
                    .col(Ratings::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Ratings {
    Table,
    Id,
    RaterId,
    OrganizerId,
    EventId,
    Score,
    RatingDate,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
