use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250820_000001_users::Users, m20250820_000003_categories::Categories};

static FK_EVENTS_CATEGORY_ID: &str = "fk_events_category_id";
static FK_EVENTS_ORGANIZER_ID: &str = "fk_events_organizer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_uuid(Events::Id))
                    .col(uuid(Events::CategoryId))
                    .col(uuid(Events::OrganizerId))
                    .col(string_len(Events::Title, 50))
                    .col(string_len(Events::Description, 300))
                    .col(string_len(Events::Location, 100))
                    .col(timestamp(Events::Date))
                    .col(timestamp(Events::PublicationDate))
                    .col(uuid_null(Events::CreatedBy))
                    .col(timestamp(Events::CreatedDate))
                    .col(uuid_null(Events::UpdatedBy))
                    .col(timestamp(Events::UpdatedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_EVENTS_CATEGORY_ID)
                            .from(Events::Table, Events::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_EVENTS_ORGANIZER_ID)
                            .from(Events::Table, Events::OrganizerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Events {
    Table,
    Id,
    CategoryId,
    OrganizerId,
    Title,
    Description,
    Location,
    Date,
    PublicationDate,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
