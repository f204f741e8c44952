use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250820_000001_users::Users;

static FK_REPORTS_REPORTER_ID: &str = "fk_reports_reporter_id";
static FK_REPORTS_ORGANIZER_ID: &str = "fk_reports_organizer_id";
static IDX_REPORTS_REPORTER_ORGANIZER: &str = "idx_reports_reporter_organizer";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(pk_uuid(Reports::Id))
                    .col(uuid(Reports::ReporterId))
                    .col(uuid(Reports::OrganizerId))
                    .col(string_len(Reports::Reason, 200))
                    .col(timestamp(Reports::ReportDate))
                    .col(uuid_null(Reports::CreatedBy))
                    .col(timestamp(Reports::CreatedDate))
                    .col(uuid_null(Reports::UpdatedBy))
                    .col(timestamp(Reports::UpdatedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_REPORTS_REPORTER_ID)
                            .from(Reports::Table, Reports::ReporterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_REPORTS_ORGANIZER_ID)
                            .from(Reports::Table, Reports::OrganizerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REPORTS_REPORTER_ORGANIZER)
                    .table(Reports::Table)
                    .col(Reports::ReporterId)
                    .col(Reports::OrganizerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Reports {
    Table,
    Id,
    ReporterId,
    OrganizerId,
    Reason,
    ReportDate,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
