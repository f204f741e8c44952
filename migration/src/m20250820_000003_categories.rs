use sea_orm_migration::{prelude::*, schema::*};

static IDX_CATEGORIES_NAME: &str = "idx_categories_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_uuid(Categories::Id))
                    .col(string_len(Categories::Name, 50))
                    .col(string_len(Categories::Description, 200))
                    .col(uuid_null(Categories::CreatedBy))
                    .col(timestamp(Categories::CreatedDate))
                    .col(uuid_null(Categories::UpdatedBy))
                    .col(timestamp(Categories::UpdatedDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CATEGORIES_NAME)
                    .table(Categories::Table)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Description,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}
