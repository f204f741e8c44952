use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct ReportRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReportRepository<'a, C> {
    /// Creates a new instance of [`ReportRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        reporter_id: Uuid,
        organizer_id: Uuid,
        reason: String,
    ) -> Result<entity::report::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let report = entity::report::ActiveModel {
            id: Set(Uuid::new_v4()),
            reporter_id: Set(reporter_id),
            organizer_id: Set(organizer_id),
            reason: Set(reason),
            report_date: Set(now),
            created_by: Set(Some(reporter_id)),
            created_date: Set(now),
            updated_by: Set(Some(reporter_id)),
            updated_date: Set(now),
        };

        report.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        report_id: Uuid,
    ) -> Result<Option<entity::report::Model>, DbErr> {
        entity::prelude::Report::find_by_id(report_id)
            .one(self.db)
            .await
    }

    pub async fn exists(&self, reporter_id: Uuid, organizer_id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Report::find()
            .filter(entity::report::Column::ReporterId.eq(reporter_id))
            .filter(entity::report::Column::OrganizerId.eq(organizer_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn find_paginated(
        &self,
        page: u64,
        page_size: u64,
        organizer_id: Option<Uuid>,
    ) -> Result<(Vec<entity::report::Model>, u64), DbErr> {
        let mut query =
            entity::prelude::Report::find().order_by_desc(entity::report::Column::ReportDate);

        if let Some(organizer_id) = organizer_id {
            query = query.filter(entity::report::Column::OrganizerId.eq(organizer_id));
        }

        let paginator = query.paginate(self.db, page_size);
        let total_items = paginator.num_items().await?;
        let reports = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((reports, total_items))
    }

    pub async fn update_reason(
        &self,
        report: entity::report::Model,
        reason: String,
        acting_user: Option<Uuid>,
    ) -> Result<entity::report::Model, DbErr> {
        let mut report: entity::report::ActiveModel = report.into();
        report.reason = Set(reason);
        report.updated_by = Set(acting_user);
        report.updated_date = Set(Utc::now().naive_utc());

        report.update(self.db).await
    }

    pub async fn delete(&self, report_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Report::delete_by_id(report_id)
            .exec(self.db)
            .await
    }

    /// Removes reports the user filed and reports filed about them.
    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Report::delete_many()
            .filter(
                Condition::any()
                    .add(entity::report::Column::ReporterId.eq(user_id))
                    .add(entity::report::Column::OrganizerId.eq(user_id)),
            )
            .exec(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Report::find().count(self.db).await
    }
}
