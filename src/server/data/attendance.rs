use chrono::Utc;
use entity::attendance::AttendanceState;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct AttendanceRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AttendanceRepository<'a, C> {
    /// Creates a new instance of [`AttendanceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        state: AttendanceState,
    ) -> Result<entity::attendance::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let attendance = entity::attendance::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            event_id: Set(event_id),
            state: Set(state),
            created_by: Set(Some(user_id)),
            created_date: Set(now),
            updated_by: Set(Some(user_id)),
            updated_date: Set(now),
        };

        attendance.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        attendance_id: Uuid,
    ) -> Result<Option<entity::attendance::Model>, DbErr> {
        entity::prelude::Attendance::find_by_id(attendance_id)
            .one(self.db)
            .await
    }

    pub async fn exists(&self, user_id: Uuid, event_id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Attendance::find()
            .filter(entity::attendance::Column::UserId.eq(user_id))
            .filter(entity::attendance::Column::EventId.eq(event_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn find_paginated(
        &self,
        page: u64,
        page_size: u64,
        event_id: Option<Uuid>,
    ) -> Result<(Vec<entity::attendance::Model>, u64), DbErr> {
        let mut query = entity::prelude::Attendance::find()
            .order_by_asc(entity::attendance::Column::CreatedDate);

        if let Some(event_id) = event_id {
            query = query.filter(entity::attendance::Column::EventId.eq(event_id));
        }

        let paginator = query.paginate(self.db, page_size);
        let total_items = paginator.num_items().await?;
        let attendances = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((attendances, total_items))
    }

    pub async fn update_state(
        &self,
        attendance: entity::attendance::Model,
        state: AttendanceState,
        acting_user: Option<Uuid>,
    ) -> Result<entity::attendance::Model, DbErr> {
        let mut attendance: entity::attendance::ActiveModel = attendance.into();
        attendance.state = Set(state);
        attendance.updated_by = Set(acting_user);
        attendance.updated_date = Set(Utc::now().naive_utc());

        attendance.update(self.db).await
    }

    pub async fn delete(&self, attendance_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Attendance::delete_by_id(attendance_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_by_event(&self, event_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Attendance::delete_many()
            .filter(entity::attendance::Column::EventId.eq(event_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Attendance::delete_many()
            .filter(entity::attendance::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Attendance::find().count(self.db).await
    }
}
