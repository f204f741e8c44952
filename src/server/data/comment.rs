use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct CommentRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommentRepository<'a, C> {
    /// Creates a new instance of [`CommentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        parent_id: Option<Uuid>,
        content: String,
    ) -> Result<entity::comment::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let comment = entity::comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            event_id: Set(event_id),
            parent_id: Set(parent_id),
            content: Set(content),
            publication_date: Set(now),
            created_by: Set(Some(user_id)),
            created_date: Set(now),
            updated_by: Set(Some(user_id)),
            updated_date: Set(now),
        };

        comment.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        comment_id: Uuid,
    ) -> Result<Option<entity::comment::Model>, DbErr> {
        entity::prelude::Comment::find_by_id(comment_id)
            .one(self.db)
            .await
    }

    pub async fn find_paginated(
        &self,
        page: u64,
        page_size: u64,
        event_id: Option<Uuid>,
    ) -> Result<(Vec<entity::comment::Model>, u64), DbErr> {
        let mut query = entity::prelude::Comment::find()
            .order_by_desc(entity::comment::Column::PublicationDate);

        if let Some(event_id) = event_id {
            query = query.filter(entity::comment::Column::EventId.eq(event_id));
        }

        let paginator = query.paginate(self.db, page_size);
        let total_items = paginator.num_items().await?;
        let comments = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((comments, total_items))
    }

    /// Ids of the direct replies to `comment_id`.
    pub async fn find_child_ids(&self, comment_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let children = entity::prelude::Comment::find()
            .filter(entity::comment::Column::ParentId.eq(comment_id))
            .all(self.db)
            .await?;

        Ok(children.into_iter().map(|comment| comment.id).collect())
    }

    /// Ids of the top-level comments on an event.
    pub async fn find_root_ids_by_event(&self, event_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let roots = entity::prelude::Comment::find()
            .filter(entity::comment::Column::EventId.eq(event_id))
            .filter(entity::comment::Column::ParentId.is_null())
            .all(self.db)
            .await?;

        Ok(roots.into_iter().map(|comment| comment.id).collect())
    }

    /// Ids of every comment authored by `user_id`.
    pub async fn find_ids_by_user(&self, user_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let comments = entity::prelude::Comment::find()
            .filter(entity::comment::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(comments.into_iter().map(|comment| comment.id).collect())
    }

    pub async fn update_content(
        &self,
        comment: entity::comment::Model,
        content: String,
        acting_user: Option<Uuid>,
    ) -> Result<entity::comment::Model, DbErr> {
        let mut comment: entity::comment::ActiveModel = comment.into();
        comment.content = Set(content);
        comment.updated_by = Set(acting_user);
        comment.updated_date = Set(Utc::now().naive_utc());

        comment.update(self.db).await
    }

    /// Deletes a single comment row. Replies must already be gone; the
    /// self-referencing foreign key rejects anything else.
    pub async fn delete(&self, comment_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Comment::delete_by_id(comment_id)
            .exec(self.db)
            .await
    }
}
