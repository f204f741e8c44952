use std::collections::HashSet;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::comment::{CreateCommentDto, UpdateCommentDto},
    server::{
        data::{comment::CommentRepository, event::EventRepository},
        error::Error,
        model::auth::AuthUser,
    },
};

/// Collects the ids of every comment in the subtrees rooted at `roots`, in an
/// order safe for deletion (children always before their parent).
///
/// Walks the parent→children adjacency with an explicit work stack instead of
/// recursion, so an arbitrarily deep reply chain cannot overflow the stack. A
/// comment reachable from two roots is collected once. A parent chain that
/// loops back on itself means the stored data is corrupt; that fails with
/// [`Error::IntegrityError`] rather than walking forever.
pub(crate) async fn collect_subtree_ids<C: ConnectionTrait>(
    db: &C,
    roots: Vec<Uuid>,
) -> Result<Vec<Uuid>, Error> {
    let comment_repository = CommentRepository::new(db);

    let mut ordered = Vec::new();
    let mut visited = HashSet::new();
    // Ids on the current root-to-node expansion path.
    let mut open = HashSet::new();
    let mut stack: Vec<(Uuid, bool)> = roots.into_iter().map(|id| (id, false)).collect();

    while let Some((comment_id, expanded)) = stack.pop() {
        if expanded {
            open.remove(&comment_id);
            ordered.push(comment_id);
            continue;
        }

        if !visited.insert(comment_id) {
            continue;
        }

        open.insert(comment_id);
        stack.push((comment_id, true));

        for child_id in comment_repository.find_child_ids(comment_id).await? {
            if open.contains(&child_id) {
                return Err(Error::IntegrityError(format!(
                    "comment {child_id} is its own ancestor"
                )));
            }

            stack.push((child_id, false));
        }
    }

    Ok(ordered)
}

/// Deletes the subtrees rooted at `roots` on the caller's connection,
/// children first. Returns the number of comments removed.
pub(crate) async fn prune_comment_trees<C: ConnectionTrait>(
    db: &C,
    roots: Vec<Uuid>,
) -> Result<u64, Error> {
    let comment_repository = CommentRepository::new(db);

    let ordered = collect_subtree_ids(db, roots).await?;
    let mut deleted = 0;

    for comment_id in &ordered {
        deleted += comment_repository.delete(*comment_id).await?.rows_affected;
    }

    Ok(deleted)
}

pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentService<'a> {
    /// Creates a new instance of [`CommentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        dto: CreateCommentDto,
        author: &AuthUser,
    ) -> Result<entity::comment::Model, Error> {
        let comment_repository = CommentRepository::new(self.db);
        let event_repository = EventRepository::new(self.db);

        event_repository
            .find_by_id(dto.event_id)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

        if let Some(parent_id) = dto.parent_id {
            let parent = comment_repository
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| Error::NotFound("Parent comment not found".to_string()))?;

            if parent.event_id != dto.event_id {
                return Err(Error::BadRequest(
                    "Parent comment belongs to a different event".to_string(),
                ));
            }
        }

        let comment = comment_repository
            .create(author.id, dto.event_id, dto.parent_id, dto.content)
            .await?;

        Ok(comment)
    }

    pub async fn get_comment(&self, comment_id: Uuid) -> Result<entity::comment::Model, Error> {
        CommentRepository::new(self.db)
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| Error::NotFound("Comment not found".to_string()))
    }

    pub async fn get_comments(
        &self,
        page: u64,
        page_size: u64,
        event_id: Option<Uuid>,
    ) -> Result<(Vec<entity::comment::Model>, u64), Error> {
        let (comments, total_items) = CommentRepository::new(self.db)
            .find_paginated(page, page_size, event_id)
            .await?;

        Ok((comments, total_items))
    }

    pub async fn update(
        &self,
        comment_id: Uuid,
        dto: UpdateCommentDto,
        acting_user: &AuthUser,
    ) -> Result<entity::comment::Model, Error> {
        let comment_repository = CommentRepository::new(self.db);

        let comment = comment_repository
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| Error::NotFound("Comment not found".to_string()))?;

        if !acting_user.can_act_for(comment.user_id) {
            return Err(Error::Forbidden(
                "Only the author may edit a comment".to_string(),
            ));
        }

        let comment = comment_repository
            .update_content(comment, dto.content, Some(acting_user.id))
            .await?;

        Ok(comment)
    }

    /// Deletes the comment and its entire reply tree in one transaction.
    pub async fn delete(&self, comment_id: Uuid, acting_user: &AuthUser) -> Result<u64, Error> {
        let comment = CommentRepository::new(self.db)
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| Error::NotFound("Comment not found".to_string()))?;

        if !acting_user.can_act_for(comment.user_id) {
            return Err(Error::Forbidden(
                "Only the author may delete a comment".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        match prune_comment_trees(&txn, vec![comment_id]).await {
            Ok(deleted) => {
                txn.commit().await?;

                Ok(deleted)
            }
            Err(err) => {
                txn.rollback().await?;

                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use meetpoint_test_utils::prelude::*;
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
    use uuid::Uuid;

    use crate::server::{
        error::Error,
        model::auth::AuthUser,
        service::comment::{collect_subtree_ids, CommentService},
    };

    fn auth_user(user: &entity::user::Model) -> AuthUser {
        AuthUser {
            id: user.id,
            email: user.email.clone(),
            roles: vec!["USER".to_string()],
        }
    }

    async fn seed_event(
        db: &sea_orm::DatabaseConnection,
    ) -> Result<(entity::user::Model, entity::event::Model), TestError> {
        let organizer = factory::create_user(db, "organizer@meetpoint.test").await?;
        let category = factory::create_category(db, "Tech").await?;
        let event = factory::create_event(
            db,
            category.id,
            organizer.id,
            Utc::now().naive_utc() + TimeDelta::days(7),
        )
        .await?;

        Ok((organizer, event))
    }

    mod create_tests {
        use super::*;
        use crate::model::comment::CreateCommentDto;

        /// Expect NotFound when commenting on a missing event
        #[tokio::test]
        async fn test_create_comment_event_not_found() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let comment_service = CommentService::new(&setup.db);

            let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;

            let result = comment_service
                .create(
                    CreateCommentDto {
                        event_id: Uuid::new_v4(),
                        parent_id: None,
                        content: "hello".to_string(),
                    },
                    &auth_user(&user),
                )
                .await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }

        /// Expect BadRequest when replying to a comment on a different event
        #[tokio::test]
        async fn test_create_reply_cross_event() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let comment_service = CommentService::new(&setup.db);

            let (organizer, event) = seed_event(&setup.db).await?;
            let category = factory::create_category(&setup.db, "Music").await?;
            let other_event = factory::create_event(
                &setup.db,
                category.id,
                organizer.id,
                Utc::now().naive_utc() + chrono::TimeDelta::days(3),
            )
            .await?;
            let parent =
                factory::create_comment(&setup.db, organizer.id, other_event.id, None).await?;

            let result = comment_service
                .create(
                    CreateCommentDto {
                        event_id: event.id,
                        parent_id: Some(parent.id),
                        content: "hello".to_string(),
                    },
                    &auth_user(&organizer),
                )
                .await;

            assert!(matches!(result, Err(Error::BadRequest(_))));

            Ok(())
        }
    }

    mod delete_tests {
        use super::*;

        /// Expect deleting the root of a two-level reply tree to remove all 7 rows
        #[tokio::test]
        async fn test_delete_comment_removes_reply_tree() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let comment_service = CommentService::new(&setup.db);

            let (organizer, event) = seed_event(&setup.db).await?;

            // Root with two replies, each reply with two replies of its own.
            let root = factory::create_comment(&setup.db, organizer.id, event.id, None).await?;
            for _ in 0..2 {
                let reply =
                    factory::create_comment(&setup.db, organizer.id, event.id, Some(root.id))
                        .await?;
                for _ in 0..2 {
                    factory::create_comment(&setup.db, organizer.id, event.id, Some(reply.id))
                        .await?;
                }
            }

            let deleted = comment_service
                .delete(root.id, &auth_user(&organizer))
                .await
                .unwrap();

            assert_eq!(deleted, 7);

            let remaining = entity::prelude::Comment::find().count(&setup.db).await?;
            assert_eq!(remaining, 0);

            Ok(())
        }

        /// Expect Forbidden when a different user deletes the comment
        #[tokio::test]
        async fn test_delete_comment_not_author() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let comment_service = CommentService::new(&setup.db);

            let (organizer, event) = seed_event(&setup.db).await?;
            let other = factory::create_user(&setup.db, "other@meetpoint.test").await?;
            let comment =
                factory::create_comment(&setup.db, organizer.id, event.id, None).await?;

            let result = comment_service.delete(comment.id, &auth_user(&other)).await;

            assert!(matches!(result, Err(Error::Forbidden(_))));

            Ok(())
        }
    }

    mod collect_subtree_tests {
        use super::*;

        /// Expect children to appear before their parent in the walk order
        #[tokio::test]
        async fn test_collect_orders_children_first() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;

            let (organizer, event) = seed_event(&setup.db).await?;
            let root = factory::create_comment(&setup.db, organizer.id, event.id, None).await?;
            let reply =
                factory::create_comment(&setup.db, organizer.id, event.id, Some(root.id)).await?;
            let leaf =
                factory::create_comment(&setup.db, organizer.id, event.id, Some(reply.id)).await?;

            let ordered = collect_subtree_ids(&setup.db, vec![root.id]).await.unwrap();

            assert_eq!(ordered, vec![leaf.id, reply.id, root.id]);

            Ok(())
        }

        /// Expect IntegrityError instead of an endless walk on a cyclic parent chain
        #[tokio::test]
        async fn test_collect_detects_cycle() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;

            let (organizer, event) = seed_event(&setup.db).await?;
            let a = factory::create_comment(&setup.db, organizer.id, event.id, None).await?;
            let b = factory::create_comment(&setup.db, organizer.id, event.id, Some(a.id)).await?;

            // Corrupt the chain: a's parent becomes its own descendant.
            let mut a_active: entity::comment::ActiveModel = a.clone().into();
            a_active.parent_id = Set(Some(b.id));
            a_active.update(&setup.db).await?;

            let result = collect_subtree_ids(&setup.db, vec![a.id]).await;

            assert!(matches!(result, Err(Error::IntegrityError(_))));

            Ok(())
        }

        /// Expect a node reachable from two roots to be collected once
        #[tokio::test]
        async fn test_collect_deduplicates_overlapping_roots() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;

            let (organizer, event) = seed_event(&setup.db).await?;
            let root = factory::create_comment(&setup.db, organizer.id, event.id, None).await?;
            let reply =
                factory::create_comment(&setup.db, organizer.id, event.id, Some(root.id)).await?;

            let ordered =
                collect_subtree_ids(&setup.db, vec![root.id, reply.id]).await.unwrap();

            assert_eq!(ordered.len(), 2);

            Ok(())
        }
    }
}
