use chrono::{Months, Utc};
use entity::membership::MembershipType;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::membership::CreateMembershipDto,
    server::{
        data::{membership::MembershipRepository, user::UserRepository},
        error::Error,
        model::auth::AuthUser,
    },
};

/// Price and duration per tier, taken from the published plans.
fn plan(membership_type: MembershipType) -> (Decimal, Months) {
    match membership_type {
        MembershipType::Monthly => (Decimal::new(299, 2), Months::new(1)),
        MembershipType::Annual => (Decimal::new(2999, 2), Months::new(12)),
    }
}

pub struct MembershipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipService<'a> {
    /// Creates a new instance of [`MembershipService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Purchases a membership for the acting user.
    ///
    /// An active membership blocks the purchase; an expired one is replaced.
    pub async fn purchase(
        &self,
        dto: CreateMembershipDto,
        buyer: &AuthUser,
    ) -> Result<entity::membership::Model, Error> {
        let user_repository = UserRepository::new(self.db);
        let membership_repository = MembershipRepository::new(self.db);

        user_repository
            .find_by_id(buyer.id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let now = Utc::now().naive_utc();

        if let Some(existing) = membership_repository.find_by_user(buyer.id).await? {
            if existing.end_date > now {
                return Err(Error::Conflict(
                    "User already has an active membership".to_string(),
                ));
            }
        }

        let membership_type: MembershipType = dto.membership_type.into();
        let (price, duration) = plan(membership_type.clone());
        let end_date = now
            .checked_add_months(duration)
            .ok_or_else(|| Error::InternalError("membership end date overflow".to_string()))?;

        let txn = self.db.begin().await?;

        let result = async {
            let membership_repository = MembershipRepository::new(&txn);

            // One membership row per user; drop the expired one first.
            membership_repository.delete_by_user(buyer.id).await?;
            membership_repository
                .create(buyer.id, membership_type, price, now, end_date)
                .await
        }
        .await;

        match result {
            Ok(membership) => {
                txn.commit().await?;

                Ok(membership)
            }
            Err(err) => {
                txn.rollback().await?;

                Err(err.into())
            }
        }
    }

    pub async fn get_membership(&self, user_id: Uuid) -> Result<entity::membership::Model, Error> {
        MembershipRepository::new(self.db)
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User has no membership".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Months, TimeDelta, Utc};
    use entity::membership::MembershipType;
    use meetpoint_test_utils::prelude::*;
    use rust_decimal::Decimal;

    use crate::model::membership::{CreateMembershipDto, MembershipTypeDto};
    use crate::server::{
        error::Error, model::auth::AuthUser, service::membership::MembershipService,
    };

    fn auth_user(user: &entity::user::Model) -> AuthUser {
        AuthUser {
            id: user.id,
            email: user.email.clone(),
            roles: vec!["USER".to_string()],
        }
    }

    /// Expect a monthly purchase to run one month at 2.99
    #[tokio::test]
    async fn test_purchase_monthly() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let membership_service = MembershipService::new(&setup.db);

        let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;

        let membership = membership_service
            .purchase(
                CreateMembershipDto {
                    membership_type: MembershipTypeDto::Monthly,
                },
                &auth_user(&user),
            )
            .await
            .unwrap();

        assert_eq!(membership.price, Decimal::new(299, 2));
        assert_eq!(
            membership.end_date,
            membership.start_date.checked_add_months(Months::new(1)).unwrap()
        );

        Ok(())
    }

    /// Expect an annual purchase to run one year at 29.99
    #[tokio::test]
    async fn test_purchase_annual() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let membership_service = MembershipService::new(&setup.db);

        let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;

        let membership = membership_service
            .purchase(
                CreateMembershipDto {
                    membership_type: MembershipTypeDto::Annual,
                },
                &auth_user(&user),
            )
            .await
            .unwrap();

        assert_eq!(membership.price, Decimal::new(2999, 2));
        assert_eq!(
            membership.end_date,
            membership.start_date.checked_add_months(Months::new(12)).unwrap()
        );

        Ok(())
    }

    /// Expect Conflict while a membership is still active
    #[tokio::test]
    async fn test_purchase_with_active_membership() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let membership_service = MembershipService::new(&setup.db);

        let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;
        let now = Utc::now().naive_utc();
        factory::create_membership(
            &setup.db,
            user.id,
            MembershipType::Monthly,
            now - TimeDelta::days(10),
            now + TimeDelta::days(20),
        )
        .await?;

        let result = membership_service
            .purchase(
                CreateMembershipDto {
                    membership_type: MembershipTypeDto::Annual,
                },
                &auth_user(&user),
            )
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));

        Ok(())
    }

    /// Expect an expired membership to be replaced by the new purchase
    #[tokio::test]
    async fn test_purchase_after_expiry() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let membership_service = MembershipService::new(&setup.db);

        let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;
        let now = Utc::now().naive_utc();
        factory::create_membership(
            &setup.db,
            user.id,
            MembershipType::Monthly,
            now - TimeDelta::days(60),
            now - TimeDelta::days(30),
        )
        .await?;

        let membership = membership_service
            .purchase(
                CreateMembershipDto {
                    membership_type: MembershipTypeDto::Annual,
                },
                &auth_user(&user),
            )
            .await
            .unwrap();

        assert_eq!(membership.price, Decimal::new(2999, 2));

        let stored = membership_service.get_membership(user.id).await.unwrap();
        assert_eq!(stored.id, membership.id);

        Ok(())
    }
}
