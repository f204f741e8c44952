//! Insert helpers that seed the test database with standard rows.
//!
//! Each function persists one row and returns the stored model. Callers pass
//! only the fields a test cares about; everything else gets a fixed value.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use uuid::Uuid;

use crate::{
    constant::{TEST_LOCATION, TEST_PASSWORD},
    error::TestError,
};

/// Argon2id hash of [`TEST_PASSWORD`], computed once per test binary.
pub fn test_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(TEST_PASSWORD.as_bytes(), &salt)
            .expect("hashing the test password should not fail")
            .to_string()
    })
    .clone()
}

pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<entity::user::Model, TestError> {
    let now = Utc::now().naive_utc();
    let user = entity::user::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set("Test".to_string()),
        last_name: Set("User".to_string()),
        email: Set(email.to_string()),
        password_hash: Set(test_password_hash()),
        location: Set(TEST_LOCATION.to_string()),
        is_blocked: Set(false),
        created_by: Set(None),
        created_date: Set(now),
        updated_by: Set(None),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    assign_role(db, user.id, "USER").await?;

    Ok(user)
}

pub async fn create_admin<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<entity::user::Model, TestError> {
    let user = create_user(db, email).await?;

    assign_role(db, user.id, "ADMIN").await?;

    Ok(user)
}

pub async fn assign_role<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    role: &str,
) -> Result<entity::user_role::Model, TestError> {
    let now = Utc::now().naive_utc();
    let role = entity::user_role::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        role: Set(role.to_string()),
        created_by: Set(None),
        created_date: Set(now),
        updated_by: Set(None),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    Ok(role)
}

pub async fn create_category<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<entity::category::Model, TestError> {
    let now = Utc::now().naive_utc();
    let category = entity::category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(format!("{name} events")),
        created_by: Set(None),
        created_date: Set(now),
        updated_by: Set(None),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    Ok(category)
}

pub async fn create_event<C: ConnectionTrait>(
    db: &C,
    category_id: Uuid,
    organizer_id: Uuid,
    date: NaiveDateTime,
) -> Result<entity::event::Model, TestError> {
    let now = Utc::now().naive_utc();
    let event = entity::event::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category_id),
        organizer_id: Set(organizer_id),
        title: Set("Test Event".to_string()),
        description: Set("An event for testing".to_string()),
        location: Set(TEST_LOCATION.to_string()),
        date: Set(date),
        publication_date: Set(now),
        created_by: Set(Some(organizer_id)),
        created_date: Set(now),
        updated_by: Set(Some(organizer_id)),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    Ok(event)
}

pub async fn create_attendance<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    event_id: Uuid,
    state: entity::attendance::AttendanceState,
) -> Result<entity::attendance::Model, TestError> {
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
    }
    .insert(db)
    .await?;

    Ok(attendance)
}

pub async fn create_comment<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    event_id: Uuid,
    parent_id: Option<Uuid>,
) -> Result<entity::comment::Model, TestError> {
    let now = Utc::now().naive_utc();
    let comment = entity::comment::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        event_id: Set(event_id),
        parent_id: Set(parent_id),
        content: Set("A test comment".to_string()),
        publication_date: Set(now),
        created_by: Set(Some(user_id)),
        created_date: Set(now),
        updated_by: Set(Some(user_id)),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    Ok(comment)
}

pub async fn create_rating<C: ConnectionTrait>(
    db: &C,
    rater_id: Uuid,
    organizer_id: Uuid,
    event_id: Uuid,
    score: Decimal,
) -> Result<entity::rating::Model, TestError> {
    let now = Utc::now().naive_utc();
    let rating = entity::rating::ActiveModel {
        id: Set(Uuid::new_v4()),
        rater_id: Set(rater_id),
        organizer_id: Set(organizer_id),
        event_id: Set(event_id),
        score: Set(score),
        rating_date: Set(now),
        created_by: Set(Some(rater_id)),
        created_date: Set(now),
        updated_by: Set(Some(rater_id)),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    Ok(rating)
}

pub async fn create_report<C: ConnectionTrait>(
    db: &C,
    reporter_id: Uuid,
    organizer_id: Uuid,
) -> Result<entity::report::Model, TestError> {
    let now = Utc::now().naive_utc();
    let report = entity::report::ActiveModel {
        id: Set(Uuid::new_v4()),
        reporter_id: Set(reporter_id),
        organizer_id: Set(organizer_id),
        reason: Set("Spam invitations".to_string()),
        report_date: Set(now),
        created_by: Set(Some(reporter_id)),
        created_date: Set(now),
        updated_by: Set(Some(reporter_id)),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    Ok(report)
}

pub async fn create_membership<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    membership_type: entity::membership::MembershipType,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
) -> Result<entity::membership::Model, TestError> {
    let now = Utc::now().naive_utc();
    let price = match membership_type {
        entity::membership::MembershipType::Monthly => Decimal::new(299, 2),
        entity::membership::MembershipType::Annual => Decimal::new(2999, 2),
    };

    let membership = entity::membership::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        membership_type: Set(membership_type),
        price: Set(price),
        start_date: Set(start_date),
        end_date: Set(end_date),
        created_by: Set(Some(user_id)),
        created_date: Set(now),
        updated_by: Set(Some(user_id)),
        updated_date: Set(now),
    }
    .insert(db)
    .await?;

    Ok(membership)
}
