use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingDto {
    pub id: Uuid,
    pub rater_id: Uuid,
    pub organizer_id: Uuid,
    pub event_id: Uuid,
    pub score: Decimal,
    pub rating_date: NaiveDateTime,
}

impl From<entity::rating::Model> for RatingDto {
    fn from(rating: entity::rating::Model) -> Self {
        Self {
            id: rating.id,
            rater_id: rating.rater_id,
            organizer_id: rating.organizer_id,
            event_id: rating.event_id,
            score: rating.score,
            rating_date: rating.rating_date,
        }
    }
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateRatingDto {
    pub organizer_id: Uuid,
    pub event_id: Uuid,
    /// 0.0 to 5.0 inclusive
    #[validate(custom(function = "validate_score"))]
    pub score: Decimal,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateRatingDto {
    #[validate(custom(function = "validate_score"))]
    pub score: Decimal,
}

fn validate_score(score: &Decimal) -> Result<(), ValidationError> {
    if *score < Decimal::ZERO || *score > Decimal::from(5) {
        return Err(ValidationError::new("score_out_of_range"));
    }

    // The column stores one decimal place; reject rather than round silently.
    if score.normalize().scale() > 1 {
        return Err(ValidationError::new("score_too_precise"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use validator::Validate;

    use super::UpdateRatingDto;

    /// Expect whole and half-point scores inside 0..=5 to pass
    #[test]
    fn test_score_one_decimal_accepted() {
        for score in [Decimal::ZERO, Decimal::new(45, 1), Decimal::from(5)] {
            assert!(UpdateRatingDto { score }.validate().is_ok());
        }
    }

    /// Expect scores outside 0..=5 to be rejected
    #[test]
    fn test_score_out_of_range_rejected() {
        for score in [Decimal::new(-1, 1), Decimal::new(51, 1)] {
            assert!(UpdateRatingDto { score }.validate().is_err());
        }
    }

    /// Expect a second decimal place to be rejected instead of rounded
    #[test]
    fn test_score_second_decimal_rejected() {
        let result = UpdateRatingDto {
            score: Decimal::new(425, 2),
        }
        .validate();

        assert!(result.is_err());
    }

    /// Expect trailing zeros not to count as extra precision
    #[test]
    fn test_score_trailing_zero_accepted() {
        let result = UpdateRatingDto {
            score: Decimal::new(450, 2),
        }
        .validate();

        assert!(result.is_ok());
    }
}
