use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDto {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub organizer_id: Uuid,
    pub reason: String,
    pub report_date: NaiveDateTime,
}

impl From<entity::report::Model> for ReportDto {
    fn from(report: entity::report::Model) -> Self {
        Self {
            id: report.id,
            reporter_id: report.reporter_id,
            organizer_id: report.organizer_id,
            reason: report.reason,
            report_date: report.report_date,
        }
    }
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    pub organizer_id: Uuid,
    #[validate(length(min = 10, max = 200))]
    pub reason: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateReportDto {
    #[validate(length(min = 10, max = 200))]
    pub reason: String,
}
