use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::report::{CreateReportDto, UpdateReportDto},
    server::{
        data::{report::ReportRepository, user::UserRepository},
        error::Error,
        model::auth::AuthUser,
    },
};

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    /// Creates a new instance of [`ReportService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a report against an organizer; one per (reporter, organizer).
    pub async fn create(
        &self,
        dto: CreateReportDto,
        reporter: &AuthUser,
    ) -> Result<entity::report::Model, Error> {
        let report_repository = ReportRepository::new(self.db);
        let user_repository = UserRepository::new(self.db);

        user_repository
            .find_by_id(dto.organizer_id)
            .await?
            .ok_or_else(|| Error::NotFound("Organizer not found".to_string()))?;

        if reporter.id == dto.organizer_id {
            return Err(Error::BadRequest("You cannot report yourself".to_string()));
        }

        if report_repository.exists(reporter.id, dto.organizer_id).await? {
            return Err(Error::Conflict(
                "You already reported this organizer".to_string(),
            ));
        }

        let report = report_repository
            .create(reporter.id, dto.organizer_id, dto.reason)
            .await?;

        Ok(report)
    }

    pub async fn get_report(&self, report_id: Uuid) -> Result<entity::report::Model, Error> {
        ReportRepository::new(self.db)
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| Error::NotFound("Report not found".to_string()))
    }

    pub async fn get_reports(
        &self,
        page: u64,
        page_size: u64,
        organizer_id: Option<Uuid>,
    ) -> Result<(Vec<entity::report::Model>, u64), Error> {
        let (reports, total_items) = ReportRepository::new(self.db)
            .find_paginated(page, page_size, organizer_id)
            .await?;

        Ok((reports, total_items))
    }

    pub async fn update(
        &self,
        report_id: Uuid,
        dto: UpdateReportDto,
        acting_user: &AuthUser,
    ) -> Result<entity::report::Model, Error> {
        let report_repository = ReportRepository::new(self.db);

        let report = report_repository
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| Error::NotFound("Report not found".to_string()))?;

        if !acting_user.can_act_for(report.reporter_id) {
            return Err(Error::Forbidden(
                "Only the reporter may edit a report".to_string(),
            ));
        }

        let report = report_repository
            .update_reason(report, dto.reason, Some(acting_user.id))
            .await?;

        Ok(report)
    }

    pub async fn delete(&self, report_id: Uuid, acting_user: &AuthUser) -> Result<(), Error> {
        let report_repository = ReportRepository::new(self.db);

        let report = report_repository
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| Error::NotFound("Report not found".to_string()))?;

        if !acting_user.can_act_for(report.reporter_id) {
            return Err(Error::Forbidden(
                "Only the reporter may delete a report".to_string(),
            ));
        }

        report_repository.delete(report.id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use meetpoint_test_utils::prelude::*;
    use uuid::Uuid;

    use crate::model::report::CreateReportDto;
    use crate::server::{error::Error, model::auth::AuthUser, service::report::ReportService};

    fn auth_user(user: &entity::user::Model) -> AuthUser {
        AuthUser {
            id: user.id,
            email: user.email.clone(),
            roles: vec!["USER".to_string()],
        }
    }

    fn dto(organizer_id: Uuid) -> CreateReportDto {
        CreateReportDto {
            organizer_id,
            reason: "Spam invitations every day".to_string(),
        }
    }

    /// Expect NotFound for a missing organizer
    #[tokio::test]
    async fn test_create_report_organizer_not_found() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let report_service = ReportService::new(&setup.db);

        let reporter = factory::create_user(&setup.db, "ada@meetpoint.test").await?;

        let result = report_service
            .create(dto(Uuid::new_v4()), &auth_user(&reporter))
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }

    /// Expect BadRequest when reporting yourself
    #[tokio::test]
    async fn test_create_report_self() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let report_service = ReportService::new(&setup.db);

        let reporter = factory::create_user(&setup.db, "ada@meetpoint.test").await?;

        let result = report_service
            .create(dto(reporter.id), &auth_user(&reporter))
            .await;

        assert!(matches!(result, Err(Error::BadRequest(_))));

        Ok(())
    }

    /// Expect Conflict on a second report against the same organizer
    #[tokio::test]
    async fn test_create_report_duplicate() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let report_service = ReportService::new(&setup.db);

        let reporter = factory::create_user(&setup.db, "ada@meetpoint.test").await?;
        let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;

        report_service
            .create(dto(organizer.id), &auth_user(&reporter))
            .await
            .unwrap();
        let result = report_service
            .create(dto(organizer.id), &auth_user(&reporter))
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));

        Ok(())
    }
}
