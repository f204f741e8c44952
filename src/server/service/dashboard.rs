use sea_orm::DatabaseConnection;

use crate::{
    model::{dashboard::DashboardDto, event::EventDto},
    server::{
        constant::DASHBOARD_EVENT_COUNT,
        data::{
            attendance::AttendanceRepository, event::EventRepository, report::ReportRepository,
            user::UserRepository,
        },
        error::Error,
    },
};

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    /// Creates a new instance of [`DashboardService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_overview(&self) -> Result<DashboardDto, Error> {
        let event_repository = EventRepository::new(self.db);

        let total_users = UserRepository::new(self.db).count().await?;
        let total_events = event_repository.count().await?;
        let total_attendances = AttendanceRepository::new(self.db).count().await?;
        let total_reports = ReportRepository::new(self.db).count().await?;

        let upcoming_events = event_repository
            .find_upcoming(DASHBOARD_EVENT_COUNT)
            .await?
            .into_iter()
            .map(EventDto::from)
            .collect();

        Ok(DashboardDto {
            total_users,
            total_events,
            total_attendances,
            total_reports,
            upcoming_events,
        })
    }
}
