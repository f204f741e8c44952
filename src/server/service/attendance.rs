use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::attendance::{CreateAttendanceDto, UpdateAttendanceDto},
    server::{
        data::{attendance::AttendanceRepository, event::EventRepository},
        error::Error,
        model::auth::AuthUser,
    },
};

pub struct AttendanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AttendanceService<'a> {
    /// Creates a new instance of [`AttendanceService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers the acting user for an event.
    pub async fn create(
        &self,
        dto: CreateAttendanceDto,
        attendee: &AuthUser,
    ) -> Result<entity::attendance::Model, Error> {
        let attendance_repository = AttendanceRepository::new(self.db);
        let event_repository = EventRepository::new(self.db);

        let event = event_repository
            .find_by_id(dto.event_id)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

        if event.date <= Utc::now().naive_utc() {
            return Err(Error::BadRequest(
                "Event has already taken place".to_string(),
            ));
        }

        if attendance_repository.exists(attendee.id, event.id).await? {
            return Err(Error::Conflict(
                "User is already registered for this event".to_string(),
            ));
        }

        let attendance = attendance_repository
            .create(attendee.id, event.id, dto.state.into())
            .await?;

        Ok(attendance)
    }

    pub async fn get_attendance(
        &self,
        attendance_id: Uuid,
    ) -> Result<entity::attendance::Model, Error> {
        AttendanceRepository::new(self.db)
            .find_by_id(attendance_id)
            .await?
            .ok_or_else(|| Error::NotFound("Attendance not found".to_string()))
    }

    pub async fn get_attendances(
        &self,
        page: u64,
        page_size: u64,
        event_id: Option<Uuid>,
    ) -> Result<(Vec<entity::attendance::Model>, u64), Error> {
        let (attendances, total_items) = AttendanceRepository::new(self.db)
            .find_paginated(page, page_size, event_id)
            .await?;

        Ok((attendances, total_items))
    }

    pub async fn update(
        &self,
        attendance_id: Uuid,
        dto: UpdateAttendanceDto,
        acting_user: &AuthUser,
    ) -> Result<entity::attendance::Model, Error> {
        let attendance_repository = AttendanceRepository::new(self.db);

        let attendance = attendance_repository
            .find_by_id(attendance_id)
            .await?
            .ok_or_else(|| Error::NotFound("Attendance not found".to_string()))?;

        if !acting_user.can_act_for(attendance.user_id) {
            return Err(Error::Forbidden(
                "Only the attendee may change their attendance".to_string(),
            ));
        }

        let attendance = attendance_repository
            .update_state(attendance, dto.state.into(), Some(acting_user.id))
            .await?;

        Ok(attendance)
    }

    pub async fn delete(&self, attendance_id: Uuid, acting_user: &AuthUser) -> Result<(), Error> {
        let attendance_repository = AttendanceRepository::new(self.db);

        let attendance = attendance_repository
            .find_by_id(attendance_id)
            .await?
            .ok_or_else(|| Error::NotFound("Attendance not found".to_string()))?;

        if !acting_user.can_act_for(attendance.user_id) {
            return Err(Error::Forbidden(
                "Only the attendee may remove their attendance".to_string(),
            ));
        }

        attendance_repository.delete(attendance.id).await?;

        Ok(())
    }
}
