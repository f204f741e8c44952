use entity::attendance::AttendanceState;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Wire representation of [`AttendanceState`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStateDto {
    Confirmed,
    Pending,
    Cancelled,
}

impl From<AttendanceStateDto> for AttendanceState {
    fn from(state: AttendanceStateDto) -> Self {
        match state {
            AttendanceStateDto::Confirmed => AttendanceState::Confirmed,
            AttendanceStateDto::Pending => AttendanceState::Pending,
            AttendanceStateDto::Cancelled => AttendanceState::Cancelled,
        }
    }
}

impl From<AttendanceState> for AttendanceStateDto {
    fn from(state: AttendanceState) -> Self {
        match state {
            AttendanceState::Confirmed => AttendanceStateDto::Confirmed,
            AttendanceState::Pending => AttendanceStateDto::Pending,
            AttendanceState::Cancelled => AttendanceStateDto::Cancelled,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub state: AttendanceStateDto,
}

impl From<entity::attendance::Model> for AttendanceDto {
    fn from(attendance: entity::attendance::Model) -> Self {
        Self {
            id: attendance.id,
            user_id: attendance.user_id,
            event_id: attendance.event_id,
            state: attendance.state.into(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendanceDto {
    pub event_id: Uuid,
    pub state: AttendanceStateDto,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendanceDto {
    pub state: AttendanceStateDto,
}
