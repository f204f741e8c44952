use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::event::EventDto;

/// Admin overview counts plus the next few upcoming events.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub total_users: u64,
    pub total_events: u64,
    pub total_attendances: u64,
    pub total_reports: u64,
    pub upcoming_events: Vec<EventDto>,
}
