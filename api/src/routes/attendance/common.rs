use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct StartPollRequest {
    #[validate(range(min = 1, max = 60, message = "duration_minutes must be between 1 and 60"))]
    pub duration_minutes: i32,

    #[validate(length(min = 1, max = 100, message = "created_by must be 1-100 characters"))]
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: i64,
    pub poll_id: i64,
}
