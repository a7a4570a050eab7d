//! Fixtures for service tests that need rows the public API can't produce
//! (e.g. polls whose window has already closed).

use chrono::{DateTime, Utc};
use db::models::{attendance_poll, student};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

pub async fn insert_poll(
    db: &DatabaseConnection,
    start: DateTime<Utc>,
    minutes: i32,
    is_active: bool,
) -> attendance_poll::Model {
    let (start_time, end_time) = attendance_poll::Model::window_from(start, minutes);
    attendance_poll::ActiveModel {
        start_time: Set(start_time),
        end_time: Set(end_time),
        duration_minutes: Set(minutes),
        is_active: Set(is_active),
        created_by: Set(attendance_poll::DEFAULT_CREATOR.to_string()),
        created_at: Set(start),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert poll")
}

pub async fn insert_student(db: &DatabaseConnection, name: &str, roll_no: &str) -> student::Model {
    student::ActiveModel {
        name: Set(name.to_string()),
        roll_no: Set(roll_no.to_string()),
        department: Set("Computer Science".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert student")
}
