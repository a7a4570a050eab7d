//! Read-only aggregates over polls and records.

use chrono::{DateTime, Utc};
use db::{
    models::{attendance_poll, attendance_record, student},
    repository::Repository,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;

use crate::attendance_record::AttendanceRecordView;
use crate::error::{EntityKind, ServiceError, ServiceResult};

/// Present/absent summary for a single poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollReport {
    pub poll_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_students: u64,
    pub present_count: u64,
    pub absent_count: u64,
    pub attendance_percentage: f64,
    pub records: Vec<AttendanceRecordView>,
}

/// `present / total * 100` rounded to two decimals; `0.0` for an empty roster.
pub fn attendance_percentage(present: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = present as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

pub struct AttendanceReportService;

impl AttendanceReportService {
    /// Every student registered counts toward the total, regardless of when
    /// they were added relative to the poll.
    pub async fn poll_report(db: &DatabaseConnection, poll_id: i64) -> ServiceResult<PollReport> {
        let poll = Repository::<attendance_poll::Entity>::find_by_id(db, poll_id)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Poll, poll_id))?;

        let total_students = Repository::<student::Entity>::count(db, Condition::all()).await?;

        let records: Vec<AttendanceRecordView> = attendance_record::Entity::find()
            .filter(attendance_record::Column::PollId.eq(poll_id))
            .find_also_related(student::Entity)
            .order_by_asc(attendance_record::Column::MarkedAt)
            .order_by_asc(attendance_record::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(|(record, student)| AttendanceRecordView::new(record, student.as_ref()))
            .collect();

        let present_count = records.len() as u64;
        let absent_count = total_students.saturating_sub(present_count);

        Ok(PollReport {
            poll_id: poll.id,
            start_time: poll.start_time,
            end_time: poll.end_time,
            total_students,
            present_count,
            absent_count,
            attendance_percentage: attendance_percentage(present_count, total_students),
            records,
        })
    }

    /// Newest mark first, each carrying its poll's window.
    pub async fn student_history(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> ServiceResult<Vec<AttendanceRecordView>> {
        let student = Repository::<student::Entity>::find_by_id(db, student_id)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Student, student_id))?;

        let rows = attendance_record::Entity::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .find_also_related(attendance_poll::Entity)
            .order_by_desc(attendance_record::Column::MarkedAt)
            .order_by_desc(attendance_record::Column::Id)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(record, poll)| {
                AttendanceRecordView::new(record, Some(&student)).with_poll(poll.as_ref())
            })
            .collect())
    }
}
