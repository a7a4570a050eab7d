//! Attendance marking: validates a mark against the student, the poll and the
//! poll's time window, then records it at most once per `(student, poll)`.

use chrono::{DateTime, Utc};
use db::{
    models::{
        attendance_poll::{self, WindowState},
        attendance_record::{ActiveModel, Column, Entity},
        student,
    },
    repository::Repository,
};
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{EntityKind, ServiceError, ServiceResult, WindowViolation};

pub use db::models::attendance_record::Model as AttendanceRecord;

/// A record joined with the student's current name/roll number and,
/// where relevant, the window of the poll it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecordView {
    pub id: i64,
    pub student_id: i64,
    pub poll_id: i64,
    pub marked_at: DateTime<Utc>,
    pub student_name: Option<String>,
    pub student_roll_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_end_time: Option<DateTime<Utc>>,
}

impl AttendanceRecordView {
    pub fn new(record: AttendanceRecord, student: Option<&student::Model>) -> Self {
        Self {
            id: record.id,
            student_id: record.student_id,
            poll_id: record.poll_id,
            marked_at: record.marked_at,
            student_name: student.map(|s| s.name.clone()),
            student_roll_no: student.map(|s| s.roll_no.clone()),
            poll_start_time: None,
            poll_end_time: None,
        }
    }

    pub fn with_poll(mut self, poll: Option<&attendance_poll::Model>) -> Self {
        if let Some(p) = poll {
            self.poll_start_time = Some(p.start_time);
            self.poll_end_time = Some(p.end_time);
        }
        self
    }
}

pub struct AttendanceRecordService;

impl AttendanceRecordService {
    /// Marks `student_id` present in `poll_id` at `now`.
    ///
    /// Checks run in a fixed order: student exists, poll exists, `now` inside
    /// the poll window. The active flag is not consulted. A repeat mark
    /// returns the first record untouched.
    pub async fn mark_attendance(
        db: &DatabaseConnection,
        student_id: i64,
        poll_id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<AttendanceRecordView> {
        let student = Repository::<student::Entity>::find_by_id(db, student_id)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Student, student_id))?;

        let poll = Repository::<attendance_poll::Entity>::find_by_id(db, poll_id)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Poll, poll_id))?;

        match poll.window_state(now) {
            WindowState::NotStarted => {
                return Err(ServiceError::InvalidWindow(WindowViolation::NotStarted));
            }
            WindowState::Expired => {
                return Err(ServiceError::InvalidWindow(WindowViolation::Expired));
            }
            WindowState::Open => {}
        }

        if let Some(existing) = Self::find_for(db, student_id, poll_id).await? {
            debug!(student_id, poll_id, record_id = existing.id, "Attendance already marked");
            return Ok(AttendanceRecordView::new(existing, Some(&student)));
        }

        // A concurrent mark may win between the lookup above and this insert;
        // the unique (student_id, poll_id) index turns ours into a no-op.
        let inserted = match Entity::insert(ActiveModel {
            student_id: Set(student_id),
            poll_id: Set(poll_id),
            marked_at: Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([Column::StudentId, Column::PollId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        {
            Ok(rows) => rows,
            Err(DbErr::RecordNotInserted) => 0,
            Err(e) => return Err(e.into()),
        };

        let record = Self::find_for(db, student_id, poll_id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Attendance for student {student_id} in poll {poll_id} vanished after insert"
                ))
            })?;

        if inserted == 0 {
            debug!(student_id, poll_id, record_id = record.id, "Concurrent mark kept existing record");
        } else {
            info!(student_id, poll_id, record_id = record.id, "Attendance marked");
        }

        Ok(AttendanceRecordView::new(record, Some(&student)))
    }

    pub async fn find_for<C>(
        db: &C,
        student_id: i64,
        poll_id: i64,
    ) -> Result<Option<AttendanceRecord>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::PollId.eq(poll_id))
            .one(db)
            .await
    }
}
