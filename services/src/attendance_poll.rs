//! Poll lifecycle: starting polls, the single-active-poll invariant, and
//! lazily computed poll status.

use chrono::{DateTime, Utc};
use db::{
    models::attendance_poll::{self, ActiveModel, Column, Entity, DEFAULT_CREATOR},
    repository::Repository,
};
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, QueryFilter,
    Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;

use crate::error::{EntityKind, ServiceError, ServiceResult};

pub use db::models::attendance_poll::Model as AttendancePoll;

pub const MIN_DURATION_MINUTES: i32 = 1;
pub const MAX_DURATION_MINUTES: i32 = 60;

/// Snapshot of the poll currently open for marking, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollStatus {
    pub is_active: bool,
    pub poll_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub remaining_seconds: Option<i64>,
}

impl PollStatus {
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            poll_id: None,
            start_time: None,
            end_time: None,
            remaining_seconds: None,
        }
    }

    pub fn open(poll: &AttendancePoll, now: DateTime<Utc>) -> Self {
        Self {
            is_active: true,
            poll_id: Some(poll.id),
            start_time: Some(poll.start_time),
            end_time: Some(poll.end_time),
            remaining_seconds: Some(poll.remaining_seconds(now)),
        }
    }
}

pub struct AttendancePollService;

impl AttendancePollService {
    /// Deactivates every active poll and inserts a fresh active one starting at
    /// `now`, in a single transaction.
    pub async fn start_poll(
        db: &DatabaseConnection,
        duration_minutes: i32,
        created_by: Option<&str>,
        now: DateTime<Utc>,
    ) -> ServiceResult<AttendancePoll> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
            return Err(ServiceError::Validation(format!(
                "duration_minutes must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES}"
            )));
        }

        let txn = db.begin().await?;

        let deactivated = Entity::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::IsActive.eq(true))
            .exec(&txn)
            .await?
            .rows_affected;

        let (start_time, end_time) = attendance_poll::Model::window_from(now, duration_minutes);
        let poll = Repository::<Entity>::insert(
            &txn,
            ActiveModel {
                start_time: Set(start_time),
                end_time: Set(end_time),
                duration_minutes: Set(duration_minutes),
                is_active: Set(true),
                created_by: Set(created_by.unwrap_or(DEFAULT_CREATOR).to_owned()),
                created_at: Set(now),
                ..Default::default()
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            poll_id = poll.id,
            duration_minutes,
            deactivated,
            "Started attendance poll"
        );
        Ok(poll)
    }

    /// The poll that is flagged active and whose window contains `now`.
    ///
    /// A flagged poll past its `end_time` reports as inactive.
    pub async fn current_status(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
    ) -> ServiceResult<PollStatus> {
        let flagged = Repository::<Entity>::find_many(
            db,
            Condition::all().add(Column::IsActive.eq(true)),
            &[(Column::CreatedAt, Order::Desc), (Column::Id, Order::Desc)],
            0,
            None,
        )
        .await?;

        Ok(flagged
            .iter()
            .find(|p| p.is_open_at(now))
            .map(|p| PollStatus::open(p, now))
            .unwrap_or_else(PollStatus::inactive))
    }

    pub async fn get_poll(db: &DatabaseConnection, poll_id: i64) -> ServiceResult<AttendancePoll> {
        Repository::<Entity>::find_by_id(db, poll_id)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Poll, poll_id))
    }

    /// Newest first.
    pub async fn list_polls(
        db: &DatabaseConnection,
        skip: u64,
        limit: u64,
    ) -> ServiceResult<Vec<AttendancePoll>> {
        Ok(Repository::<Entity>::find_many(
            db,
            Condition::all(),
            &[(Column::CreatedAt, Order::Desc), (Column::Id, Order::Desc)],
            skip,
            Some(limit),
        )
        .await?)
    }

    pub async fn active_poll_count(db: &DatabaseConnection) -> ServiceResult<u64> {
        Ok(Repository::<Entity>::count(db, Condition::all().add(Column::IsActive.eq(true))).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::insert_poll;
    use chrono::{Duration, TimeZone};
    use db::test_utils::setup_test_db;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 8, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_start_poll_sets_window_and_flag() {
        let db = setup_test_db().await;

        let poll = AttendancePollService::start_poll(&db, 5, None, t0()).await.unwrap();
        assert!(poll.is_active);
        assert_eq!(poll.duration_minutes, 5);
        assert_eq!(poll.start_time, t0());
        assert_eq!(poll.end_time, t0() + Duration::minutes(5));
        assert_eq!(poll.created_by, "admin");
    }

    #[tokio::test]
    async fn test_start_poll_keeps_single_active_poll() {
        let db = setup_test_db().await;

        let mut last = None;
        for (i, minutes) in [5, 3, 60, 1].into_iter().enumerate() {
            let now = t0() + Duration::seconds(i as i64);
            let poll = AttendancePollService::start_poll(&db, minutes, Some("lecturer"), now)
                .await
                .unwrap();
            assert_eq!(AttendancePollService::active_poll_count(&db).await.unwrap(), 1);
            last = Some(poll);
        }

        let last = last.unwrap();
        let status = AttendancePollService::current_status(&db, last.start_time).await.unwrap();
        assert_eq!(status.poll_id, Some(last.id));

        let polls = AttendancePollService::list_polls(&db, 0, 50).await.unwrap();
        assert_eq!(polls.len(), 4);
        assert_eq!(polls.iter().filter(|p| p.is_active).count(), 1);
    }

    #[tokio::test]
    async fn test_start_poll_rejects_out_of_range_duration() {
        let db = setup_test_db().await;

        for minutes in [0, -1, 61] {
            let err = AttendancePollService::start_poll(&db, minutes, None, t0())
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        assert_eq!(AttendancePollService::active_poll_count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_current_status_reports_remaining_seconds() {
        let db = setup_test_db().await;
        let poll = AttendancePollService::start_poll(&db, 5, None, t0()).await.unwrap();

        let status = AttendancePollService::current_status(&db, t0() + Duration::seconds(90))
            .await
            .unwrap();
        assert_eq!(status, PollStatus {
            is_active: true,
            poll_id: Some(poll.id),
            start_time: Some(poll.start_time),
            end_time: Some(poll.end_time),
            remaining_seconds: Some(210),
        });
    }

    #[tokio::test]
    async fn test_current_status_without_polls() {
        let db = setup_test_db().await;
        let status = AttendancePollService::current_status(&db, t0()).await.unwrap();
        assert_eq!(status, PollStatus::inactive());
    }

    #[tokio::test]
    async fn test_current_status_ignores_expired_poll_still_flagged_active() {
        let db = setup_test_db().await;
        let now = Utc::now();
        let expired = insert_poll(&db, now - Duration::minutes(10), 5, true).await;
        assert!(expired.is_active);

        let status = AttendancePollService::current_status(&db, now).await.unwrap();
        assert_eq!(status, PollStatus::inactive());
    }

    #[tokio::test]
    async fn test_current_status_ignores_open_window_without_flag() {
        let db = setup_test_db().await;
        insert_poll(&db, t0(), 5, false).await;

        let status = AttendancePollService::current_status(&db, t0() + Duration::minutes(1))
            .await
            .unwrap();
        assert!(!status.is_active);
    }

    #[tokio::test]
    async fn test_get_poll_not_found() {
        let db = setup_test_db().await;
        let err = AttendancePollService::get_poll(&db, 99999).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound { entity: EntityKind::Poll, id: 99999 }
        ));
    }

    #[tokio::test]
    async fn test_list_polls_newest_first_with_slice() {
        let db = setup_test_db().await;
        let mut ids = Vec::new();
        for i in 0..4 {
            let p = insert_poll(&db, t0() + Duration::minutes(i), 5, false).await;
            ids.push(p.id);
        }

        let page = AttendancePollService::list_polls(&db, 1, 2).await.unwrap();
        let got: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(got, vec![ids[2], ids[1]]);
    }
}
