use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Default creator label for polls started without an explicit one.
pub const DEFAULT_CREATOR: &str = "admin";

/// A time-boxed window during which attendance may be marked.
///
/// `is_active` marks the most recently started poll; whether marking is
/// actually allowed is decided by the `[start_time, end_time]` window.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_polls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Where an instant falls relative to a poll's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    NotStarted,
    Open,
    Expired,
}

impl Model {
    /// Computes `(start, end)` for a poll starting at `now`.
    pub fn window_from(now: DateTime<Utc>, duration_minutes: i32) -> (DateTime<Utc>, DateTime<Utc>) {
        (now, now + Duration::minutes(i64::from(duration_minutes)))
    }

    /// Bounds are inclusive on both ends.
    pub fn window_state(&self, now: DateTime<Utc>) -> WindowState {
        if now < self.start_time {
            WindowState::NotStarted
        } else if now > self.end_time {
            WindowState::Expired
        } else {
            WindowState::Open
        }
    }

    #[inline]
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.window_state(now) == WindowState::Open
    }

    /// Whole seconds until `end_time`, never negative.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.end_time - now).num_seconds().max(0)
    }
}
