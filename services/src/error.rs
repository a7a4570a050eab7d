use sea_orm::DbErr;
use std::fmt;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entity kinds that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Poll,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Student => f.write_str("Student"),
            EntityKind::Poll => f.write_str("Poll"),
        }
    }
}

/// Why a mark request fell outside its poll's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowViolation {
    NotStarted,
    Expired,
}

impl fmt::Display for WindowViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowViolation::NotStarted => f.write_str("Poll has not yet started"),
            WindowViolation::Expired => f.write_str("Poll has expired"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{entity} not found")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("{0}")]
    InvalidWindow(WindowViolation),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }
}
