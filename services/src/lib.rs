pub mod attendance_poll;
pub mod attendance_record;
pub mod attendance_report;
pub mod error;
pub mod service;
pub mod student;

#[cfg(test)]
mod test_support;

pub use error::{ServiceError, ServiceResult};
