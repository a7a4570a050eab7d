pub mod attendance_poll;
pub mod attendance_record;
pub mod student;
