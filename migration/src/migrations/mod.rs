pub mod m202510150001_create_students;
pub mod m202510150002_create_attendance_polls;
pub mod m202510150003_create_attendance_records;
