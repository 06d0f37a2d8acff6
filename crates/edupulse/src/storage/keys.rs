//! Fixed slot keys.
//!
//! The names match the keys the browser dashboard used, so exported values
//! can be imported verbatim.

/// Student collection.
pub const STUDENTS: &str = "edupulse_students";

/// Teacher collection.
pub const TEACHERS: &str = "edupulse_teachers";

/// Course collection.
pub const COURSES: &str = "edupulse_courses";

/// Calendar event collection.
pub const EVENTS: &str = "edupulse_events";

/// `SchoolConfig` singleton.
pub const SCHOOL_CONFIG: &str = "edupulse_config";

/// Date-stamped attendance snapshots.
pub const ATTENDANCE_LEDGER: &str = "edupulse_attendance_ledger";

/// Every key edupulse writes.
pub const ALL: &[&str] = &[
    STUDENTS,
    TEACHERS,
    COURSES,
    EVENTS,
    SCHOOL_CONFIG,
    ATTENDANCE_LEDGER,
];
