//! Dashboard summary figures.

use serde::Serialize;

use crate::collection::EntityCollection;
use crate::model::{Course, Event, SchoolConfig, Student, Teacher};
use crate::school::SchoolSettings;
use crate::storage::SharedStore;

/// Headline counts for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// School settings in effect.
    pub school: SchoolConfig,
    /// Number of students.
    pub students: usize,
    /// Number of teachers.
    pub teachers: usize,
    /// Number of courses.
    pub courses: usize,
    /// Number of calendar events.
    pub events: usize,
    /// Mean student attendance percentage, `None` with no students.
    pub average_attendance: Option<f64>,
}

impl DashboardSummary {
    /// Load every collection (falling back to the bundled datasets) and
    /// summarize it.
    #[must_use]
    pub fn collect(store: &SharedStore) -> Self {
        let students = EntityCollection::<Student>::open(store.clone());
        let teachers = EntityCollection::<Teacher>::open(store.clone());
        let courses = EntityCollection::<Course>::open(store.clone());
        let events = EntityCollection::<Event>::open(store.clone());
        let school = SchoolSettings::load(store.clone()).config().clone();

        Self {
            school,
            students: students.len(),
            teachers: teachers.len(),
            courses: courses.len(),
            events: events.len(),
            average_attendance: average_attendance(students.items()),
        }
    }
}

/// Mean attendance percentage across `students`.
#[must_use]
pub fn average_attendance(students: &[Student]) -> Option<f64> {
    if students.is_empty() {
        return None;
    }
    let total: f64 = students.iter().map(|s| f64::from(s.attendance)).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = students.len() as f64;
    Some(total / count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TeacherDraft;
    use crate::storage::MemoryStore;

    #[test]
    fn test_summary_from_defaults() {
        let store = MemoryStore::shared();
        let summary = DashboardSummary::collect(&store);

        assert_eq!(summary.students, 5);
        assert_eq!(summary.teachers, 3);
        assert_eq!(summary.courses, 5);
        assert_eq!(summary.events, 3);
        assert_eq!(summary.school.name, "EduPulse International");
        // (95 + 88 + 92 + 98 + 85) / 5
        let avg = summary.average_attendance.unwrap();
        assert!((avg - 91.6).abs() < 1e-9);
    }

    #[test]
    fn test_summary_reflects_saved_changes() {
        let store = MemoryStore::shared();
        let mut teachers = EntityCollection::<Teacher>::open(store.clone());
        teachers
            .add(TeacherDraft {
                name: "Ms. Ada Byron".to_string(),
                email: "byron@school.edu".to_string(),
                ..TeacherDraft::default()
            })
            .unwrap();

        assert_eq!(DashboardSummary::collect(&store).teachers, 4);
    }

    #[test]
    fn test_average_attendance_empty() {
        assert!(average_attendance(&[]).is_none());
    }
}
