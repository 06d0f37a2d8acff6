//! Bundled fallback datasets.
//!
//! These are served whenever a collection slot is absent or unreadable. They
//! are never written back on their own; the first mutation persists them
//! together with the change.

use crate::model::{Course, CourseCategory, Event, Student, Teacher};

fn student(
    id: &str,
    name: &str,
    grade: &str,
    attendance: u8,
    gpa: f64,
    email: &str,
    subjects: &[&str],
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        grade: grade.to_string(),
        attendance,
        gpa,
        email: email.to_string(),
        subjects: subjects.iter().map(ToString::to_string).collect(),
    }
}

/// The five default students.
#[must_use]
pub fn students() -> Vec<Student> {
    vec![
        student(
            "1",
            "Alice Johnson",
            "10th",
            95,
            3.8,
            "alice@school.edu",
            &["Math", "Physics", "History"],
        ),
        student(
            "2",
            "Bob Smith",
            "11th",
            88,
            3.2,
            "bob@school.edu",
            &["English", "Biology", "Art"],
        ),
        student(
            "3",
            "Charlie Davis",
            "10th",
            92,
            3.5,
            "charlie@school.edu",
            &["Chemistry", "Math", "Spanish"],
        ),
        student(
            "4",
            "Diana Prince",
            "12th",
            98,
            4.0,
            "diana@school.edu",
            &["History", "Economics", "CompSci"],
        ),
        student(
            "5",
            "Ethan Hunt",
            "9th",
            85,
            2.9,
            "ethan@school.edu",
            &["Math", "Gym", "Art"],
        ),
    ]
}

/// The three default teachers.
#[must_use]
pub fn teachers() -> Vec<Teacher> {
    [
        ("t1", "Dr. Sarah Wilson", "Mathematics", "wilson@school.edu", 12),
        ("t2", "Mr. James Miller", "History", "miller@school.edu", 8),
        ("t3", "Ms. Emily Chen", "Science", "chen@school.edu", 5),
    ]
    .into_iter()
    .map(|(id, name, subject, email, experience)| Teacher {
        id: id.to_string(),
        name: name.to_string(),
        subject: subject.to_string(),
        email: email.to_string(),
        experience,
    })
    .collect()
}

/// The five default courses.
#[must_use]
pub fn courses() -> Vec<Course> {
    [
        (
            "c1",
            "Advanced Physics",
            "PHY301",
            CourseCategory::Science,
            "Dr. Sarah Wilson",
            "Explore the fundamentals of mechanics, electromagnetism, and modern physics.",
            4,
        ),
        (
            "c2",
            "Calculus II",
            "MAT202",
            CourseCategory::Mathematics,
            "Mr. James Miller",
            "In-depth study of integration techniques, sequences, series, and power series.",
            4,
        ),
        (
            "c3",
            "World History",
            "HIS105",
            CourseCategory::Humanities,
            "Ms. Emily Chen",
            "A journey through major global civilizations from ancient times to the modern era.",
            3,
        ),
        (
            "c4",
            "Modern Arts",
            "ART110",
            CourseCategory::Arts,
            "Ms. Emily Chen",
            "Practical introduction to contemporary painting, sculpture, and digital media.",
            2,
        ),
        (
            "c5",
            "Biology Foundations",
            "BIO101",
            CourseCategory::Science,
            "Dr. Sarah Wilson",
            "Introduction to cellular biology, genetics, and ecology principles.",
            3,
        ),
    ]
    .into_iter()
    .map(
        |(id, title, code, category, teacher, description, credits)| Course {
            id: id.to_string(),
            title: title.to_string(),
            code: code.to_string(),
            category,
            teacher: teacher.to_string(),
            description: description.to_string(),
            credits,
        },
    )
    .collect()
}

/// The three default events.
#[must_use]
pub fn events() -> Vec<Event> {
    [
        (
            "ev-1",
            "Annual Sports Meet",
            "Oct 15, 2023",
            "09:00 AM",
            "Main Stadium",
            "Celebrate athletic excellence with our yearly inter-house competitions.",
        ),
        (
            "ev-2",
            "Parent-Teacher Meeting",
            "Oct 20, 2023",
            "02:00 PM",
            "Hall A",
            "Review student progress and academic goals for the upcoming term.",
        ),
        (
            "ev-3",
            "Science Fair",
            "Oct 25, 2023",
            "10:30 AM",
            "Science Lab",
            "Innovative projects displayed by our students from grades 9 to 12.",
        ),
    ]
    .into_iter()
    .map(|(id, title, date, time, location, description)| Event {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        description: description.to_string(),
    })
    .collect()
}
