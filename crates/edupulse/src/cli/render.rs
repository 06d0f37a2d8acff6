//! Plain-text rendering of entity listings.

use std::fmt::Write as _;

use crate::model::{AttendanceRecord, Course, Event, Student, Teacher};

/// A record that can be shown as one table row.
pub trait Tabular {
    /// Column headings.
    fn headers() -> &'static [&'static str];

    /// Cell values, in heading order.
    fn cells(&self) -> Vec<String>;
}

impl Tabular for Student {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "GRADE", "ATTENDANCE", "GPA", "EMAIL", "SUBJECTS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.grade.clone(),
            format!("{}%", self.attendance),
            format!("{:.1}", self.gpa),
            self.email.clone(),
            self.subjects.join(", "),
        ]
    }
}

impl Tabular for Teacher {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "SUBJECT", "EMAIL", "EXPERIENCE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.subject.clone(),
            self.email.clone(),
            format!("{} yrs", self.experience),
        ]
    }
}

impl Tabular for Course {
    fn headers() -> &'static [&'static str] {
        &["ID", "CODE", "TITLE", "CATEGORY", "TEACHER", "CREDITS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.code.clone(),
            self.title.clone(),
            self.category.to_string(),
            self.teacher.clone(),
            self.credits.to_string(),
        ]
    }
}

impl Tabular for Event {
    fn headers() -> &'static [&'static str] {
        &["ID", "DATE", "TIME", "TITLE", "LOCATION"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.clone(),
            self.time.clone(),
            self.title.clone(),
            self.location.clone(),
        ]
    }
}

impl Tabular for AttendanceRecord {
    fn headers() -> &'static [&'static str] {
        &["ID", "STUDENT", "STATUS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.student_id.clone(),
            self.student_name.clone(),
            self.status.to_string(),
        ]
    }
}

/// Lay `rows` out in left-aligned columns under their headings.
#[must_use]
pub fn table<T: Tabular>(rows: &[T]) -> String {
    let headers = T::headers();
    let cells: Vec<Vec<String>> = rows.iter().map(Tabular::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, headers.iter().copied(), &widths);
    for row in &cells {
        write_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Render one record as `HEADING: value` lines.
#[must_use]
pub fn detail<T: Tabular>(record: &T) -> String {
    let headers = T::headers();
    let width = headers.iter().map(|h| h.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (header, cell) in headers.iter().zip(record.cells()) {
        let _ = writeln!(out, "{:<width$}  {cell}", format!("{header}:"), width = width + 1);
    }
    out
}
