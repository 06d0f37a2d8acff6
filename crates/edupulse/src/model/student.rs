use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::storage::keys;

use super::{require, Draft, Entity, EntityKind, EMAIL_DOMAIN};

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique id.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Grade label, e.g. `10th`.
    pub grade: String,
    /// Attendance percentage, 0-100.
    pub attendance: u8,
    /// Grade point average, 0.0-4.0.
    pub gpa: f64,
    /// Contact email.
    pub email: String,
    /// Enrolled subjects, in display order.
    pub subjects: Vec<String>,
}

impl Student {
    /// One-line context handed to the report generator.
    #[must_use]
    pub fn report_context(&self) -> String {
        format!(
            "GPA: {}, Attendance: {}%, Subjects: {}",
            self.gpa,
            self.attendance,
            self.subjects.join(", ")
        )
    }
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;
    const SLOT: &'static str = keys::STUDENTS;

    fn fallback() -> Vec<Self> {
        defaults::students()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        if self.email.trim().is_empty() {
            self.email = derive_email(&self.name);
        }
    }

    fn validate(&self) -> crate::Result<()> {
        require("name", &self.name)?;
        require("grade", &self.grade)
    }
}

/// Input of the "add student" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    /// Full name (required).
    pub name: String,
    /// Grade label.
    pub grade: String,
    /// Email; derived from the name when blank.
    pub email: Option<String>,
    /// Subject names.
    pub subjects: Vec<String>,
}

impl Draft for StudentDraft {
    type Entity = Student;

    fn validate(&self) -> crate::Result<()> {
        require("name", &self.name)?;
        require("grade", &self.grade)
    }

    fn build(self, id: String) -> Student {
        let email = email_or_derived(self.email, &self.name);
        Student {
            id,
            name: self.name.trim().to_string(),
            grade: self.grade.trim().to_string(),
            attendance: 100,
            gpa: 4.0,
            email,
            subjects: self.subjects,
        }
    }
}

/// Input of the admission form.
///
/// Guardian details are collected by the form but not kept on the student
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionApplication {
    /// Applicant's full name (required).
    pub name: String,
    /// Requested grade, e.g. `10th Grade`. Only the first word is kept.
    pub grade: String,
    /// Email; derived from the name when blank.
    pub email: Option<String>,
    /// Date of birth as entered.
    pub date_of_birth: Option<String>,
    /// Guardian's name.
    pub guardian_name: Option<String>,
    /// Guardian's relationship to the applicant.
    pub relationship: Option<String>,
    /// Guardian's phone number.
    pub phone: Option<String>,
}

impl Draft for AdmissionApplication {
    type Entity = Student;

    fn validate(&self) -> crate::Result<()> {
        require("name", &self.name)
    }

    fn build(self, id: String) -> Student {
        let grade = self
            .grade
            .split_whitespace()
            .next()
            .unwrap_or("9th")
            .to_string();
        let email = email_or_derived(self.email, &self.name);
        Student {
            id,
            name: self.name.trim().to_string(),
            grade,
            attendance: 100,
            gpa: 4.0,
            email,
            subjects: vec!["Orientation".to_string()],
        }
    }
}

/// Synthesize a school email from a name: `"Nora Lee"` → `nora.lee@school.edu`.
#[must_use]
pub fn derive_email(name: &str) -> String {
    let local = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    format!("{local}@{EMAIL_DOMAIN}")
}

/// Split a comma-separated subject list, dropping blank entries.
#[must_use]
pub fn parse_subjects(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn email_or_derived(email: Option<String>, name: &str) -> String {
    email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| derive_email(name))
}
