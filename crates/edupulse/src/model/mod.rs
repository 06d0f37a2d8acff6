//! Core record types for edupulse.
//!
//! Entities are plain records with no behaviour beyond id access and a
//! normalization hook. Field names serialize as camelCase to stay compatible
//! with the values the browser dashboard stored.

mod attendance;
mod course;
mod event;
mod school;
mod student;
mod teacher;

use std::fmt::{self, Debug, Display};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use course::{Course, CourseCategory, CourseDraft};
pub use event::{format_display_date, Event, EventDraft};
pub use school::SchoolConfig;
pub use student::{derive_email, parse_subjects, AdmissionApplication, Student, StudentDraft};
pub use teacher::{Teacher, TeacherDraft};

/// Domain used for synthesized email addresses.
pub const EMAIL_DOMAIN: &str = "school.edu";

/// The kinds of entity kept in list-detail collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// [`Student`] records.
    Student,
    /// [`Teacher`] records.
    Teacher,
    /// [`Course`] records.
    Course,
    /// [`Event`] records.
    Event,
}

impl EntityKind {
    /// Prefix used when generating ids.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Student => "s",
            Self::Teacher => "t",
            Self::Course => "c",
            Self::Event => "ev",
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Course => "course",
            Self::Event => "event",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record stored in a list-detail collection.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Which kind of entity this is.
    const KIND: EntityKind;

    /// Storage slot holding the collection.
    const SLOT: &'static str;

    /// Dataset served when the slot is absent or unreadable.
    fn fallback() -> Vec<Self>;

    /// The entity's id, unique within its collection.
    fn id(&self) -> &str;

    /// Overwrite the id. Only collections call this, to keep ids immutable
    /// across updates.
    fn set_id(&mut self, id: String);

    /// Re-derive presentation fields after an edit.
    fn normalize(&mut self) {}

    /// Check required fields after an edit.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first blank field.
    fn validate(&self) -> crate::Result<()> {
        Ok(())
    }
}

/// Form input that becomes an entity once it has an id.
pub trait Draft {
    /// The entity this draft builds.
    type Entity: Entity;

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing field.
    fn validate(&self) -> crate::Result<()> {
        Ok(())
    }

    /// Build the entity, deriving any defaulted fields.
    fn build(self, id: String) -> Self::Entity;
}

/// Generate a fresh id: `<prefix>-<unix millis>-<5 random chars>`.
///
/// The random suffix keeps two ids minted in the same millisecond apart.
#[must_use]
pub fn generate_id(kind: EntityKind) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        kind.id_prefix(),
        Utc::now().timestamp_millis(),
        &suffix[..5]
    )
}

pub(crate) fn require(field: &'static str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        Err(crate::Error::validation(field, "must not be blank"))
    } else {
        Ok(())
    }
}
