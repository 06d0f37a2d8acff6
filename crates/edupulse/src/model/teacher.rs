use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::storage::keys;

use super::{require, Draft, Entity, EntityKind};

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique id.
    pub id: String,
    /// Full name, including any title.
    pub name: String,
    /// Subject or department.
    pub subject: String,
    /// Contact email.
    pub email: String,
    /// Years of experience.
    pub experience: u32,
}

impl Entity for Teacher {
    const KIND: EntityKind = EntityKind::Teacher;
    const SLOT: &'static str = keys::TEACHERS;

    fn fallback() -> Vec<Self> {
        defaults::teachers()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> crate::Result<()> {
        require("name", &self.name)?;
        require("subject", &self.subject)?;
        require("email", &self.email)
    }
}

/// Input of the "hire teacher" form. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherDraft {
    /// Full name.
    pub name: String,
    /// Subject or department.
    pub subject: String,
    /// Contact email.
    pub email: String,
    /// Years of experience.
    pub experience: u32,
}

impl Default for TeacherDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            subject: "Mathematics".to_string(),
            email: String::new(),
            experience: 1,
        }
    }
}

impl Draft for TeacherDraft {
    type Entity = Teacher;

    fn validate(&self) -> crate::Result<()> {
        require("name", &self.name)?;
        require("subject", &self.subject)?;
        require("email", &self.email)
    }

    fn build(self, id: String) -> Teacher {
        Teacher {
            id,
            name: self.name.trim().to_string(),
            subject: self.subject.trim().to_string(),
            email: self.email.trim().to_string(),
            experience: self.experience,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = TeacherDraft::default();
        assert_eq!(draft.subject, "Mathematics");
        assert_eq!(draft.experience, 1);
    }

    #[test]
    fn test_email_is_required() {
        let draft = TeacherDraft {
            name: "Ms. Ada Byron".to_string(),
            ..TeacherDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_build() {
        let teacher = TeacherDraft {
            name: " Ms. Ada Byron ".to_string(),
            subject: "Computer Science".to_string(),
            email: "byron@school.edu".to_string(),
            experience: 0,
        }
        .build("t-1".to_string());

        assert_eq!(teacher.id, "t-1");
        assert_eq!(teacher.name, "Ms. Ada Byron");
        assert_eq!(teacher.experience, 0);
    }
}
