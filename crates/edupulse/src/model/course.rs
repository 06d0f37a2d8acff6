use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::storage::keys;

use super::{require, Draft, Entity, EntityKind};

/// The fixed set of course categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseCategory {
    /// Natural sciences.
    #[default]
    Science,
    /// Visual and performing arts.
    Arts,
    /// Mathematics.
    Mathematics,
    /// History, languages and social studies.
    Humanities,
    /// Physical education.
    #[serde(rename = "Physical Ed")]
    PhysicalEd,
}

impl CourseCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Science,
        Self::Arts,
        Self::Mathematics,
        Self::Humanities,
        Self::PhysicalEd,
    ];

    /// The label used in storage and display.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Science => "Science",
            Self::Arts => "Arts",
            Self::Mathematics => "Mathematics",
            Self::Humanities => "Humanities",
            Self::PhysicalEd => "Physical Ed",
        }
    }
}

impl Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseCategory {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .or_else(|| {
                wanted
                    .eq_ignore_ascii_case("physical-ed")
                    .then_some(Self::PhysicalEd)
            })
            .ok_or_else(|| crate::Error::validation("category", format!("unknown category '{s}'")))
    }
}

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique id.
    pub id: String,
    /// Course title.
    pub title: String,
    /// Catalog code, e.g. `PHY301`.
    pub code: String,
    /// Category.
    pub category: CourseCategory,
    /// Teacher's name. Free text; not checked against the teacher list.
    pub teacher: String,
    /// Short description.
    pub description: String,
    /// Credit count.
    pub credits: u32,
}

impl Entity for Course {
    const KIND: EntityKind = EntityKind::Course;
    const SLOT: &'static str = keys::COURSES;

    fn fallback() -> Vec<Self> {
        defaults::courses()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> crate::Result<()> {
        require("title", &self.title)?;
        require("code", &self.code)?;
        require("teacher", &self.teacher)
    }
}

/// Input of the "create course" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    /// Course title (required).
    pub title: String,
    /// Catalog code (required).
    pub code: String,
    /// Category.
    pub category: CourseCategory,
    /// Credit count.
    pub credits: u32,
    /// Teacher's name (required).
    pub teacher: String,
    /// Short description.
    pub description: String,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            code: String::new(),
            category: CourseCategory::Science,
            credits: 3,
            teacher: String::new(),
            description: String::new(),
        }
    }
}

impl Draft for CourseDraft {
    type Entity = Course;

    fn validate(&self) -> crate::Result<()> {
        require("title", &self.title)?;
        require("code", &self.code)?;
        require("teacher", &self.teacher)
    }

    fn build(self, id: String) -> Course {
        Course {
            id,
            title: self.title.trim().to_string(),
            code: self.code.trim().to_string(),
            category: self.category,
            teacher: self.teacher.trim().to_string(),
            description: self.description,
            credits: self.credits,
        }
    }
}
