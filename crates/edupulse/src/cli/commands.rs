//! CLI command definitions.
//!
//! Each entity view gets the same five verbs. Add arguments convert into the
//! matching draft; update arguments apply only the fields that were given.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::model::{
    parse_subjects, AdmissionApplication, Course, CourseCategory, CourseDraft, Event, EventDraft,
    Student, StudentDraft, Teacher, TeacherDraft,
};

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Arguments shared by every `list` command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments shared by every `show` command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Entity id
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments shared by every `remove` command.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Entity id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

macro_rules! entity_command {
    ($name:ident, $doc:literal, $add:ty, $update:ty) => {
        #[doc = $doc]
        #[derive(Debug, Subcommand)]
        pub enum $name {
            /// List all entries, newest first
            List(ListArgs),

            /// Show one entry
            Show(ShowArgs),

            /// Add an entry
            Add($add),

            /// Change fields of an entry
            Update($update),

            /// Remove an entry (asks for confirmation)
            Remove(RemoveArgs),
        }
    };
}

entity_command!(StudentCommand, "Student view commands.", StudentAddArgs, StudentUpdateArgs);
entity_command!(TeacherCommand, "Teacher view commands.", TeacherAddArgs, TeacherUpdateArgs);
entity_command!(CourseCommand, "Course view commands.", CourseAddArgs, CourseUpdateArgs);
entity_command!(EventCommand, "Event view commands.", EventAddArgs, EventUpdateArgs);

/// Arguments for adding a student.
#[derive(Debug, Args)]
pub struct StudentAddArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Grade label
    #[arg(long, default_value = "9th")]
    pub grade: String,

    /// Email (derived from the name when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Comma-separated subjects
    #[arg(long, default_value = "")]
    pub subjects: String,
}

impl From<StudentAddArgs> for StudentDraft {
    fn from(args: StudentAddArgs) -> Self {
        Self {
            name: args.name,
            grade: args.grade,
            email: args.email,
            subjects: parse_subjects(&args.subjects),
        }
    }
}

/// Arguments for updating a student.
#[derive(Debug, Args)]
pub struct StudentUpdateArgs {
    /// Student id
    pub id: String,

    /// New full name
    #[arg(long)]
    pub name: Option<String>,

    /// New grade label
    #[arg(long)]
    pub grade: Option<String>,

    /// New email
    #[arg(long)]
    pub email: Option<String>,

    /// New comma-separated subjects
    #[arg(long)]
    pub subjects: Option<String>,

    /// Attendance percentage
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub attendance: Option<u8>,

    /// Grade point average, 0.0 to 4.0
    #[arg(long, value_parser = parse_gpa)]
    pub gpa: Option<f64>,
}

impl StudentUpdateArgs {
    /// Copy the given fields onto `student`.
    pub fn apply(self, student: &mut Student) {
        set(&mut student.name, self.name);
        set(&mut student.grade, self.grade);
        set(&mut student.email, self.email);
        if let Some(subjects) = self.subjects {
            student.subjects = parse_subjects(&subjects);
        }
        set(&mut student.attendance, self.attendance);
        set(&mut student.gpa, self.gpa);
    }
}

/// Arguments for hiring a teacher.
#[derive(Debug, Args)]
pub struct TeacherAddArgs {
    /// Full name, including any title
    #[arg(long)]
    pub name: String,

    /// Subject or department
    #[arg(long, default_value = "Mathematics")]
    pub subject: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Years of experience
    #[arg(long, default_value_t = 1)]
    pub experience: u32,
}

impl From<TeacherAddArgs> for TeacherDraft {
    fn from(args: TeacherAddArgs) -> Self {
        Self {
            name: args.name,
            subject: args.subject,
            email: args.email,
            experience: args.experience,
        }
    }
}

/// Arguments for updating a teacher.
#[derive(Debug, Args)]
pub struct TeacherUpdateArgs {
    /// Teacher id
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New subject
    #[arg(long)]
    pub subject: Option<String>,

    /// New email
    #[arg(long)]
    pub email: Option<String>,

    /// New years of experience
    #[arg(long)]
    pub experience: Option<u32>,
}

impl TeacherUpdateArgs {
    /// Copy the given fields onto `teacher`.
    pub fn apply(self, teacher: &mut Teacher) {
        set(&mut teacher.name, self.name);
        set(&mut teacher.subject, self.subject);
        set(&mut teacher.email, self.email);
        set(&mut teacher.experience, self.experience);
    }
}

/// Course category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Natural sciences
    Science,
    /// Arts
    Arts,
    /// Mathematics
    Mathematics,
    /// Humanities
    Humanities,
    /// Physical education
    PhysicalEd,
}

impl From<CategoryArg> for CourseCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Science => Self::Science,
            CategoryArg::Arts => Self::Arts,
            CategoryArg::Mathematics => Self::Mathematics,
            CategoryArg::Humanities => Self::Humanities,
            CategoryArg::PhysicalEd => Self::PhysicalEd,
        }
    }
}

/// Arguments for creating a course.
#[derive(Debug, Args)]
pub struct CourseAddArgs {
    /// Course title
    #[arg(long)]
    pub title: String,

    /// Catalog code, e.g. PHY301
    #[arg(long)]
    pub code: String,

    /// Category
    #[arg(long, value_enum, default_value = "science")]
    pub category: CategoryArg,

    /// Credit count
    #[arg(long, default_value_t = 3)]
    pub credits: u32,

    /// Teacher's name
    #[arg(long)]
    pub teacher: String,

    /// Short description
    #[arg(long, default_value = "")]
    pub description: String,
}

impl From<CourseAddArgs> for CourseDraft {
    fn from(args: CourseAddArgs) -> Self {
        Self {
            title: args.title,
            code: args.code,
            category: args.category.into(),
            credits: args.credits,
            teacher: args.teacher,
            description: args.description,
        }
    }
}

/// Arguments for updating a course.
#[derive(Debug, Args)]
pub struct CourseUpdateArgs {
    /// Course id
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New catalog code
    #[arg(long)]
    pub code: Option<String>,

    /// New category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// New credit count
    #[arg(long)]
    pub credits: Option<u32>,

    /// New teacher's name
    #[arg(long)]
    pub teacher: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,
}

impl CourseUpdateArgs {
    /// Copy the given fields onto `course`.
    pub fn apply(self, course: &mut Course) {
        set(&mut course.title, self.title);
        set(&mut course.code, self.code);
        set(&mut course.category, self.category.map(Into::into));
        set(&mut course.credits, self.credits);
        set(&mut course.teacher, self.teacher);
        set(&mut course.description, self.description);
    }
}

/// Arguments for scheduling an event.
#[derive(Debug, Args)]
pub struct EventAddArgs {
    /// Event title
    #[arg(long)]
    pub title: String,

    /// Date, e.g. 2023-10-15
    #[arg(long)]
    pub date: String,

    /// Time, e.g. "09:00 AM"
    #[arg(long, default_value = "")]
    pub time: String,

    /// Venue
    #[arg(long)]
    pub location: String,

    /// Short description
    #[arg(long, default_value = "")]
    pub description: String,
}

impl From<EventAddArgs> for EventDraft {
    fn from(args: EventAddArgs) -> Self {
        Self {
            title: args.title,
            date: args.date,
            time: args.time,
            location: args.location,
            description: args.description,
        }
    }
}

/// Arguments for updating an event.
#[derive(Debug, Args)]
pub struct EventUpdateArgs {
    /// Event id
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New date
    #[arg(long)]
    pub date: Option<String>,

    /// New time
    #[arg(long)]
    pub time: Option<String>,

    /// New venue
    #[arg(long)]
    pub location: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,
}

impl EventUpdateArgs {
    /// Copy the given fields onto `event`.
    pub fn apply(self, event: &mut Event) {
        set(&mut event.title, self.title);
        set(&mut event.date, self.date);
        set(&mut event.time, self.time);
        set(&mut event.location, self.location);
        set(&mut event.description, self.description);
    }
}

/// Admission form arguments.
#[derive(Debug, Args)]
pub struct AdmitCommand {
    /// Applicant's full name
    #[arg(long)]
    pub name: String,

    /// Requested grade, e.g. "10th Grade"
    #[arg(long, default_value = "9th Grade")]
    pub grade: String,

    /// Applicant's email (derived from the name when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Date of birth
    #[arg(long)]
    pub date_of_birth: Option<String>,

    /// Guardian's name
    #[arg(long)]
    pub guardian: Option<String>,

    /// Guardian's relationship to the applicant
    #[arg(long)]
    pub relationship: Option<String>,

    /// Guardian's phone number
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<AdmitCommand> for AdmissionApplication {
    fn from(args: AdmitCommand) -> Self {
        Self {
            name: args.name,
            grade: args.grade,
            email: args.email,
            date_of_birth: args.date_of_birth,
            guardian_name: args.guardian,
            relationship: args.relationship,
            phone: args.phone,
        }
    }
}

/// Attendance register commands.
///
/// The register starts with everyone present each time; pass `--commit` to
/// record the result in the ledger.
#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// Show today's register
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Flip students between present and absent
    Toggle {
        /// Student ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// Ledger commit options
        #[command(flatten)]
        commit: CommitArgs,
    },

    /// Mark every student present
    MarkAll {
        /// Ledger commit options
        #[command(flatten)]
        commit: CommitArgs,
    },

    /// Record a register in the ledger
    Commit {
        /// Students to mark absent
        #[arg(long, value_delimiter = ',')]
        absent: Vec<String>,

        /// Students to mark late
        #[arg(long, value_delimiter = ',')]
        late: Vec<String>,

        /// Register date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show committed registers
    History {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Optional ledger commit after a register edit.
#[derive(Debug, Args)]
pub struct CommitArgs {
    /// Record the register in the ledger
    #[arg(long)]
    pub commit: bool,

    /// Register date (defaults to today)
    #[arg(long, requires = "commit")]
    pub date: Option<NaiveDate>,
}

/// School settings commands.
#[derive(Debug, Subcommand)]
pub enum SchoolCommand {
    /// Show the settings
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change settings
    Set {
        /// School name
        #[arg(long)]
        name: Option<String>,

        /// Current term label
        #[arg(long)]
        term: Option<String>,

        /// Notification email
        #[arg(long)]
        email: Option<String>,
    },
}

/// Chat command arguments.
#[derive(Debug, Args)]
pub struct ChatCommand {
    /// Send one message and exit instead of starting a session
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn parse_gpa(input: &str) -> Result<f64, String> {
    let gpa: f64 = input
        .parse()
        .map_err(|_| format!("'{input}' is not a number"))?;
    if (0.0..=4.0).contains(&gpa) {
        Ok(gpa)
    } else {
        Err("GPA must be between 0.0 and 4.0".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_category_arg_conversion() {
        assert_eq!(
            CourseCategory::from(CategoryArg::PhysicalEd),
            CourseCategory::PhysicalEd
        );
        assert_eq!(
            CourseCategory::from(CategoryArg::Humanities),
            CourseCategory::Humanities
        );
    }

    #[test]
    fn test_student_add_args_into_draft() {
        let draft: StudentDraft = StudentAddArgs {
            name: "Nora Lee".to_string(),
            grade: "9th".to_string(),
            email: None,
            subjects: "Math, Art,".to_string(),
        }
        .into();

        assert_eq!(draft.subjects, vec!["Math", "Art"]);
        assert!(draft.email.is_none());
    }

    #[test]
    fn test_student_update_applies_given_fields() {
        let mut student = defaults::students()[0].clone();
        StudentUpdateArgs {
            id: student.id.clone(),
            name: None,
            grade: Some("11th".to_string()),
            email: None,
            subjects: Some("Art".to_string()),
            attendance: Some(90),
            gpa: None,
        }
        .apply(&mut student);

        assert_eq!(student.name, "Alice Johnson");
        assert_eq!(student.grade, "11th");
        assert_eq!(student.subjects, vec!["Art"]);
        assert_eq!(student.attendance, 90);
        assert!((student.gpa - 3.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_course_update_category() {
        let mut course = defaults::courses()[0].clone();
        CourseUpdateArgs {
            id: course.id.clone(),
            title: None,
            code: None,
            category: Some(CategoryArg::Arts),
            credits: Some(5),
            teacher: None,
            description: None,
        }
        .apply(&mut course);

        assert_eq!(course.category, CourseCategory::Arts);
        assert_eq!(course.credits, 5);
        assert_eq!(course.code, "PHY301");
    }

    #[test]
    fn test_admit_args_into_application() {
        let application: AdmissionApplication = AdmitCommand {
            name: "Omar Diaz".to_string(),
            grade: "10th Grade".to_string(),
            email: None,
            date_of_birth: Some("2010-02-01".to_string()),
            guardian: Some("Lena Diaz".to_string()),
            relationship: Some("Mother".to_string()),
            phone: None,
        }
        .into();

        assert_eq!(application.guardian_name.as_deref(), Some("Lena Diaz"));
        assert_eq!(application.grade, "10th Grade");
    }

    #[test]
    fn test_parse_gpa() {
        assert!((parse_gpa("3.5").unwrap() - 3.5).abs() < f64::EPSILON);
        assert!(parse_gpa("4.5").is_err());
        assert!(parse_gpa("abc").is_err());
    }
}
