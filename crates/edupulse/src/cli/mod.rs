//! Command-line interface for edupulse.
//!
//! This module provides the CLI structure and command handlers for the
//! `edupulse` binary. Each entity view is a subcommand group.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AdmitCommand, AttendanceCommand, CategoryArg, ChatCommand, CommitArgs, ConfigCommand,
    CourseAddArgs, CourseCommand, CourseUpdateArgs, EventAddArgs, EventCommand, EventUpdateArgs,
    ListArgs, OutputFormat, RemoveArgs, SchoolCommand, ShowArgs, StatusCommand, StudentAddArgs,
    StudentCommand, StudentUpdateArgs, TeacherAddArgs, TeacherCommand, TeacherUpdateArgs,
};

/// edupulse - School administration from the terminal
///
/// Manage students, teachers, courses, events and daily attendance, and ask
/// the assistant for student reports, course syllabi or general advice.
#[derive(Debug, Parser)]
#[command(name = "edupulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage students
    #[command(subcommand)]
    Students(StudentCommand),

    /// Manage teachers
    #[command(subcommand)]
    Teachers(TeacherCommand),

    /// Manage the course catalog
    #[command(subcommand)]
    Courses(CourseCommand),

    /// Manage calendar events
    #[command(subcommand)]
    Events(EventCommand),

    /// Admit a new student through the admission form
    Admit(AdmitCommand),

    /// Take today's attendance
    #[command(subcommand)]
    Attendance(AttendanceCommand),

    /// View or change school settings
    #[command(subcommand)]
    School(SchoolCommand),

    /// Show headline figures
    Dashboard {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Generate a performance summary for a student
    Report {
        /// Student id
        student_id: String,
    },

    /// Generate a syllabus for a course
    Syllabus {
        /// Course id
        course_id: String,
    },

    /// Talk to the assistant
    Chat(ChatCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "edupulse");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(
            parse(&["edupulse", "-q", "dashboard"]).verbosity(),
            crate::logging::Verbosity::Quiet
        );
        assert_eq!(
            parse(&["edupulse", "dashboard"]).verbosity(),
            crate::logging::Verbosity::Normal
        );
        assert_eq!(
            parse(&["edupulse", "-v", "dashboard"]).verbosity(),
            crate::logging::Verbosity::Verbose
        );
        assert_eq!(
            parse(&["edupulse", "-vv", "dashboard"]).verbosity(),
            crate::logging::Verbosity::Trace
        );
    }

    #[test]
    fn test_parse_students_add() {
        let cli = parse(&[
            "edupulse",
            "students",
            "add",
            "--name",
            "Nora Lee",
            "--subjects",
            "Math, Art",
        ]);
        match cli.command {
            Command::Students(StudentCommand::Add(args)) => {
                assert_eq!(args.name, "Nora Lee");
                assert_eq!(args.grade, "9th");
                assert_eq!(args.subjects, "Math, Art");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_students_update_rejects_bad_attendance() {
        let result = Cli::try_parse_from([
            "edupulse",
            "students",
            "update",
            "1",
            "--attendance",
            "120",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_courses_remove() {
        let cli = parse(&["edupulse", "courses", "remove", "c3", "--yes"]);
        match cli.command {
            Command::Courses(CourseCommand::Remove(args)) => {
                assert_eq!(args.id, "c3");
                assert!(args.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_course_category() {
        let cli = parse(&[
            "edupulse",
            "courses",
            "add",
            "--title",
            "Yoga",
            "--code",
            "PE100",
            "--teacher",
            "Mr. Fit",
            "--category",
            "physical-ed",
        ]);
        assert!(matches!(
            cli.command,
            Command::Courses(CourseCommand::Add(CourseAddArgs {
                category: CategoryArg::PhysicalEd,
                ..
            }))
        ));
    }

    #[test]
    fn test_parse_events_list_json() {
        let cli = parse(&["edupulse", "events", "list", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Command::Events(EventCommand::List(ListArgs {
                format: OutputFormat::Json
            }))
        ));
    }

    #[test]
    fn test_parse_attendance_toggle_with_commit() {
        let cli = parse(&[
            "edupulse",
            "attendance",
            "toggle",
            "2",
            "5",
            "--commit",
            "--date",
            "2023-10-16",
        ]);
        match cli.command {
            Command::Attendance(AttendanceCommand::Toggle { ids, commit }) => {
                assert_eq!(ids, vec!["2", "5"]);
                assert!(commit.commit);
                assert_eq!(
                    commit.date,
                    chrono::NaiveDate::from_ymd_opt(2023, 10, 16)
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_attendance_date_requires_commit() {
        let result =
            Cli::try_parse_from(["edupulse", "attendance", "mark-all", "--date", "2023-10-16"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_attendance_commit_lists() {
        let cli = parse(&[
            "edupulse",
            "attendance",
            "commit",
            "--absent",
            "1,2",
            "--late",
            "3",
        ]);
        match cli.command {
            Command::Attendance(AttendanceCommand::Commit { absent, late, date }) => {
                assert_eq!(absent, vec!["1", "2"]);
                assert_eq!(late, vec!["3"]);
                assert!(date.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_admit() {
        let cli = parse(&["edupulse", "admit", "--name", "Omar Diaz"]);
        match cli.command {
            Command::Admit(args) => assert_eq!(args.grade, "9th Grade"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report() {
        let cli = parse(&["edupulse", "report", "1"]);
        assert!(matches!(cli.command, Command::Report { student_id } if student_id == "1"));
    }

    #[test]
    fn test_parse_chat_one_shot() {
        let cli = parse(&["edupulse", "chat", "-m", "hello"]);
        assert!(matches!(
            cli.command,
            Command::Chat(ChatCommand { message: Some(ref m) }) if m == "hello"
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["edupulse", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn test_parse_school_set() {
        let cli = parse(&["edupulse", "school", "set", "--term", "Fall 2024"]);
        assert!(matches!(
            cli.command,
            Command::School(SchoolCommand::Set { term: Some(_), name: None, email: None })
        ));
    }
}
