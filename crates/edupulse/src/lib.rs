//! `edupulse` - A single-tenant school administration backend
//!
//! This library keeps students, teachers, courses, calendar events and the
//! daily attendance register in a key-value store, and wraps a generative
//! text service for student reports, course syllabi and assistant chat.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assistant;
pub mod attendance;
pub mod cli;
pub mod collection;
pub mod config;
pub mod confirm;
pub mod dashboard;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod model;
pub mod school;
pub mod storage;
pub mod view;

pub use collection::{EntityCollection, Synced};
pub use config::Config;
pub use dashboard::DashboardSummary;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use school::SchoolSettings;
pub use storage::{KeyValueStore, SharedStore, SqliteStore, StorageStats};
pub use view::{ListView, Removal};
