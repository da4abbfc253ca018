//! Core library for taskdir: tasks grouped into categories, kept as JSON
//! collections on disk and optionally mirrored into a calendar.
//!
//! The two flows are independent. [`store::TaskStore`] is the source of
//! truth for tasks and categories. [`calendar::CalendarBridge`] copies a
//! freshly saved task into a calendar and reports how that went, without
//! ever changing what was stored.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod store;
pub mod utils;
pub mod views;

pub use error::{TaskDirError, TaskDirResult};
