// src/models/mod.rs

//! Domain models for the scraper application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod course;
mod report;

// Re-export all public types
pub use config::{ApiConfig, Config, ExtractConfig, FilterConfig, OutputConfig};
pub use course::{Assignment, Course, CourseDetail, FileMeta, Module, ModuleItem, ModuleItemType};
pub use report::{AssignmentReport, CourseReport, FinalReport, ModuleReport, UpcomingDue};
