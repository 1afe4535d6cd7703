// src/services/mod.rs

//! External-API and selection services.

pub mod canvas;
pub mod syllabus;

pub use canvas::CanvasClient;
pub use syllabus::SyllabusSelection;
