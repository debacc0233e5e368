//! Input processing module
//! Handles file detection, resume text extraction and job corpus loading

pub mod file_detector;
pub mod job_loader;
pub mod manager;
pub mod text_extractor;

pub use job_loader::{JobLoader, JobRecord};
pub use manager::InputManager;
