//! mnemo-report: progress report generation.

pub mod html;
