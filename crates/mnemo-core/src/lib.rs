//! mnemo-core: item generation, scoring, mini-games and progress analytics.
//!
//! This crate defines the data model, the difficulty-scaled item generator,
//! session scoring, and the analytics that the `mnemo` CLI builds on.

pub mod challenges;
pub mod config;
pub mod error;
pub mod games;
pub mod generator;
pub mod model;
pub mod parser;
pub mod profile;
pub mod report;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod store;
pub mod tasks;
pub mod tips;
