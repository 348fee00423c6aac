//! Shared types, data and plumbing behind the detectors.

pub mod brands;
pub mod engine;
pub mod error;
pub mod hash;
pub mod output;
pub mod similarity;
pub mod time;
pub mod types;
