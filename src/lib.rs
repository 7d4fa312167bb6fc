//! stats_scout Library
//!
//! Crawlers for graduate-student rosters, statistics department discovery
//! and PhD admission requirements.

pub mod config;
pub mod html;
pub mod http;
pub mod logging;
pub mod report;
pub mod requirements;
pub mod splitter;
pub mod storage;
pub mod students;
pub mod types;
pub mod verify;

pub use types::*;
