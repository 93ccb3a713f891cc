//! Roster: Student Records and Class Analytics
//!
//! A flat-file student record store with a pure aggregation layer on top,
//! plus insight reports generated remotely or from local templates.

pub mod analytics;
pub mod config;
pub mod error;
pub mod insight;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod types;
pub mod validation;
