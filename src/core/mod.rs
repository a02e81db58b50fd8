//! Core types shared across the supervisor
//!
//! Holds configuration, the error type, and the data model
//! (supervised target, restart schedule).

pub mod config;
pub mod error;
pub mod types;
