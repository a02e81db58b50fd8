//! Process lookup module
//!
//! Resolves a human-supplied name to a live OS process and provides the
//! cheap pid-only liveness probe the scheduler uses between restarts.

pub mod locator;


pub use locator::ProcessLocator;
