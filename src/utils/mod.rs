//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command execution behind a swappable runner

pub mod command;
