//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside cache instances.
//!
//! # Tasks
//! - Sweeper: removes expired entries from one cache at a fixed interval

mod sweeper;

pub use sweeper::{spawn_sweeper, Sweeper};
