//! Resource Monitoring Module
//!
//! Provides the process memory query used by the harness and a session
//! log for collecting labelled measurements during a run.
//!
//! # Components
//!
//! - [`MemorySource`] / [`ProcessMemory`]: resident memory readings
//! - [`Session`]: ordered log of measurements with summary and JSON export

pub mod memory;
pub mod session;

pub use memory::{current_memory_mb, MemorySource, ProcessMemory};
pub use session::{Session, SessionRecord};
