//! Movpress batch video re-encoder library
//!
//! A command-line tool that scans a directory for `.mov` files, re-encodes
//! each one to HEVC with an external encoder, reports progress parsed from
//! the encoder's status stream, and moves the original to the system trash
//! once the encode succeeds.

pub mod adapters;
pub mod batch;
pub mod cli;
pub mod engine;
pub mod error;
pub mod ports;
pub mod probe;
pub mod signals;
pub mod utils;

// Re-export commonly used types
pub use batch::{BatchRunner, BatchSummary};
pub use engine::{EncodeProfile, EncodeSession, SessionOutcome};
pub use error::{MovpressError, MovpressResult};
pub use signals::{ActiveProcessSet, SignalCoordinator};
