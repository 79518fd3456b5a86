//! Engine module - programmatic session control.
//!
//! Higher-level drivers over the core session, used by benchmarks,
//! integration tests and demo automation. No game rules live here; the
//! drivers only sequence core operations.

pub mod driver;

pub use driver::{complete_round, play_rounds, run_until_input, DriveError};
