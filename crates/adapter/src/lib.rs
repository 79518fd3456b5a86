//! Adapter module - persistence DTOs, file store and effect dispatch.
//!
//! The bridge between the pure core and the outside world: serde shapes for
//! everything that survives a process restart, a JSON file store, and the
//! [`EffectSink`] binding the presentation layer implements.

pub mod effects;
pub mod protocol;
pub mod store;

pub use tui_simon_core as core;
pub use tui_simon_types as types;

pub use effects::{dispatch, EffectSink};
pub use protocol::{PatternMove, RecordedPattern, Settings, StatsProfile};
pub use store::{save_stats_best_effort, ProfileStore, StoreError};
