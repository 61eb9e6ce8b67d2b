// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod history;
pub mod hypothesis;
pub mod metrics;
pub mod normalize;
pub mod score;
pub mod skew;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::EngineConfig;
pub use crate::hypothesis::{HypothesisRecord, Leaning};
pub use crate::normalize::{distribute, normalize, Bands, Degradation, Distribution};
pub use crate::score::{parse_points, RawScore};
pub use crate::skew::{derive_skew, derive_skew_with, SkewDirection, SkewResult, DEAD_BAND};
