//! Coarse-to-fine correlative scan matching.
//!
//! ## Pipeline
//!
//! ```text
//!  Reading (estimated pose)
//!       │
//!       ▼
//! ┌──────────────────────┐   ┌──────────────────┐   ┌───────────────────┐
//! │ SearchSpaceBuilder   │──▶│  ScanProjector   │──▶│ CorrelationSearch │
//! │ occupied/empty fields│   │ per rotation     │   │ rotation × offset │
//! └──────────────────────┘   └──────────────────┘   └─────────┬─────────┘
//!          ▲                                                   │
//!          └──────── fine stage, re-centered ◀─────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`SearchSpaceBuilder`] | Map region → smoothed log-likelihood fields |
//! | [`ScanProjector`] | Reading + rotation → deduplicated field indices |
//! | [`CorrelationSearch`] | Exhaustive sweep with first-max tie-break |
//! | [`CoarseToFineMatcher`] | Two-stage state machine |
//! | [`OccupancyMap`] | Map interface the matcher consumes |
//! | [`SearchObserver`] | Optional hooks for debug tooling |
//!
//! ## Scoring
//!
//! ```text
//! score(θ, ox, oy) = Σ occupied_field[p + o]  for p in endpoints(θ)
//!                  + Σ empty_field[p + o]     for p in traversed(θ)
//! ```
//!
//! Indices outside a field count as ln(0.01).
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_match::matching::{CoarseToFineMatcher, MatcherConfig};
//!
//! let matcher = CoarseToFineMatcher::new(MatcherConfig::default())?;
//! let corrected = matcher.match_scan(&mut grid, &estimate, index)?;
//! grid.commit(&corrected)?;
//! ```

mod config;
mod correlation;
mod matcher;
mod observer;
mod projector;
mod search_space;
pub mod smoothing;
mod traits;
mod types;

pub use config::MatcherConfig;
pub use correlation::{Candidate, CorrelationSearch, SearchSummary, SearchWindow, limit_rotations};
pub use matcher::CoarseToFineMatcher;
pub use observer::{NoopObserver, SearchObserver};
pub use projector::{FieldPoints, ScanProjector, unique_indices};
pub use search_space::{LOG_CERTAIN, LOG_UNLIKELY, SearchField, SearchSpace, SearchSpaceBuilder};
pub use traits::OccupancyMap;
pub use types::{MatchResult, MatchStage, ScanMatchOutcome};
