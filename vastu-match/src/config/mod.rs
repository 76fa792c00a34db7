//! Configuration loading.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//! Every section is optional.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_match::config::VastuMatchConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = VastuMatchConfig::load_default()?;
//!
//! let grid = OccupancyGrid::new(config.to_map_config())?;
//! let matcher = CoarseToFineMatcher::new(config.matcher_config())?;
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   resolution: 0.02      # 2cm cells
//!   initial_width: 500    # 10m
//!
//! sensor:
//!   max_range: 10.0
//!   field_of_view: 3.14159
//!   samples_per_revolution: 180
//!
//! matcher:
//!   search_radius: 2.2
//!   search_half_angle: 0.35
//!   coarse_factor: 5
//! ```

mod error;
mod vastu;

pub use error::ConfigLoadError;
pub use vastu::VastuMatchConfig;
