//! Density sampling and generation parameters.
#![forbid(unsafe_code)]

pub mod density;
pub mod worldgen;

pub use density::{DensityError, DensitySampler, MAX_COORD, NoiseDensity};
pub use worldgen::{
    ConfigError, DEFAULT_EXTENT, DEFAULT_SEED, DEFAULT_THRESHOLD, GenConfig, GenParams,
    load_config_from_path, load_params_from_path, parse_config,
};
