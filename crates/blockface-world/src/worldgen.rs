use blockface_geom::FrontFace;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SEED: i32 = 1234;
pub const DEFAULT_EXTENT: u32 = 32;
pub const DEFAULT_THRESHOLD: f32 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("grid extent must be positive, got {0}")]
    NonPositiveExtent(u32),
    #[error("grid dims must all be positive, got {0:?}")]
    NonPositiveDims([u32; 3]),
    #[error("occupancy threshold must be finite, got {0}")]
    NonFiniteThreshold(f32),
    #[error("noise frequency must be finite and positive, got {0}")]
    BadFrequency(f32),
    #[error("noise octaves must be at least 1, got {0}")]
    BadOctaves(u32),
    #[error("fractal {name} must be finite, got {value}")]
    NonFiniteFractal { name: &'static str, value: f32 },
}

/// Raw on-disk configuration. Every field is optional; see [`GenParams`] for the validated form.
#[derive(Clone, Debug, Deserialize)]
pub struct GenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub noise: Noise,
    #[serde(default)]
    pub mesh: Mesh,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            grid: Grid::default(),
            noise: Noise::default(),
            mesh: Mesh::default(),
        }
    }
}

fn default_seed() -> i32 {
    DEFAULT_SEED
}

#[derive(Clone, Debug, Deserialize)]
pub struct Grid {
    #[serde(default = "default_extent")]
    pub extent: u32,
    /// Per-axis override of `extent`, as `[x, y, z]`.
    #[serde(default)]
    pub dims: Option<[u32; 3]>,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}
fn default_extent() -> u32 {
    DEFAULT_EXTENT
}
fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}
impl Default for Grid {
    fn default() -> Self {
        Self {
            extent: default_extent(),
            dims: None,
            threshold: default_threshold(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "d_oct")]
    pub octaves: u32,
    #[serde(default = "d_pers")]
    pub persistence: f32,
    #[serde(default = "d_lac")]
    pub lacunarity: f32,
}
fn default_frequency() -> f32 {
    0.05
}
fn d_oct() -> u32 {
    3
}
fn d_pers() -> f32 {
    0.5
}
fn d_lac() -> f32 {
    2.0
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            octaves: d_oct(),
            persistence: d_pers(),
            lacunarity: d_lac(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub front_face: FrontFace,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Worker count for parallel passes; 0 lets rayon decide.
    #[serde(default)]
    pub threads: usize,
}
fn default_parallel() -> bool {
    true
}
impl Default for Mesh {
    fn default() -> Self {
        Self {
            front_face: FrontFace::default(),
            parallel: default_parallel(),
            threads: 0,
        }
    }
}

/// Validated generation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GenParams {
    pub seed: i32,
    pub dims: [u32; 3],
    pub threshold: f32,
    pub frequency: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub front_face: FrontFace,
    pub parallel: bool,
    pub threads: usize,
}

impl Default for GenParams {
    fn default() -> Self {
        let n = Noise::default();
        let m = Mesh::default();
        Self {
            seed: DEFAULT_SEED,
            dims: [DEFAULT_EXTENT; 3],
            threshold: DEFAULT_THRESHOLD,
            frequency: n.frequency,
            octaves: n.octaves,
            persistence: n.persistence,
            lacunarity: n.lacunarity,
            front_face: m.front_face,
            parallel: m.parallel,
            threads: m.threads,
        }
    }
}

impl GenParams {
    pub fn from_config(cfg: &GenConfig) -> Result<Self, ConfigError> {
        let dims = match cfg.grid.dims {
            Some(d) => {
                if d.contains(&0) {
                    return Err(ConfigError::NonPositiveDims(d));
                }
                d
            }
            None => {
                if cfg.grid.extent == 0 {
                    return Err(ConfigError::NonPositiveExtent(cfg.grid.extent));
                }
                [cfg.grid.extent; 3]
            }
        };
        if !cfg.grid.threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold(cfg.grid.threshold));
        }
        let n = &cfg.noise;
        if !(n.frequency.is_finite() && n.frequency > 0.0) {
            return Err(ConfigError::BadFrequency(n.frequency));
        }
        if n.octaves == 0 {
            return Err(ConfigError::BadOctaves(n.octaves));
        }
        for (name, value) in [("persistence", n.persistence), ("lacunarity", n.lacunarity)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteFractal { name, value });
            }
        }
        Ok(Self {
            seed: cfg.seed,
            dims,
            threshold: cfg.grid.threshold,
            frequency: n.frequency,
            octaves: n.octaves,
            persistence: n.persistence,
            lacunarity: n.lacunarity,
            front_face: cfg.mesh.front_face,
            parallel: cfg.mesh.parallel,
            threads: cfg.mesh.threads,
        })
    }

    /// Total lattice cells, or `None` if the product overflows `usize`.
    #[inline]
    pub fn cell_count(&self) -> Option<usize> {
        self.dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d as usize))
    }
}

pub fn parse_config(s: &str) -> Result<GenConfig, ConfigError> {
    Ok(toml::from_str(s)?)
}

pub fn load_config_from_path(path: &Path) -> Result<GenConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&s)
}

pub fn load_params_from_path(path: &Path) -> Result<GenParams, ConfigError> {
    GenParams::from_config(&load_config_from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse_config("").unwrap();
        let p = GenParams::from_config(&cfg).unwrap();
        assert_eq!(p.seed, 1234);
        assert_eq!(p.dims, [32, 32, 32]);
        assert_eq!(p.threshold, 0.1);
        assert_eq!(p.front_face, FrontFace::CounterClockwise);
        assert!(p.parallel);
        assert_eq!(p.cell_count(), Some(32 * 32 * 32));
        assert_eq!(p, GenParams::default());
    }

    #[test]
    fn dims_override_extent() {
        let cfg = parse_config(
            r#"
            seed = 7
            [grid]
            extent = 4
            dims = [2, 1, 1]
            threshold = -0.25
            [mesh]
            front_face = "cw"
            parallel = false
            threads = 3
            "#,
        )
        .unwrap();
        let p = GenParams::from_config(&cfg).unwrap();
        assert_eq!(p.seed, 7);
        assert_eq!(p.dims, [2, 1, 1]);
        assert_eq!(p.threshold, -0.25);
        assert_eq!(p.front_face, FrontFace::Clockwise);
        assert!(!p.parallel);
        assert_eq!(p.threads, 3);
    }

    #[test]
    fn rejects_zero_extent_and_dims() {
        let mut cfg = GenConfig::default();
        cfg.grid.extent = 0;
        assert!(matches!(
            GenParams::from_config(&cfg),
            Err(ConfigError::NonPositiveExtent(0))
        ));
        cfg.grid.dims = Some([4, 0, 4]);
        assert!(matches!(
            GenParams::from_config(&cfg),
            Err(ConfigError::NonPositiveDims([4, 0, 4]))
        ));
    }

    #[test]
    fn rejects_non_finite_threshold() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut cfg = GenConfig::default();
            cfg.grid.threshold = bad;
            assert!(matches!(
                GenParams::from_config(&cfg),
                Err(ConfigError::NonFiniteThreshold(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_noise() {
        let mut cfg = GenConfig::default();
        cfg.noise.frequency = 0.0;
        assert!(matches!(
            GenParams::from_config(&cfg),
            Err(ConfigError::BadFrequency(_))
        ));
        let mut cfg = GenConfig::default();
        cfg.noise.octaves = 0;
        assert!(matches!(
            GenParams::from_config(&cfg),
            Err(ConfigError::BadOctaves(0))
        ));
        let mut cfg = GenConfig::default();
        cfg.noise.lacunarity = f32::NAN;
        assert!(matches!(
            GenParams::from_config(&cfg),
            Err(ConfigError::NonFiniteFractal { name: "lacunarity", .. })
        ));
    }

    #[test]
    fn front_face_names_map_to_conventions() {
        let ccw = parse_config("[mesh]\nfront_face = \"ccw\"").unwrap();
        assert_eq!(ccw.mesh.front_face, FrontFace::CounterClockwise);
        let cw = parse_config("[mesh]\nfront_face = \"cw\"").unwrap();
        assert_eq!(cw.mesh.front_face, FrontFace::Clockwise);
        assert!(parse_config("[mesh]\nfront_face = \"Clockwise\"").is_err());
    }

    #[test]
    fn unknown_winding_is_a_parse_error() {
        let err = parse_config("[mesh]\nfront_face = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_params_from_path(Path::new("/nonexistent/blockface.toml")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/blockface.toml"), "{msg}");
    }
}
