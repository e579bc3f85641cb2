use std::path::PathBuf;

use blockface_mesh::FrontFace;
use blockface_world::{ConfigError, GenConfig, GenParams, load_config_from_path};
use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FrontFaceArg {
    Ccw,
    Cw,
}

impl From<FrontFaceArg> for FrontFace {
    fn from(a: FrontFaceArg) -> Self {
        match a {
            FrontFaceArg::Ccw => FrontFace::CounterClockwise,
            FrontFaceArg::Cw => FrontFace::Clockwise,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "blockface",
    about = "Generate a face-culled voxel surface mesh from seeded noise"
)]
pub struct Args {
    /// TOML generation config; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i32>,
    /// Cubic grid extent (replaces any per-axis dims from the config)
    #[arg(long)]
    pub extent: Option<u32>,
    /// Cells with density strictly above this are solid
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<f32>,
    #[arg(long, value_enum)]
    pub front_face: Option<FrontFaceArg>,
    /// Run grid sampling and meshing on the calling thread only
    #[arg(long)]
    pub serial: bool,
    /// Worker threads for parallel passes (0 = rayon default)
    #[arg(long)]
    pub threads: Option<usize>,
    /// Write the mesh as Wavefront OBJ
    #[arg(long)]
    pub obj: Option<PathBuf>,
}

impl Args {
    /// Loads the config (or defaults), applies flag overrides, then validates.
    pub fn resolve_params(&self) -> Result<GenParams, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => load_config_from_path(path)?,
            None => GenConfig::default(),
        };
        self.apply_overrides(&mut cfg);
        GenParams::from_config(&cfg)
    }

    fn apply_overrides(&self, cfg: &mut GenConfig) {
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(extent) = self.extent {
            cfg.grid.extent = extent;
            cfg.grid.dims = None;
        }
        if let Some(t) = self.threshold {
            cfg.grid.threshold = t;
        }
        if let Some(ff) = self.front_face {
            cfg.mesh.front_face = ff.into();
        }
        if self.serial {
            cfg.mesh.parallel = false;
        }
        if let Some(n) = self.threads {
            cfg.mesh.threads = n;
        }
    }
}
