use fastnoise_lite::{FastNoiseLite, NoiseType};
use thiserror::Error;

use crate::worldgen::GenParams;

/// Largest coordinate magnitude that converts to `f32` without rounding.
pub const MAX_COORD: i32 = 1 << 24;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DensityError {
    #[error("lattice coordinate ({x}, {y}, {z}) is outside the sampler range ±{}", MAX_COORD)]
    CoordinateOutOfRange { x: i32, y: i32, z: i32 },
    #[error("density sampler failed: {0}")]
    Other(String),
}

/// A pure scalar field over the integer lattice.
///
/// Implementations must be deterministic: the same `(seed, x, y, z)` always
/// yields the same value. Occupancy is decided by the caller by thresholding.
pub trait DensitySampler: Sync {
    fn density(&self, seed: i32, x: i32, y: i32, z: i32) -> Result<f32, DensityError>;
}

impl<F> DensitySampler for F
where
    F: Fn(i32, i32, i32, i32) -> f32 + Sync,
{
    #[inline]
    fn density(&self, seed: i32, x: i32, y: i32, z: i32) -> Result<f32, DensityError> {
        Ok(self(seed, x, y, z))
    }
}

/// Fractal OpenSimplex2 noise in `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseDensity {
    pub frequency: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl Default for NoiseDensity {
    fn default() -> Self {
        Self::from_params(&GenParams::default())
    }
}

impl NoiseDensity {
    pub fn from_params(params: &GenParams) -> Self {
        Self {
            frequency: params.frequency,
            octaves: params.octaves,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
        }
    }

    /// Builds the seeded noise source. Cheap: no tables are precomputed.
    pub fn make_noise(&self, seed: i32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(self.frequency));
        noise
    }

    /// Samples with a noise source from [`NoiseDensity::make_noise`].
    pub fn sample_with(
        &self,
        noise: &FastNoiseLite,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<f32, DensityError> {
        if [x, y, z].iter().any(|c| c.unsigned_abs() > MAX_COORD as u32) {
            return Err(DensityError::CoordinateOutOfRange { x, y, z });
        }
        let (fx, fy, fz) = (x as f32, y as f32, z as f32);
        let mut amp = 1.0_f32;
        let mut freq = 1.0_f32;
        let mut sum = 0.0_f32;
        let mut max_amp = 0.0_f32;
        for _ in 0..self.octaves.max(1) {
            sum += noise.get_noise_3d(fx * freq, fy * freq, fz * freq) * amp;
            max_amp += amp.abs();
            amp *= self.persistence;
            freq *= self.lacunarity;
        }
        Ok(if max_amp > 0.0 { sum / max_amp } else { sum })
    }
}

impl DensitySampler for NoiseDensity {
    fn density(&self, seed: i32, x: i32, y: i32, z: i32) -> Result<f32, DensityError> {
        self.sample_with(&self.make_noise(seed), x, y, z)
    }
}
