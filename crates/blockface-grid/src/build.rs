use std::time::Instant;

use blockface_world::{DensityError, DensitySampler, GenParams};
use rayon::prelude::*;
use thiserror::Error;

use crate::constants::MAX_CELLS;
use crate::{GridDims, OccupancyGrid};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid dims must all be positive, got {0:?}")]
    EmptyDims(GridDims),
    #[error("occupancy threshold must be finite, got {0}")]
    NonFiniteThreshold(f32),
    #[error("density sampling failed at ({x}, {y}, {z}): {source}")]
    Density {
        x: i32,
        y: i32,
        z: i32,
        #[source]
        source: DensityError,
    },
    #[error("density at ({x}, {y}, {z}) is not finite: {value}")]
    NonFiniteDensity { x: i32, y: i32, z: i32, value: f32 },
    #[error("grid dims {0:?} exceed the limit of {max} cells", max = MAX_CELLS)]
    TooLarge(GridDims),
}

fn validate(dims: GridDims, threshold: f32) -> Result<(), GridError> {
    if dims.is_empty() {
        return Err(GridError::EmptyDims(dims));
    }
    if !threshold.is_finite() {
        return Err(GridError::NonFiniteThreshold(threshold));
    }
    // Each axis is at least 1, so the cap also keeps every axis within i32.
    match dims.checked_cell_count() {
        Some(n) if n <= MAX_CELLS => {}
        _ => return Err(GridError::TooLarge(dims)),
    }
    Ok(())
}

#[inline]
fn sample_cell<S: DensitySampler + ?Sized>(
    sampler: &S,
    seed: i32,
    threshold: f32,
    x: usize,
    y: usize,
    z: usize,
) -> Result<bool, GridError> {
    let (x, y, z) = (x as i32, y as i32, z as i32);
    let value = sampler
        .density(seed, x, y, z)
        .map_err(|source| GridError::Density { x, y, z, source })?;
    if !value.is_finite() {
        return Err(GridError::NonFiniteDensity { x, y, z, value });
    }
    Ok(value > threshold)
}

fn log_grid_perf(ms: u128, dims: GridDims, grid: &OccupancyGrid, parallel: bool) {
    log::info!(
        target: "perf",
        "ms={} grid_build dims=({}, {}, {}) occupied={} parallel={}",
        ms,
        dims.sx,
        dims.sy,
        dims.sz,
        grid.occupied_count(),
        parallel
    );
}

/// Samples every lattice cell in ascending order and stores `density > threshold`.
///
/// Stops at the first failing cell; no grid is returned in that case.
pub fn build_grid<S: DensitySampler + ?Sized>(
    sampler: &S,
    seed: i32,
    dims: GridDims,
    threshold: f32,
) -> Result<OccupancyGrid, GridError> {
    validate(dims, threshold)?;
    let t0 = Instant::now();
    let mut flags = Vec::with_capacity(dims.cell_count());
    for x in 0..dims.sx {
        for y in 0..dims.sy {
            for z in 0..dims.sz {
                flags.push(sample_cell(sampler, seed, threshold, x, y, z)?);
            }
        }
    }
    let grid = OccupancyGrid::from_flags(dims, flags);
    log_grid_perf(t0.elapsed().as_millis(), dims, &grid, false);
    Ok(grid)
}

/// Same result as [`build_grid`], sampling x-slabs on the rayon pool.
///
/// When several cells fail, which error is reported is unspecified.
pub fn build_grid_parallel<S: DensitySampler + ?Sized>(
    sampler: &S,
    seed: i32,
    dims: GridDims,
    threshold: f32,
) -> Result<OccupancyGrid, GridError> {
    validate(dims, threshold)?;
    let t0 = Instant::now();
    let slabs: Vec<Vec<bool>> = (0..dims.sx)
        .into_par_iter()
        .map(|x| {
            let mut slab = Vec::with_capacity(dims.sy * dims.sz);
            for y in 0..dims.sy {
                for z in 0..dims.sz {
                    slab.push(sample_cell(sampler, seed, threshold, x, y, z)?);
                }
            }
            log::debug!("sampled grid slab x={} cells={}", x, slab.len());
            Ok(slab)
        })
        .collect::<Result<_, GridError>>()?;
    let grid = OccupancyGrid::from_flags(dims, slabs.into_iter().flatten());
    log_grid_perf(t0.elapsed().as_millis(), dims, &grid, true);
    Ok(grid)
}

/// Builds the grid described by validated generation parameters.
pub fn build_grid_with_params<S: DensitySampler + ?Sized>(
    sampler: &S,
    params: &GenParams,
) -> Result<OccupancyGrid, GridError> {
    let dims = GridDims::from(params.dims);
    if params.parallel {
        build_grid_parallel(sampler, params.seed, dims, params.threshold)
    } else {
        build_grid(sampler, params.seed, dims, params.threshold)
    }
}
