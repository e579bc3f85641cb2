use std::error::Error;
use std::time::Instant;

use blockface_grid::{GridError, OccupancyGrid, build_grid_with_params};
use blockface_mesh::{GridMesh, assemble_mesh, assemble_mesh_parallel};
use blockface_world::{GenParams, NoiseDensity};

pub struct Output {
    pub grid: OccupancyGrid,
    pub mesh: GridMesh,
}

/// Samples the noise field into a grid and meshes its exposed faces.
pub fn generate(params: &GenParams) -> Result<Output, GridError> {
    let t0 = Instant::now();
    let sampler = NoiseDensity::from_params(params);
    let grid = build_grid_with_params(&sampler, params)?;
    let mesh = if params.parallel {
        assemble_mesh_parallel(&grid, params.front_face)
    } else {
        assemble_mesh(&grid, params.front_face)
    };
    log::info!(
        target: "perf",
        "ms={} pipeline seed={} dims={:?} occupied={} faces={} parallel={}",
        t0.elapsed().as_millis(),
        params.seed,
        params.dims,
        mesh.stats.occupied_cells,
        mesh.stats.visible_faces,
        params.parallel
    );
    Ok(Output { grid, mesh })
}

/// Runs [`generate`], inside a dedicated pool when a thread count is configured.
pub fn run(params: &GenParams) -> Result<Output, Box<dyn Error>> {
    if params.parallel && params.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.threads)
            .thread_name(|i| format!("blockface-{i}"))
            .build()?;
        log::debug!("using {} worker threads", params.threads);
        Ok(pool.install(|| generate(params))?)
    } else {
        Ok(generate(params)?)
    }
}
