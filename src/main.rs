#![forbid(unsafe_code)]

mod cli;
mod obj;
mod pipeline;

use std::error::Error;

use clap::Parser;

use cli::Args;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = args.resolve_params()?;
    log::info!(
        "seed={} dims={:?} threshold={} front_face={:?} parallel={}",
        params.seed,
        params.dims,
        params.threshold,
        params.front_face,
        params.parallel
    );

    let out = pipeline::run(&params)?;
    let stats = out.mesh.stats;
    let bounds = match out.mesh.bbox {
        Some(bb) => format!("{:?}..{:?}", bb.min.to_array(), bb.max.to_array()),
        None => "none".to_string(),
    };
    println!(
        "cells={} occupied={} faces={} vertices={} indices={} bounds={}",
        out.grid.dims().cell_count(),
        stats.occupied_cells,
        stats.visible_faces,
        out.mesh.buffers.vertex_count(),
        out.mesh.buffers.indices().len(),
        bounds
    );
    log::debug!("hidden faces={}", stats.hidden_faces);

    if let Some(path) = &args.obj {
        obj::write_obj_file(&out.mesh.buffers, path)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
