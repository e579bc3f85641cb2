use std::time::Instant;

use blockface_geom::FrontFace;
use blockface_grid::OccupancyGrid;
use rayon::prelude::*;

use crate::constants::FACES_PER_CELL;
use crate::emit::FaceEmitter;
use crate::face::Face;
use crate::grid_mesh::{GridMesh, MeshStats};
use crate::mesh_build::MeshBuffers;
use crate::visibility::{count_visible_faces, is_face_visible};

/// Meshes one x-slab into `out`, walking `(y, z)` in ascending order.
fn mesh_slab(
    grid: &OccupancyGrid,
    x: usize,
    emitter: &FaceEmitter,
    out: &mut MeshBuffers,
    stats: &mut MeshStats,
) {
    for (x, y, z) in grid.occupied_in_slab(x) {
        stats.occupied_cells += 1;
        for face in Face::ALL {
            if is_face_visible(grid, x, y, z, face) {
                out.push_face(&emitter.emit(x, y, z, face));
                stats.visible_faces += 1;
            } else {
                stats.hidden_faces += 1;
            }
        }
    }
}

fn log_mesher_perf(ms: u128, grid: &OccupancyGrid, stats: &MeshStats, parallel: bool) {
    let d = grid.dims();
    log::info!(
        target: "perf",
        "ms={} mesh_assemble dims=({}, {}, {}) cells={} faces={} hidden={} parallel={}",
        ms,
        d.sx,
        d.sy,
        d.sz,
        stats.occupied_cells,
        stats.visible_faces,
        stats.hidden_faces,
        parallel
    );
}

/// Builds the culled surface mesh of `grid` in a single sequential pass.
///
/// Cells are visited x-major, z-minor; each occupied cell tests its faces in
/// [`Face::ALL`] order and appends every visible one.
pub fn assemble_mesh(grid: &OccupancyGrid, front_face: FrontFace) -> GridMesh {
    let t0 = Instant::now();
    let emitter = FaceEmitter::new(front_face);
    let mut buffers = MeshBuffers::default();
    buffers.reserve_faces(count_visible_faces(grid));
    let mut stats = MeshStats::default();
    for x in 0..grid.dims().sx {
        mesh_slab(grid, x, &emitter, &mut buffers, &mut stats);
    }
    log_mesher_perf(t0.elapsed().as_millis(), grid, &stats, false);
    GridMesh::new(buffers, stats)
}

/// Same output as [`assemble_mesh`], meshing x-slabs on the rayon pool.
///
/// Each slab fills private buffers; they are concatenated in ascending x so
/// the index stream is identical to the sequential pass.
pub fn assemble_mesh_parallel(grid: &OccupancyGrid, front_face: FrontFace) -> GridMesh {
    let t0 = Instant::now();
    let emitter = FaceEmitter::new(front_face);
    let slabs: Vec<(MeshBuffers, MeshStats)> = (0..grid.dims().sx)
        .into_par_iter()
        .map(|x| {
            let mut out = MeshBuffers::default();
            let mut stats = MeshStats::default();
            mesh_slab(grid, x, &emitter, &mut out, &mut stats);
            log::debug!("meshed slab x={} faces={}", x, stats.visible_faces);
            (out, stats)
        })
        .collect();

    let total_faces: usize = slabs.iter().map(|(_, s)| s.visible_faces).sum();
    let mut buffers = MeshBuffers::default();
    buffers.reserve_faces(total_faces);
    let mut stats = MeshStats::default();
    for (slab, s) in &slabs {
        buffers.append(slab);
        stats.merge(s);
    }
    debug_assert_eq!(
        stats.visible_faces + stats.hidden_faces,
        stats.occupied_cells * FACES_PER_CELL
    );
    log_mesher_perf(t0.elapsed().as_millis(), grid, &stats, true);
    GridMesh::new(buffers, stats)
}
