use std::collections::HashSet;

use blockface_geom::Vec3;
use blockface_grid::{GridDims, OccupancyGrid};
use blockface_mesh::{FrontFace, GridMesh, assemble_mesh, assemble_mesh_parallel};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = OccupancyGrid> {
    (1usize..=5, 1usize..=5, 1usize..=5).prop_flat_map(|(sx, sy, sz)| {
        proptest::collection::vec(any::<bool>(), sx * sy * sz).prop_map(move |flags| {
            let dims = GridDims::new(sx, sy, sz);
            OccupancyGrid::from_fn(dims, |x, y, z| flags[(x * sy + y) * sz + z])
        })
    })
}

fn arb_front_face() -> impl Strategy<Value = FrontFace> {
    prop_oneof![Just(FrontFace::CounterClockwise), Just(FrontFace::Clockwise)]
}

/// Brute-force count: every occupied cell contributes one face per empty or out-of-range neighbor.
fn expected_faces(grid: &OccupancyGrid) -> usize {
    const DIRS: [(i32, i32, i32); 6] = [
        (1, 0, 0),
        (-1, 0, 0),
        (0, 1, 0),
        (0, -1, 0),
        (0, 0, 1),
        (0, 0, -1),
    ];
    let d = grid.dims();
    let mut n = 0;
    for x in 0..d.sx as i32 {
        for y in 0..d.sy as i32 {
            for z in 0..d.sz as i32 {
                if grid.get(x, y, z) != Some(true) {
                    continue;
                }
                n += DIRS
                    .iter()
                    .filter(|(dx, dy, dz)| grid.get(x + dx, y + dy, z + dz) != Some(true))
                    .count();
            }
        }
    }
    n
}

fn vertex(mesh: &GridMesh, i: u32) -> Vec3 {
    Vec3::from_slice(&mesh.buffers.positions()[i as usize * 3..])
}

/// Centers of every emitted face, as doubled integer coordinates.
fn face_centers(mesh: &GridMesh) -> Vec<(i32, i32, i32)> {
    (0..mesh.buffers.face_count())
        .map(|f| {
            let mut sum = Vec3::ZERO;
            for v in f * 6..f * 6 + 6 {
                sum = sum + Vec3::from_slice(&mesh.buffers.positions()[v * 3..]);
            }
            let c = sum * (2.0 / 6.0);
            (c.x.round() as i32, c.y.round() as i32, c.z.round() as i32)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Emitted face count matches the brute-force neighbor count, with matching buffer sizes
    #[test]
    fn face_count_and_cardinality(grid in arb_grid(), ff in arb_front_face()) {
        let mesh = assemble_mesh(&grid, ff);
        let faces = expected_faces(&grid);
        prop_assert_eq!(mesh.stats.visible_faces, faces);
        prop_assert_eq!(mesh.buffers.indices().len(), 6 * faces);
        prop_assert_eq!(mesh.buffers.positions().len() / 3, mesh.buffers.indices().len());
        prop_assert_eq!(mesh.buffers.normals().len(), mesh.buffers.positions().len());
        prop_assert_eq!(mesh.stats.occupied_cells, grid.occupied_count());
        prop_assert_eq!(mesh.stats.visible_faces + mesh.stats.hidden_faces, 6 * grid.occupied_count());
    }

    // Indices come in blocks of six covering exactly the block's own vertices
    #[test]
    fn indices_reference_their_own_face(grid in arb_grid(), ff in arb_front_face()) {
        let mesh = assemble_mesh(&grid, ff);
        for (f, block) in mesh.buffers.indices().chunks_exact(6).enumerate() {
            let mut sorted = block.to_vec();
            sorted.sort_unstable();
            let base = (f * 6) as u32;
            prop_assert_eq!(sorted, (base..base + 6).collect::<Vec<_>>());
        }
    }

    // Each triangle's winding normal agrees with its stored vertex normals
    #[test]
    fn winding_matches_normals(grid in arb_grid(), ff in arb_front_face()) {
        let mesh = assemble_mesh(&grid, ff);
        for tri in mesh.buffers.indices().chunks_exact(3) {
            let n = ff.triangle_normal(vertex(&mesh, tri[0]), vertex(&mesh, tri[1]), vertex(&mesh, tri[2]));
            for &i in tri {
                let stored = Vec3::from_slice(&mesh.buffers.normals()[i as usize * 3..]);
                prop_assert!((stored.length() - 1.0).abs() < 1e-6);
                prop_assert!((n.dot(stored) - n.length()).abs() < 1e-5, "normal {:?} vs winding {:?}", stored, n);
            }
        }
    }

    // No face is emitted twice and no face sits between two occupied cells
    #[test]
    fn shared_faces_never_emitted(grid in arb_grid()) {
        let mesh = assemble_mesh(&grid, FrontFace::CounterClockwise);
        let centers = face_centers(&mesh);
        let unique: HashSet<_> = centers.iter().copied().collect();
        prop_assert_eq!(unique.len(), centers.len());
        for (cx, cy, cz) in centers {
            // A face center has exactly one even doubled coordinate: the face plane.
            let (ax, bx) = if cx % 2 == 0 { (cx / 2 - 1, cx / 2) } else { (cx / 2, cx / 2) };
            let (ay, by) = if cy % 2 == 0 { (cy / 2 - 1, cy / 2) } else { (cy / 2, cy / 2) };
            let (az, bz) = if cz % 2 == 0 { (cz / 2 - 1, cz / 2) } else { (cz / 2, cz / 2) };
            let both = grid.is_occupied(ax, ay, az) && grid.is_occupied(bx, by, bz);
            prop_assert!(!both, "internal face at doubled center ({}, {}, {})", cx, cy, cz);
        }
    }

    // Parallel slab meshing produces identical buffers
    #[test]
    fn parallel_matches_sequential(grid in arb_grid(), ff in arb_front_face()) {
        let a = assemble_mesh(&grid, ff);
        let b = assemble_mesh_parallel(&grid, ff);
        prop_assert_eq!(a, b);
    }
}

#[test]
fn solid_block_exposes_every_boundary_face() {
    let dims = GridDims::new(4, 3, 2);
    let grid = OccupancyGrid::from_fn(dims, |_, _, _| true);
    let mesh = assemble_mesh(&grid, FrontFace::CounterClockwise);
    let surface = 2 * (4 * 3 + 3 * 2 + 4 * 2);
    assert_eq!(mesh.stats.visible_faces, surface);
    for (cx, cy, cz) in face_centers(&mesh) {
        let on_boundary = cx == 0 || cx == 8 || cy == 0 || cy == 6 || cz == 0 || cz == 4;
        assert!(on_boundary, "interior face at ({cx}, {cy}, {cz})");
    }
}
