use blockface_grid::OccupancyGrid;

use crate::face::Face;

/// True if `face` of cell `(x, y, z)` must be drawn: the neighbor across it
/// is empty or lies outside the grid. Never wraps around.
#[inline]
pub fn is_face_visible(grid: &OccupancyGrid, x: usize, y: usize, z: usize, face: Face) -> bool {
    let (dx, dy, dz) = face.delta();
    !grid.is_occupied(x as i32 + dx, y as i32 + dy, z as i32 + dz)
}

/// Counts the faces [`crate::assemble_mesh`] will emit, without building geometry.
pub fn count_visible_faces(grid: &OccupancyGrid) -> usize {
    grid.iter_occupied()
        .map(|(x, y, z)| {
            Face::ALL
                .into_iter()
                .filter(|&f| is_face_visible(grid, x, y, z, f))
                .count()
        })
        .sum()
}
