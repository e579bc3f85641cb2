use blockface_geom::Aabb;

use crate::mesh_build::MeshBuffers;

/// Face accounting for one meshing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub occupied_cells: usize,
    pub visible_faces: usize,
    /// Faces skipped because the neighbor across them is occupied.
    pub hidden_faces: usize,
}

impl MeshStats {
    #[inline]
    pub fn merge(&mut self, other: &MeshStats) {
        self.occupied_cells += other.occupied_cells;
        self.visible_faces += other.visible_faces;
        self.hidden_faces += other.hidden_faces;
    }
}

/// CPU-side result of meshing a whole grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMesh {
    pub buffers: MeshBuffers,
    pub stats: MeshStats,
    pub bbox: Option<Aabb>,
}

impl GridMesh {
    pub fn new(buffers: MeshBuffers, stats: MeshStats) -> Self {
        let bbox = buffers.bounds();
        Self {
            buffers,
            stats,
            bbox,
        }
    }

    /// Hands the flat buffers to a renderer: `(positions, normals, indices)`.
    pub fn into_buffers(self) -> (Vec<f32>, Vec<f32>, Vec<u32>) {
        (self.buffers.pos, self.buffers.norm, self.buffers.idx)
    }
}
