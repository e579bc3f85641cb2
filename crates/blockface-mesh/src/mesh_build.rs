use blockface_geom::{Aabb, Vec3};

use crate::constants::VERTS_PER_FACE;
use crate::emit::FaceQuad;

/// Flat, renderer-ready mesh buffers.
///
/// `pos` and `norm` hold three floats per vertex; `idx` holds three indices
/// per triangle. Every face contributes exactly six of each.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuffers {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuffers {
    /// Clears all arrays but retains capacity for reuse across passes.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.idx.clear();
    }

    /// Pre-reserve capacity for `n_faces` faces worth of data.
    #[inline]
    pub fn reserve_faces(&mut self, n_faces: usize) {
        self.pos.reserve(n_faces * VERTS_PER_FACE * 3);
        self.norm.reserve(n_faces * VERTS_PER_FACE * 3);
        self.idx.reserve(n_faces * VERTS_PER_FACE);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.idx.len() / VERTS_PER_FACE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Appends one face, offsetting its local indices by the current vertex count.
    pub fn push_face(&mut self, quad: &FaceQuad) {
        let base = self.index_base(FaceQuad::VERTEX_COUNT as usize);
        self.pos.extend_from_slice(&quad.positions);
        self.norm.extend_from_slice(&quad.normals);
        self.idx.extend(quad.indices.iter().map(|&i| base + i));
    }

    /// Concatenates `other` after `self`, rebasing its indices.
    pub fn append(&mut self, other: &MeshBuffers) {
        let base = self.index_base(other.vertex_count());
        self.pos.extend_from_slice(&other.pos);
        self.norm.extend_from_slice(&other.norm);
        self.idx.extend(other.idx.iter().map(|&i| base + i));
    }

    /// First index for `added` new vertices. Grids are capped so a full mesh
    /// never leaves the `u32` index range.
    #[inline]
    fn index_base(&self, added: usize) -> u32 {
        let base = self.vertex_count();
        assert!(
            (base as u64) + (added as u64) <= u64::from(u32::MAX) + 1,
            "mesh exceeds u32 index range: {} + {} vertices",
            base,
            added
        );
        base as u32
    }

    /// Returns a slice of interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }
    /// Returns a slice of interleaved vertex normals (x,y,z per vertex).
    pub fn normals(&self) -> &[f32] {
        &self.norm
    }
    pub fn indices(&self) -> &[u32] {
        &self.idx
    }

    /// Bounding box of all positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut it = self.pos.chunks_exact(3).map(Vec3::from_slice);
        let first = it.next()?;
        Some(it.fold(Aabb::from_point(first), |mut bb, p| {
            bb.include(p);
            bb
        }))
    }
}
