//! Shared constants for blockface-mesh.

/// Two triangles, no vertex sharing.
pub(crate) const VERTS_PER_FACE: usize = 6;
pub(crate) const FLOATS_PER_FACE: usize = VERTS_PER_FACE * 3;
pub(crate) const FACES_PER_CELL: usize = 6;
