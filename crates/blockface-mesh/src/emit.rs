use blockface_geom::{FrontFace, Vec3};

use crate::constants::{FLOATS_PER_FACE, VERTS_PER_FACE};
use crate::face::Face;

/// Unit-square corners of each face relative to the cell's minimum corner,
/// listed as bottom-left, bottom-right, top-left, top-right in the face's
/// local parameterization. Indexed by [`Face::index`].
const CORNERS: [[[u8; 3]; 4]; 6] = [
    // Top: XZ square at y+1
    [[0, 1, 0], [0, 1, 1], [1, 1, 0], [1, 1, 1]],
    // Bottom: XZ square at y
    [[0, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]],
    // Left: YZ square at x
    [[0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 1]],
    // Right: YZ square at x+1
    [[1, 0, 0], [1, 0, 1], [1, 1, 0], [1, 1, 1]],
    // Back: XY square at z
    [[0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0]],
    // Front: XY square at z+1
    [[0, 0, 1], [1, 0, 1], [0, 1, 1], [1, 1, 1]],
];

/// Corner sequence for the two triangles: (bl, br, tl), (tl, br, tr).
const QUAD_ORDER: [usize; VERTS_PER_FACE] = [0, 1, 2, 2, 1, 3];

const ASCENDING: [u32; VERTS_PER_FACE] = [0, 1, 2, 3, 4, 5];
const DESCENDING: [u32; VERTS_PER_FACE] = [5, 4, 3, 2, 1, 0];

/// Geometry for one visible face: two triangles, no shared vertices.
///
/// `indices` are local to the face (`0..6`); the assembler offsets them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceQuad {
    pub positions: [f32; FLOATS_PER_FACE],
    pub normals: [f32; FLOATS_PER_FACE],
    pub indices: [u32; VERTS_PER_FACE],
}

impl FaceQuad {
    /// Number of vertices this face adds to the mesh.
    pub const VERTEX_COUNT: u32 = VERTS_PER_FACE as u32;
}

#[inline]
fn corner(face: Face, i: usize) -> Vec3 {
    let [cx, cy, cz] = CORNERS[face.index()][i];
    Vec3::new(cx as f32, cy as f32, cz as f32)
}

/// Whether `face` needs its index order reversed under `front_face`.
///
/// Derived from the first emitted triangle: if its winding normal points
/// against the face's outward normal, the indices are walked backwards.
pub fn winding_reversed(face: Face, front_face: FrontFace) -> bool {
    let n = front_face.triangle_normal(corner(face, 0), corner(face, 1), corner(face, 2));
    n.dot(face.normal()) < 0.0
}

/// Emits faces with a fixed front-face convention.
#[derive(Clone, Copy, Debug)]
pub struct FaceEmitter {
    reversed: [bool; 6],
}

impl Default for FaceEmitter {
    fn default() -> Self {
        Self::new(FrontFace::default())
    }
}

impl FaceEmitter {
    pub fn new(front_face: FrontFace) -> Self {
        let mut reversed = [false; 6];
        for face in Face::ALL {
            reversed[face.index()] = winding_reversed(face, front_face);
        }
        Self { reversed }
    }

    #[inline]
    pub fn is_reversed(&self, face: Face) -> bool {
        self.reversed[face.index()]
    }

    /// Builds the quad for `face` of the unit cube anchored at `(x, y, z)`.
    pub fn emit(&self, x: usize, y: usize, z: usize, face: Face) -> FaceQuad {
        let base = Vec3::new(x as f32, y as f32, z as f32);
        let n = face.normal().to_array();
        let mut positions = [0.0; FLOATS_PER_FACE];
        let mut normals = [0.0; FLOATS_PER_FACE];
        for (v, &c) in QUAD_ORDER.iter().enumerate() {
            let p = base + corner(face, c);
            positions[v * 3..v * 3 + 3].copy_from_slice(&p.to_array());
            normals[v * 3..v * 3 + 3].copy_from_slice(&n);
        }
        let indices = if self.is_reversed(face) {
            DESCENDING
        } else {
            ASCENDING
        };
        FaceQuad {
            positions,
            normals,
            indices,
        }
    }
}

/// Convenience wrapper around [`FaceEmitter::emit`].
pub fn emit_face(x: usize, y: usize, z: usize, face: Face, front_face: FrontFace) -> FaceQuad {
    FaceEmitter::new(front_face).emit(x, y, z, face)
}
