//! CPU meshing crate: per-cube face culling over a dense occupancy grid.
#![forbid(unsafe_code)]

mod assemble;
mod constants;
mod emit;
mod face;
mod grid_mesh;
mod mesh_build;
mod visibility;

pub use assemble::{assemble_mesh, assemble_mesh_parallel};
pub use emit::{FaceEmitter, FaceQuad, emit_face, winding_reversed};
pub use face::Face;
pub use grid_mesh::{GridMesh, MeshStats};
pub use mesh_build::MeshBuffers;
pub use visibility::{count_visible_faces, is_face_visible};

pub use blockface_geom::FrontFace;
