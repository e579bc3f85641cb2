//! Bitset layout for occupancy storage.

pub(crate) const BITS_PER_WORD: usize = 64;
pub(crate) const WORD_INDEX_SHIFT: usize = 6; // log2(64)
pub(crate) const WORD_INDEX_MASK: usize = 63; // (1<<6) - 1

/// Vertices a single cell can contribute to a mesh: six faces of six vertices.
const MAX_VERTS_PER_CELL: u32 = 36;

/// Largest grid the builders accept. Even a fully exposed grid of this size
/// stays addressable by `u32` mesh indices.
pub const MAX_CELLS: usize = (u32::MAX / MAX_VERTS_PER_CELL) as usize;
