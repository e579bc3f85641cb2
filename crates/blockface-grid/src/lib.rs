//! Dense occupancy grid and its builder.
#![forbid(unsafe_code)]

mod build;
mod constants;

pub use build::{GridError, build_grid, build_grid_parallel, build_grid_with_params};
pub use constants::MAX_CELLS;

use crate::constants::{BITS_PER_WORD, WORD_INDEX_MASK, WORD_INDEX_SHIFT};

/// Extent of the lattice along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
}

impl GridDims {
    #[inline]
    pub const fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self { sx, sy, sz }
    }

    #[inline]
    pub const fn cube(n: usize) -> Self {
        Self::new(n, n, n)
    }

    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.sx * self.sy * self.sz
    }

    /// Cell count, or `None` if the product overflows `usize`.
    #[inline]
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.sx.checked_mul(self.sy)?.checked_mul(self.sz)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.sx == 0 || self.sy == 0 || self.sz == 0
    }

    /// Whether the signed coordinate lies inside `[0, s)` on every axis.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.sx
            && (y as usize) < self.sy
            && (z as usize) < self.sz
    }
}

impl From<[u32; 3]> for GridDims {
    fn from(d: [u32; 3]) -> Self {
        Self::new(d[0] as usize, d[1] as usize, d[2] as usize)
    }
}

/// Immutable dense boolean volume, one bit per lattice cell.
///
/// Cells are linearized x-major, z-minor, which matches the order the
/// builder fills them and the mesher walks them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    dims: GridDims,
    words: Vec<u64>,
    occupied: usize,
}

impl OccupancyGrid {
    pub fn empty(dims: GridDims) -> Self {
        let n = dims.cell_count();
        Self {
            dims,
            words: vec![0; n.div_ceil(BITS_PER_WORD)],
            occupied: 0,
        }
    }

    /// Builds a grid by evaluating `f` once per cell in ascending lattice order.
    pub fn from_fn(dims: GridDims, mut f: impl FnMut(usize, usize, usize) -> bool) -> Self {
        let mut g = Self::empty(dims);
        for x in 0..dims.sx {
            for y in 0..dims.sy {
                for z in 0..dims.sz {
                    if f(x, y, z) {
                        g.set(x, y, z);
                    }
                }
            }
        }
        g
    }

    /// Builds a grid with exactly the listed cells occupied. Out-of-range cells are ignored.
    pub fn from_cells(dims: GridDims, cells: &[(usize, usize, usize)]) -> Self {
        let mut g = Self::empty(dims);
        for &(x, y, z) in cells {
            if x < dims.sx && y < dims.sy && z < dims.sz {
                g.set(x, y, z);
            }
        }
        g
    }

    /// Builds a grid from per-cell flags laid out in [`OccupancyGrid::idx`] order.
    pub(crate) fn from_flags(dims: GridDims, flags: impl IntoIterator<Item = bool>) -> Self {
        let mut g = Self::empty(dims);
        for (i, occ) in flags.into_iter().take(dims.cell_count()).enumerate() {
            if occ {
                g.set_index(i);
            }
        }
        g
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.dims.sy + y) * self.dims.sz + z
    }

    /// Reads an in-range cell. Panics if the coordinate is outside the grid.
    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> bool {
        assert!(
            x < self.dims.sx && y < self.dims.sy && z < self.dims.sz,
            "cell ({x}, {y}, {z}) outside grid {:?}",
            self.dims
        );
        self.test_index(self.idx(x, y, z))
    }

    /// Bounds-checked read: `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<bool> {
        if !self.dims.contains(x, y, z) {
            return None;
        }
        Some(self.test_index(self.idx(x as usize, y as usize, z as usize)))
    }

    /// Occupancy with out-of-range coordinates treated as empty.
    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).unwrap_or(false)
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Occupied cells of the x-slab `x`, in ascending `(y, z)` order.
    pub fn occupied_in_slab(&self, x: usize) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (sy, sz) = (self.dims.sy, self.dims.sz);
        (0..sy)
            .flat_map(move |y| (0..sz).map(move |z| (x, y, z)))
            .filter(move |&(x, y, z)| self.get_local(x, y, z))
    }

    /// Occupied cells in ascending lattice order (x outermost, z innermost).
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.dims.sx).flat_map(move |x| self.occupied_in_slab(x))
    }

    #[inline]
    fn test_index(&self, i: usize) -> bool {
        (self.words[i >> WORD_INDEX_SHIFT] >> (i & WORD_INDEX_MASK)) & 1 == 1
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, z: usize) {
        let i = self.idx(x, y, z);
        self.set_index(i);
    }

    #[inline]
    fn set_index(&mut self, i: usize) {
        let w = &mut self.words[i >> WORD_INDEX_SHIFT];
        let bit = 1u64 << (i & WORD_INDEX_MASK);
        if *w & bit == 0 {
            *w |= bit;
            self.occupied += 1;
        }
    }
}
