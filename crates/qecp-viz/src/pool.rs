// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render-object pools.
//!
//! Two flavors:
//! - [`Grid2`] / [`Grid3`]: dense grids sized from the simulator extents,
//!   rebuilt wholesale when a new simulation is loaded.
//! - [`SparsePool`]: grow-only, hide-don't-shrink pools keyed by a stable
//!   index (decoding-graph vertices and edges).
//!
//! Every pool exclusively owns the meshes it holds. Dropping a pool without
//! calling `dispose` leaks the meshes in the adapter, so the owner must
//! dispose before discarding.

use qecp_geom::SegmentPart;
use qecp_scene_port::{MaterialId, ObjectId, ScenePort};

/// Something a pool can hold: one mesh or a fixed group of meshes.
pub trait PoolEntry {
    /// Show or hide every mesh of the entry.
    fn set_visible<P: ScenePort + ?Sized>(&self, port: &mut P, visible: bool);

    /// Remove every mesh of the entry from the scene.
    fn release<P: ScenePort + ?Sized>(&self, port: &mut P);
}

impl PoolEntry for ObjectId {
    fn set_visible<P: ScenePort + ?Sized>(&self, port: &mut P, visible: bool) {
        port.set_visible(*self, visible);
    }

    fn release<P: ScenePort + ?Sized>(&self, port: &mut P) {
        port.remove_mesh(*self);
    }
}

impl PoolEntry for Vec<ObjectId> {
    fn set_visible<P: ScenePort + ?Sized>(&self, port: &mut P, visible: bool) {
        for part in self {
            part.set_visible(port, visible);
        }
    }

    fn release<P: ScenePort + ?Sized>(&self, port: &mut P) {
        for part in self {
            part.release(port);
        }
    }
}

/// The six meshes of one edge: a forward/backward cylinder pair for each of
/// the left-grown, ungrown and right-grown parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMeshes(pub [[ObjectId; 2]; 3]);

impl EdgeMeshes {
    /// The pair covering `part`.
    pub fn pair(&self, part: SegmentPart) -> [ObjectId; 2] {
        self.0[part.index()]
    }

    /// All six meshes, left part first.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.0.iter().flatten().copied()
    }

    /// Current material of each mesh, laid out like the meshes.
    pub fn materials<P: ScenePort + ?Sized>(&self, port: &P) -> Option<[[MaterialId; 2]; 3]> {
        let mut out = [[MaterialId(0); 2]; 3];
        for (row, pair) in out.iter_mut().zip(&self.0) {
            for (slot, object) in row.iter_mut().zip(pair) {
                *slot = port.material(*object)?;
            }
        }
        Some(out)
    }
}

impl PoolEntry for EdgeMeshes {
    fn set_visible<P: ScenePort + ?Sized>(&self, port: &mut P, visible: bool) {
        for object in self.iter() {
            port.set_visible(object, visible);
        }
    }

    fn release<P: ScenePort + ?Sized>(&self, port: &mut P) {
        for object in self.iter() {
            port.remove_mesh(object);
        }
    }
}

/// Dense `[row][col]` grid of optional entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid2<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
}

impl<T> Default for Grid2<T> {
    fn default() -> Self {
        Self::allocate(0, 0)
    }
}

impl<T> Grid2<T> {
    /// Grid of empty placeholders.
    pub fn allocate(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::new();
        cells.resize_with(rows * cols, || None);
        Self { rows, cols, cells }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.rows && j < self.cols).then(|| i * self.cols + j)
    }

    /// Entry at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        self.cells.get(self.offset(i, j)?)?.as_ref()
    }

    /// Mutable slot at `(i, j)`; `None` when out of range.
    pub fn slot_mut(&mut self, i: usize, j: usize) -> Option<&mut Option<T>> {
        let offset = self.offset(i, j)?;
        self.cells.get_mut(offset)
    }

    /// Occupied entries.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().flatten()
    }
}

impl<T: PoolEntry> Grid2<T> {
    /// Release every occupied entry and leave an empty `0 x 0` grid.
    pub fn dispose<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        for entry in self.cells.drain(..).flatten() {
            entry.release(port);
        }
        self.rows = 0;
        self.cols = 0;
    }

    /// Release the current contents, then reallocate with a new shape.
    pub fn reallocate<P: ScenePort + ?Sized>(&mut self, port: &mut P, rows: usize, cols: usize) {
        self.dispose(port);
        *self = Self::allocate(rows, cols);
    }
}

/// Dense `[layer][row][col]` grid of optional entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid3<T> {
    layers: usize,
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
}

impl<T> Default for Grid3<T> {
    fn default() -> Self {
        Self::allocate(0, 0, 0)
    }
}

impl<T> Grid3<T> {
    /// Grid of empty placeholders.
    pub fn allocate(layers: usize, rows: usize, cols: usize) -> Self {
        let mut cells = Vec::new();
        cells.resize_with(layers * rows * cols, || None);
        Self {
            layers,
            rows,
            cols,
            cells,
        }
    }

    /// `(layers, rows, cols)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.layers, self.rows, self.cols)
    }

    fn offset(&self, t: usize, i: usize, j: usize) -> Option<usize> {
        (t < self.layers && i < self.rows && j < self.cols)
            .then(|| (t * self.rows + i) * self.cols + j)
    }

    /// Entry at `(t, i, j)`.
    pub fn get(&self, t: usize, i: usize, j: usize) -> Option<&T> {
        self.cells.get(self.offset(t, i, j)?)?.as_ref()
    }

    /// Mutable slot at `(t, i, j)`; `None` when out of range.
    pub fn slot_mut(&mut self, t: usize, i: usize, j: usize) -> Option<&mut Option<T>> {
        let offset = self.offset(t, i, j)?;
        self.cells.get_mut(offset)
    }

    /// Occupied entries.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().flatten()
    }
}

impl<T: PoolEntry> Grid3<T> {
    /// Release every occupied entry (sub-parts included) and leave an empty grid.
    pub fn dispose<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        for entry in self.cells.drain(..).flatten() {
            entry.release(port);
        }
        *self = Self::allocate(0, 0, 0);
    }

    /// Release the current contents, then reallocate with a new shape.
    pub fn reallocate<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        layers: usize,
        rows: usize,
        cols: usize,
    ) {
        self.dispose(port);
        *self = Self::allocate(layers, rows, cols);
    }
}

/// Grow-only pool indexed by a stable dense index.
///
/// Entries are created lazily and hidden instead of destroyed when a new
/// snapshot has fewer live entries; only [`dispose`](Self::dispose) shrinks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparsePool<T> {
    entries: Vec<T>,
}

impl<T> Default for SparsePool<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SparsePool<T> {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries ever grown (and not yet disposed).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been grown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// All entries.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Returns the entry at `index`, first appending entries built by `make`
    /// for every missing index up to and including it. `make` must return
    /// hidden entries.
    pub fn grow_and_get<E>(
        &mut self,
        index: usize,
        mut make: impl FnMut(usize) -> Result<T, E>,
    ) -> Result<&T, E> {
        while self.entries.len() <= index {
            let entry = make(self.entries.len())?;
            self.entries.push(entry);
        }
        Ok(&self.entries[index])
    }
}

impl<T: PoolEntry> SparsePool<T> {
    /// Hide the entry at `index` if it exists.
    pub fn hide<P: ScenePort + ?Sized>(&self, port: &mut P, index: usize) {
        if let Some(entry) = self.entries.get(index) {
            entry.set_visible(port, false);
        }
    }

    /// Hide every entry at or beyond `from`.
    pub fn hide_tail<P: ScenePort + ?Sized>(&self, port: &mut P, from: usize) {
        for entry in self.entries.iter().skip(from) {
            entry.set_visible(port, false);
        }
    }

    /// Release every entry and empty the pool.
    pub fn dispose<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        for entry in self.entries.drain(..) {
            entry.release(port);
        }
    }
}
