// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use qecp_geom::EdgeEndpoints;

/// Per-edge boundary points of the current rebuild, indexed by edge index.
///
/// Cleared at the start of every case rebuild; blossom hulls read it in the
/// same rebuild only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeGeometryCache {
    entries: Vec<Option<EdgeEndpoints>>,
}

impl EdgeGeometryCache {
    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record the endpoints of edge `index`.
    pub fn insert(&mut self, index: usize, endpoints: EdgeEndpoints) {
        if self.entries.len() <= index {
            self.entries.resize(index + 1, None);
        }
        self.entries[index] = Some(endpoints);
    }

    /// Endpoints of edge `index`, if it was laid out in this rebuild.
    pub fn get(&self, index: usize) -> Option<&EdgeEndpoints> {
        self.entries.get(index)?.as_ref()
    }

    /// Number of cached edges.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
