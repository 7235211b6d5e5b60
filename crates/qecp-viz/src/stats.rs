// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::fmt;

/// Visible scene objects by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Qubit spheres.
    pub qubits: usize,
    /// Qubit outline twins.
    pub qubit_outlines: usize,
    /// Idle-gate rods.
    pub idle_gates: usize,
    /// Gate nodes that produced a glyph.
    pub gates: usize,
    /// Individual glyph parts, peer lines included.
    pub gate_parts: usize,
    /// Vertex spheres.
    pub vertices: usize,
    /// Vertex outline twins.
    pub vertex_outlines: usize,
    /// Edges with at least one visible segment.
    pub edges: usize,
    /// Visible edge half-segments.
    pub edge_segments: usize,
    /// Blossom overlays.
    pub blossoms: usize,
}

impl fmt::Display for SceneStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qubits          {} (+{} outlines)", self.qubits, self.qubit_outlines)?;
        writeln!(f, "idle gates      {}", self.idle_gates)?;
        writeln!(f, "gates           {} ({} parts)", self.gates, self.gate_parts)?;
        writeln!(
            f,
            "vertices        {} (+{} outlines)",
            self.vertices, self.vertex_outlines
        )?;
        writeln!(f, "edges           {} ({} segments)", self.edges, self.edge_segments)?;
        write!(f, "blossoms        {}", self.blossoms)
    }
}
