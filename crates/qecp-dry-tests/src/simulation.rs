// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simulator grid builder for tests.

use qecp_model::{GateType, Node, PlanarPosition, PositionRef, QubitType, SimulationSnapshot};

/// Builder for [`SimulationSnapshot`] grids.
///
/// Every node starts null; every site starts at planar position `(i, j)`.
/// Writes outside the declared extents are ignored.
///
/// # Example
///
/// ```
/// use qecp_dry_tests::SimulationBuilder;
/// use qecp_model::{GateType, QubitType};
///
/// let sim = SimulationBuilder::new(2, 1, 1)
///     .node(0, 0, 0, QubitType::Data, GateType::InitializeZ)
///     .node(1, 0, 0, QubitType::Data, GateType::MeasureZ)
///     .build();
///
/// assert_eq!(sim.height, 2);
/// assert!(sim.node(1, 0, 0).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    snapshot: SimulationSnapshot,
}

impl SimulationBuilder {
    /// Empty `height x vertical x horizontal` grid.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(height: usize, vertical: usize, horizontal: usize) -> Self {
        let positions = (0..vertical)
            .map(|i| {
                (0..horizontal)
                    .map(|j| {
                        Some(PlanarPosition {
                            x: i as f64,
                            y: j as f64,
                        })
                    })
                    .collect()
            })
            .collect();
        Self {
            snapshot: SimulationSnapshot {
                height,
                vertical,
                horizontal,
                nodes: vec![vec![vec![None; horizontal]; vertical]; height],
                positions,
            },
        }
    }

    fn slot(&mut self, t: usize, i: usize, j: usize) -> Option<&mut Option<Node>> {
        self.snapshot.nodes.get_mut(t)?.get_mut(i)?.get_mut(j)
    }

    /// Places `node` at `(t, i, j)`.
    pub fn with_node(mut self, t: usize, i: usize, j: usize, node: Node) -> Self {
        if let Some(slot) = self.slot(t, i, j) {
            *slot = Some(node);
        }
        self
    }

    /// Places a real node of `qubit` running `gate` at `(t, i, j)`.
    pub fn node(self, t: usize, i: usize, j: usize, qubit: QubitType, gate: GateType) -> Self {
        self.with_node(t, i, j, Node::new(qubit, gate))
    }

    /// Places the same qubit at `(i, j)` on every layer, idle except for
    /// an initialization at `t = 0`.
    pub fn idle_column(mut self, i: usize, j: usize, qubit: &QubitType) -> Self {
        for t in 0..self.snapshot.height {
            let gate = if t == 0 {
                GateType::InitializeZ
            } else {
                GateType::None
            };
            self = self.node(t, i, j, qubit.clone(), gate);
        }
        self
    }

    /// Places both halves of a two-qubit gate at layer `t`.
    pub fn two_qubit(
        self,
        t: usize,
        (a, a_gate): ((usize, usize), GateType),
        (b, b_gate): ((usize, usize), GateType),
    ) -> Self {
        let a_node = Node::new(QubitType::Data, a_gate).with_peer(PositionRef::new(t, b.0, b.1));
        let b_node = Node::new(QubitType::StabZ, b_gate).with_peer(PositionRef::new(t, a.0, a.1));
        self.with_node(t, a.0, a.1, a_node)
            .with_node(t, b.0, b.1, b_node)
    }

    /// Marks the node at `(t, i, j)` virtual.
    pub fn virtual_node(mut self, t: usize, i: usize, j: usize) -> Self {
        if let Some(Some(node)) = self.slot(t, i, j) {
            node.is_virtual = true;
        }
        self
    }

    /// Moves site `(i, j)` to `(x, y)`.
    pub fn position(mut self, i: usize, j: usize, x: f64, y: f64) -> Self {
        if let Some(site) = self.snapshot.positions.get_mut(i).and_then(|row| row.get_mut(j)) {
            *site = Some(PlanarPosition { x, y });
        }
        self
    }

    /// Removes the planar position of site `(i, j)`.
    pub fn without_position(mut self, i: usize, j: usize) -> Self {
        if let Some(site) = self.snapshot.positions.get_mut(i).and_then(|row| row.get_mut(j)) {
            *site = None;
        }
        self
    }

    /// Finish building.
    pub fn build(self) -> SimulationSnapshot {
        self.snapshot
    }
}
