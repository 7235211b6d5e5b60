// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Decoding case builder for tests.

use qecp_model::{BlossomBoundary, BoundarySide, CaseSnapshot, DualNode, EdgeState, VertexState};

/// Builder for [`CaseSnapshot`].
///
/// # Example
///
/// ```
/// use qecp_dry_tests::CaseBuilder;
///
/// let case = CaseBuilder::new()
///     .vertices(3)
///     .defect(1)
///     .edge(0, 1, 2.0)
///     .grown_edge(1, 2, 2.0, 1.0, 0.0)
///     .build();
///
/// assert_eq!(case.vertices.len(), 3);
/// assert!(case.vertex(1).is_some_and(|v| v.is_defect));
/// assert_eq!(case.edges.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    case: CaseSnapshot,
}

impl CaseBuilder {
    /// Empty case.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` plain real vertices.
    pub fn vertices(mut self, count: usize) -> Self {
        self.case
            .vertices
            .extend(std::iter::repeat_with(|| Some(VertexState::default())).take(count));
        self
    }

    /// Appends `vertex`.
    pub fn vertex(mut self, vertex: VertexState) -> Self {
        self.case.vertices.push(Some(vertex));
        self
    }

    /// Appends a null vertex.
    pub fn null_vertex(mut self) -> Self {
        self.case.vertices.push(None);
        self
    }

    /// Marks vertex `index` as a defect.
    pub fn defect(mut self, index: usize) -> Self {
        if let Some(Some(v)) = self.case.vertices.get_mut(index) {
            v.is_defect = true;
        }
        self
    }

    /// Marks vertex `index` virtual.
    pub fn virtual_vertex(mut self, index: usize) -> Self {
        if let Some(Some(v)) = self.case.vertices.get_mut(index) {
            v.is_virtual = true;
        }
        self
    }

    /// Appends an ungrown edge.
    pub fn edge(self, left: usize, right: usize, weight: f64) -> Self {
        self.grown_edge(left, right, weight, 0.0, 0.0)
    }

    /// Appends an edge grown by `left_grown`/`right_grown`.
    pub fn grown_edge(
        self,
        left: usize,
        right: usize,
        weight: f64,
        left_grown: f64,
        right_grown: f64,
    ) -> Self {
        self.edge_state(EdgeState {
            left,
            right,
            weight,
            left_grown,
            right_grown,
            left_dual: None,
            right_dual: None,
        })
    }

    /// Appends `edge` as is.
    pub fn edge_state(mut self, edge: EdgeState) -> Self {
        self.case.edges.push(Some(edge));
        self
    }

    /// Appends a null edge.
    pub fn null_edge(mut self) -> Self {
        self.case.edges.push(None);
        self
    }

    /// Appends a root blossom with dual value `dual_value` bounded by
    /// `members` (`(side, edge)` pairs).
    pub fn blossom(mut self, dual_value: f64, members: &[(BoundarySide, usize)]) -> Self {
        self.case.dual_nodes.push(Some(DualNode {
            parent: None,
            dual_value,
            children: Some(Vec::new()),
            blossom_members: Some(
                members
                    .iter()
                    .map(|&(side, edge)| BlossomBoundary { side, edge })
                    .collect(),
            ),
        }));
        self
    }

    /// Appends `node` as is.
    pub fn dual_node(mut self, node: DualNode) -> Self {
        self.case.dual_nodes.push(Some(node));
        self
    }

    /// Shows `edges` as the subgraph.
    pub fn subgraph(mut self, edges: impl IntoIterator<Item = usize>) -> Self {
        self.case.subgraph = Some(edges.into_iter().collect());
        self
    }

    /// Finish building.
    pub fn build(self) -> CaseSnapshot {
        self.case
    }
}
