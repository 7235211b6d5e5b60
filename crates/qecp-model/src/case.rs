// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Decoding-graph state for one case.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::flag::{self, Flag};

/// State of a decoding-graph vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VertexState {
    /// Syndrome defect.
    #[serde(rename = "s", default, deserialize_with = "flag::deserialize")]
    pub is_defect: bool,
    /// Virtual (boundary) vertex.
    #[serde(rename = "v", default, deserialize_with = "flag::deserialize")]
    pub is_virtual: bool,
    /// Mirror unit owning this vertex in a partitioned decoder.
    #[serde(rename = "mi", default, skip_serializing_if = "Option::is_none")]
    pub mirror_unit: Option<usize>,
    /// Whether the mirror unit is enabled.
    #[serde(
        rename = "me",
        default,
        deserialize_with = "flag::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub mirror_enabled: Option<bool>,
}

impl VertexState {
    /// A mirrored vertex whose mirror unit is explicitly disabled.
    pub fn is_mirror_disabled(&self) -> bool {
        self.mirror_unit.is_some() && self.mirror_enabled == Some(false)
    }
}

/// State of a weighted decoding-graph edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EdgeState {
    /// Left vertex index.
    #[serde(rename = "l")]
    pub left: usize,
    /// Right vertex index.
    #[serde(rename = "r")]
    pub right: usize,
    /// Weight.
    #[serde(rename = "w")]
    pub weight: f64,
    /// Amount grown from the left vertex.
    #[serde(rename = "lg", default)]
    pub left_grown: f64,
    /// Amount grown from the right vertex.
    #[serde(rename = "rg", default)]
    pub right_grown: f64,
    /// Outermost dual node covering the left vertex.
    #[serde(rename = "ld", default, skip_serializing_if = "Option::is_none")]
    pub left_dual: Option<usize>,
    /// Outermost dual node covering the right vertex.
    #[serde(rename = "rd", default, skip_serializing_if = "Option::is_none")]
    pub right_dual: Option<usize>,
}

impl EdgeState {
    /// Tight edge inside a single dual node: both ends share the same dual
    /// node and the growth covers the whole weight.
    pub fn is_internal(&self) -> bool {
        self.left_dual == self.right_dual && self.left_grown + self.right_grown >= self.weight
    }

    /// Growth exceeds weight or is negative.
    pub fn is_overgrown(&self) -> bool {
        self.left_grown < 0.0
            || self.right_grown < 0.0
            || self.left_grown + self.right_grown > self.weight
    }
}

/// Which end of an edge a blossom boundary entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundarySide {
    /// The edge's left vertex is inside the blossom.
    Left,
    /// The edge's right vertex is inside the blossom.
    Right,
}

/// One `(side, edge_index)` entry of a dual node's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlossomBoundary {
    /// Inner side.
    pub side: BoundarySide,
    /// Edge index.
    pub edge: usize,
}

impl Serialize for BlossomBoundary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.side == BoundarySide::Left, self.edge).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BlossomBoundary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (Flag(is_left), edge) = <(Flag, usize)>::deserialize(deserializer)?;
        Ok(Self {
            side: if is_left {
                BoundarySide::Left
            } else {
                BoundarySide::Right
            },
            edge,
        })
    }
}

/// A node of the dual (blossom) forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DualNode {
    /// Enclosing blossom.
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    /// Dual variable.
    #[serde(rename = "d", default)]
    pub dual_value: f64,
    /// Child dual nodes; present only for blossoms.
    #[serde(rename = "o", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<usize>>,
    /// Boundary edges as blossom members.
    #[serde(rename = "b", default, skip_serializing_if = "Option::is_none")]
    pub blossom_members: Option<Vec<BlossomBoundary>>,
}

impl DualNode {
    /// Root of the dual forest with something to show: a positive dual value
    /// or a blossom.
    pub fn is_displayed(&self) -> bool {
        self.parent.is_none() && (self.dual_value > 0.0 || self.children.is_some())
    }
}

/// One decoding case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CaseSnapshot {
    /// Vertex states, nullable.
    #[serde(default)]
    pub vertices: Vec<Option<VertexState>>,
    /// Edge states, nullable.
    #[serde(default)]
    pub edges: Vec<Option<EdgeState>>,
    /// Dual nodes, nullable.
    #[serde(default)]
    pub dual_nodes: Vec<Option<DualNode>>,
    /// Edges of the displayed subgraph (a matching or correction), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<BTreeSet<usize>>,
}

impl CaseSnapshot {
    /// Vertex at `index`; `None` when null or out of range.
    pub fn vertex(&self, index: usize) -> Option<&VertexState> {
        self.vertices.get(index)?.as_ref()
    }

    /// Edge at `index`; `None` when null or out of range.
    pub fn edge(&self, index: usize) -> Option<&EdgeState> {
        self.edges.get(index)?.as_ref()
    }

    /// Whether `index` belongs to the displayed subgraph.
    pub fn in_subgraph(&self, index: usize) -> bool {
        self.subgraph.as_ref().is_some_and(|s| s.contains(&index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_mirror_flags() {
        let v: VertexState = serde_json::from_str(r#"{"s":1,"v":0,"mi":2,"me":0}"#).unwrap();
        assert!(v.is_defect);
        assert!(v.is_mirror_disabled());
        let plain: VertexState = serde_json::from_str(r#"{"s":0,"mi":2}"#).unwrap();
        assert!(!plain.is_mirror_disabled());
    }

    #[test]
    fn internal_edge_requires_same_dual_and_full_growth() {
        let mut e = EdgeState {
            left: 0,
            right: 1,
            weight: 4.0,
            left_grown: 2.0,
            right_grown: 2.0,
            left_dual: Some(3),
            right_dual: Some(3),
        };
        assert!(e.is_internal());
        e.right_grown = 1.0;
        assert!(!e.is_internal());
        e.right_grown = 2.0;
        e.right_dual = Some(4);
        assert!(!e.is_internal());
    }

    #[test]
    fn dual_node_boundary_pairs() {
        let json = r#"{"p":null,"d":0,"o":[1,2],"b":[[true,4],[0,7]]}"#;
        let node: DualNode = serde_json::from_str(json).unwrap();
        assert!(node.is_displayed());
        let members = node.blossom_members.unwrap();
        assert_eq!(
            members,
            vec![
                BlossomBoundary { side: BoundarySide::Left, edge: 4 },
                BlossomBoundary { side: BoundarySide::Right, edge: 7 },
            ]
        );
    }

    #[test]
    fn case_lookups() {
        let case: CaseSnapshot =
            serde_json::from_str(r#"{"vertices":[null,{"s":1}],"edges":[],"subgraph":[3]}"#)
                .unwrap();
        assert!(case.vertex(0).is_none());
        assert!(case.vertex(1).is_some());
        assert!(case.vertex(9).is_none());
        assert!(case.in_subgraph(3));
        assert!(!case.in_subgraph(0));
    }
}
