// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The loaded visualizer file: simulator, vertex layout and named cases.

use qecp_geom::DisplayPosition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CaseSnapshot, GateType, ModelError, PositionRef, QubitType, SimulationSnapshot};

/// Display position of a decoding-graph vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct VertexPosition {
    /// Time coordinate.
    pub t: f64,
    /// First planar coordinate.
    pub x: f64,
    /// Second planar coordinate.
    pub y: f64,
}

impl VertexPosition {
    /// Single-precision display position for the coordinate mapper.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_display(self) -> DisplayPosition {
        DisplayPosition::new(self.t as f32, self.x as f32, self.y as f32)
    }
}

/// A decoding case with its display name; `[name, case]` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "(String, CaseSnapshot)", into = "(String, CaseSnapshot)")]
pub struct NamedCase {
    /// Display name.
    pub name: String,
    /// Case data.
    pub case: CaseSnapshot,
}

impl From<(String, CaseSnapshot)> for NamedCase {
    fn from((name, case): (String, CaseSnapshot)) -> Self {
        Self { name, case }
    }
}

impl From<NamedCase> for (String, CaseSnapshot) {
    fn from(named: NamedCase) -> Self {
        (named.name, named.case)
    }
}

/// Everything the visualizer shows for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VizData {
    /// Simulator layers; absent for decoding-graph-only files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulator: Option<SimulationSnapshot>,
    /// Vertex layout shared by all cases.
    #[serde(default)]
    pub positions: Vec<VertexPosition>,
    /// Named cases.
    #[serde(default)]
    pub cases: Vec<NamedCase>,
    /// Producer's statement that all vertices lie in one plane.
    #[serde(
        rename = "is_vertices_2d_plane",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vertices_2d_plane: Option<bool>,
}

/// Non-fatal data problem reported by [`VizData::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// A grid dimension disagrees with the declared extents.
    #[error("simulator {what} has {found} entries, expected {expected}")]
    GridShape {
        /// Which axis.
        what: &'static str,
        /// Declared extent.
        expected: usize,
        /// Actual length.
        found: usize,
    },
    /// A live node's site has no planar position.
    #[error("node {at} has no planar position")]
    MissingSitePosition {
        /// Node.
        at: PositionRef,
    },
    /// Two-qubit gate without a peer token.
    #[error("two-qubit gate at {at} has no peer")]
    MissingPeer {
        /// Node.
        at: PositionRef,
    },
    /// Peer token points outside the grid or at a null node.
    #[error("gate at {at} points at missing peer {peer}")]
    PeerOutOfRange {
        /// Node.
        at: PositionRef,
        /// Peer.
        peer: PositionRef,
    },
    /// Unrecognized gate name.
    #[error("unknown gate type {name:?} at {at}")]
    UnknownGate {
        /// Node.
        at: PositionRef,
        /// Name.
        name: String,
    },
    /// Unrecognized qubit name.
    #[error("unknown qubit type {name:?} at {at}")]
    UnknownQubit {
        /// Node.
        at: PositionRef,
        /// Name.
        name: String,
    },
    /// Edge endpoint has no vertex position.
    #[error("case {case} edge {edge} references vertex {vertex} without a position")]
    EdgeEndpointOutOfRange {
        /// Case index.
        case: usize,
        /// Edge index.
        edge: usize,
        /// Vertex index.
        vertex: usize,
    },
    /// Vertex without a position.
    #[error("case {case} vertex {vertex} has no position")]
    VertexWithoutPosition {
        /// Case index.
        case: usize,
        /// Vertex index.
        vertex: usize,
    },
    /// Growth outside `0 <= lg, rg` and `lg + rg <= w`.
    #[error("case {case} edge {edge} is grown beyond its weight")]
    Overgrown {
        /// Case index.
        case: usize,
        /// Edge index.
        edge: usize,
    },
    /// Blossom boundary references a missing edge.
    #[error("case {case} dual node {dual_node} references missing edge {edge}")]
    BoundaryEdgeMissing {
        /// Case index.
        case: usize,
        /// Dual node index.
        dual_node: usize,
        /// Edge index.
        edge: usize,
    },
}

impl VizData {
    /// Parses a visualizer JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a visualizer JSON document from bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Case at `index`.
    pub fn case(&self, index: usize) -> Option<&NamedCase> {
        self.cases.get(index)
    }

    /// Whether all vertices lie in one time plane: the producer's flag if
    /// present, otherwise detected from the positions.
    #[allow(clippy::float_cmp)]
    pub fn is_planar(&self) -> bool {
        self.vertices_2d_plane
            .unwrap_or_else(|| self.positions.windows(2).all(|w| w[0].t == w[1].t))
    }

    /// blake3 over the canonical CBOR encoding of the whole file.
    pub fn digest(&self) -> Result<[u8; 32], ModelError> {
        hash_cbor(self)
    }

    /// blake3 over the canonical CBOR encoding of the simulator part only;
    /// equal digests mean the simulator layer does not need rebuilding.
    pub fn simulator_digest(&self) -> Result<[u8; 32], ModelError> {
        hash_cbor(&self.simulator)
    }

    /// Collects every non-fatal data problem.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Some(sim) = &self.simulator {
            validate_simulator(sim, &mut issues);
        }
        for (ci, named) in self.cases.iter().enumerate() {
            self.validate_case(ci, &named.case, &mut issues);
        }
        issues
    }

    fn validate_case(&self, ci: usize, case: &CaseSnapshot, issues: &mut Vec<ValidationIssue>) {
        let n = self.positions.len();
        for (vi, v) in case.vertices.iter().enumerate() {
            if v.is_some() && vi >= n {
                issues.push(ValidationIssue::VertexWithoutPosition {
                    case: ci,
                    vertex: vi,
                });
            }
        }
        for (ei, edge) in case.edges.iter().enumerate() {
            let Some(edge) = edge else { continue };
            for vertex in [edge.left, edge.right] {
                if vertex >= n {
                    issues.push(ValidationIssue::EdgeEndpointOutOfRange {
                        case: ci,
                        edge: ei,
                        vertex,
                    });
                }
            }
            if edge.is_overgrown() {
                issues.push(ValidationIssue::Overgrown { case: ci, edge: ei });
            }
        }
        for (di, node) in case.dual_nodes.iter().enumerate() {
            let Some(members) = node.as_ref().and_then(|d| d.blossom_members.as_ref()) else {
                continue;
            };
            for m in members {
                if case.edge(m.edge).is_none() {
                    issues.push(ValidationIssue::BoundaryEdgeMissing {
                        case: ci,
                        dual_node: di,
                        edge: m.edge,
                    });
                }
            }
        }
    }
}

fn hash_cbor<T: Serialize>(value: &T) -> Result<[u8; 32], ModelError> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(value, &mut buf).map_err(|e| ModelError::Encode(e.to_string()))?;
    Ok(blake3::hash(&buf).into())
}

fn validate_simulator(sim: &SimulationSnapshot, issues: &mut Vec<ValidationIssue>) {
    let mut shape = |what, expected, found| {
        if expected != found {
            issues.push(ValidationIssue::GridShape {
                what,
                expected,
                found,
            });
        }
    };
    shape("layers", sim.height, sim.nodes.len());
    for layer in &sim.nodes {
        shape("rows", sim.vertical, layer.len());
        for row in layer {
            shape("columns", sim.horizontal, row.len());
        }
    }
    shape("position rows", sim.vertical, sim.positions.len());
    for row in &sim.positions {
        shape("position columns", sim.horizontal, row.len());
    }

    for at in sim.coordinates() {
        let Some(node) = sim.node(at.t, at.i, at.j) else {
            continue;
        };
        if node.is_virtual {
            continue;
        }
        if sim.position(at.i, at.j).is_none() {
            issues.push(ValidationIssue::MissingSitePosition { at });
        }
        if let QubitType::Unknown(name) = &node.qubit_type {
            issues.push(ValidationIssue::UnknownQubit {
                at,
                name: name.clone(),
            });
        }
        if node.is_pre_virtual {
            continue;
        }
        if let GateType::Unknown(name) = &node.gate_type {
            issues.push(ValidationIssue::UnknownGate {
                at,
                name: name.clone(),
            });
        }
        if node.gate_type.is_two_qubit() {
            match node.peer_position {
                None => issues.push(ValidationIssue::MissingPeer { at }),
                Some(peer) if sim.node(peer.t, peer.i, peer.j).is_none() => {
                    issues.push(ValidationIssue::PeerOutOfRange { at, peer });
                }
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "simulator": {
            "height": 2, "vertical": 1, "horizontal": 2,
            "nodes": [
                [[{"q":"Data","gt":"InitializeZ"}, {"q":"StabZ","gt":"InitializeZ"}]],
                [[{"q":"Data","gt":"CXGateControl","gp":"[1][0][1]"}, {"q":"StabZ","gt":"CXGateTarget","gp":"[1][0][0]"}]]
            ],
            "positions": [[{"x":0,"y":0},{"x":0,"y":1}]]
        },
        "positions": [{"t":0,"x":0,"y":0},{"t":0,"x":1,"y":0}],
        "cases": [["first", {"vertices":[{"s":1},{"s":0}],"edges":[{"l":0,"r":1,"w":2,"lg":1,"rg":0}],"dual_nodes":[]}]]
    }"#;

    #[test]
    fn parses_sample() {
        let data = VizData::from_json_str(SAMPLE).unwrap();
        assert_eq!(data.cases.len(), 1);
        assert_eq!(data.case(0).map(|c| c.name.as_str()), Some("first"));
        assert!(data.is_planar());
        assert!(data.validate().is_empty(), "{:?}", data.validate());
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let a = VizData::from_json_str(SAMPLE).unwrap();
        let mut b = a.clone();
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
        b.cases[0].case.vertices[0] = None;
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
        assert_eq!(a.simulator_digest().unwrap(), b.simulator_digest().unwrap());
    }

    #[test]
    fn validate_reports_bad_edges() {
        let mut data = VizData::from_json_str(SAMPLE).unwrap();
        if let Some(Some(edge)) = data.cases[0].case.edges.get_mut(0) {
            edge.right = 9;
            edge.left_grown = 5.0;
        }
        let issues = data.validate();
        assert!(issues.contains(&ValidationIssue::EdgeEndpointOutOfRange {
            case: 0,
            edge: 0,
            vertex: 9
        }));
        assert!(issues.contains(&ValidationIssue::Overgrown { case: 0, edge: 0 }));
    }
}
