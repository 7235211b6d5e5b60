// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simulator layer: a `[t][i][j]` grid of nullable qubit nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flag;
use crate::PositionRef;

/// Role of a qubit in the code.
///
/// Unrecognized names are kept as [`QubitType::Unknown`] so they can be
/// reported and drawn with a fallback material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QubitType {
    /// Data qubit.
    Data,
    /// X stabilizer ancilla.
    StabX,
    /// Z stabilizer ancilla.
    StabZ,
    /// XZZX code ancilla on the logical X boundary.
    StabXZZXLogicalX,
    /// XZZX code ancilla on the logical Z boundary.
    StabXZZXLogicalZ,
    /// Y stabilizer ancilla.
    StabY,
    /// Anything else.
    Unknown(String),
}

impl QubitType {
    /// Wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Data => "Data",
            Self::StabX => "StabX",
            Self::StabZ => "StabZ",
            Self::StabXZZXLogicalX => "StabXZZXLogicalX",
            Self::StabXZZXLogicalZ => "StabXZZXLogicalZ",
            Self::StabY => "StabY",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for QubitType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Data" => Self::Data,
            "StabX" => Self::StabX,
            "StabZ" => Self::StabZ,
            "StabXZZXLogicalX" => Self::StabXZZXLogicalX,
            "StabXZZXLogicalZ" => Self::StabXZZXLogicalZ,
            "StabY" => Self::StabY,
            _ => Self::Unknown(name),
        }
    }
}

impl From<QubitType> for String {
    fn from(kind: QubitType) -> Self {
        match kind {
            QubitType::Unknown(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for QubitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate applied to a node at its time layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum GateType {
    /// No gate (idle).
    #[default]
    None,
    /// Prepare in `|0>`.
    InitializeZ,
    /// Prepare in `|+>`.
    InitializeX,
    /// Control side of a CNOT.
    CXGateControl,
    /// Target side of a CNOT.
    CXGateTarget,
    /// Control side of a CY.
    CYGateControl,
    /// Target side of a CY.
    CYGateTarget,
    /// Either side of a CZ.
    CZGate,
    /// Measure in Z.
    MeasureZ,
    /// Measure in X.
    MeasureX,
    /// Anything else.
    Unknown(String),
}

impl GateType {
    /// Wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "None",
            Self::InitializeZ => "InitializeZ",
            Self::InitializeX => "InitializeX",
            Self::CXGateControl => "CXGateControl",
            Self::CXGateTarget => "CXGateTarget",
            Self::CYGateControl => "CYGateControl",
            Self::CYGateTarget => "CYGateTarget",
            Self::CZGate => "CZGate",
            Self::MeasureZ => "MeasureZ",
            Self::MeasureX => "MeasureX",
            Self::Unknown(name) => name,
        }
    }

    /// State preparation.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::InitializeX | Self::InitializeZ)
    }

    /// Measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Self::MeasureX | Self::MeasureZ)
    }

    /// Two-qubit gate drawn with a connecting line to its peer.
    pub fn is_two_qubit(&self) -> bool {
        matches!(
            self,
            Self::CXGateControl
                | Self::CXGateTarget
                | Self::CYGateControl
                | Self::CYGateTarget
                | Self::CZGate
        )
    }
}

impl From<String> for GateType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "None" => Self::None,
            "InitializeZ" => Self::InitializeZ,
            "InitializeX" => Self::InitializeX,
            "CXGateControl" => Self::CXGateControl,
            "CXGateTarget" => Self::CXGateTarget,
            "CYGateControl" => Self::CYGateControl,
            "CYGateTarget" => Self::CYGateTarget,
            "CZGate" => Self::CZGate,
            "MeasureZ" => Self::MeasureZ,
            "MeasureX" => Self::MeasureX,
            _ => Self::Unknown(name),
        }
    }
}

impl From<GateType> for String {
    fn from(kind: GateType) -> Self {
        match kind {
            GateType::Unknown(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulator node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Qubit role.
    #[serde(rename = "q")]
    pub qubit_type: QubitType,
    /// Gate at this layer.
    #[serde(rename = "gt", default)]
    pub gate_type: GateType,
    /// Peer of a two-qubit gate.
    #[serde(rename = "gp", default, skip_serializing_if = "Option::is_none")]
    pub peer_position: Option<PositionRef>,
    /// Virtual (boundary padding) node; never drawn.
    #[serde(rename = "v", default, deserialize_with = "flag::deserialize")]
    pub is_virtual: bool,
    /// Gate peer is virtual; the gate itself is not drawn.
    #[serde(rename = "pv", default, deserialize_with = "flag::deserialize")]
    pub is_pre_virtual: bool,
}

impl Node {
    /// Real node of `qubit_type` with `gate_type`.
    pub fn new(qubit_type: QubitType, gate_type: GateType) -> Self {
        Self {
            qubit_type,
            gate_type,
            peer_position: None,
            is_virtual: false,
            is_pre_virtual: false,
        }
    }

    /// Same node with a gate peer.
    #[must_use]
    pub fn with_peer(mut self, peer: PositionRef) -> Self {
        self.peer_position = Some(peer);
        self
    }
}

/// Planar layout of one `(i, j)` site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlanarPosition {
    /// First planar coordinate.
    pub x: f64,
    /// Second planar coordinate.
    pub y: f64,
}

/// Time-layered simulator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationSnapshot {
    /// Number of time layers.
    pub height: usize,
    /// Rows.
    pub vertical: usize,
    /// Columns.
    pub horizontal: usize,
    /// `nodes[t][i][j]`.
    pub nodes: Vec<Vec<Vec<Option<Node>>>>,
    /// `positions[i][j]`.
    pub positions: Vec<Vec<Option<PlanarPosition>>>,
}

impl SimulationSnapshot {
    /// Node at `(t, i, j)`; `None` when null or out of range.
    pub fn node(&self, t: usize, i: usize, j: usize) -> Option<&Node> {
        self.nodes.get(t)?.get(i)?.get(j)?.as_ref()
    }

    /// Layout of site `(i, j)`; `None` when null or out of range.
    pub fn position(&self, i: usize, j: usize) -> Option<PlanarPosition> {
        *self.positions.get(i)?.get(j)?
    }

    /// Shift applied to every simulator time so the stack is vertically centered.
    #[allow(clippy::cast_precision_loss)]
    pub fn t_bias(&self) -> f64 {
        -(self.height as f64) / 2.0
    }

    /// Every `(t, i, j)` within the declared extents, in layer/row/column order.
    pub fn coordinates(&self) -> impl Iterator<Item = PositionRef> + '_ {
        (0..self.height).flat_map(move |t| {
            (0..self.vertical)
                .flat_map(move |i| (0..self.horizontal).map(move |j| PositionRef::new(t, i, j)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_wire_format() {
        let json = r#"{"q":"StabZ","gt":"CXGateTarget","gp":"[2][1][1]","v":false,"pv":0}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.qubit_type, QubitType::StabZ);
        assert_eq!(node.gate_type, GateType::CXGateTarget);
        assert_eq!(node.peer_position, Some(PositionRef::new(2, 1, 1)));
        assert!(!node.is_pre_virtual);
    }

    #[test]
    fn unknown_kinds_are_preserved() {
        let node: Node = serde_json::from_str(r#"{"q":"Flag","gt":"SwapGate"}"#).unwrap();
        assert_eq!(node.qubit_type, QubitType::Unknown("Flag".into()));
        assert_eq!(node.gate_type.to_string(), "SwapGate");
        let back = serde_json::to_string(&node).unwrap();
        assert!(back.contains("\"gt\":\"SwapGate\""));
    }

    #[test]
    fn malformed_peer_fails_the_parse() {
        let json = r#"{"q":"Data","gt":"CZGate","gp":"[1][2]"}"#;
        assert!(serde_json::from_str::<Node>(json).is_err());
    }

    #[test]
    fn lookups_are_bounds_checked() {
        let snap = SimulationSnapshot {
            height: 1,
            vertical: 1,
            horizontal: 1,
            nodes: vec![vec![vec![Some(Node::new(QubitType::Data, GateType::None))]]],
            positions: vec![vec![Some(PlanarPosition { x: 1.0, y: 2.0 })]],
        };
        assert!(snap.node(0, 0, 0).is_some());
        assert!(snap.node(1, 0, 0).is_none());
        assert!(snap.position(0, 5).is_none());
        assert_eq!(snap.t_bias(), -0.5);
        assert_eq!(snap.coordinates().count(), 1);
    }
}
