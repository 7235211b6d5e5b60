// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Data model for the QECP visualizer.

A visualizer data file couples one simulator (a time-layered grid of qubit
nodes and the gates applied to them) with a list of named decoding cases
(vertex/edge/dual-node states of the decoding graph). Everything here is
read-only input to the scene engine: files are parsed once, validated, and
swapped wholesale.

The JSON wire format uses the playground's abbreviated keys; the Rust types
use descriptive names and `serde` renames.
"]

mod case;
mod data;
mod error;
mod flag;
mod position;
mod simulation;

pub use case::{BlossomBoundary, BoundarySide, CaseSnapshot, DualNode, EdgeState, VertexState};
pub use data::{NamedCase, ValidationIssue, VertexPosition, VizData};
pub use error::ModelError;
pub use position::{PositionParseError, PositionRef};
pub use simulation::{GateType, Node, PlanarPosition, QubitType, SimulationSnapshot};
