// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use qecp_model::PositionRef;
use qecp_scene_port::PortError;
use thiserror::Error;

/// Failure that stops a rebuild.
///
/// The rebuild is abandoned where it failed; meshes created before the
/// failure stay owned by their pools and are released by the next rebuild
/// or by `dispose`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The adapter refused an operation.
    #[error(transparent)]
    Port(#[from] PortError),
    /// A two-qubit gate has no peer position.
    #[error("two-qubit gate at {at} has no peer")]
    MissingPeer {
        /// Gate node.
        at: PositionRef,
    },
    /// A gate peer points at a site without a planar position.
    #[error("gate at {at} points at peer {peer} outside the layout")]
    PeerOutOfRange {
        /// Gate node.
        at: PositionRef,
        /// Peer.
        peer: PositionRef,
    },
    /// A live vertex has no display position.
    #[error("vertex {vertex} has no position")]
    VertexWithoutPosition {
        /// Vertex index.
        vertex: usize,
    },
    /// An edge endpoint has no display position.
    #[error("edge {edge} references vertex {vertex} without a position")]
    EdgeEndpointOutOfRange {
        /// Edge index.
        edge: usize,
        /// Vertex index.
        vertex: usize,
    },
    /// The requested case does not exist.
    #[error("case {index} out of range ({len} cases)")]
    CaseOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cases.
        len: usize,
    },
}
