// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port contract for QECP visualizer renderers.
//!
//! This crate defines the capability surface the visualizer core consumes from
//! a retained-mode 3D library. It contains NO scene logic; the engine in
//! `qecp-viz` decides what to create and where.
//!
//! # Design Principles
//!
//! - **Renderers are dumb**: they own geometry, materials and meshes by id and
//!   answer ray picks. No domain logic.
//! - **Ids, not handles**: every resource is addressed by a small copyable id
//!   so pools can store them without borrowing the adapter.
//! - **Picks report everything**: adapters return every hit, visible or not,
//!   nearest first; filtering is the caller's job.

use thiserror::Error;

/// Error type for scene port operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// The referenced geometry, material or object does not exist (or was disposed).
    #[error("unknown {kind} id {id}")]
    UnknownId {
        /// Resource kind (`geometry`, `material`, `object`).
        kind: &'static str,
        /// Raw id.
        id: u32,
    },
    /// The adapter cannot perform this operation (e.g. PNG readback when headless).
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// A backend-specific error occurred.
    #[error("backend error: {0}")]
    Backend(String),
}

mod camera;
mod port;
mod types;

pub use camera::{CameraPreset, CameraState, ProjectionKind};
pub use port::ScenePort;
pub use types::{
    Color, GeometryDesc, GeometryId, Hit, MaterialDesc, MaterialId, ObjectId, PickTag, Primitive,
    Side,
};
