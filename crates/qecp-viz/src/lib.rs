// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"QECP visualizer core.

Turns a loaded [`qecp_model::VizData`] into pooled meshes on any
[`qecp_scene_port::ScenePort`] and tracks hover/selection on top of them.

- [`catalog`]: every shared geometry and material, keyed by enums.
- [`pool`]: dense grids for the simulator layer, grow-only sparse pools for
  decoding-graph vertices and edges.
- [`sync`]: the data synchronizer (simulation layer, case layer, blossoms).
- [`interaction`]: hover/select state machine and picking.
- [`engine`]: facade owning the port, with latest-wins trigger coalescing.
"]

pub mod catalog;
/// Per-edge endpoint cache used by blossom overlays.
pub mod edge_cache;
pub mod engine;
/// Rebuild errors.
pub mod error;
pub mod interaction;
pub mod pool;
/// Scene statistics.
pub mod stats;
pub mod sync;

pub use catalog::{Catalog, GateGlyph, GeometryKey, MaterialKey};
pub use edge_cache::EdgeGeometryCache;
pub use engine::{Engine, Trigger, Viewport};
pub use error::SyncError;
pub use interaction::{
    pick, DisplacedMaterials, HighlightTargets, Interaction, InteractionEvent, PointerTracker,
    SelectionRef,
};
pub use pool::{EdgeMeshes, Grid2, Grid3, PoolEntry, SparsePool};
pub use stats::SceneStats;
pub use sync::{
    boundary_point, peer_line, BlossomMesh, CasePools, RebuildReport, SceneSync, SimulationPools,
};
