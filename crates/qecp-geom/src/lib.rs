// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry for the QECP visualizer.

This crate provides:
- The fixed coordinate mapping from `(t, x, y)` display positions to render space.
- Growth breakpoints for partially grown decoding-graph edges and the derived
  edge layout (offsets, sub-segments, oriented cylinder transforms).
- 2D and 3D convex hulls used for blossom overlays.
- Rigid transforms (`Transform`), axis-aligned boxes (`Aabb`) and rays (`Ray`).

Design notes:
- Pure functions only; nothing here allocates render objects.
- Degenerate input (zero-length edges, coincident or colinear hull points)
  yields empty or flattened output rather than a panic.
"]

/// Display-space to render-space mapping.
pub mod coords;
/// Growth breakpoints for weighted edges.
pub mod growth;
/// Convex hulls over blossom boundary points.
pub mod hull;
/// Edge layout: endpoint offsets, grown/ungrown sub-segments, cylinder transforms.
pub mod layout;
/// Orientation helpers for unit cylinders.
pub mod orient;
/// Foundational geometric types.
pub mod types;

pub use coords::{CoordinateMapper, DisplayPosition, DEFAULT_T_SCALE};
pub use growth::{growth_breakpoints, GrowthBreakpoints};
pub use hull::{convex_hull_2d, convex_hull_3d, ConvexSolid};
pub use layout::{endpoint_offset, EdgeEndpoints, EdgeLayout, EdgeSegment, SegmentPart};
pub use orient::{cylinder_along, rotation_from_up};
pub use types::aabb::Aabb;
pub use types::ray::Ray;
pub use types::transform::Transform;
