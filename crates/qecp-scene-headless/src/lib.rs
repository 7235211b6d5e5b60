// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless adapter for `qecp-scene-port`.
//!
//! This crate provides:
//! - [`HeadlessScene`], a `ScenePort` that tracks geometries, materials and
//!   meshes in ordered maps without any GPU, counting disposals so leaks show
//!   up in tests
//! - analytic ray picking (sphere, capsule, box) good enough to drive hover
//!   and selection offline
//! - a small software raster behind `export_png` for previews from the CLI

mod headless;
mod raster;
mod shape;

pub use headless::{HeadlessScene, MeshRecord};
