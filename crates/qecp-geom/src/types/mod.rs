// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the scene layer (transform, AABB, ray).
//!
//! All math is `f32` through `glam`; picking distances are measured along
//! normalized ray directions.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Half-lines used for picking."]
pub mod ray;
#[doc = "Rigid transforms with non-uniform scale."]
pub mod transform;
