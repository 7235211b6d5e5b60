// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core scene types for the rendering port contract.
//!
//! These are pure descriptions; adapters turn them into GPU or in-memory
//! resources and hand back ids.

use glam::{Vec2, Vec3};
use qecp_geom::{ConvexSolid, Transform};

/// Id of a geometry owned by the adapter.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometryId(pub u32);

/// Id of a material owned by the adapter.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub u32);

/// Id of a mesh (geometry + material + transform) inserted in the scene.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

/// 24-bit RGB color, `0xRRGGBB`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// Black.
    pub const BLACK: Self = Self(0x000000);

    /// Red, green and blue channels in `0..=255`.
    #[must_use]
    pub fn rgb(self) -> [u8; 3] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r, g, b]
    }

    /// Channels as linear-ish floats in `[0, 1]`.
    #[must_use]
    pub fn to_f32(self) -> [f32; 3] {
        self.rgb().map(|c| f32::from(c) / 255.0)
    }
}

/// Which faces a material draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Outward faces only.
    #[default]
    Front,
    /// Inward faces only (outline shells).
    Back,
    /// Both.
    Double,
}

/// Surface description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDesc {
    /// Base color.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether blending is enabled.
    pub transparent: bool,
    /// Drawn faces.
    pub side: Side,
}

impl MaterialDesc {
    /// Opaque front-faced material (blending still enabled so opacity can be tweaked live).
    #[must_use]
    pub const fn solid(color: u32) -> Self {
        Self {
            color: Color(color),
            opacity: 1.0,
            transparent: true,
            side: Side::Front,
        }
    }

    /// Back-faced shell material for outline twins.
    #[must_use]
    pub const fn outline(color: u32) -> Self {
        Self {
            color: Color(color),
            opacity: 1.0,
            transparent: true,
            side: Side::Back,
        }
    }

    /// Same material with a different opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Same material drawn on a different side.
    #[must_use]
    pub const fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

/// Geometry primitive in its local frame.
///
/// Cylinders, cones and tori follow the usual retained-mode conventions:
/// cylinders and cones are centered on the origin along local `+Y`, tori lie
/// in the local `XY` plane, polygons lie in the local `XY` plane.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Sphere around the origin.
    Sphere {
        /// Radius.
        radius: f32,
    },
    /// Cylinder along `+Y`.
    Cylinder {
        /// Radius.
        radius: f32,
        /// Height.
        height: f32,
        /// Without end caps.
        open_ended: bool,
    },
    /// Cone along `+Y` with its apex up.
    Cone {
        /// Base radius.
        radius: f32,
        /// Height.
        height: f32,
    },
    /// Torus around the local `Z` axis.
    Torus {
        /// Ring radius.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Segments around the ring (4 gives a diamond).
        tubular_segments: u32,
    },
    /// Filled planar polygon (counter-clockwise outline).
    Polygon {
        /// Outline in the local `XY` plane.
        points: Vec<Vec2>,
    },
    /// Triangulated convex solid.
    Convex(ConvexSolid),
}

/// Geometry description: a primitive plus a transform baked into its vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryDesc {
    /// Primitive shape.
    pub primitive: Primitive,
    /// Transform applied to the primitive's vertices at creation time.
    pub local: Transform,
    /// Tessellation hint for curved primitives.
    pub segments: u32,
}

impl GeometryDesc {
    /// Description with an identity local transform.
    #[must_use]
    pub fn new(primitive: Primitive, segments: u32) -> Self {
        Self {
            primitive,
            local: Transform::identity(),
            segments,
        }
    }

    /// Replaces the baked local transform.
    #[must_use]
    pub fn with_local(mut self, local: Transform) -> Self {
        self.local = local;
        self
    }

    /// Unit-height open cylinder whose base sits at the origin, used for
    /// anything placed by start point + direction + length.
    #[must_use]
    pub fn unit_rod(radius: f32, segments: u32) -> Self {
        Self::new(
            Primitive::Cylinder {
                radius,
                height: 1.0,
                open_ended: true,
            },
            segments,
        )
        .with_local(Transform::from_translation(Vec3::new(0.0, 0.5, 0.0)))
    }
}

/// Typed reference attached to pickable meshes.
///
/// Only meshes that carry a tag take part in hover/selection; every other
/// mesh is transparent to interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickTag {
    /// A decoding-graph vertex by index.
    Vertex(usize),
    /// A decoding-graph edge by index (any of its six sub-meshes).
    Edge(usize),
}

/// One ray hit as reported by the adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Object hit.
    pub object: ObjectId,
    /// Distance along the ray.
    pub distance: f32,
    /// Whether the object was visible at pick time.
    pub visible: bool,
    /// Tag attached to the object, if any.
    pub tag: Option<PickTag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channels() {
        assert_eq!(Color(0x00C0FF).rgb(), [0x00, 0xC0, 0xFF]);
        assert_eq!(Color::BLACK.to_f32(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn unit_rod_base_sits_at_origin() {
        let desc = GeometryDesc::unit_rod(0.02, 16);
        assert_eq!(desc.local.transform_point(Vec3::new(0.0, -0.5, 0.0)), Vec3::ZERO);
    }
}
