// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glam::Vec3;

/// Half-line with a normalized direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Builds a ray; `direction` is normalized (a zero direction falls back to `-Z`).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let dir = direction.normalize_or_zero();
        Self {
            origin,
            direction: if dir == Vec3::ZERO { Vec3::NEG_Z } else { dir },
        }
    }

    /// Ray origin.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative distance to a sphere surface.
    #[must_use]
    pub fn sphere_hit(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(0.0)
    }

    /// Distance to a capsule around segment `a..b` with the given radius.
    ///
    /// The reported distance is the closest-approach parameter pulled back by
    /// the penetration depth; exact for rays perpendicular to the axis, and a
    /// consistent ordering key otherwise.
    #[must_use]
    pub fn capsule_hit(&self, a: Vec3, b: Vec3, radius: f32) -> Option<f32> {
        let axis = b - a;
        let len2 = axis.length_squared();
        if len2 <= f32::EPSILON {
            return self.sphere_hit(a, radius);
        }
        let d = self.direction;
        let w = self.origin - a;
        let ad = axis.dot(d);
        let aw = axis.dot(w);
        let dw = d.dot(w);
        let denom = len2 - ad * ad;
        // parameter along the segment of the closest approach, clamped to the segment
        let s = if denom.abs() <= f32::EPSILON {
            0.0
        } else {
            ((aw - ad * dw) / denom).clamp(0.0, 1.0)
        };
        let on_axis = a + axis * s;
        let t = (on_axis - self.origin).dot(d).max(0.0);
        let gap = (self.at(t) - on_axis).length();
        if gap > radius {
            return None;
        }
        let depth = (radius * radius - gap * gap).max(0.0).sqrt();
        Some((t - depth).max(0.0))
    }
}
