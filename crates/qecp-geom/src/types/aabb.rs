// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glam::{Mat4, Vec3};

use super::ray::Ray;

/// Axis-aligned bounding box in render space.
///
/// Invariant: `min` components are less than or equal to `max` components.
/// Constructors reorder corners instead of rejecting them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB spanning the two corners (in any order).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx, hy, hz).abs();
        Self::new(center - he, center + he)
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    #[must_use]
    pub fn inflate(&self, m: f32) -> Self {
        Self::new(self.min - Vec3::splat(m), self.max + Vec3::splat(m))
    }

    /// Computes the AABB that bounds this box after transformation by `mat`.
    ///
    /// Evaluates the eight corners under the affine transform.
    #[must_use]
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let first = mat.transform_point3(corners[0]);
        let (min, max) = corners[1..].iter().fold((first, first), |(lo, hi), c| {
            let p = mat.transform_point3(*c);
            (lo.min(p), hi.max(p))
        });
        Self { min, max }
    }

    /// Builds the minimal AABB that contains all `points`; `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { min, max })
    }

    /// Slab test: distance along `ray` to the first contact, if any.
    ///
    /// A ray starting inside the box reports distance `0`.
    #[must_use]
    pub fn ray_hit(&self, ray: &Ray) -> Option<f32> {
        let mut t_near = 0.0_f32;
        let mut t_far = f32::INFINITY;
        let o = ray.origin().to_array();
        let d = ray.direction().to_array();
        let lo = self.min.to_array();
        let hi = self.max.to_array();
        for axis in 0..3 {
            if d[axis].abs() < f32::EPSILON {
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d[axis];
            let mut t0 = (lo[axis] - o[axis]) * inv;
            let mut t1 = (hi[axis] - o[axis]) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
        Some(t_near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_reordered() {
        let b = Aabb::new(Vec3::new(1.0, -1.0, 2.0), Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(b.min(), Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(b.max(), Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn ray_enters_box_at_near_face() {
        let b = Aabb::from_center_half_extents(Vec3::ZERO, 1.0, 1.0, 1.0);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert_eq!(b.ray_hit(&ray), Some(4.0));
        let miss = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert_eq!(b.ray_hit(&miss), None);
    }

    #[test]
    fn empty_point_set_has_no_bounds() {
        assert!(Aabb::from_points(&[]).is_none());
    }
}
