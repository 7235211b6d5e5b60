// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Analytic intersection of pick rays with transformed primitives.

use glam::{Mat4, Vec3};
use qecp_geom::{Aabb, Ray};
use qecp_scene_port::{GeometryDesc, Primitive};

/// Largest length of the given matrix basis columns.
fn axis_scale(mat: &Mat4, axes: &[usize]) -> f32 {
    axes.iter()
        .map(|&i| mat.col(i).truncate().length())
        .fold(0.0, f32::max)
}

fn box_hit(points: &[Vec3], mat: &Mat4, ray: &Ray) -> Option<f32> {
    Aabb::from_points(points)?.transformed(mat).ray_hit(ray)
}

/// Distance along `ray` to `desc` placed by `world`, if it is hit.
///
/// Cylinders and cones are treated as capsules, tori, polygons and convex
/// solids as their bounding boxes.
pub(crate) fn hit_distance(desc: &GeometryDesc, world: &Mat4, ray: &Ray) -> Option<f32> {
    let mat = *world * desc.local.to_mat4();
    match &desc.primitive {
        Primitive::Sphere { radius } => {
            let center = mat.transform_point3(Vec3::ZERO);
            ray.sphere_hit(center, radius * axis_scale(&mat, &[0, 1, 2]))
        }
        Primitive::Cylinder { radius, height, .. } | Primitive::Cone { radius, height } => {
            let half = height / 2.0;
            let a = mat.transform_point3(Vec3::new(0.0, -half, 0.0));
            let b = mat.transform_point3(Vec3::new(0.0, half, 0.0));
            ray.capsule_hit(a, b, radius * axis_scale(&mat, &[0, 2]))
        }
        Primitive::Torus { radius, tube, .. } => {
            let r = radius + tube;
            let corners = [Vec3::new(-r, -r, -*tube), Vec3::new(r, r, *tube)];
            box_hit(&corners, &mat, ray)
        }
        Primitive::Polygon { points } => {
            let pts: Vec<Vec3> = points.iter().map(|p| p.extend(0.0)).collect();
            box_hit(&pts, &mat, ray)
        }
        Primitive::Convex(solid) => box_hit(&solid.vertices, &mat, ray),
    }
}
