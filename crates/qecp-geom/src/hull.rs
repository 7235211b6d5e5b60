// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::collections::HashSet;

use glam::{Vec2, Vec3};

/// Triangulated convex solid: vertex positions plus counter-clockwise
/// (outward-facing) triangles indexing into them.
///
/// A degenerate input (fewer than three non-colinear points) produces a solid
/// with no faces; coplanar input produces a flat double-sided-ready fan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexSolid {
    /// Hull vertices.
    pub vertices: Vec<Vec3>,
    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl ConvexSolid {
    /// `true` when no triangle could be formed.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.faces.is_empty()
    }
}

fn cross2(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

/// Convex hull of planar points (Andrew's monotone chain), counter-clockwise,
/// without repeated closing point.
///
/// Colinear input yields the two extreme points; non-finite points are ignored.
#[must_use]
pub fn convex_hull_2d(points: &[Vec2]) -> Vec<Vec2> {
    let mut pts: Vec<Vec2> = points.iter().copied().filter(|p| p.is_finite()).collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vec2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross2(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vec2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross2(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[derive(Debug, Clone, Copy)]
struct Face {
    v: [usize; 3],
    normal: Vec3,
    offset: f32,
}

impl Face {
    fn new(points: &[Vec3], a: usize, b: usize, c: usize) -> Self {
        let normal = (points[b] - points[a])
            .cross(points[c] - points[a])
            .normalize_or_zero();
        Self {
            v: [a, b, c],
            normal,
            offset: normal.dot(points[a]),
        }
    }

    fn height(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.offset
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

fn farthest_by<F>(points: &[Vec3], mut key: F) -> Option<(usize, f32)>
where
    F: FnMut(Vec3) -> f32,
{
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, key(*p)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Convex hull of points in 3D (incremental construction).
///
/// Coplanar input falls back to a planar fan built from the 2D hull in the
/// points' plane. Colinear or coincident input yields a degenerate solid.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn convex_hull_3d(points: &[Vec3]) -> ConvexSolid {
    let pts: Vec<Vec3> = points.iter().copied().filter(|p| p.is_finite()).collect();
    let Some(&p0) = pts.first() else {
        return ConvexSolid::default();
    };
    let extent = pts
        .iter()
        .fold(0.0_f32, |acc, p| acc.max((*p - p0).abs().max_element()));
    let eps = extent.max(1.0) * 1e-5;

    let Some((i1, d1)) = farthest_by(&pts, |p| (p - p0).length()) else {
        return ConvexSolid::default();
    };
    if d1 <= eps {
        return degenerate(&pts);
    }
    let axis = (pts[i1] - p0).normalize();
    let Some((i2, d2)) = farthest_by(&pts, |p| (p - p0).cross(axis).length()) else {
        return degenerate(&pts);
    };
    if d2 <= eps {
        return degenerate(&pts);
    }
    let plane_normal = (pts[i1] - p0).cross(pts[i2] - p0).normalize();
    let Some((i3, d3)) = farthest_by(&pts, |p| (p - p0).dot(plane_normal).abs()) else {
        return degenerate(&pts);
    };
    if d3 <= eps {
        return planar_fan(&pts, p0, axis, plane_normal);
    }

    let seed = [0usize, i1, i2, i3];
    let centroid = seed.iter().map(|&i| pts[i]).sum::<Vec3>() / 4.0;
    let mut faces: Vec<Face> = Vec::new();
    for (a, b, c) in [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)] {
        let (a, b, c) = (seed[a], seed[b], seed[c]);
        let f = Face::new(&pts, a, b, c);
        if f.height(centroid) > 0.0 {
            faces.push(Face::new(&pts, a, c, b));
        } else {
            faces.push(f);
        }
    }

    for (idx, p) in pts.iter().enumerate() {
        if seed.contains(&idx) {
            continue;
        }
        let visible: Vec<bool> = faces.iter().map(|f| f.height(*p) > eps).collect();
        if !visible.iter().any(|v| *v) {
            continue;
        }
        let lit_edges: HashSet<(usize, usize)> = faces
            .iter()
            .zip(&visible)
            .filter(|(_, v)| **v)
            .flat_map(|(f, _)| f.edges())
            .collect();
        let horizon: Vec<(usize, usize)> = lit_edges
            .iter()
            .copied()
            .filter(|(a, b)| !lit_edges.contains(&(*b, *a)))
            .collect();
        let mut kept: Vec<Face> = faces
            .iter()
            .zip(&visible)
            .filter(|(_, v)| !**v)
            .map(|(f, _)| *f)
            .collect();
        for (a, b) in horizon {
            kept.push(Face::new(&pts, a, b, idx));
        }
        faces = kept;
    }

    // compact to the vertices actually referenced by faces
    let mut remap = vec![u32::MAX; pts.len()];
    let mut vertices = Vec::new();
    let mut out_faces = Vec::with_capacity(faces.len());
    for f in &faces {
        let mut tri = [0u32; 3];
        for (slot, &vi) in tri.iter_mut().zip(&f.v) {
            if remap[vi] == u32::MAX {
                remap[vi] = vertices.len() as u32;
                vertices.push(pts[vi]);
            }
            *slot = remap[vi];
        }
        out_faces.push(tri);
    }
    ConvexSolid {
        vertices,
        faces: out_faces,
    }
}

fn degenerate(pts: &[Vec3]) -> ConvexSolid {
    ConvexSolid {
        vertices: pts.to_vec(),
        faces: Vec::new(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn planar_fan(pts: &[Vec3], origin: Vec3, u: Vec3, normal: Vec3) -> ConvexSolid {
    let v = normal.cross(u);
    let projected: Vec<Vec2> = pts
        .iter()
        .map(|p| {
            let d = *p - origin;
            Vec2::new(d.dot(u), d.dot(v))
        })
        .collect();
    let ring = convex_hull_2d(&projected);
    let vertices: Vec<Vec3> = ring.iter().map(|q| origin + u * q.x + v * q.y).collect();
    let faces = (1..vertices.len().saturating_sub(1))
        .map(|i| [0, i as u32, i as u32 + 1])
        .collect();
    ConvexSolid { vertices, faces }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_with_interior_point() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.5, 0.5),
        ];
        let hull = convex_hull_2d(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn colinear_points_do_not_panic() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        let hull = convex_hull_2d(&pts);
        assert_eq!(hull, vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)]);
    }

    #[test]
    fn cube_hull_has_twelve_triangles() {
        let mut pts = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    pts.push(Vec3::new(x, y, z));
                }
            }
        }
        pts.push(Vec3::splat(0.5));
        let solid = convex_hull_3d(&pts);
        assert_eq!(solid.vertices.len(), 8);
        assert_eq!(solid.faces.len(), 12);
        let center = Vec3::splat(0.5);
        for [a, b, c] in &solid.faces {
            let (a, b, c) = (
                solid.vertices[*a as usize],
                solid.vertices[*b as usize],
                solid.vertices[*c as usize],
            );
            let n = (b - a).cross(c - a);
            assert!(n.dot(center - a) < 0.0, "face must point outward");
        }
    }

    #[test]
    fn coplanar_points_become_a_fan() {
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 2.0),
        ];
        let solid = convex_hull_3d(&pts);
        assert_eq!(solid.vertices.len(), 4);
        assert_eq!(solid.faces.len(), 2);
    }

    #[test]
    fn colinear_points_are_degenerate() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        assert!(convex_hull_3d(&pts).is_degenerate());
    }
}
