// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glam::Vec3;

use crate::{orient::rotation_from_up, GrowthBreakpoints, Transform};

/// Distance from a vertex center at which an edge of `edge_radius` meets
/// the outline sphere of radius `outline_radius`.
///
/// Edges start and end on the outline rather than the vertex core so the
/// cylinder caps never poke through the outline.
#[must_use]
pub fn endpoint_offset(outline_radius: f32, edge_radius: f32) -> f32 {
    if edge_radius < outline_radius {
        (outline_radius * outline_radius - edge_radius * edge_radius).sqrt()
    } else {
        0.0
    }
}

/// Which part of an edge a sub-segment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentPart {
    /// Grown from the left vertex.
    LeftGrown,
    /// Not yet grown.
    Ungrown,
    /// Grown from the right vertex.
    RightGrown,
}

impl SegmentPart {
    /// Parts in the order they appear from left to right.
    pub const ALL: [Self; 3] = [Self::LeftGrown, Self::Ungrown, Self::RightGrown];

    /// Whether this part is rendered with grown styling.
    #[must_use]
    pub fn is_grown(self) -> bool {
        !matches!(self, Self::Ungrown)
    }

    /// Dense index (0..3), left to right.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::LeftGrown => 0,
            Self::Ungrown => 1,
            Self::RightGrown => 2,
        }
    }
}

/// One sub-segment of an edge as distances measured from the left vertex center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    /// Covered part.
    pub part: SegmentPart,
    /// Start distance.
    pub start: f32,
    /// End distance.
    pub end: f32,
}

impl EdgeSegment {
    /// Zero or negative extent; such a segment is hidden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Extent along the edge (never negative).
    #[must_use]
    pub fn length(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }
}

/// Render-space boundary points of an edge, recomputed on every rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEndpoints {
    /// Where the edge leaves the left vertex outline.
    pub left_start: Vec3,
    /// End of the left grown part.
    pub left_end: Vec3,
    /// Start of the right grown part.
    pub right_end: Vec3,
    /// Where the edge meets the right vertex outline.
    pub right_start: Vec3,
}

/// Derived layout of one edge between two vertex centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLayout {
    left: Vec3,
    relative: Vec3,
    distance: f32,
    left_start: f32,
    left_end: f32,
    right_end: f32,
    right_start: f32,
}

impl EdgeLayout {
    /// Lays out an edge from `left` to `right`, keeping `offset` clear at both
    /// ends and splitting the remainder at `breakpoints`.
    ///
    /// When the two offsets would cross (`distance < 2 * offset`) each side
    /// keeps half the distance and the drawable length collapses to zero.
    #[must_use]
    pub fn new(left: Vec3, right: Vec3, offset: f32, breakpoints: GrowthBreakpoints) -> Self {
        let relative = right - left;
        let distance = relative.length();
        let mut local_offset = offset;
        let mut edge_length = distance - 2.0 * offset;
        if edge_length < 0.0 {
            local_offset = distance / 2.0;
            edge_length = 0.0;
        }
        Self {
            left,
            relative,
            distance,
            left_start: local_offset,
            left_end: local_offset + edge_length * breakpoints.left_end,
            right_end: local_offset + edge_length * breakpoints.right_end,
            right_start: local_offset + edge_length,
        }
    }

    /// Distance between the two vertex centers.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Unit direction from left to right (zero for coincident vertices).
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.relative.normalize_or_zero()
    }

    /// Render-space point `along` units from the left vertex center.
    #[must_use]
    pub fn point_at(&self, along: f32) -> Vec3 {
        if self.distance <= f32::EPSILON {
            return self.left;
        }
        self.left + self.relative * (along / self.distance)
    }

    /// Cached boundary points for hull construction.
    #[must_use]
    pub fn endpoints(&self) -> EdgeEndpoints {
        EdgeEndpoints {
            left_start: self.point_at(self.left_start),
            left_end: self.point_at(self.left_end),
            right_end: self.point_at(self.right_end),
            right_start: self.point_at(self.right_start),
        }
    }

    /// The three sub-segments, left to right.
    #[must_use]
    pub fn segments(&self) -> [EdgeSegment; 3] {
        [
            EdgeSegment {
                part: SegmentPart::LeftGrown,
                start: self.left_start,
                end: self.left_end,
            },
            EdgeSegment {
                part: SegmentPart::Ungrown,
                start: self.left_end,
                end: self.right_end,
            },
            EdgeSegment {
                part: SegmentPart::RightGrown,
                start: self.right_end,
                end: self.right_start,
            },
        ]
    }

    /// Transforms of the two unit half-cylinders covering `segment`.
    ///
    /// The first starts at the segment start pointing right, the second at
    /// the segment end pointing left; each spans half the segment so their
    /// caps meet flush at the midpoint.
    #[must_use]
    pub fn segment_transforms(&self, segment: &EdgeSegment) -> [Transform; 2] {
        let dir = self.direction();
        let half = Vec3::new(1.0, (segment.end - segment.start) / 2.0, 1.0);
        [
            Transform::from_translation(self.point_at(segment.start))
                .with_rotation(rotation_from_up(dir))
                .with_scale(half),
            Transform::from_translation(self.point_at(segment.end))
                .with_rotation(rotation_from_up(-dir))
                .with_scale(half),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth_breakpoints;
    use approx::assert_relative_eq;

    #[test]
    fn offset_only_when_outline_is_wider() {
        assert_relative_eq!(endpoint_offset(0.5, 0.3), 0.4, epsilon = 1e-6);
        assert_eq!(endpoint_offset(0.2, 0.3), 0.0);
    }

    #[test]
    fn segments_cover_edge_between_offsets() {
        let bp = growth_breakpoints(4.0, 1.0, 1.0);
        let layout = EdgeLayout::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, bp);
        let [l, m, r] = layout.segments();
        assert_eq!((l.start, l.end), (1.0, 3.0));
        assert_eq!((m.start, m.end), (3.0, 7.0));
        assert_eq!((r.start, r.end), (7.0, 9.0));
        let ends = layout.endpoints();
        assert_eq!(ends.left_start, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ends.right_start, Vec3::new(9.0, 0.0, 0.0));
    }

    #[test]
    fn crossing_offsets_collapse_to_midpoint() {
        let layout = EdgeLayout::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            0.8,
            GrowthBreakpoints::FULLY_GROWN,
        );
        for seg in layout.segments() {
            assert_eq!(seg.start, 0.5);
            assert!(seg.is_empty());
        }
    }

    #[test]
    fn coincident_vertices_do_not_produce_nan() {
        let layout = EdgeLayout::new(Vec3::ONE, Vec3::ONE, 0.2, GrowthBreakpoints::FULLY_GROWN);
        let ends = layout.endpoints();
        assert!(ends.left_end.is_finite());
        assert_eq!(layout.direction(), Vec3::ZERO);
    }

    #[test]
    fn paired_cylinders_meet_at_midpoint() {
        let bp = growth_breakpoints(2.0, 0.0, 0.0);
        let layout = EdgeLayout::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 0.0, bp);
        let middle = layout.segments()[1];
        let [fwd, back] = layout.segment_transforms(&middle);
        let a = fwd.transform_point(Vec3::Y);
        let b = back.transform_point(Vec3::Y);
        assert_relative_eq!(a.z, 2.0, epsilon = 1e-5);
        assert_relative_eq!(b.z, 2.0, epsilon = 1e-5);
    }
}
