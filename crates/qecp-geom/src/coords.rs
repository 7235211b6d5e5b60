// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glam::Vec3;

/// Compression of the time axis relative to the planar axes.
pub const DEFAULT_T_SCALE: f32 = 1.0 / 3.0;

/// A position before mapping: a (possibly biased) time coordinate plus the
/// planar layout coordinates of a qubit or decoding-graph vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPosition {
    /// Time coordinate (measurement round / gate layer).
    pub t: f32,
    /// First planar coordinate.
    pub x: f32,
    /// Second planar coordinate.
    pub y: f32,
}

impl DisplayPosition {
    /// Creates a display position.
    #[must_use]
    pub const fn new(t: f32, x: f32, y: f32) -> Self {
        Self { t, x, y }
    }

    /// Same planar position, time shifted by `dt`.
    #[must_use]
    pub fn shifted(self, dt: f32) -> Self {
        Self {
            t: self.t + dt,
            ..self
        }
    }
}

/// Maps display positions into render space.
///
/// The axis permutation is fixed: planar `x` lands on render `z`, planar `y`
/// on render `x`, and time on render `y` (scaled by `t_scale`) so that time
/// steps stack vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    t_scale: f32,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            t_scale: DEFAULT_T_SCALE,
        }
    }
}

impl CoordinateMapper {
    /// Mapper with a custom time compression; non-finite or non-positive
    /// values fall back to [`DEFAULT_T_SCALE`].
    #[must_use]
    pub fn new(t_scale: f32) -> Self {
        if t_scale.is_finite() && t_scale > 0.0 {
            Self { t_scale }
        } else {
            Self::default()
        }
    }

    /// Time compression factor.
    #[must_use]
    pub fn t_scale(&self) -> f32 {
        self.t_scale
    }

    /// Render-space vector for `p`.
    #[must_use]
    pub fn map(&self, p: DisplayPosition) -> Vec3 {
        Vec3::new(p.y, p.t * self.t_scale, p.x)
    }
}
