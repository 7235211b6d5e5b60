// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera state types and pick-ray math.

use core::f32::consts::FRAC_PI_3;

use glam::{Vec2, Vec3};
use qecp_geom::Ray;

/// Distance from the origin of a perspective camera reset to a preset.
const PERSPECTIVE_PRESET_DISTANCE: f32 = 8.0;
/// Distance from the origin of an orthographic camera reset to a preset.
const ORTHOGRAPHIC_PRESET_DISTANCE: f32 = 1000.0;
/// Half-height of the orthographic view volume.
const ORTHOGRAPHIC_SCALE: f32 = 6.0;

/// Camera projection type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// Perspective projection (objects farther away appear smaller).
    Perspective,
    /// Orthographic projection (no perspective distortion).
    Orthographic,
}

/// Axis-aligned viewpoints the camera can be reset to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CameraPreset {
    /// Looking down the time axis.
    #[default]
    Top,
    /// Looking along `+X`.
    Left,
    /// Looking along `-Z`.
    Front,
}

impl CameraPreset {
    /// Unit vector from the origin towards the camera.
    #[must_use]
    pub fn eye_direction(self) -> Vec3 {
        match self {
            Self::Top => Vec3::Y,
            Self::Left => Vec3::NEG_X,
            Self::Front => Vec3::Z,
        }
    }

    /// Screen-up vector; looking straight down needs one not parallel to `Y`.
    #[must_use]
    pub fn up(self) -> Vec3 {
        match self {
            Self::Top => Vec3::NEG_Z,
            Self::Left | Self::Front => Vec3::Y,
        }
    }
}

/// Camera state for rendering and picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Camera position in world space.
    pub position: Vec3,
    /// Look-at target in world space.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Projection type.
    pub projection: ProjectionKind,
    /// Field of view in radians (for perspective).
    pub fov_y_radians: f32,
    /// Half-height of the view volume (for orthographic).
    pub ortho_scale: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::preset(CameraPreset::Top, ProjectionKind::Orthographic)
    }
}

impl CameraState {
    /// Camera reset to `preset`, looking at the origin.
    #[must_use]
    pub fn preset(preset: CameraPreset, projection: ProjectionKind) -> Self {
        let distance = match projection {
            ProjectionKind::Perspective => PERSPECTIVE_PRESET_DISTANCE,
            ProjectionKind::Orthographic => ORTHOGRAPHIC_PRESET_DISTANCE,
        };
        Self {
            position: preset.eye_direction() * distance,
            target: Vec3::ZERO,
            up: preset.up(),
            projection,
            fov_y_radians: FRAC_PI_3,
            ortho_scale: ORTHOGRAPHIC_SCALE,
            near: 0.1,
            far: 100_000.0,
        }
    }

    /// Orthonormal `(forward, right, up)` basis.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or_zero();
        let forward = if forward == Vec3::ZERO {
            Vec3::NEG_Z
        } else {
            forward
        };
        let mut right = forward.cross(self.up).normalize_or_zero();
        if right == Vec3::ZERO {
            right = forward.any_orthonormal_vector();
        }
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Ray through normalized device coordinates (`x`, `y` in `[-1, 1]`,
    /// `y` up) for a viewport of the given aspect ratio.
    #[must_use]
    pub fn ray_through(&self, ndc: Vec2, aspect: f32) -> Ray {
        let (f, r, u) = self.basis();
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        match self.projection {
            ProjectionKind::Perspective => {
                let t = (self.fov_y_radians * 0.5).tan();
                Ray::new(
                    self.position,
                    f + r * (ndc.x * t * aspect) + u * (ndc.y * t),
                )
            }
            ProjectionKind::Orthographic => {
                let offset = r * (ndc.x * self.ortho_scale * aspect) + u * (ndc.y * self.ortho_scale);
                Ray::new(self.position + offset, f)
            }
        }
    }

    /// Converts a pixel position (origin top-left) to normalized device coordinates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pixel_to_ndc(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        Vec2::new((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn top_preset_looks_down() {
        for projection in [ProjectionKind::Perspective, ProjectionKind::Orthographic] {
            let cam = CameraState::preset(CameraPreset::Top, projection);
            let ray = cam.ray_through(Vec2::ZERO, 1.5);
            assert_relative_eq!(ray.direction().y, -1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let cam = CameraState::preset(CameraPreset::Front, ProjectionKind::Orthographic);
        let a = cam.ray_through(Vec2::new(-1.0, 0.5), 2.0);
        let b = cam.ray_through(Vec2::new(1.0, -0.5), 2.0);
        assert_eq!(a.direction(), b.direction());
        assert_relative_eq!(b.origin().x - a.origin().x, 2.0 * 6.0 * 2.0, epsilon = 1e-3);
    }

    #[test]
    fn pixel_center_is_ndc_origin() {
        let ndc = CameraState::pixel_to_ndc(50.0, 25.0, 100, 50);
        assert_eq!(ndc, Vec2::ZERO);
        let corner = CameraState::pixel_to_ndc(0.0, 0.0, 100, 50);
        assert_eq!(corner, Vec2::new(-1.0, 1.0));
    }
}
