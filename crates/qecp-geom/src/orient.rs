// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use glam::{Quat, Vec3};

use crate::Transform;

/// Unit rotation mapping local +Y onto `direction`.
///
/// Zero-length directions yield the identity.
#[must_use]
pub fn rotation_from_up(direction: Vec3) -> Quat {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::Y, dir)
    }
}

/// Places a unit-height cylinder whose base sits at its local origin so that
/// it starts at `start`, points along `direction` and spans `length`.
#[must_use]
pub fn cylinder_along(start: Vec3, direction: Vec3, length: f32) -> Transform {
    Transform::from_translation(start)
        .with_rotation(rotation_from_up(direction))
        .with_scale(Vec3::new(1.0, length, 1.0))
}
