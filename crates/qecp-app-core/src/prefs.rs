// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved viewer preferences (camera preset, hover effect, render settings).

use qecp_scene_port::{CameraPreset, ProjectionKind};
use serde::{Deserialize, Serialize};

use crate::settings::RenderSettings;

/// Saved preferences for a visualizer surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerPrefs {
    /// Camera preset and projection.
    pub camera: CameraPrefs,
    /// Highlight the element under the pointer.
    pub hover_effect: bool,
    /// Render sizes.
    pub settings: RenderSettings,
}

impl Default for ViewerPrefs {
    fn default() -> Self {
        Self {
            camera: CameraPrefs::default(),
            hover_effect: true,
            settings: RenderSettings::default(),
        }
    }
}

/// Named camera direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CameraView {
    /// Looking down the time axis.
    #[default]
    Top,
    /// From the left.
    Left,
    /// From the front.
    Front,
}

/// Projection preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Perspective projection.
    Perspective,
    /// Orthographic projection.
    #[default]
    Orthographic,
}

/// Camera preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CameraPrefs {
    /// Preset the camera resets to.
    pub view: CameraView,
    /// Projection.
    pub projection: Projection,
}

impl From<CameraView> for CameraPreset {
    fn from(view: CameraView) -> Self {
        match view {
            CameraView::Top => Self::Top,
            CameraView::Left => Self::Left,
            CameraView::Front => Self::Front,
        }
    }
}

impl From<Projection> for ProjectionKind {
    fn from(p: Projection) -> Self {
        match p {
            Projection::Perspective => Self::Perspective,
            Projection::Orthographic => Self::Orthographic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_names_on_the_wire() {
        let prefs: ViewerPrefs =
            serde_json::from_str(r#"{"camera":{"view":"front","projection":"perspective"}}"#)
                .unwrap();
        assert_eq!(CameraPreset::from(prefs.camera.view), CameraPreset::Front);
        assert_eq!(
            ProjectionKind::from(prefs.camera.projection),
            ProjectionKind::Perspective
        );
        assert!(prefs.hover_effect);
    }
}
