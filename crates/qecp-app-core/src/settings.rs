// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render settings: sizes and tessellation of everything the engine draws.

use qecp_geom::{endpoint_offset, DEFAULT_T_SCALE};
use serde::{Deserialize, Serialize};

/// Sizes used when building catalog geometries and laying out edges.
///
/// Values are in render-space units. Every radius is multiplied by its
/// matching scale before use, so a host can enlarge a whole family of
/// objects without touching the base sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Qubit sphere radius.
    pub qubit_radius: f32,
    /// Idle-gate rod radius.
    pub idle_gate_radius: f32,
    /// Measurement sphere radius.
    pub measurement_radius: f32,
    /// Radius used for measurements that report a defect.
    pub defect_measurement_radius: f32,
    /// Decoding-graph vertex radius.
    pub vertex_radius: f32,
    /// Decoding-graph edge radius.
    pub edge_radius: f32,
    /// Radius of the line joining a two-qubit gate to its peer.
    pub control_line_radius: f32,
    /// Control-dot radius.
    pub control_dot_radius: f32,
    /// Initialization cone base radius.
    pub init_cone_radius: f32,
    /// Initialization cone height.
    pub init_cone_height: f32,
    /// Ring radius of the CX/CY target glyph.
    pub target_radius: f32,
    /// Tube radius of the target ring.
    pub target_tube: f32,
    /// Arm length of the CY target glyph.
    pub cy_arm_length: f32,
    /// Outline twin scale relative to the core object.
    pub outline_ratio: f32,
    /// Tessellation of curved primitives.
    pub segments: u32,
    /// Time-axis compression.
    pub t_scale: f32,
    /// Drop of the planar blossom overlay below the vertices.
    pub plane_drop: f32,
    /// Multiplier applied to qubit sizes.
    pub qubit_scale: f32,
    /// Multiplier applied to gate sizes.
    pub gate_scale: f32,
    /// Multiplier applied to vertex sizes.
    pub vertex_scale: f32,
    /// Multiplier applied to edge sizes.
    pub edge_scale: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            qubit_radius: 0.15,
            idle_gate_radius: 0.025,
            measurement_radius: 0.06,
            defect_measurement_radius: 0.1,
            vertex_radius: 0.15,
            edge_radius: 0.03,
            control_line_radius: 0.02,
            control_dot_radius: 0.05,
            init_cone_radius: 0.1,
            init_cone_height: 0.15,
            target_radius: 0.15,
            target_tube: 0.02,
            cy_arm_length: 0.1,
            outline_ratio: 1.2,
            segments: 128,
            t_scale: DEFAULT_T_SCALE,
            plane_drop: 0.2,
            qubit_scale: 1.0,
            gate_scale: 1.0,
            vertex_scale: 1.0,
            edge_scale: 1.0,
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl RenderSettings {
    /// Copy with every non-finite or non-positive value replaced by its
    /// default. `plane_drop` may be zero; `segments` is at least 3.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            qubit_radius: positive_or(self.qubit_radius, d.qubit_radius),
            idle_gate_radius: positive_or(self.idle_gate_radius, d.idle_gate_radius),
            measurement_radius: positive_or(self.measurement_radius, d.measurement_radius),
            defect_measurement_radius: positive_or(
                self.defect_measurement_radius,
                d.defect_measurement_radius,
            ),
            vertex_radius: positive_or(self.vertex_radius, d.vertex_radius),
            edge_radius: positive_or(self.edge_radius, d.edge_radius),
            control_line_radius: positive_or(self.control_line_radius, d.control_line_radius),
            control_dot_radius: positive_or(self.control_dot_radius, d.control_dot_radius),
            init_cone_radius: positive_or(self.init_cone_radius, d.init_cone_radius),
            init_cone_height: positive_or(self.init_cone_height, d.init_cone_height),
            target_radius: positive_or(self.target_radius, d.target_radius),
            target_tube: positive_or(self.target_tube, d.target_tube),
            cy_arm_length: positive_or(self.cy_arm_length, d.cy_arm_length),
            outline_ratio: positive_or(self.outline_ratio, d.outline_ratio),
            segments: self.segments.max(3),
            t_scale: positive_or(self.t_scale, d.t_scale),
            plane_drop: if self.plane_drop.is_finite() && self.plane_drop >= 0.0 {
                self.plane_drop
            } else {
                d.plane_drop
            },
            qubit_scale: positive_or(self.qubit_scale, d.qubit_scale),
            gate_scale: positive_or(self.gate_scale, d.gate_scale),
            vertex_scale: positive_or(self.vertex_scale, d.vertex_scale),
            edge_scale: positive_or(self.edge_scale, d.edge_scale),
        }
    }

    /// Scaled vertex radius.
    pub fn vertex_core_radius(&self) -> f32 {
        self.vertex_radius * self.vertex_scale
    }

    /// Radius of a vertex outline twin.
    pub fn vertex_outline_radius(&self) -> f32 {
        self.vertex_core_radius() * self.outline_ratio
    }

    /// Scaled edge radius.
    pub fn edge_core_radius(&self) -> f32 {
        self.edge_radius * self.edge_scale
    }

    /// Distance from a vertex center where its edges begin.
    pub fn edge_offset(&self) -> f32 {
        endpoint_offset(self.vertex_outline_radius(), self.edge_core_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let s: RenderSettings = serde_json::from_str(r#"{"edge_radius": 0.05}"#).unwrap();
        assert_eq!(s.edge_radius, 0.05);
        assert_eq!(s.vertex_radius, 0.15);
        assert_eq!(s.segments, 128);
    }

    #[test]
    fn sanitized_replaces_garbage() {
        let s = RenderSettings {
            vertex_radius: -1.0,
            t_scale: f32::NAN,
            segments: 0,
            plane_drop: 0.0,
            ..RenderSettings::default()
        }
        .sanitized();
        assert_eq!(s.vertex_radius, 0.15);
        assert_eq!(s.t_scale, DEFAULT_T_SCALE);
        assert_eq!(s.segments, 3);
        assert_eq!(s.plane_drop, 0.0);
    }

    #[test]
    fn edge_offset_meets_outline() {
        let s = RenderSettings::default();
        let r = s.vertex_outline_radius();
        let e = s.edge_core_radius();
        let off = s.edge_offset();
        assert!((off * off + e * e - r * r).abs() < 1e-6);
    }
}
