// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Geometry/material catalog.
//!
//! Every shared geometry and material is named by an enum variant and
//! created once per engine. Lookups are total: unrecognized qubit and gate
//! kinds resolve to explicit fallback variants.

use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::{Quat, Vec3};
use qecp_app_core::settings::RenderSettings;
use qecp_geom::{SegmentPart, Transform};
use qecp_model::{GateType, QubitType, VertexState};
use qecp_scene_port::{
    GeometryDesc, GeometryId, MaterialDesc, MaterialId, PortError, Primitive, ScenePort, Side,
};

const COLOR_X: u32 = 0x00CC00;
const COLOR_Z: u32 = 0x00C0FF;
const COLOR_Y: u32 = 0xF5B042;
const COLOR_XZZX_LOGICAL: u32 = 0xF4CCCC;
const COLOR_UNKNOWN: u32 = 0xFF0000;

/// How a gate is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateGlyph {
    /// Cone (state preparation).
    Initialization,
    /// Sphere (measurement).
    Measurement,
    /// Control dot plus a line to the peer (CX/CY control, CZ).
    Control,
    /// Ring with a cross plus a line to the peer.
    CxTarget,
    /// Diamond ring with a three-armed Y plus a shortened line to the peer.
    CyTarget,
    /// Unrecognized gate; reported, nothing drawn.
    Unknown,
}

impl GateGlyph {
    /// Glyph for `gate`; `None` for an idle node.
    pub fn of(gate: &GateType) -> Option<Self> {
        Some(match gate {
            GateType::None => return None,
            GateType::InitializeX | GateType::InitializeZ => Self::Initialization,
            GateType::MeasureX | GateType::MeasureZ => Self::Measurement,
            GateType::CXGateControl | GateType::CYGateControl | GateType::CZGate => Self::Control,
            GateType::CXGateTarget => Self::CxTarget,
            GateType::CYGateTarget => Self::CyTarget,
            GateType::Unknown(_) => Self::Unknown,
        })
    }

    /// Geometries making up the glyph, excluding the peer line.
    pub fn parts(self) -> &'static [GeometryKey] {
        match self {
            Self::Initialization => &[GeometryKey::InitCone],
            Self::Measurement => &[GeometryKey::MeasurementSphere],
            Self::Control => &[GeometryKey::ControlDot],
            Self::CxTarget => &[GeometryKey::CxRing, GeometryKey::CxBarZ, GeometryKey::CxBarX],
            Self::CyTarget => &[
                GeometryKey::CyRing,
                GeometryKey::CyArmLeft,
                GeometryKey::CyArmRight,
                GeometryKey::CyArmStem,
            ],
            Self::Unknown => &[],
        }
    }

    /// Whether a line to the gate peer is drawn.
    pub fn has_peer_line(self) -> bool {
        matches!(self, Self::Control | Self::CxTarget | Self::CyTarget)
    }
}

/// Shared geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryKey {
    /// Qubit sphere (outline twins reuse it, scaled).
    QubitSphere,
    /// Idle-gate rod, unit height with its base at the origin.
    IdleRod,
    /// Initialization cone.
    InitCone,
    /// Measurement sphere.
    MeasurementSphere,
    /// Control dot.
    ControlDot,
    /// Peer line rod, unit height with its base at the origin.
    ControlLine,
    /// CX target ring.
    CxRing,
    /// CX cross bar along render `z`.
    CxBarZ,
    /// CX cross bar along render `x`.
    CxBarX,
    /// CY target diamond ring.
    CyRing,
    /// CY arm rotated by `-5π/6`.
    CyArmLeft,
    /// CY arm rotated by `5π/6`.
    CyArmRight,
    /// CY stem arm.
    CyArmStem,
    /// Decoding-graph vertex sphere.
    VertexSphere,
    /// Decoding-graph edge rod, unit height with its base at the origin.
    EdgeRod,
}

impl GeometryKey {
    /// Every key, in creation order.
    pub const ALL: [Self; 15] = [
        Self::QubitSphere,
        Self::IdleRod,
        Self::InitCone,
        Self::MeasurementSphere,
        Self::ControlDot,
        Self::ControlLine,
        Self::CxRing,
        Self::CxBarZ,
        Self::CxBarX,
        Self::CyRing,
        Self::CyArmLeft,
        Self::CyArmRight,
        Self::CyArmStem,
        Self::VertexSphere,
        Self::EdgeRod,
    ];

    /// Geometry description under `s`.
    pub fn desc(self, s: &RenderSettings) -> GeometryDesc {
        let seg = s.segments;
        let line = s.control_line_radius * s.gate_scale;
        let sphere = |radius: f32, segments| GeometryDesc::new(Primitive::Sphere { radius }, segments);
        let bar = |height: f32| Primitive::Cylinder {
            radius: line,
            height,
            open_ended: false,
        };
        let ring = |tubular_segments| Primitive::Torus {
            radius: s.target_radius * s.gate_scale,
            tube: line,
            tubular_segments,
        };
        let arm = s.cy_arm_length * s.gate_scale;
        let cy_arm = |yaw: Option<f32>| {
            let tilt = Quat::from_rotation_x(FRAC_PI_2);
            let rotation = yaw.map_or(tilt, |y| Quat::from_rotation_y(y) * tilt);
            GeometryDesc::new(bar(arm), 6).with_local(Transform::new(
                rotation * Vec3::new(0.0, arm / 2.0, 0.0),
                rotation,
                Vec3::ONE,
            ))
        };
        match self {
            Self::QubitSphere => sphere(s.qubit_radius * s.qubit_scale, seg),
            Self::IdleRod => GeometryDesc::unit_rod(s.idle_gate_radius * s.gate_scale, seg),
            Self::InitCone => GeometryDesc::new(
                Primitive::Cone {
                    radius: s.init_cone_radius * s.gate_scale,
                    height: s.init_cone_height * s.gate_scale,
                },
                32,
            ),
            Self::MeasurementSphere => sphere(s.measurement_radius * s.gate_scale, seg),
            Self::ControlDot => sphere(s.control_dot_radius * s.gate_scale, 12),
            Self::ControlLine => GeometryDesc::unit_rod(line, seg),
            Self::CxRing => GeometryDesc::new(ring(32), 16).with_local(
                Transform::identity().with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            ),
            Self::CxBarZ => GeometryDesc::new(bar(2.0 * s.target_radius * s.gate_scale), 6)
                .with_local(Transform::identity().with_rotation(Quat::from_rotation_x(FRAC_PI_2))),
            Self::CxBarX => GeometryDesc::new(bar(2.0 * s.target_radius * s.gate_scale), 6)
                .with_local(Transform::identity().with_rotation(Quat::from_rotation_z(FRAC_PI_2))),
            Self::CyRing => GeometryDesc::new(ring(4), 16).with_local(
                Transform::identity().with_rotation(
                    Quat::from_rotation_y(FRAC_PI_4) * Quat::from_rotation_x(FRAC_PI_2),
                ),
            ),
            Self::CyArmLeft => cy_arm(Some(-5.0 * PI / 6.0)),
            Self::CyArmRight => cy_arm(Some(5.0 * PI / 6.0)),
            Self::CyArmStem => cy_arm(None),
            Self::VertexSphere => sphere(s.vertex_core_radius(), seg),
            Self::EdgeRod => GeometryDesc::unit_rod(s.edge_core_radius(), seg),
        }
    }
}

/// Shared materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialKey {
    /// Data qubit.
    QubitData,
    /// X stabilizer.
    QubitStabX,
    /// Z stabilizer.
    QubitStabZ,
    /// XZZX logical boundary ancilla.
    QubitXzzxLogical,
    /// Y stabilizer.
    QubitStabY,
    /// Unrecognized qubit kind.
    QubitUnknown,
    /// Z-basis initialization or measurement.
    GateZ,
    /// X-basis initialization or measurement.
    GateX,
    /// Two-qubit gate parts.
    GateTwoQubit,
    /// Unrecognized gate kind.
    GateUnknown,
    /// Idle gate.
    IdleGate,
    /// Qubit outline shell.
    QubitOutline,
    /// Real vertex.
    VertexReal,
    /// Virtual (boundary) vertex.
    VertexVirtual,
    /// Defect vertex.
    VertexDefect,
    /// Vertex of a disabled mirror unit.
    VertexDisabledMirror,
    /// Outline of a real vertex.
    VertexOutlineReal,
    /// Outline of a virtual vertex.
    VertexOutlineVirtual,
    /// Outline of a defect vertex.
    VertexOutlineDefect,
    /// Ungrown edge part (and every edge part while a subgraph is shown).
    Edge,
    /// Grown edge part.
    GrownEdge,
    /// Edge in the displayed subgraph.
    SubgraphEdge,
    /// Translucent 3D blossom hull.
    Blossom,
    /// Translucent planar blossom polygon.
    BlossomPlanar,
    /// Pointer hover highlight.
    Hover,
    /// Selection highlight.
    Selected,
}

impl MaterialKey {
    /// Every key, in creation order.
    pub const ALL: [Self; 26] = [
        Self::QubitData,
        Self::QubitStabX,
        Self::QubitStabZ,
        Self::QubitXzzxLogical,
        Self::QubitStabY,
        Self::QubitUnknown,
        Self::GateZ,
        Self::GateX,
        Self::GateTwoQubit,
        Self::GateUnknown,
        Self::IdleGate,
        Self::QubitOutline,
        Self::VertexReal,
        Self::VertexVirtual,
        Self::VertexDefect,
        Self::VertexDisabledMirror,
        Self::VertexOutlineReal,
        Self::VertexOutlineVirtual,
        Self::VertexOutlineDefect,
        Self::Edge,
        Self::GrownEdge,
        Self::SubgraphEdge,
        Self::Blossom,
        Self::BlossomPlanar,
        Self::Hover,
        Self::Selected,
    ];

    /// Surface description.
    pub const fn desc(self) -> MaterialDesc {
        match self {
            Self::QubitData | Self::GateTwoQubit => MaterialDesc::solid(0x000000),
            Self::QubitStabX | Self::GateX => MaterialDesc::solid(COLOR_X),
            Self::QubitStabZ | Self::GateZ => MaterialDesc::solid(COLOR_Z),
            Self::QubitXzzxLogical => MaterialDesc::solid(COLOR_XZZX_LOGICAL),
            Self::QubitStabY => MaterialDesc::solid(COLOR_Y),
            Self::QubitUnknown | Self::GateUnknown => MaterialDesc::solid(COLOR_UNKNOWN),
            Self::IdleGate => MaterialDesc::solid(0x000000).with_opacity(0.1),
            Self::QubitOutline
            | Self::VertexOutlineReal
            | Self::VertexOutlineVirtual
            | Self::VertexOutlineDefect => MaterialDesc::outline(0x000000),
            Self::VertexReal => MaterialDesc::solid(0xFFFFFF),
            Self::VertexVirtual => MaterialDesc::solid(0xFFFF00).with_opacity(0.5),
            Self::VertexDefect => MaterialDesc::solid(0xFF0000),
            Self::VertexDisabledMirror => MaterialDesc::solid(0x888888).with_opacity(0.5),
            Self::Edge => MaterialDesc::solid(0x000000).with_opacity(0.1),
            Self::GrownEdge => MaterialDesc::solid(0xFF0000),
            Self::SubgraphEdge => MaterialDesc::solid(0x0000FF),
            Self::Blossom => MaterialDesc::solid(0x82E0AA).with_opacity(0.3),
            Self::BlossomPlanar => MaterialDesc::solid(0x82E0AA)
                .with_opacity(0.3)
                .with_side(Side::Double),
            Self::Hover => MaterialDesc::solid(0x6FDFDF).with_side(Side::Double),
            Self::Selected => MaterialDesc::solid(0x4B7BE5).with_side(Side::Double),
        }
    }

    /// Qubit material; unrecognized kinds use [`MaterialKey::QubitUnknown`].
    pub fn for_qubit(kind: &QubitType) -> Self {
        match kind {
            QubitType::Data => Self::QubitData,
            QubitType::StabX => Self::QubitStabX,
            QubitType::StabZ => Self::QubitStabZ,
            QubitType::StabXZZXLogicalX | QubitType::StabXZZXLogicalZ => Self::QubitXzzxLogical,
            QubitType::StabY => Self::QubitStabY,
            QubitType::Unknown(_) => Self::QubitUnknown,
        }
    }

    /// Gate material; `None` for an idle node.
    pub fn for_gate(gate: &GateType) -> Option<Self> {
        Some(match gate {
            GateType::None => return None,
            GateType::InitializeZ | GateType::MeasureZ => Self::GateZ,
            GateType::InitializeX | GateType::MeasureX => Self::GateX,
            GateType::CXGateControl
            | GateType::CXGateTarget
            | GateType::CYGateControl
            | GateType::CYGateTarget
            | GateType::CZGate => Self::GateTwoQubit,
            GateType::Unknown(_) => Self::GateUnknown,
        })
    }

    /// Vertex material. The first matching state wins: disabled mirror,
    /// then defect, then virtual, then real.
    pub fn for_vertex(vertex: &VertexState) -> Self {
        if vertex.is_mirror_disabled() {
            Self::VertexDisabledMirror
        } else if vertex.is_defect {
            Self::VertexDefect
        } else if vertex.is_virtual {
            Self::VertexVirtual
        } else {
            Self::VertexReal
        }
    }

    /// Vertex outline material: defect, then virtual, then real.
    pub fn for_vertex_outline(vertex: &VertexState) -> Self {
        if vertex.is_defect {
            Self::VertexOutlineDefect
        } else if vertex.is_virtual {
            Self::VertexOutlineVirtual
        } else {
            Self::VertexOutlineReal
        }
    }

    /// Material of an edge part. Grown styling is suppressed while a
    /// subgraph is shown; subgraph membership overrides everything.
    pub fn for_edge_part(part: SegmentPart, subgraph_shown: bool, in_subgraph: bool) -> Self {
        if in_subgraph {
            Self::SubgraphEdge
        } else if part.is_grown() && !subgraph_shown {
            Self::GrownEdge
        } else {
            Self::Edge
        }
    }
}

/// Ids of every shared geometry and material, created once per engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    geometries: Vec<GeometryId>,
    materials: Vec<MaterialId>,
}

impl Catalog {
    /// Creates every catalog geometry and material on `port`.
    pub fn bootstrap<P: ScenePort + ?Sized>(
        port: &mut P,
        settings: &RenderSettings,
    ) -> Result<Self, PortError> {
        let geometries = GeometryKey::ALL
            .iter()
            .map(|key| port.create_geometry(&key.desc(settings)))
            .collect::<Result<Vec<_>, _>>()?;
        let materials = MaterialKey::ALL
            .iter()
            .map(|key| port.create_material(&key.desc()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            geometries,
            materials,
        })
    }

    /// Geometry id for `key`.
    pub fn geometry(&self, key: GeometryKey) -> GeometryId {
        self.geometries[key as usize]
    }

    /// Material id for `key`.
    pub fn material(&self, key: MaterialKey) -> MaterialId {
        self.materials[key as usize]
    }

    /// Release every catalog geometry. Materials live as long as the adapter.
    pub fn dispose<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        for geometry in self.geometries.drain(..) {
            port.dispose_geometry(geometry);
        }
    }
}
