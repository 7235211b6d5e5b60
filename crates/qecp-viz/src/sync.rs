// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Data synchronizer: rebuilds pooled meshes from the active data.
//!
//! The simulation layer (qubits, idle gates, gate glyphs) is rebuilt
//! wholesale into freshly allocated grids. The case layer (vertices, edges,
//! outlines) reuses grow-only pools and only repositions, restyles and
//! hides; blossom overlays get per-hull geometries that are released on
//! every case rebuild.

use std::collections::BTreeSet;

use core::f32::consts::{FRAC_PI_2, SQRT_2};

use glam::{Quat, Vec2, Vec3};
use qecp_app_core::settings::RenderSettings;
use qecp_geom::{
    convex_hull_2d, convex_hull_3d, cylinder_along, growth_breakpoints, CoordinateMapper,
    DisplayPosition, EdgeEndpoints, EdgeLayout, Transform,
};
use qecp_model::{
    BoundarySide, CaseSnapshot, DualNode, EdgeState, PlanarPosition, PositionRef, QubitType,
    SimulationSnapshot, ValidationIssue, VizData,
};
use qecp_scene_port::{
    GeometryDesc, GeometryId, MaterialId, ObjectId, PickTag, PortError, Primitive, ScenePort,
};
use tracing::{debug, instrument, warn};

use crate::catalog::{Catalog, GateGlyph, GeometryKey, MaterialKey};
use crate::edge_cache::EdgeGeometryCache;
use crate::error::SyncError;
use crate::interaction::HighlightTargets;
use crate::pool::{EdgeMeshes, Grid2, Grid3, PoolEntry, SparsePool};
use crate::stats::SceneStats;

/// Soft problems met during a rebuild. Hard ones are [`SyncError`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Whether the simulation layer was rebuilt (it is skipped when unchanged).
    pub simulation_rebuilt: bool,
    /// Skipped items, in discovery order.
    pub issues: Vec<ValidationIssue>,
    /// Displayed dual nodes without enough boundary points for a hull.
    pub hulls_skipped: usize,
}

impl RebuildReport {
    /// Fold `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        self.simulation_rebuilt |= other.simulation_rebuilt;
        self.issues.extend(other.issues);
        self.hulls_skipped += other.hulls_skipped;
    }
}

/// Meshes of the simulation layer.
#[derive(Debug, Default)]
pub struct SimulationPools {
    qubits: Grid2<ObjectId>,
    qubit_outlines: Grid2<ObjectId>,
    idle_gates: Grid3<ObjectId>,
    gates: Grid3<Vec<ObjectId>>,
}

impl SimulationPools {
    /// Qubit spheres by `(i, j)`.
    pub fn qubits(&self) -> &Grid2<ObjectId> {
        &self.qubits
    }

    /// Qubit outline twins by `(i, j)`.
    pub fn qubit_outlines(&self) -> &Grid2<ObjectId> {
        &self.qubit_outlines
    }

    /// Idle-gate rods by `(t, i, j)`.
    pub fn idle_gates(&self) -> &Grid3<ObjectId> {
        &self.idle_gates
    }

    /// Gate glyph parts by `(t, i, j)`.
    pub fn gates(&self) -> &Grid3<Vec<ObjectId>> {
        &self.gates
    }

    fn dispose<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        self.qubits.dispose(port);
        self.qubit_outlines.dispose(port);
        self.idle_gates.dispose(port);
        self.gates.dispose(port);
    }
}

/// A blossom overlay and the geometry only it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlossomMesh {
    /// Overlay mesh.
    pub object: ObjectId,
    /// Hull geometry.
    pub geometry: GeometryId,
}

impl BlossomMesh {
    fn release<P: ScenePort + ?Sized>(self, port: &mut P) {
        port.remove_mesh(self.object);
        port.dispose_geometry(self.geometry);
    }
}

/// Meshes of the case layer.
#[derive(Debug, Default)]
pub struct CasePools {
    vertices: SparsePool<ObjectId>,
    vertex_outlines: SparsePool<ObjectId>,
    edges: SparsePool<EdgeMeshes>,
    blossoms: Vec<BlossomMesh>,
}

impl CasePools {
    /// Vertex spheres by vertex index.
    pub fn vertices(&self) -> &SparsePool<ObjectId> {
        &self.vertices
    }

    /// Vertex outline twins by vertex index.
    pub fn vertex_outlines(&self) -> &SparsePool<ObjectId> {
        &self.vertex_outlines
    }

    /// Edge meshes by edge index.
    pub fn edges(&self) -> &SparsePool<EdgeMeshes> {
        &self.edges
    }

    /// Blossom overlays of the current case.
    pub fn blossoms(&self) -> &[BlossomMesh] {
        &self.blossoms
    }

    fn release_blossoms<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        for blossom in self.blossoms.drain(..) {
            blossom.release(port);
        }
    }

    fn dispose<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        self.vertices.dispose(port);
        self.vertex_outlines.dispose(port);
        self.edges.dispose(port);
        self.release_blossoms(port);
    }
}

impl HighlightTargets for CasePools {
    fn vertex_mesh(&self, index: usize) -> Option<ObjectId> {
        self.vertices.get(index).copied()
    }

    fn edge_meshes(&self, index: usize) -> Option<EdgeMeshes> {
        self.edges.get(index).copied()
    }
}

/// Owns every pooled mesh and rebuilds them from [`VizData`].
#[derive(Debug)]
pub struct SceneSync {
    settings: RenderSettings,
    mapper: CoordinateMapper,
    catalog: Catalog,
    simulation: SimulationPools,
    case: CasePools,
    edge_cache: EdgeGeometryCache,
}

#[allow(clippy::cast_possible_truncation)]
fn site_point(mapper: CoordinateMapper, site: PlanarPosition, t: f64) -> Vec3 {
    mapper.map(DisplayPosition::new(t as f32, site.x as f32, site.y as f32))
}

fn hidden_mesh<P: ScenePort + ?Sized>(
    port: &mut P,
    geometry: GeometryId,
    material: MaterialId,
    tag: Option<PickTag>,
) -> Result<ObjectId, PortError> {
    let object = port.add_mesh(geometry, material)?;
    port.set_visible(object, false);
    port.set_tag(object, tag);
    Ok(object)
}

fn hidden_edge<P: ScenePort + ?Sized>(
    port: &mut P,
    catalog: &Catalog,
    index: usize,
) -> Result<EdgeMeshes, PortError> {
    let geometry = catalog.geometry(GeometryKey::EdgeRod);
    let material = catalog.material(MaterialKey::Edge);
    let mut made = Vec::with_capacity(6);
    for _ in 0..6 {
        match hidden_mesh(port, geometry, material, Some(PickTag::Edge(index))) {
            Ok(object) => made.push(object),
            Err(err) => {
                made.release(port);
                return Err(err);
            }
        }
    }
    Ok(EdgeMeshes([
        [made[0], made[1]],
        [made[2], made[3]],
        [made[4], made[5]],
    ]))
}

fn count_visible<P: ScenePort + ?Sized>(
    port: &P,
    objects: impl IntoIterator<Item = ObjectId>,
) -> usize {
    objects
        .into_iter()
        .filter(|object| port.is_visible(*object))
        .count()
}

/// Placement of the line joining a gate at `from` to its peer at `to`.
///
/// The line covers half the distance so the peer's own line meets it. A
/// CY target keeps `target_radius / sqrt(2)` clear around its glyph; when
/// that leaves nothing, or the peer coincides with the gate, no line is drawn.
pub fn peer_line(glyph: GateGlyph, from: Vec3, to: Vec3, target_radius: f32) -> Option<Transform> {
    let relative = to - from;
    let distance = relative.length();
    if distance <= f32::EPSILON {
        return None;
    }
    let half = distance / 2.0;
    if glyph == GateGlyph::CyTarget {
        let length = half - target_radius / SQRT_2;
        if length <= 0.0 {
            return None;
        }
        let start = from + relative * ((half - length) / distance);
        return Some(cylinder_along(start, relative, length));
    }
    Some(cylinder_along(from, relative, half))
}

/// Boundary point contributed by one `(side, edge)` blossom member.
///
/// A member grown all the way contributes the far vertex, an ungrown one its
/// own vertex, a partial one the cached growth front.
#[allow(clippy::float_cmp)]
pub fn boundary_point(
    edge: &EdgeState,
    side: BoundarySide,
    cached: &EdgeEndpoints,
    center: impl Fn(usize) -> Option<Vec3>,
) -> Option<Vec3> {
    let (grown, own, far, front) = match side {
        BoundarySide::Left => (edge.left_grown, edge.left, edge.right, cached.left_end),
        BoundarySide::Right => (edge.right_grown, edge.right, edge.left, cached.right_end),
    };
    if grown == edge.weight {
        center(far)
    } else if grown == 0.0 {
        center(own)
    } else {
        Some(front)
    }
}

impl SceneSync {
    /// Bootstraps the catalog on `port` with sanitized `settings`.
    pub fn new<P: ScenePort + ?Sized>(
        port: &mut P,
        settings: &RenderSettings,
    ) -> Result<Self, PortError> {
        let settings = settings.sanitized();
        let catalog = Catalog::bootstrap(port, &settings)?;
        Ok(Self {
            mapper: CoordinateMapper::new(settings.t_scale),
            settings,
            catalog,
            simulation: SimulationPools::default(),
            case: CasePools::default(),
            edge_cache: EdgeGeometryCache::default(),
        })
    }

    /// Effective settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Coordinate mapper in use.
    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper
    }

    /// Shared geometries and materials.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Simulation-layer meshes.
    pub fn simulation_pools(&self) -> &SimulationPools {
        &self.simulation
    }

    /// Case-layer meshes.
    pub fn case_pools(&self) -> &CasePools {
        &self.case
    }

    /// Edge endpoints of the last case rebuild.
    pub fn edge_cache(&self) -> &EdgeGeometryCache {
        &self.edge_cache
    }

    /// Disposes the simulation layer and rebuilds it from `data.simulator`.
    #[instrument(skip_all)]
    pub fn rebuild_simulation<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        data: &VizData,
    ) -> Result<RebuildReport, SyncError> {
        let mut report = RebuildReport {
            simulation_rebuilt: true,
            ..RebuildReport::default()
        };
        let Some(sim) = &data.simulator else {
            self.simulation.dispose(port);
            debug!("no simulator layer");
            return Ok(report);
        };
        let pools = &mut self.simulation;
        pools.qubits.reallocate(port, sim.vertical, sim.horizontal);
        pools.qubit_outlines.reallocate(port, sim.vertical, sim.horizontal);
        pools.idle_gates.reallocate(port, sim.height, sim.vertical, sim.horizontal);
        pools.gates.reallocate(port, sim.height, sim.vertical, sim.horizontal);

        let mut missing_sites = BTreeSet::new();
        let mut site = |at: PositionRef, report: &mut RebuildReport| {
            let found = sim.position(at.i, at.j);
            if found.is_none() && missing_sites.insert((at.i, at.j)) {
                warn!(%at, "node has no planar position; skipped");
                report.issues.push(ValidationIssue::MissingSitePosition { at });
            }
            found
        };

        self.build_qubits(port, sim, &mut site, &mut report)?;
        self.build_idle_gates(port, sim, &mut site, &mut report)?;
        self.build_gates(port, sim, &mut site, &mut report)?;
        debug!(
            qubits = self.simulation.qubits.iter().count(),
            idle_gates = self.simulation.idle_gates.iter().count(),
            gates = self.simulation.gates.iter().count(),
            "simulation rebuilt"
        );
        Ok(report)
    }

    fn build_qubits<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        sim: &SimulationSnapshot,
        site: &mut impl FnMut(PositionRef, &mut RebuildReport) -> Option<PlanarPosition>,
        report: &mut RebuildReport,
    ) -> Result<(), SyncError> {
        let t = -1.0 + sim.t_bias();
        let geometry = self.catalog.geometry(GeometryKey::QubitSphere);
        let outline = self.catalog.material(MaterialKey::QubitOutline);
        for i in 0..sim.vertical {
            for j in 0..sim.horizontal {
                let at = PositionRef::new(0, i, j);
                let Some(node) = sim.node(0, i, j).filter(|n| !n.is_virtual) else {
                    continue;
                };
                let Some(position) = site(at, report) else {
                    continue;
                };
                if let QubitType::Unknown(name) = &node.qubit_type {
                    warn!(%at, name = %name, "unknown qubit type; drawn with fallback material");
                    report.issues.push(ValidationIssue::UnknownQubit {
                        at,
                        name: name.clone(),
                    });
                }
                let center = Transform::from_translation(site_point(self.mapper, position, t));
                let material = self.catalog.material(MaterialKey::for_qubit(&node.qubit_type));

                let qubit = port.add_mesh(geometry, material)?;
                port.set_transform(qubit, &center);
                if let Some(slot) = self.simulation.qubits.slot_mut(i, j) {
                    *slot = Some(qubit);
                }

                let twin = port.add_mesh(geometry, outline)?;
                port.set_transform(
                    twin,
                    &center.with_scale(Vec3::splat(self.settings.outline_ratio)),
                );
                if let Some(slot) = self.simulation.qubit_outlines.slot_mut(i, j) {
                    *slot = Some(twin);
                }
            }
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn build_idle_gates<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        sim: &SimulationSnapshot,
        site: &mut impl FnMut(PositionRef, &mut RebuildReport) -> Option<PlanarPosition>,
        report: &mut RebuildReport,
    ) -> Result<(), SyncError> {
        let geometry = self.catalog.geometry(GeometryKey::IdleRod);
        let material = self.catalog.material(MaterialKey::IdleGate);
        let stretch = Vec3::new(1.0, self.mapper.t_scale(), 1.0);
        for at in sim.coordinates() {
            let Some(node) = sim.node(at.t, at.i, at.j) else {
                continue;
            };
            if node.is_virtual || node.gate_type.is_initialization() {
                continue;
            }
            let Some(position) = site(at, report) else {
                continue;
            };
            // the idle gap leading up to this node's operation
            let t = at.t as f64 - 1.0 + sim.t_bias();
            let object = port.add_mesh(geometry, material)?;
            port.set_transform(
                object,
                &Transform::from_translation(site_point(self.mapper, position, t))
                    .with_scale(stretch),
            );
            if let Some(slot) = self.simulation.idle_gates.slot_mut(at.t, at.i, at.j) {
                *slot = Some(object);
            }
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn build_gates<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        sim: &SimulationSnapshot,
        site: &mut impl FnMut(PositionRef, &mut RebuildReport) -> Option<PlanarPosition>,
        report: &mut RebuildReport,
    ) -> Result<(), SyncError> {
        let target_radius = self.settings.target_radius * self.settings.gate_scale;
        let line = self.catalog.geometry(GeometryKey::ControlLine);
        for at in sim.coordinates() {
            let Some(node) = sim.node(at.t, at.i, at.j) else {
                continue;
            };
            if node.is_virtual || node.is_pre_virtual {
                continue;
            }
            let (Some(glyph), Some(material_key)) = (
                GateGlyph::of(&node.gate_type),
                MaterialKey::for_gate(&node.gate_type),
            ) else {
                continue;
            };
            if glyph == GateGlyph::Unknown {
                warn!(%at, gate = %node.gate_type, "unknown gate type; skipped");
                report.issues.push(ValidationIssue::UnknownGate {
                    at,
                    name: node.gate_type.to_string(),
                });
                continue;
            }
            let Some(position) = site(at, report) else {
                continue;
            };
            let t = at.t as f64 + sim.t_bias();
            let center = site_point(self.mapper, position, t);

            let line_transform = if glyph.has_peer_line() {
                let peer = node.peer_position.ok_or(SyncError::MissingPeer { at })?;
                let peer_site = sim
                    .node(peer.t, peer.i, peer.j)
                    .and_then(|_| sim.position(peer.i, peer.j))
                    .ok_or(SyncError::PeerOutOfRange { at, peer })?;
                peer_line(glyph, center, site_point(self.mapper, peer_site, t), target_radius)
            } else {
                None
            };

            let material = self.catalog.material(material_key);
            let Some(slot) = self.simulation.gates.slot_mut(at.t, at.i, at.j) else {
                continue;
            };
            let parts = slot.insert(Vec::new());
            for key in glyph.parts() {
                let part = port.add_mesh(self.catalog.geometry(*key), material)?;
                port.set_transform(part, &Transform::from_translation(center));
                parts.push(part);
            }
            if let Some(transform) = line_transform {
                let part = port.add_mesh(line, material)?;
                port.set_transform(part, &transform);
                parts.push(part);
            }
        }
        Ok(())
    }

    /// Repositions, restyles and hides the case-layer pools for case
    /// `case_index` of `data`, then rebuilds blossom overlays.
    ///
    /// A dataset without cases shows an empty decoding graph.
    #[instrument(skip_all, fields(case = case_index))]
    pub fn rebuild_case<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        data: &VizData,
        case_index: usize,
    ) -> Result<RebuildReport, SyncError> {
        let empty = CaseSnapshot::default();
        let case = match data.case(case_index) {
            Some(named) => &named.case,
            None if data.cases.is_empty() => &empty,
            None => {
                return Err(SyncError::CaseOutOfRange {
                    index: case_index,
                    len: data.cases.len(),
                })
            }
        };
        let mapper = self.mapper;
        let center = |vertex: usize| {
            data.positions
                .get(vertex)
                .map(|p| mapper.map(p.to_display()))
        };

        self.layout_vertices(port, case, &center)?;
        self.layout_edges(port, case, &center)?;
        self.layout_vertex_outlines(port, case, &center)?;
        let report = self.build_blossoms(port, data.is_planar(), case_index, case, &center)?;
        debug!(
            vertices = case.vertices.len(),
            edges = case.edges.len(),
            blossoms = self.case.blossoms.len(),
            "case rebuilt"
        );
        Ok(report)
    }

    fn layout_vertices<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        case: &CaseSnapshot,
        center: &impl Fn(usize) -> Option<Vec3>,
    ) -> Result<(), SyncError> {
        let geometry = self.catalog.geometry(GeometryKey::VertexSphere);
        let placeholder = self.catalog.material(MaterialKey::VertexReal);
        for (index, vertex) in case.vertices.iter().enumerate() {
            let Some(vertex) = vertex else {
                self.case.vertices.hide(port, index);
                continue;
            };
            let position = center(index).ok_or(SyncError::VertexWithoutPosition { vertex: index })?;
            let object = *self.case.vertices.grow_and_get(index, |i| {
                hidden_mesh(port, geometry, placeholder, Some(PickTag::Vertex(i)))
            })?;
            port.set_transform(object, &Transform::from_translation(position));
            port.set_material(object, self.catalog.material(MaterialKey::for_vertex(vertex)));
            port.set_visible(object, true);
        }
        self.case.vertices.hide_tail(port, case.vertices.len());
        Ok(())
    }

    fn layout_edges<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        case: &CaseSnapshot,
        center: &impl Fn(usize) -> Option<Vec3>,
    ) -> Result<(), SyncError> {
        let offset = self.settings.edge_offset();
        let subgraph_shown = case.subgraph.is_some();
        self.edge_cache.clear();
        for (index, edge) in case.edges.iter().enumerate() {
            let Some(edge) = edge else {
                self.case.edges.hide(port, index);
                continue;
            };
            let endpoint = |vertex| {
                center(vertex).ok_or(SyncError::EdgeEndpointOutOfRange { edge: index, vertex })
            };
            let layout = EdgeLayout::new(
                endpoint(edge.left)?,
                endpoint(edge.right)?,
                offset,
                growth_breakpoints(edge.weight, edge.left_grown, edge.right_grown),
            );
            self.edge_cache.insert(index, layout.endpoints());

            let catalog = &self.catalog;
            let meshes = *self
                .case
                .edges
                .grow_and_get(index, |i| hidden_edge(port, catalog, i))?;
            let in_subgraph = case.in_subgraph(index);
            for segment in layout.segments() {
                let material = self.catalog.material(MaterialKey::for_edge_part(
                    segment.part,
                    subgraph_shown,
                    in_subgraph,
                ));
                let visible = !segment.is_empty();
                let pair = meshes.pair(segment.part);
                for (object, transform) in pair.into_iter().zip(layout.segment_transforms(&segment))
                {
                    port.set_transform(object, &transform);
                    port.set_material(object, material);
                    port.set_visible(object, visible);
                }
            }
        }
        self.case.edges.hide_tail(port, case.edges.len());
        Ok(())
    }

    fn layout_vertex_outlines<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        case: &CaseSnapshot,
        center: &impl Fn(usize) -> Option<Vec3>,
    ) -> Result<(), SyncError> {
        let geometry = self.catalog.geometry(GeometryKey::VertexSphere);
        let placeholder = self.catalog.material(MaterialKey::VertexOutlineReal);
        let scale = Vec3::splat(self.settings.outline_ratio);
        for (index, vertex) in case.vertices.iter().enumerate() {
            let Some(vertex) = vertex else {
                self.case.vertex_outlines.hide(port, index);
                continue;
            };
            let position = center(index).ok_or(SyncError::VertexWithoutPosition { vertex: index })?;
            let object = *self
                .case
                .vertex_outlines
                .grow_and_get(index, |_| hidden_mesh(port, geometry, placeholder, None))?;
            port.set_transform(
                object,
                &Transform::from_translation(position).with_scale(scale),
            );
            port.set_material(
                object,
                self.catalog.material(MaterialKey::for_vertex_outline(vertex)),
            );
            port.set_visible(object, true);
        }
        self.case.vertex_outlines.hide_tail(port, case.vertices.len());
        Ok(())
    }

    fn build_blossoms<P: ScenePort + ?Sized>(
        &mut self,
        port: &mut P,
        planar: bool,
        case_index: usize,
        case: &CaseSnapshot,
        center: &impl Fn(usize) -> Option<Vec3>,
    ) -> Result<RebuildReport, SyncError> {
        let mut report = RebuildReport::default();
        self.case.release_blossoms(port);
        if case.subgraph.is_some() {
            return Ok(report);
        }
        for (index, node) in case.dual_nodes.iter().enumerate() {
            let Some(node) = node.as_ref().filter(|n| n.is_displayed()) else {
                continue;
            };
            let points = self.boundary_points(case_index, index, node, case, center, &mut report);
            if points.len() < 3 {
                debug!(dual_node = index, points = points.len(), "blossom hull skipped");
                report.hulls_skipped += 1;
                continue;
            }
            let (desc, transform, material) = if planar {
                let flat: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.x, p.z)).collect();
                (
                    GeometryDesc::new(
                        Primitive::Polygon {
                            points: convex_hull_2d(&flat),
                        },
                        self.settings.segments,
                    ),
                    Transform::from_translation(Vec3::new(0.0, -self.settings.plane_drop, 0.0))
                        .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                    MaterialKey::BlossomPlanar,
                )
            } else {
                (
                    GeometryDesc::new(
                        Primitive::Convex(convex_hull_3d(&points)),
                        self.settings.segments,
                    ),
                    Transform::identity(),
                    MaterialKey::Blossom,
                )
            };
            let geometry = port.create_geometry(&desc)?;
            let object = match port.add_mesh(geometry, self.catalog.material(material)) {
                Ok(object) => object,
                Err(err) => {
                    port.dispose_geometry(geometry);
                    return Err(err.into());
                }
            };
            port.set_transform(object, &transform);
            self.case.blossoms.push(BlossomMesh { object, geometry });
        }
        Ok(report)
    }

    fn boundary_points(
        &self,
        case_index: usize,
        dual_node: usize,
        node: &DualNode,
        case: &CaseSnapshot,
        center: &impl Fn(usize) -> Option<Vec3>,
        report: &mut RebuildReport,
    ) -> Vec<Vec3> {
        let Some(members) = &node.blossom_members else {
            return Vec::new();
        };
        let mut points = Vec::with_capacity(members.len());
        for member in members {
            let (Some(edge), Some(cached)) =
                (case.edge(member.edge), self.edge_cache.get(member.edge))
            else {
                warn!(dual_node, edge = member.edge, "blossom boundary references a missing edge");
                report.issues.push(ValidationIssue::BoundaryEdgeMissing {
                    case: case_index,
                    dual_node,
                    edge: member.edge,
                });
                continue;
            };
            if edge.is_internal() {
                continue;
            }
            if let Some(point) = boundary_point(edge, member.side, cached, center) {
                points.push(point);
            }
        }
        points
    }

    /// Visible-object counts per kind.
    pub fn stats<P: ScenePort + ?Sized>(&self, port: &P) -> SceneStats {
        let sim = &self.simulation;
        let case = &self.case;
        SceneStats {
            qubits: count_visible(port, sim.qubits.iter().copied()),
            qubit_outlines: count_visible(port, sim.qubit_outlines.iter().copied()),
            idle_gates: count_visible(port, sim.idle_gates.iter().copied()),
            gates: sim.gates.iter().filter(|parts| !parts.is_empty()).count(),
            gate_parts: count_visible(port, sim.gates.iter().flatten().copied()),
            vertices: count_visible(port, case.vertices.iter().copied()),
            vertex_outlines: count_visible(port, case.vertex_outlines.iter().copied()),
            edges: case
                .edges
                .iter()
                .filter(|meshes| count_visible(port, meshes.iter()) > 0)
                .count(),
            edge_segments: count_visible(port, case.edges.iter().flat_map(EdgeMeshes::iter)),
            blossoms: count_visible(port, case.blossoms.iter().map(|b| b.object)),
        }
    }

    /// Releases every pooled mesh, hull geometry and catalog geometry.
    pub fn dispose<P: ScenePort + ?Sized>(&mut self, port: &mut P) {
        self.simulation.dispose(port);
        self.case.dispose(port);
        self.catalog.dispose(port);
        self.edge_cache.clear();
    }
}
