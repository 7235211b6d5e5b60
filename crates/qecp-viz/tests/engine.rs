// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine facade: triggers, picking, selection lifecycle and disposal.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use qecp_app_core::prefs::{CameraView, ViewerPrefs};
use qecp_app_core::render_port::RenderPort;
use qecp_app_core::settings::RenderSettings;
use qecp_dry_tests::{CaseBuilder, SimulationBuilder, VizDataBuilder};
use qecp_model::{GateType, Node, QubitType, VizData};
use qecp_scene_headless::HeadlessScene;
use qecp_scene_port::ScenePort;
use qecp_viz::{
    DisplacedMaterials, Engine, InteractionEvent, MaterialKey, SelectionRef, SyncError, Trigger,
};

/// Pixel over vertex `k` of a line layout with the default top camera and viewport.
#[allow(clippy::cast_precision_loss)]
fn over_vertex(k: usize) -> (f32, f32) {
    (640.0, 360.0 + 60.0 * k as f32)
}

const EMPTY_SPACE: (f32, f32) = (100.0, 100.0);

#[derive(Clone, Default)]
struct Redraws(Rc<Cell<usize>>);

impl RenderPort for Redraws {
    fn request_redraw(&self) {
        self.0.set(self.0.get() + 1);
    }
}

fn chain(vertices: usize) -> CaseBuilder {
    let mut case = CaseBuilder::new().vertices(vertices);
    for v in 1..vertices {
        case = case.edge(v - 1, v, 2.0);
    }
    case
}

fn dataset() -> Arc<VizData> {
    VizDataBuilder::new()
        .simulator(
            SimulationBuilder::new(2, 1, 1)
                .node(0, 0, 0, QubitType::Data, GateType::InitializeZ)
                .node(1, 0, 0, QubitType::Data, GateType::MeasureZ)
                .build(),
        )
        .line_positions(8)
        .case("wide", chain(7).build())
        .case("narrow", chain(4).build())
        .build_arc()
}

fn engine() -> Engine<HeadlessScene> {
    Engine::new(HeadlessScene::new(), &RenderSettings::default()).unwrap()
}

fn click(engine: &mut Engine<HeadlessScene>, (x, y): (f32, f32)) -> bool {
    engine.pointer_down(x, y);
    engine.pointer_up(x, y)
}

fn vertex_material(engine: &Engine<HeadlessScene>, index: usize) -> qecp_scene_port::MaterialId {
    let object = engine
        .sync()
        .case_pools()
        .vertices()
        .get(index)
        .copied()
        .unwrap();
    engine.port().material(object).unwrap()
}

#[test]
fn selecting_vertex_three_round_trips_its_material() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    let real = engine.sync().catalog().material(MaterialKey::VertexReal);
    let highlight = engine.sync().catalog().material(MaterialKey::Selected);
    assert_eq!(vertex_material(&engine, 3), real);

    assert!(click(&mut engine, over_vertex(3)));
    assert_eq!(engine.selected(), Some(SelectionRef::Vertex(3)));
    assert_eq!(vertex_material(&engine, 3), highlight);

    assert!(click(&mut engine, EMPTY_SPACE));
    assert_eq!(engine.selected(), None);
    assert_eq!(vertex_material(&engine, 3), real);
}

#[test]
fn drag_is_not_a_click() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    let (x, y) = over_vertex(2);
    engine.pointer_down(x, y);
    assert!(!engine.pointer_move(x + 5.0, y));
    assert!(!engine.pointer_up(x + 5.0, y));
    assert_eq!(engine.selected(), None);
}

#[test]
fn hover_yields_to_selection() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    engine.drain_events();
    let (x, y) = over_vertex(1);

    assert!(engine.pointer_move(x, y));
    assert_eq!(engine.hovered(), Some(SelectionRef::Vertex(1)));
    assert_eq!(
        vertex_material(&engine, 1),
        engine.sync().catalog().material(MaterialKey::Hover)
    );

    click(&mut engine, (x, y));
    assert_eq!(engine.hovered(), None);
    assert_eq!(engine.selected(), Some(SelectionRef::Vertex(1)));
    assert_eq!(
        engine.drain_events(),
        vec![
            InteractionEvent::HoverChanged(Some(SelectionRef::Vertex(1))),
            InteractionEvent::HoverChanged(None),
            InteractionEvent::SelectionChanged(Some(SelectionRef::Vertex(1))),
        ]
    );
}

#[test]
fn disabling_hover_effect_clears_and_suppresses_hover() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    let (x, y) = over_vertex(0);
    engine.pointer_move(x, y);
    engine.set_hover_effect(false);
    assert_eq!(engine.hovered(), None);
    assert!(!engine.pointer_move(x, y));
    assert_eq!(engine.hovered(), None);
}

#[test]
fn stale_edge_selection_is_dropped_on_case_change() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    assert!(engine.select(Some(SelectionRef::Edge(5))));
    assert!(matches!(
        engine.selected_displaced(),
        Some(DisplacedMaterials::Edge(_))
    ));

    engine.on_case_changed(1).unwrap();
    assert_eq!(engine.case_index(), 1);
    assert_eq!(engine.selected(), None);
}

#[test]
fn valid_selection_survives_case_change() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    engine.select(Some(SelectionRef::Vertex(2)));

    engine.on_case_changed(1).unwrap();
    assert_eq!(engine.selected(), Some(SelectionRef::Vertex(2)));
    assert_eq!(
        vertex_material(&engine, 2),
        engine.sync().catalog().material(MaterialKey::Selected)
    );

    engine.select(None);
    assert_eq!(
        vertex_material(&engine, 2),
        engine.sync().catalog().material(MaterialKey::VertexReal)
    );
}

#[test]
fn selecting_missing_elements_is_ignored() {
    let mut engine = engine();
    engine.load(1, dataset()).unwrap();
    assert!(!engine.select(Some(SelectionRef::Edge(5))));
    assert_eq!(engine.selected(), None);
}

#[test]
fn queued_triggers_coalesce_latest_wins() {
    let redraws = Redraws::default();
    let mut engine = engine().with_redraw(Box::new(redraws.clone()));
    let data = dataset();

    engine.enqueue(Trigger::Snapshot {
        data: Arc::clone(&data),
        case_index: None,
    });
    engine.enqueue(Trigger::Case(1));
    assert!(engine.has_pending());
    engine.process().unwrap();
    assert!(!engine.has_pending());
    assert_eq!(engine.case_index(), 1);
    assert_eq!(redraws.0.get(), 1);

    engine.enqueue(Trigger::Case(0));
    engine.enqueue(Trigger::Case(1));
    engine.enqueue(Trigger::Case(0));
    engine.process().unwrap();
    assert_eq!(redraws.0.get(), 2);
    assert_eq!(engine.case_index(), 0);

    engine.enqueue(Trigger::Case(1));
    engine.enqueue(Trigger::Snapshot {
        data,
        case_index: None,
    });
    engine.process().unwrap();
    assert_eq!(engine.case_index(), 1);
    assert!(engine.process().unwrap().issues.is_empty());
}

#[test]
fn unchanged_simulator_is_not_rebuilt() {
    let mut engine = engine();
    let data = dataset();
    let first = engine.load(0, Arc::clone(&data)).unwrap();
    assert!(first.simulation_rebuilt);
    let created = engine.port().meshes_created;

    let again = engine.load(1, data).unwrap();
    assert!(!again.simulation_rebuilt);
    assert_eq!(engine.port().meshes_created, created);
    assert_eq!(engine.stats().qubits, 1);
}

#[test]
fn snapshot_without_index_keeps_a_valid_case() {
    let mut engine = engine();
    engine.load(1, dataset()).unwrap();
    let single = VizDataBuilder::new()
        .line_positions(3)
        .case("only", chain(3).build())
        .build_arc();
    engine.on_snapshot_changed(single).unwrap();
    assert_eq!(engine.case_index(), 0);
    assert_eq!(engine.stats().vertices, 3);
    assert_eq!(engine.stats().qubits, 0);
}

#[test]
fn out_of_range_case_rejects_the_whole_load() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    assert!(click(&mut engine, over_vertex(3)));
    let created = engine.port().meshes_created;

    let other = VizDataBuilder::new()
        .line_positions(2)
        .case("pair", chain(2).build())
        .build_arc();
    let err = engine.load(5, other).unwrap_err();
    assert!(matches!(err, SyncError::CaseOutOfRange { index: 5, len: 1 }));

    assert_eq!(engine.port().meshes_created, created);
    assert_eq!(engine.data().map(|d| d.cases.len()), Some(2));
    assert_eq!(engine.case_index(), 0);
    assert_eq!(engine.current_case().map(|c| c.vertices.len()), Some(7));
    assert_eq!(engine.stats().vertices, 7);
    assert_eq!(engine.stats().qubits, 1);
    assert_eq!(engine.selected(), Some(SelectionRef::Vertex(3)));
}

#[test]
fn broken_peer_fails_the_load_and_dispose_leaks_nothing() {
    let mut engine = engine();
    let data = VizDataBuilder::new()
        .simulator(
            SimulationBuilder::new(1, 1, 1)
                .with_node(0, 0, 0, Node::new(QubitType::Data, GateType::CZGate))
                .build(),
        )
        .line_positions(2)
        .case("c", chain(2).build())
        .build_arc();

    let err = engine.load(0, data).unwrap_err();
    assert!(matches!(err, SyncError::MissingPeer { .. }));
    assert_eq!(engine.selected(), None);

    let mut port = engine.into_port();
    assert_eq!(port.live_objects(), 0);
    assert_eq!(port.live_geometries(), 0);
    assert!(port.material_count() > 0);
    port.dispose();
    assert!(port.disposed);
}

#[test]
fn dispose_after_blossoms_releases_everything() {
    let mut engine = engine();
    let data = VizDataBuilder::new()
        .line_positions(4)
        .case(
            "blossom",
            chain(4)
                .blossom(
                    1.0,
                    &[
                        (qecp_model::BoundarySide::Left, 0),
                        (qecp_model::BoundarySide::Right, 0),
                        (qecp_model::BoundarySide::Right, 2),
                    ],
                )
                .build(),
        )
        .build_arc();
    engine.load(0, data).unwrap();
    assert_eq!(engine.stats().blossoms, 1);

    let created = engine.port().meshes_created;
    engine.dispose();
    assert_eq!(engine.port().meshes_removed, created);
    assert_eq!(engine.port().live_geometries(), 0);
    assert_eq!(engine.stats(), qecp_viz::SceneStats::default());
}

#[test]
fn prefs_drive_camera_and_hover() {
    let prefs = ViewerPrefs {
        hover_effect: false,
        camera: qecp_app_core::prefs::CameraPrefs {
            view: CameraView::Left,
            ..Default::default()
        },
        ..ViewerPrefs::default()
    };
    let mut engine = Engine::with_prefs(HeadlessScene::new(), &prefs).unwrap();
    assert!(!engine.hover_effect());
    assert!(engine.camera().position.x < 0.0);

    engine.render_frame();
    assert_eq!(engine.port().render_count, 1);
    assert_eq!(engine.port().camera, *engine.camera());
}

#[test]
fn resize_and_export() {
    let mut engine = engine();
    engine.load(0, dataset()).unwrap();
    engine.resize(64, 48, 2.0);
    assert_eq!(engine.port().viewport, (64, 48, 2.0));
    let url = engine.export_png(1.0).unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
}
