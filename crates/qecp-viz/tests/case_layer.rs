// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Decoding-graph rebuilds: pooling, materials and blossom overlays.

use std::collections::BTreeMap;

use qecp_app_core::settings::RenderSettings;
use qecp_dry_tests::{CaseBuilder, VizDataBuilder};
use qecp_model::{BoundarySide, EdgeState, ValidationIssue, VertexState, VizData};
use qecp_scene_headless::HeadlessScene;
use qecp_scene_port::{ObjectId, Primitive, ScenePort};
use qecp_viz::{MaterialKey, SceneSync, SyncError};

fn sync() -> (HeadlessScene, SceneSync) {
    let mut scene = HeadlessScene::new();
    let sync = SceneSync::new(&mut scene, &RenderSettings::default()).unwrap();
    (scene, sync)
}

fn visibility(scene: &HeadlessScene) -> BTreeMap<ObjectId, bool> {
    scene.objects().map(|(id, mesh)| (id, mesh.visible)).collect()
}

fn chain(vertices: usize) -> CaseBuilder {
    let mut case = CaseBuilder::new().vertices(vertices);
    for v in 1..vertices {
        case = case.edge(v - 1, v, 2.0);
    }
    case
}

fn dataset(cases: &[CaseBuilder]) -> VizData {
    let mut data = VizDataBuilder::new().line_positions(6);
    for (k, case) in cases.iter().enumerate() {
        data = data.case(&format!("case {k}"), case.clone().build());
    }
    data.build()
}

#[test]
fn rebuilding_the_same_case_is_idempotent() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[chain(4).defect(1)]);

    sync.rebuild_case(&mut scene, &data, 0).unwrap();
    let lengths = (
        sync.case_pools().vertices().len(),
        sync.case_pools().edges().len(),
    );
    let flags = visibility(&scene);
    let created = scene.meshes_created;

    sync.rebuild_case(&mut scene, &data, 0).unwrap();
    assert_eq!(
        (
            sync.case_pools().vertices().len(),
            sync.case_pools().edges().len()
        ),
        lengths
    );
    assert_eq!(visibility(&scene), flags);
    assert_eq!(scene.meshes_created, created);
}

#[test]
fn pools_grow_and_hide_but_never_shrink() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[chain(5), chain(2), chain(5)]);

    sync.rebuild_case(&mut scene, &data, 0).unwrap();
    let created = scene.meshes_created;
    assert_eq!(sync.stats(&scene).vertices, 5);
    assert_eq!(sync.stats(&scene).edges, 4);

    sync.rebuild_case(&mut scene, &data, 1).unwrap();
    assert_eq!(sync.case_pools().vertices().len(), 5);
    assert_eq!(sync.case_pools().edges().len(), 4);
    let stats = sync.stats(&scene);
    assert_eq!((stats.vertices, stats.vertex_outlines, stats.edges), (2, 2, 1));

    sync.rebuild_case(&mut scene, &data, 2).unwrap();
    assert_eq!(scene.meshes_created, created);
    assert_eq!(sync.stats(&scene).vertices, 5);
}

#[test]
fn null_entries_hide_their_slot() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[
        chain(3),
        CaseBuilder::new().vertices(1).null_vertex().vertices(1).null_edge().edge(0, 2, 1.0),
    ]);
    sync.rebuild_case(&mut scene, &data, 0).unwrap();
    sync.rebuild_case(&mut scene, &data, 1).unwrap();

    let pools = sync.case_pools();
    let hidden = pools.vertices().get(1).copied().unwrap();
    assert!(!scene.is_visible(hidden));
    let stats = sync.stats(&scene);
    assert_eq!((stats.vertices, stats.edges), (2, 1));
}

#[test]
fn vertex_materials_follow_priority() {
    let (mut scene, mut sync) = sync();
    let mirrored_defect = VertexState {
        is_defect: true,
        mirror_unit: Some(1),
        mirror_enabled: Some(false),
        ..VertexState::default()
    };
    let data = dataset(&[CaseBuilder::new()
        .vertex(mirrored_defect)
        .vertices(2)
        .defect(1)
        .virtual_vertex(2)]);
    sync.rebuild_case(&mut scene, &data, 0).unwrap();

    let catalog = sync.catalog();
    let pools = sync.case_pools();
    let material = |pool: &qecp_viz::SparsePool<ObjectId>, i: usize| {
        scene.material(pool.get(i).copied().unwrap()).unwrap()
    };
    assert_eq!(
        material(pools.vertices(), 0),
        catalog.material(MaterialKey::VertexDisabledMirror)
    );
    assert_eq!(
        material(pools.vertex_outlines(), 0),
        catalog.material(MaterialKey::VertexOutlineDefect)
    );
    assert_eq!(material(pools.vertices(), 1), catalog.material(MaterialKey::VertexDefect));
    assert_eq!(material(pools.vertices(), 2), catalog.material(MaterialKey::VertexVirtual));
    assert_eq!(
        material(pools.vertex_outlines(), 2),
        catalog.material(MaterialKey::VertexOutlineVirtual)
    );
}

#[test]
fn edge_parts_pick_grown_and_subgraph_materials() {
    let (mut scene, mut sync) = sync();
    let grown = CaseBuilder::new().vertices(2).grown_edge(0, 1, 4.0, 1.0, 1.0);
    let data = dataset(&[
        grown.clone(),
        grown.clone().subgraph([7]),
        grown.subgraph([0]),
    ]);
    let catalog = sync.catalog().clone();
    let edge = catalog.material(MaterialKey::Edge);
    let grown_mat = catalog.material(MaterialKey::GrownEdge);
    let subgraph = catalog.material(MaterialKey::SubgraphEdge);

    let materials = |scene: &HeadlessScene, sync: &SceneSync| {
        let meshes = sync.case_pools().edges().get(0).copied().unwrap();
        meshes.materials(scene).unwrap()
    };

    sync.rebuild_case(&mut scene, &data, 0).unwrap();
    assert_eq!(
        materials(&scene, &sync),
        [[grown_mat; 2], [edge; 2], [grown_mat; 2]]
    );
    assert_eq!(sync.stats(&scene).edge_segments, 6);

    sync.rebuild_case(&mut scene, &data, 1).unwrap();
    assert_eq!(materials(&scene, &sync), [[edge; 2]; 3]);

    sync.rebuild_case(&mut scene, &data, 2).unwrap();
    assert_eq!(materials(&scene, &sync), [[subgraph; 2]; 3]);
}

#[test]
fn fully_grown_edge_hides_the_middle() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[CaseBuilder::new().vertices(2).grown_edge(0, 1, 2.0, 1.0, 1.0)]);
    sync.rebuild_case(&mut scene, &data, 0).unwrap();
    let meshes = sync.case_pools().edges().get(0).copied().unwrap();
    let visible: Vec<bool> = meshes.iter().map(|o| scene.is_visible(o)).collect();
    assert_eq!(visible, [true, true, false, false, true, true]);
}

#[test]
fn two_point_blossom_is_skipped() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[chain(3).blossom(
        1.0,
        &[(BoundarySide::Left, 0), (BoundarySide::Left, 1)],
    )]);
    let report = sync.rebuild_case(&mut scene, &data, 0).unwrap();
    assert_eq!(report.hulls_skipped, 1);
    assert!(sync.case_pools().blossoms().is_empty());
}

#[test]
fn colinear_planar_blossom_still_draws() {
    let (mut scene, mut sync) = sync();
    let members = [
        (BoundarySide::Left, 0),
        (BoundarySide::Left, 1),
        (BoundarySide::Left, 2),
    ];
    let data = dataset(&[chain(4).blossom(1.0, &members)]);
    assert!(data.is_planar());
    let report = sync.rebuild_case(&mut scene, &data, 0).unwrap();

    assert_eq!(report.hulls_skipped, 0);
    let blossoms = sync.case_pools().blossoms();
    assert_eq!(blossoms.len(), 1);
    assert!(matches!(
        scene.geometry(blossoms[0].geometry).map(|g| &g.primitive),
        Some(Primitive::Polygon { .. })
    ));
    assert_eq!(
        scene.material(blossoms[0].object),
        Some(sync.catalog().material(MaterialKey::BlossomPlanar))
    );
}

#[test]
fn tight_edge_inside_one_blossom_adds_no_boundary_point() {
    let members = [
        (BoundarySide::Left, 0),
        (BoundarySide::Left, 1),
        (BoundarySide::Left, 2),
    ];
    let with_middle = |right_dual| {
        CaseBuilder::new()
            .vertices(4)
            .edge(0, 1, 2.0)
            .edge_state(EdgeState {
                left: 1,
                right: 2,
                weight: 2.0,
                left_grown: 1.0,
                right_grown: 1.0,
                left_dual: Some(0),
                right_dual,
            })
            .edge(2, 3, 2.0)
            .blossom(1.0, &members)
    };

    let (mut scene, mut sync) = sync();
    let internal = dataset(&[with_middle(Some(0))]);
    let report = sync.rebuild_case(&mut scene, &internal, 0).unwrap();
    assert_eq!(report.hulls_skipped, 1);
    assert!(sync.case_pools().blossoms().is_empty());

    let crossing = dataset(&[with_middle(Some(1))]);
    let report = sync.rebuild_case(&mut scene, &crossing, 0).unwrap();
    assert_eq!(report.hulls_skipped, 0);
    assert_eq!(sync.case_pools().blossoms().len(), 1);
}

#[test]
fn spatial_blossom_uses_a_convex_solid() {
    let (mut scene, mut sync) = sync();
    let data = VizDataBuilder::new()
        .position(0.0, 0.0, 0.0)
        .position(0.0, 1.0, 0.0)
        .position(1.0, 0.0, 1.0)
        .position(2.0, 1.0, 1.0)
        .case(
            "3d",
            chain(4)
                .blossom(
                    0.5,
                    &[
                        (BoundarySide::Left, 0),
                        (BoundarySide::Right, 0),
                        (BoundarySide::Right, 1),
                        (BoundarySide::Right, 2),
                    ],
                )
                .build(),
        )
        .build();
    assert!(!data.is_planar());
    sync.rebuild_case(&mut scene, &data, 0).unwrap();

    let blossoms = sync.case_pools().blossoms();
    assert_eq!(blossoms.len(), 1);
    assert!(matches!(
        scene.geometry(blossoms[0].geometry).map(|g| &g.primitive),
        Some(Primitive::Convex(_))
    ));
}

#[test]
fn blossom_geometry_is_released_and_subgraph_hides_blossoms() {
    let (mut scene, mut sync) = sync();
    let members = [
        (BoundarySide::Left, 0),
        (BoundarySide::Right, 0),
        (BoundarySide::Right, 2),
    ];
    let with_blossom = dataset(&[chain(4).blossom(1.0, &members)]);
    let baseline = scene.live_geometries();

    sync.rebuild_case(&mut scene, &with_blossom, 0).unwrap();
    assert_eq!(scene.live_geometries(), baseline + 1);
    sync.rebuild_case(&mut scene, &with_blossom, 0).unwrap();
    assert_eq!(scene.live_geometries(), baseline + 1);

    let subgraph = dataset(&[chain(4).blossom(1.0, &members).subgraph([1])]);
    sync.rebuild_case(&mut scene, &subgraph, 0).unwrap();
    assert_eq!(scene.live_geometries(), baseline);
    assert_eq!(sync.stats(&scene).blossoms, 0);
}

#[test]
fn missing_boundary_edge_is_reported() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[chain(2).blossom(1.0, &[(BoundarySide::Left, 9)])]);
    let report = sync.rebuild_case(&mut scene, &data, 0).unwrap();
    assert_eq!(
        report.issues,
        vec![ValidationIssue::BoundaryEdgeMissing {
            case: 0,
            dual_node: 0,
            edge: 9
        }]
    );
}

#[test]
fn vertex_without_position_is_an_error() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[chain(7)]);
    let err = sync.rebuild_case(&mut scene, &data, 0).unwrap_err();
    assert_eq!(err, SyncError::VertexWithoutPosition { vertex: 6 });
}

#[test]
fn case_index_is_checked() {
    let (mut scene, mut sync) = sync();
    let data = dataset(&[chain(2)]);
    assert_eq!(
        sync.rebuild_case(&mut scene, &data, 3).unwrap_err(),
        SyncError::CaseOutOfRange { index: 3, len: 1 }
    );
    let empty = VizDataBuilder::new().build();
    assert!(sync.rebuild_case(&mut scene, &empty, 0).is_ok());
}
