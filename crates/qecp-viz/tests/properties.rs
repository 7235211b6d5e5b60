// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for pool growth and peer lines.

use glam::Vec3;
use proptest::prelude::*;
use qecp_app_core::settings::RenderSettings;
use qecp_dry_tests::{CaseBuilder, VizDataBuilder};
use qecp_scene_headless::HeadlessScene;
use qecp_viz::{peer_line, GateGlyph, SceneSync};

proptest! {
    #[test]
    fn case_pools_only_grow(sizes in prop::collection::vec(0usize..8, 1..6)) {
        let mut scene = HeadlessScene::new();
        let mut sync = SceneSync::new(&mut scene, &RenderSettings::default()).unwrap();
        let mut data = VizDataBuilder::new().line_positions(8);
        for (k, n) in sizes.iter().enumerate() {
            data = data.case(&k.to_string(), CaseBuilder::new().vertices(*n).build());
        }
        let data = data.build();

        let mut high_water = 0;
        for (k, n) in sizes.iter().enumerate() {
            sync.rebuild_case(&mut scene, &data, k).unwrap();
            high_water = high_water.max(*n);
            prop_assert_eq!(sync.case_pools().vertices().len(), high_water);
            prop_assert_eq!(sync.stats(&scene).vertices, *n);
        }
    }

    #[test]
    fn peer_lines_stop_at_the_midpoint(
        to in (-5.0f32..5.0, -5.0f32..5.0, -5.0f32..5.0),
        radius in 0.01f32..0.5,
    ) {
        let to = Vec3::new(to.0, to.1, to.2);
        let half = to.length() / 2.0;
        for glyph in [GateGlyph::Control, GateGlyph::CxTarget, GateGlyph::CyTarget] {
            if let Some(line) = peer_line(glyph, Vec3::ZERO, to, radius) {
                let end = line.transform_point(Vec3::Y);
                prop_assert!((end - to / 2.0).length() < 1e-3);
                prop_assert!(line.scale().y <= half + 1e-4);
            }
        }
    }
}
