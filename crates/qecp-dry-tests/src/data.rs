// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Whole-dataset builder for tests.

use std::sync::Arc;

use qecp_model::{CaseSnapshot, NamedCase, SimulationSnapshot, VertexPosition, VizData};

/// Builder for [`VizData`].
///
/// # Example
///
/// ```
/// use qecp_dry_tests::{CaseBuilder, VizDataBuilder};
///
/// let data = VizDataBuilder::new()
///     .line_positions(2)
///     .case("c0", CaseBuilder::new().vertices(2).edge(0, 1, 2.0).build())
///     .build();
///
/// assert_eq!(data.positions.len(), 2);
/// assert!(data.is_planar());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VizDataBuilder {
    data: VizData,
}

impl VizDataBuilder {
    /// Empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulator layer.
    pub fn simulator(mut self, simulator: SimulationSnapshot) -> Self {
        self.data.simulator = Some(simulator);
        self
    }

    /// Appends a vertex position.
    pub fn position(mut self, t: f64, x: f64, y: f64) -> Self {
        self.data.positions.push(VertexPosition { t, x, y });
        self
    }

    /// Appends `count` positions along the first planar axis, one unit apart, at `t = 0`.
    #[allow(clippy::cast_precision_loss)]
    pub fn line_positions(mut self, count: usize) -> Self {
        let start = self.data.positions.len();
        for k in start..start + count {
            self = self.position(0.0, k as f64, 0.0);
        }
        self
    }

    /// Appends a named case.
    pub fn case(mut self, name: &str, case: CaseSnapshot) -> Self {
        self.data.cases.push(NamedCase {
            name: name.to_owned(),
            case,
        });
        self
    }

    /// Sets the producer's planarity flag.
    pub fn planar(mut self, planar: bool) -> Self {
        self.data.vertices_2d_plane = Some(planar);
        self
    }

    /// Finish building.
    pub fn build(self) -> VizData {
        self.data
    }

    /// Finish building, shared.
    pub fn build_arc(self) -> Arc<VizData> {
        Arc::new(self.data)
    }
}
