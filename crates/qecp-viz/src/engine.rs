// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine facade: owns the scene port, the synchronizer and the interaction
//! state, and serializes rebuild triggers.
//!
//! Hosts call [`Engine::on_snapshot_changed`] / [`Engine::on_case_changed`]
//! (or [`Engine::enqueue`] followed by [`Engine::process`]). Triggers queued
//! before processing coalesce, latest wins:
//!
//! | pending | incoming | result |
//! |---|---|---|
//! | snapshot | case `n` | the snapshot, shown at case `n` |
//! | case `m` | snapshot without index | the snapshot, shown at case `m` |
//! | anything | anything else | the incoming trigger |

use std::sync::Arc;

use qecp_app_core::prefs::ViewerPrefs;
use qecp_app_core::render_port::RenderPort;
use qecp_app_core::settings::RenderSettings;
use qecp_model::{CaseSnapshot, VizData};
use qecp_scene_port::{CameraPreset, CameraState, PortError, ProjectionKind, ScenePort};
use tracing::{debug, info, instrument, warn};

use crate::catalog::MaterialKey;
use crate::error::SyncError;
use crate::interaction::{DisplacedMaterials, Interaction, InteractionEvent, SelectionRef};
use crate::stats::SceneStats;
use crate::sync::{RebuildReport, SceneSync};

/// A request to rebuild part of the scene.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// New dataset. `case_index: None` keeps the current case if it exists.
    Snapshot {
        /// Dataset to show.
        data: Arc<VizData>,
        /// Case to show.
        case_index: Option<usize>,
    },
    /// Another case of the current dataset.
    Case(usize),
}

/// Viewport size in logical pixels plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Device pixel ratio.
    pub dpr: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            dpr: 1.0,
        }
    }
}

/// The visualizer core bound to one scene port.
pub struct Engine<P: ScenePort> {
    port: P,
    sync: SceneSync,
    interaction: Interaction,
    camera: CameraState,
    preset: (CameraPreset, ProjectionKind),
    viewport: Viewport,
    data: Option<Arc<VizData>>,
    case_index: usize,
    simulation_digest: Option<[u8; 32]>,
    pending: Option<Trigger>,
    redraw: Option<Box<dyn RenderPort>>,
}

impl<P: ScenePort> Engine<P> {
    /// Bootstraps the catalog on `port`; nothing is shown until data is loaded.
    pub fn new(mut port: P, settings: &RenderSettings) -> Result<Self, PortError> {
        let sync = SceneSync::new(&mut port, settings)?;
        let catalog = sync.catalog();
        let interaction = Interaction::new(
            catalog.material(MaterialKey::Hover),
            catalog.material(MaterialKey::Selected),
        );
        let preset = (CameraPreset::default(), ProjectionKind::Orthographic);
        Ok(Self {
            port,
            sync,
            interaction,
            camera: CameraState::preset(preset.0, preset.1),
            preset,
            viewport: Viewport::default(),
            data: None,
            case_index: 0,
            simulation_digest: None,
            pending: None,
            redraw: None,
        })
    }

    /// Like [`Engine::new`], taking settings, camera and hover effect from `prefs`.
    pub fn with_prefs(port: P, prefs: &ViewerPrefs) -> Result<Self, PortError> {
        let mut engine = Self::new(port, &prefs.settings)?;
        engine.preset = (prefs.camera.view.into(), prefs.camera.projection.into());
        engine.reset_camera();
        engine.interaction.set_hover_effect(
            &mut engine.port,
            engine.sync.case_pools(),
            prefs.hover_effect,
        );
        Ok(engine)
    }

    /// Ask `redraw` for a frame whenever the scene changes.
    #[must_use]
    pub fn with_redraw(mut self, redraw: Box<dyn RenderPort>) -> Self {
        self.redraw = Some(redraw);
        self
    }

    /// The scene port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// The scene port, mutably. Changes made here bypass the pools.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// The synchronizer.
    pub fn sync(&self) -> &SceneSync {
        &self.sync
    }

    /// Currently shown dataset.
    pub fn data(&self) -> Option<&VizData> {
        self.data.as_deref()
    }

    /// Currently shown case index.
    pub fn case_index(&self) -> usize {
        self.case_index
    }

    /// Current camera.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Points the engine at `data`, showing case `case_index`.
    ///
    /// An out-of-range `case_index` is rejected before anything changes.
    pub fn load(
        &mut self,
        case_index: usize,
        data: Arc<VizData>,
    ) -> Result<RebuildReport, SyncError> {
        self.enqueue(Trigger::Snapshot {
            data,
            case_index: Some(case_index),
        });
        self.process()
    }

    /// A new dataset became active.
    pub fn on_snapshot_changed(&mut self, data: Arc<VizData>) -> Result<RebuildReport, SyncError> {
        self.enqueue(Trigger::Snapshot {
            data,
            case_index: None,
        });
        self.process()
    }

    /// Another case became active.
    pub fn on_case_changed(&mut self, case_index: usize) -> Result<RebuildReport, SyncError> {
        self.enqueue(Trigger::Case(case_index));
        self.process()
    }

    /// Queues `trigger`, coalescing with anything already pending.
    pub fn enqueue(&mut self, trigger: Trigger) {
        let next = match (self.pending.take(), trigger) {
            (Some(Trigger::Snapshot { data, .. }), Trigger::Case(index)) => Trigger::Snapshot {
                data,
                case_index: Some(index),
            },
            (
                Some(Trigger::Case(index)),
                Trigger::Snapshot {
                    data,
                    case_index: None,
                },
            ) => Trigger::Snapshot {
                data,
                case_index: Some(index),
            },
            (previous, next) => {
                if previous.is_some() {
                    debug!("pending trigger superseded");
                }
                next
            }
        };
        self.pending = Some(next);
    }

    /// Whether a trigger is waiting for [`Engine::process`].
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the pending trigger, if any, to completion.
    ///
    /// Hover and selection are cleared first; afterwards the previous
    /// selection is reinstated when it still names a live element.
    #[instrument(skip_all)]
    pub fn process(&mut self) -> Result<RebuildReport, SyncError> {
        let Some(trigger) = self.pending.take() else {
            return Ok(RebuildReport::default());
        };
        self.interaction
            .begin_rebuild(&mut self.port, self.sync.case_pools());
        let result = match trigger {
            Trigger::Snapshot { data, case_index } => self.sync_snapshot(data, case_index),
            Trigger::Case(index) => self.sync_case(index),
        };
        // a rejected case index leaves the scene untouched
        let scene_intact = matches!(result, Ok(_) | Err(SyncError::CaseOutOfRange { .. }));
        let case = if scene_intact {
            self.data
                .as_deref()
                .and_then(|data| data.case(self.case_index))
                .map(|named| &named.case)
        } else {
            None
        };
        self.interaction
            .end_rebuild(&mut self.port, self.sync.case_pools(), case);
        self.request_redraw();
        if let Err(err) = &result {
            warn!(%err, "rebuild abandoned");
        }
        result
    }

    fn sync_snapshot(
        &mut self,
        data: Arc<VizData>,
        case_index: Option<usize>,
    ) -> Result<RebuildReport, SyncError> {
        let index = case_index.unwrap_or(if self.case_index < data.cases.len() {
            self.case_index
        } else {
            0
        });
        if index >= data.cases.len() && !data.cases.is_empty() {
            return Err(SyncError::CaseOutOfRange {
                index,
                len: data.cases.len(),
            });
        }
        let digest = data
            .simulator_digest()
            .map_err(|err| warn!(%err, "cannot digest simulator; rebuilding"))
            .ok();
        let mut report = RebuildReport::default();
        if digest.is_none() || digest != self.simulation_digest {
            self.simulation_digest = None;
            report.merge(self.sync.rebuild_simulation(&mut self.port, &data)?);
            self.simulation_digest = digest;
        } else {
            debug!("simulator unchanged; keeping simulation layer");
        }
        info!(cases = data.cases.len(), case = index, "dataset loaded");
        self.data = Some(data);
        report.merge(self.sync_case(index)?);
        Ok(report)
    }

    fn sync_case(&mut self, index: usize) -> Result<RebuildReport, SyncError> {
        let Some(data) = self.data.clone() else {
            debug!(case = index, "no dataset loaded; case change recorded");
            self.case_index = index;
            return Ok(RebuildReport::default());
        };
        let report = self.sync.rebuild_case(&mut self.port, &data, index)?;
        self.case_index = index;
        Ok(report)
    }

    /// Active case of the active dataset.
    pub fn current_case(&self) -> Option<&CaseSnapshot> {
        self.data
            .as_deref()?
            .case(self.case_index)
            .map(|named| &named.case)
    }

    /// Currently hovered element.
    pub fn hovered(&self) -> Option<SelectionRef> {
        self.interaction.hovered()
    }

    /// Currently selected element.
    pub fn selected(&self) -> Option<SelectionRef> {
        self.interaction.selected()
    }

    /// Materials the current selection displaced.
    pub fn selected_displaced(&self) -> Option<DisplacedMaterials> {
        self.interaction.selected_displaced()
    }

    /// Hover and selection changes since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        self.interaction.drain_events()
    }

    /// Whether hovering highlights elements.
    pub fn hover_effect(&self) -> bool {
        self.interaction.hover_effect()
    }

    /// Enables or disables the hover effect.
    pub fn set_hover_effect(&mut self, enabled: bool) {
        self.interaction
            .set_hover_effect(&mut self.port, self.sync.case_pools(), enabled);
        self.request_redraw();
    }

    /// Selects `target` directly (or clears with `None`), as a click would.
    pub fn select(&mut self, target: Option<SelectionRef>) -> bool {
        let target = target.filter(|t| self.current_case().is_some_and(|case| t.is_valid(case)));
        let changed = self
            .interaction
            .set_selected(&mut self.port, self.sync.case_pools(), target);
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Pointer pressed at viewport pixel `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.interaction.pointer_down(x, y);
    }

    /// Pointer released at `(x, y)`; a click picks and selects.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        let changed = self.interaction.pointer_up(
            &mut self.port,
            self.sync.case_pools(),
            &self.camera,
            (self.viewport.width, self.viewport.height),
            (x, y),
        );
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Pointer moved to `(x, y)`; picks and hovers when no button is held.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let changed = self.interaction.pointer_move(
            &mut self.port,
            self.sync.case_pools(),
            &self.camera,
            (self.viewport.width, self.viewport.height),
            (x, y),
        );
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Replaces the camera state (orbit controls live in the host).
    pub fn set_camera(&mut self, camera: CameraState) {
        self.camera = camera;
        self.request_redraw();
    }

    /// Resets the camera to `preset` with `projection`.
    pub fn set_camera_preset(&mut self, preset: CameraPreset, projection: ProjectionKind) {
        self.preset = (preset, projection);
        self.reset_camera();
    }

    /// Resets the camera to the last chosen preset.
    pub fn reset_camera(&mut self) {
        self.camera = CameraState::preset(self.preset.0, self.preset.1);
        self.request_redraw();
    }

    /// Resizes the viewport.
    pub fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.viewport = Viewport { width, height, dpr };
        self.port.resize(width, height, dpr);
        self.request_redraw();
    }

    /// Draws one frame with the current camera. Never rebuilds.
    pub fn render_frame(&mut self) {
        self.port.set_camera(&self.camera);
        self.port.render();
    }

    /// Renders at `scale` times the viewport and returns a PNG data URL.
    pub fn export_png(&mut self, scale: f32) -> Result<String, PortError> {
        self.port.set_camera(&self.camera);
        self.port.export_png(scale)
    }

    /// Visible-object counts.
    pub fn stats(&self) -> SceneStats {
        self.sync.stats(&self.port)
    }

    /// Releases every pooled object, hull geometry and catalog geometry.
    /// Materials and the port itself stay with the host; the engine shows
    /// nothing afterwards.
    pub fn dispose(&mut self) {
        self.interaction.forget();
        self.sync.dispose(&mut self.port);
        self.data = None;
        self.simulation_digest = None;
        self.pending = None;
        debug!("engine disposed");
    }

    /// Disposes the engine and hands the port back.
    pub fn into_port(mut self) -> P {
        self.dispose();
        self.port
    }

    fn request_redraw(&self) {
        if let Some(redraw) = &self.redraw {
            redraw.request_redraw();
        }
    }
}

impl<P: ScenePort + std::fmt::Debug> std::fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("port", &self.port)
            .field("case_index", &self.case_index)
            .field("pending", &self.pending.is_some())
            .field("hovered", &self.hovered())
            .field("selected", &self.selected())
            .finish_non_exhaustive()
    }
}
