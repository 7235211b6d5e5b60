// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hover/select state machine.
//!
//! At most one element is hovered and one is selected. Entering either state
//! swaps the element's material(s) for a highlight and remembers what was
//! there; leaving restores exactly the remembered materials. Selection wins
//! over hover: selecting clears the hover first.
//!
//! Rebuilds use a two-phase protocol: [`Interaction::begin_rebuild`] clears
//! both states and remembers the selection, [`Interaction::end_rebuild`]
//! reinstates it only if it still refers to a live element of the new case.

use qecp_model::CaseSnapshot;
use qecp_scene_port::{CameraState, MaterialId, ObjectId, PickTag, ScenePort};

use crate::pool::EdgeMeshes;

/// Reference to an interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionRef {
    /// Decoding-graph vertex.
    Vertex(usize),
    /// Decoding-graph edge.
    Edge(usize),
}

impl SelectionRef {
    /// Whether the referenced entry exists and is non-null in `case`.
    pub fn is_valid(self, case: &CaseSnapshot) -> bool {
        match self {
            Self::Vertex(index) => case.vertex(index).is_some(),
            Self::Edge(index) => case.edge(index).is_some(),
        }
    }
}

impl From<PickTag> for SelectionRef {
    fn from(tag: PickTag) -> Self {
        match tag {
            PickTag::Vertex(index) => Self::Vertex(index),
            PickTag::Edge(index) => Self::Edge(index),
        }
    }
}

impl From<SelectionRef> for PickTag {
    fn from(r: SelectionRef) -> Self {
        match r {
            SelectionRef::Vertex(index) => Self::Vertex(index),
            SelectionRef::Edge(index) => Self::Edge(index),
        }
    }
}

/// Materials displaced by a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplacedMaterials {
    /// The vertex mesh's material.
    Vertex(MaterialId),
    /// The edge's six sub-mesh materials, laid out like [`EdgeMeshes`].
    Edge([[MaterialId; 2]; 3]),
}

/// Observable change of the interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// The hovered element changed.
    HoverChanged(Option<SelectionRef>),
    /// The selected element changed.
    SelectionChanged(Option<SelectionRef>),
}

/// Meshes a selection reference resolves to.
pub trait HighlightTargets {
    /// Mesh of vertex `index`.
    fn vertex_mesh(&self, index: usize) -> Option<ObjectId>;
    /// Meshes of edge `index`.
    fn edge_meshes(&self, index: usize) -> Option<EdgeMeshes>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Highlight {
    target: SelectionRef,
    displaced: Option<DisplacedMaterials>,
}

/// Distinguishes clicks from drags: a click is a release at exactly the
/// press position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerTracker {
    pressed_at: Option<(f32, f32)>,
    down: bool,
}

impl PointerTracker {
    /// Record a press.
    pub fn press(&mut self, x: f32, y: f32) {
        self.pressed_at = Some((x, y));
        self.down = true;
    }

    /// Record a release; returns whether it completes a click.
    #[allow(clippy::float_cmp)]
    pub fn release(&mut self, x: f32, y: f32) -> bool {
        self.down = false;
        self.pressed_at == Some((x, y))
    }

    /// Whether a button is held (camera drag in progress).
    pub fn is_down(&self) -> bool {
        self.down
    }
}

/// First visible, tagged element under pixel `(x, y)` of a `width x height`
/// viewport.
pub fn pick<P: ScenePort + ?Sized>(
    port: &P,
    camera: &CameraState,
    (width, height): (u32, u32),
    x: f32,
    y: f32,
) -> Option<SelectionRef> {
    #[allow(clippy::cast_precision_loss)]
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    let ray = camera.ray_through(CameraState::pixel_to_ndc(x, y, width, height), aspect);
    port.pick(&ray)
        .into_iter()
        .filter(|hit| hit.visible)
        .find_map(|hit| hit.tag)
        .map(SelectionRef::from)
}

/// Hover/select state.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    hover_material: MaterialId,
    selected_material: MaterialId,
    hover_effect: bool,
    hovered: Option<Highlight>,
    selected: Option<Highlight>,
    saved: Option<SelectionRef>,
    pointer: PointerTracker,
    events: Vec<InteractionEvent>,
}

impl Interaction {
    /// Idle state using the given highlight materials. Hover effect starts enabled.
    pub fn new(hover_material: MaterialId, selected_material: MaterialId) -> Self {
        Self {
            hover_material,
            selected_material,
            hover_effect: true,
            hovered: None,
            selected: None,
            saved: None,
            pointer: PointerTracker::default(),
            events: Vec::new(),
        }
    }

    /// Currently hovered element.
    pub fn hovered(&self) -> Option<SelectionRef> {
        self.hovered.map(|h| h.target)
    }

    /// Currently selected element.
    pub fn selected(&self) -> Option<SelectionRef> {
        self.selected.map(|h| h.target)
    }

    /// Materials the selection displaced.
    pub fn selected_displaced(&self) -> Option<DisplacedMaterials> {
        self.selected.and_then(|h| h.displaced)
    }

    /// Whether hovering highlights elements.
    pub fn hover_effect(&self) -> bool {
        self.hover_effect
    }

    /// Pointer press/release tracker.
    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    /// Take every event recorded since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enable or disable the hover effect; disabling clears the hover.
    pub fn set_hover_effect<P, T>(&mut self, port: &mut P, targets: &T, enabled: bool)
    where
        P: ScenePort + ?Sized,
        T: HighlightTargets + ?Sized,
    {
        self.hover_effect = enabled;
        if !enabled {
            self.set_hover(port, targets, None);
        }
    }

    /// Move the hover to `next`. Returns whether anything changed.
    pub fn set_hover<P, T>(&mut self, port: &mut P, targets: &T, next: Option<SelectionRef>) -> bool
    where
        P: ScenePort + ?Sized,
        T: HighlightTargets + ?Sized,
    {
        if self.hovered() == next {
            return false;
        }
        if let Some(old) = self.hovered.take() {
            restore(port, targets, old);
        }
        self.hovered = next.map(|target| Highlight {
            target,
            displaced: swap(port, targets, target, self.hover_material),
        });
        self.events.push(InteractionEvent::HoverChanged(next));
        true
    }

    /// Move the selection to `next`. Selecting something clears the hover
    /// first. Returns whether anything changed.
    pub fn set_selected<P, T>(
        &mut self,
        port: &mut P,
        targets: &T,
        next: Option<SelectionRef>,
    ) -> bool
    where
        P: ScenePort + ?Sized,
        T: HighlightTargets + ?Sized,
    {
        if next.is_some() {
            self.set_hover(port, targets, None);
        }
        let previous = self.selected();
        if let Some(old) = self.selected.take() {
            match &mut self.hovered {
                // the hover sits on top of the selection highlight; hand it
                // the original materials so leaving the hover restores them
                Some(hover) if hover.target == old.target => hover.displaced = old.displaced,
                _ => restore(port, targets, old),
            }
        }
        self.selected = next.map(|target| Highlight {
            target,
            displaced: swap(port, targets, target, self.selected_material),
        });
        if previous == next {
            return false;
        }
        self.events.push(InteractionEvent::SelectionChanged(next));
        true
    }

    /// Clear hover and selection ahead of a rebuild, remembering the selection.
    pub fn begin_rebuild<P, T>(&mut self, port: &mut P, targets: &T)
    where
        P: ScenePort + ?Sized,
        T: HighlightTargets + ?Sized,
    {
        self.set_hover(port, targets, None);
        let selected = self.selected();
        self.saved = selected.or(self.saved);
        self.set_selected(port, targets, None);
    }

    /// Reinstate the selection remembered by [`begin_rebuild`](Self::begin_rebuild)
    /// if it is still valid in `case`. Returns whether it was reinstated.
    pub fn end_rebuild<P, T>(&mut self, port: &mut P, targets: &T, case: Option<&CaseSnapshot>) -> bool
    where
        P: ScenePort + ?Sized,
        T: HighlightTargets + ?Sized,
    {
        match (self.saved.take(), case) {
            (Some(saved), Some(case)) if saved.is_valid(case) => {
                self.set_selected(port, targets, Some(saved))
            }
            _ => false,
        }
    }

    /// Drop every highlight without touching the scene (its meshes are gone).
    pub fn forget(&mut self) {
        if self.hovered.take().is_some() {
            self.events.push(InteractionEvent::HoverChanged(None));
        }
        if self.selected.take().is_some() {
            self.events.push(InteractionEvent::SelectionChanged(None));
        }
        self.saved = None;
        self.pointer = PointerTracker::default();
    }

    /// Pointer pressed at `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer.press(x, y);
    }

    /// Pointer released at `(x, y)`; a click selects the picked element or
    /// clears the selection when nothing is hit.
    pub fn pointer_up<P, T>(
        &mut self,
        port: &mut P,
        targets: &T,
        camera: &CameraState,
        viewport: (u32, u32),
        (x, y): (f32, f32),
    ) -> bool
    where
        P: ScenePort + ?Sized,
        T: HighlightTargets + ?Sized,
    {
        if !self.pointer.release(x, y) {
            return false;
        }
        let hit = pick(port, camera, viewport, x, y);
        self.set_selected(port, targets, hit)
    }

    /// Pointer moved to `(x, y)`; ignored while a button is held.
    pub fn pointer_move<P, T>(
        &mut self,
        port: &mut P,
        targets: &T,
        camera: &CameraState,
        viewport: (u32, u32),
        (x, y): (f32, f32),
    ) -> bool
    where
        P: ScenePort + ?Sized,
        T: HighlightTargets + ?Sized,
    {
        if self.pointer.is_down() {
            return false;
        }
        let hit = if self.hover_effect {
            pick(port, camera, viewport, x, y)
        } else {
            None
        };
        self.set_hover(port, targets, hit)
    }
}

fn swap<P, T>(
    port: &mut P,
    targets: &T,
    target: SelectionRef,
    material: MaterialId,
) -> Option<DisplacedMaterials>
where
    P: ScenePort + ?Sized,
    T: HighlightTargets + ?Sized,
{
    match target {
        SelectionRef::Vertex(index) => {
            let object = targets.vertex_mesh(index)?;
            let previous = port.material(object)?;
            port.set_material(object, material);
            Some(DisplacedMaterials::Vertex(previous))
        }
        SelectionRef::Edge(index) => {
            let meshes = targets.edge_meshes(index)?;
            let previous = meshes.materials(port)?;
            for object in meshes.iter() {
                port.set_material(object, material);
            }
            Some(DisplacedMaterials::Edge(previous))
        }
    }
}

fn restore<P, T>(port: &mut P, targets: &T, highlight: Highlight)
where
    P: ScenePort + ?Sized,
    T: HighlightTargets + ?Sized,
{
    match (highlight.target, highlight.displaced) {
        (SelectionRef::Vertex(index), Some(DisplacedMaterials::Vertex(material))) => {
            if let Some(object) = targets.vertex_mesh(index) {
                port.set_material(object, material);
            }
        }
        (SelectionRef::Edge(index), Some(DisplacedMaterials::Edge(materials))) => {
            if let Some(meshes) = targets.edge_meshes(index) {
                for (pair, mats) in meshes.0.iter().zip(materials) {
                    for (object, material) in pair.iter().zip(mats) {
                        port.set_material(*object, material);
                    }
                }
            }
        }
        _ => {}
    }
}
