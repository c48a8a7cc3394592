//! Interaction engine for the work zone.
//!
//! `EngineCore` owns the camera, both containers and the active gesture. Host
//! events (pointer, wheel, native drag and drop) come in through the `on_*`
//! methods, which mutate that state and return the [`Action`]s the view layer
//! must apply. Nothing here touches the DOM, so the whole state machine is
//! testable natively.
//!
//! Gesture arbitration:
//!
//! | From | Event | To |
//! |------|-------|----|
//! | `Idle` | primary down on a canvas polygon, no Ctrl | `ObjectDragging` |
//! | `Idle` | primary down on background, or with Ctrl | `Panning` |
//! | `Idle` / `ObjectDragging` | native drag start | `CrossContainerDragging` |
//! | `Panning` / `ObjectDragging` | pointer up, cancel, blur | `Idle` |
//! | `CrossContainerDragging` | drop, drag end, blur | `Idle` |
//!
//! Wheel zoom is modeless except during a cross-container drag, where it is ignored.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::camera::{Camera, Point};
use crate::consts::{MAX_VERTICES, MIN_VERTICES, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::doc::{Container, ContainerKind, Polygon, PolygonId};
use crate::grid::{self, AxisOverlay};
use crate::hit;
use crate::input::{Button, DragPayload, InputState, Modifiers, WheelDelta};
use crate::transfer::{self, Placement};

/// Effects returned from input handlers for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// The camera changed: re-apply the canvas transform and redraw the axes.
    ViewChanged,
    /// A canvas polygon moved: update its placement only.
    PolygonMoved { id: PolygonId, x: f64, y: f64 },
    /// A canvas polygon started following the pointer.
    ObjectDragStarted { id: PolygonId },
    /// A canvas polygon stopped following the pointer.
    ObjectDragEnded { id: PolygonId },
    /// A polygon left `from` and now lives in `to`.
    PolygonTransferred { id: PolygonId, from: ContainerKind, to: ContainerKind },
    /// Change the work-zone cursor.
    SetCursor { cursor: &'static str },
}

/// Core engine state: everything that doesn't depend on the browser.
pub struct EngineCore {
    pub buffer: Container,
    pub canvas: Container,
    pub camera: Camera,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_containers(Container::new(ContainerKind::Buffer), Container::new(ContainerKind::Canvas))
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine around existing containers.
    #[must_use]
    pub fn with_containers(buffer: Container, canvas: Container) -> Self {
        Self {
            buffer,
            canvas,
            camera: Camera::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    // --- Data inputs ---

    /// Replace both containers' contents.
    ///
    /// Records with a vertex count outside 3..=10 are skipped, as is any
    /// canvas record whose id is already in the buffer: a polygon lives in
    /// exactly one container.
    pub fn load(&mut self, buffer: Vec<Polygon>, canvas: Vec<Polygon>) {
        let buffer: Vec<Polygon> = buffer.into_iter().filter(|p| has_valid_shape(p, ContainerKind::Buffer)).collect();
        let buffer_ids: HashSet<PolygonId> = buffer.iter().map(|p| p.id.clone()).collect();
        let canvas: Vec<Polygon> = canvas
            .into_iter()
            .filter(|p| has_valid_shape(p, ContainerKind::Canvas))
            .filter(|p| {
                let duplicate = buffer_ids.contains(&p.id);
                if duplicate {
                    warn!(id = %p.id, "load skipped canvas polygon: id already in buffer");
                }
                !duplicate
            })
            .collect();
        self.buffer.load(buffer);
        self.canvas.load(canvas);
        self.reset_input();
    }

    /// Append freshly generated polygons to the buffer tray.
    pub fn add_to_buffer(&mut self, polygons: Vec<Polygon>) {
        self.buffer.extend(polygons);
    }

    /// Empty both containers.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.canvas.clear();
        self.reset_input();
    }

    // --- Viewport ---

    /// Update the work-zone size in screen pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
        vec![Action::ViewChanged]
    }

    // --- Pointer gestures ---

    /// Primary press on the canvas starts an object drag or a pan.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }

        // Polygons are tested before the background so a press on one never pans.
        if !modifiers.forces_pan() {
            let world = self.camera.screen_to_world(screen_pt);
            if let Some(id) = hit::hit_test(world, &self.canvas) {
                if let Some(poly) = self.canvas.get(&id) {
                    let orig = poly.position();
                    self.transition(InputState::ObjectDragging { id: id.clone(), start_world: world, orig });
                    return vec![Action::ObjectDragStarted { id }, Action::SetCursor { cursor: "grabbing" }];
                }
            }
        }

        self.transition(InputState::Panning { last_screen: screen_pt });
        vec![Action::SetCursor { cursor: "grabbing" }]
    }

    /// Continue the active pointer gesture.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match &mut self.input {
            InputState::Panning { last_screen } => {
                let (dx, dy) = (screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                self.camera.pan_by(dx, dy);
                vec![Action::ViewChanged]
            }
            InputState::ObjectDragging { id, start_world, orig } => {
                let world = self.camera.screen_to_world(screen_pt);
                let pos = Point::new(orig.x + (world.x - start_world.x), orig.y + (world.y - start_world.y));
                let id = id.clone();
                let Some(poly) = self.canvas.get_mut(&id) else {
                    self.reset_input();
                    return Vec::new();
                };
                poly.set_position(pos);
                vec![Action::PolygonMoved { id, x: pos.x, y: pos.y }]
            }
            InputState::Idle | InputState::CrossContainerDragging { .. } => Vec::new(),
        }
    }

    /// Release ends a pan or object drag. The dragged polygon keeps its position.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_pointer_session()
    }

    /// The host lost the pointer without a release.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.end_pointer_session()
    }

    /// The window lost focus: drop whatever gesture is in progress.
    pub fn on_blur(&mut self) -> Vec<Action> {
        let actions = self.end_pointer_session();
        if matches!(self.input, InputState::CrossContainerDragging { .. }) {
            self.transition(InputState::Idle);
        }
        actions
    }

    /// Wheel zooms around the cursor: down zooms out, anything else zooms in.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        if matches!(self.input, InputState::CrossContainerDragging { .. }) {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { ZOOM_OUT_FACTOR } else { ZOOM_IN_FACTOR };
        self.camera.zoom_at(screen_pt, factor);
        vec![Action::ViewChanged]
    }

    // --- Native drag and drop ---

    /// A native drag picked up polygon `id` from `origin`.
    ///
    /// Supersedes an object drag in progress: that polygon snaps back to where
    /// the object drag started. Refused while panning or for unknown ids.
    pub fn on_drag_start(&mut self, origin: ContainerKind, id: &PolygonId) -> Vec<Action> {
        if !self.container(origin).contains(id) {
            debug!(%id, %origin, "drag start ignored: unknown polygon");
            return Vec::new();
        }

        let mut actions = Vec::new();
        match &self.input {
            InputState::Idle => {}
            InputState::ObjectDragging { id: dragged, orig, .. } => {
                let (dragged, orig) = (dragged.clone(), *orig);
                if let Some(poly) = self.canvas.get_mut(&dragged) {
                    poly.set_position(orig);
                    actions.push(Action::PolygonMoved { id: dragged.clone(), x: orig.x, y: orig.y });
                }
                actions.push(Action::ObjectDragEnded { id: dragged });
                actions.push(Action::SetCursor { cursor: "default" });
            }
            InputState::Panning { .. } | InputState::CrossContainerDragging { .. } => {
                debug!(%id, state = self.input.name(), "drag start refused");
                return Vec::new();
            }
        }

        self.transition(InputState::CrossContainerDragging { payload: DragPayload::transfer(id.clone(), origin) });
        actions
    }

    /// The native drag finished without a drop being handled here.
    pub fn on_drag_end(&mut self) {
        if matches!(self.input, InputState::CrossContainerDragging { .. }) {
            self.transition(InputState::Idle);
        }
    }

    /// Whether `target` would accept `payload` (used for drag-over feedback).
    #[must_use]
    pub fn accepts_drop(&self, target: ContainerKind, payload: &DragPayload) -> bool {
        payload.accepted_by(target)
    }

    /// Drop `payload` onto `target` at `screen_pt` (work-zone pixels; ignored for the buffer).
    pub fn on_drop(&mut self, target: ContainerKind, screen_pt: Point, payload: &DragPayload) -> Vec<Action> {
        if !self.input.is_idle() {
            self.transition(InputState::Idle);
        }
        if !payload.accepted_by(target) {
            debug!(%target, "drop ignored: same container");
            return Vec::new();
        }

        let DragPayload::CrossContainerTransfer { polygon_id, origin } = payload;
        let placement = Placement::for_drop(target, &self.camera, screen_pt);
        let (source, dest) = match origin {
            ContainerKind::Buffer => (&mut self.buffer, &mut self.canvas),
            ContainerKind::Canvas => (&mut self.canvas, &mut self.buffer),
        };
        if transfer::transfer(source, dest, polygon_id, placement).is_none() {
            warn!(id = %polygon_id, %origin, "drop ignored: polygon not in origin container");
            return Vec::new();
        }
        vec![Action::PolygonTransferred { id: polygon_id.clone(), from: *origin, to: target }]
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The container of the given kind.
    #[must_use]
    pub fn container(&self, kind: ContainerKind) -> &Container {
        match kind {
            ContainerKind::Buffer => &self.buffer,
            ContainerKind::Canvas => &self.canvas,
        }
    }

    /// Payload of the native drag in progress, if any.
    #[must_use]
    pub fn drag_payload(&self) -> Option<&DragPayload> {
        match &self.input {
            InputState::CrossContainerDragging { payload } => Some(payload),
            _ => None,
        }
    }

    /// Axis ticks for the current camera and viewport.
    #[must_use]
    pub fn axis_overlay(&self) -> AxisOverlay {
        grid::axis_overlay(&self.camera, self.viewport_width, self.viewport_height)
    }

    // --- Internals ---

    fn end_pointer_session(&mut self) -> Vec<Action> {
        match &self.input {
            InputState::Panning { .. } => {
                self.transition(InputState::Idle);
                vec![Action::SetCursor { cursor: "default" }]
            }
            InputState::ObjectDragging { id, .. } => {
                let id = id.clone();
                self.transition(InputState::Idle);
                vec![Action::ObjectDragEnded { id }, Action::SetCursor { cursor: "default" }]
            }
            InputState::Idle | InputState::CrossContainerDragging { .. } => Vec::new(),
        }
    }

    fn reset_input(&mut self) {
        if !self.input.is_idle() {
            self.transition(InputState::Idle);
        }
    }

    fn transition(&mut self, next: InputState) {
        debug!(from = self.input.name(), to = next.name(), "input transition");
        self.input = next;
    }
}

fn has_valid_shape(polygon: &Polygon, kind: ContainerKind) -> bool {
    let count = polygon.points.len();
    let valid = (MIN_VERTICES..=MAX_VERTICES).contains(&count);
    if !valid {
        warn!(id = %polygon.id, container = %kind, vertices = count, "load skipped polygon: bad vertex count");
    }
    valid
}
