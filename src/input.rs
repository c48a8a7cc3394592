//! Input model: modifier keys, mouse buttons, drag payloads, and the gesture state machine.
//!
//! This module defines the types consumed by the interaction engine.
//! `Modifiers` and `Button` capture what the user held at the time of a
//! pointer event. `DragPayload` is what a native drag carries between the two
//! containers. `InputState` is the single active gesture, carrying the
//! context needed to compute deltas until the gesture ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{ContainerKind, PolygonId};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the held keys force a pan even over a polygon.
    #[must_use]
    pub fn forces_pan(self) -> bool {
        self.ctrl
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, away from the user).
    pub dy: f64,
}

/// Data carried by a native drag gesture from one container to the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragPayload {
    /// Move a polygon out of `origin` into the drop target.
    CrossContainerTransfer {
        polygon_id: PolygonId,
        origin: ContainerKind,
    },
}

impl DragPayload {
    /// Build a transfer payload.
    #[must_use]
    pub fn transfer(polygon_id: PolygonId, origin: ContainerKind) -> Self {
        Self::CrossContainerTransfer { polygon_id, origin }
    }

    /// Whether a container of kind `target` should accept this payload.
    #[must_use]
    pub fn accepted_by(&self, target: ContainerKind) -> bool {
        match self {
            Self::CrossContainerTransfer { origin, .. } => origin.opposite() == target,
        }
    }
}

/// The active gesture. At most one is in progress at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down or drag start.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is moving a canvas polygon with the pointer.
    ObjectDragging {
        /// Id of the polygon being dragged.
        id: PolygonId,
        /// World-space position of the pointer when the drag started.
        start_world: Point,
        /// Polygon placement when the drag started.
        orig: Point,
    },
    /// A native drag is carrying a polygon between containers.
    CrossContainerDragging {
        /// What the drag carries.
        payload: DragPayload,
    },
}

impl InputState {
    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::ObjectDragging { .. } => "object_dragging",
            Self::CrossContainerDragging { .. } => "cross_container_dragging",
        }
    }
}
