//! Axis ticks and labels for the work zone.
//!
//! The overlay is recomputed from scratch from the camera and viewport on
//! every transform change. It never accumulates: each call returns a complete
//! replacement for whatever the host drew last time.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::Camera;
use crate::consts::{
    BASE_TICK_STEP, MAX_TICK_SPACING_PX, MIN_TICK_SPACING_PX, TICK_LENGTH_PX, X_LABEL_OFFSET_PX, Y_LABEL_OFFSET_PX,
};

/// Which axis a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// How a label is anchored relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Horizontally centred on the tick (x axis).
    Middle,
    /// Left edge at the position, vertically centred (y axis).
    Start,
}

/// A short line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A numeric label in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: LabelAnchor,
}

/// One tick on an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub axis: Axis,
    /// World value the tick marks.
    pub value: f64,
    /// Screen position along the axis.
    pub pos: f64,
    pub mark: Segment,
    /// `None` for the zero tick.
    pub label: Option<Label>,
}

/// Every tick visible for a given camera and viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisOverlay {
    /// World distance between neighbouring ticks.
    pub step: f64,
    pub ticks: Vec<Tick>,
}

/// Pick a tick step whose on-screen spacing falls in
/// [`MIN_TICK_SPACING_PX`, `MAX_TICK_SPACING_PX`] at `scale`.
#[must_use]
pub fn tick_step(scale: f64) -> f64 {
    if !scale.is_finite() || scale <= 0.0 {
        return BASE_TICK_STEP;
    }
    let mut step = BASE_TICK_STEP;
    while step * scale < MIN_TICK_SPACING_PX {
        step *= 2.0;
    }
    while step * scale > MAX_TICK_SPACING_PX {
        step /= 2.0;
    }
    step
}

/// Compute the axis overlay for the viewport `width` × `height` (screen pixels).
#[must_use]
pub fn axis_overlay(camera: &Camera, width: f64, height: f64) -> AxisOverlay {
    let step = tick_step(camera.scale);
    let mut ticks = axis_ticks(Axis::X, camera, width, height, step);
    ticks.extend(axis_ticks(Axis::Y, camera, width, height, step));
    AxisOverlay { step, ticks }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn axis_ticks(axis: Axis, camera: &Camera, width: f64, height: f64, step: f64) -> Vec<Tick> {
    let (size, offset) = match axis {
        Axis::X => (width, camera.offset_x),
        Axis::Y => (height, camera.offset_y),
    };
    let spacing = step * camera.scale;
    if size <= 0.0 || !spacing.is_finite() || spacing <= 0.0 {
        return Vec::new();
    }

    // Integer multiples of `step` keep values exact no matter how far the view is panned.
    let first = (-offset / spacing).floor() as i64;
    let last = ((size - offset) / spacing).ceil() as i64;

    (first..=last)
        .filter_map(|k| {
            let value = k as f64 * step;
            let pos = value * camera.scale + offset;
            if !(0.0..=size).contains(&pos) {
                return None;
            }
            let label = (k != 0).then(|| place_label(axis, camera, width, height, pos, value));
            Some(Tick { axis, value, pos, mark: place_mark(axis, camera, width, height, pos), label })
        })
        .collect()
}

fn place_mark(axis: Axis, camera: &Camera, width: f64, height: f64, pos: f64) -> Segment {
    match axis {
        Axis::X => Segment {
            x1: pos,
            y1: clamp_soft(camera.offset_y, 0.0, height),
            x2: pos,
            y2: clamp_soft(camera.offset_y + TICK_LENGTH_PX, 0.0, height),
        },
        Axis::Y => Segment {
            x1: clamp_soft(camera.offset_x, 0.0, width),
            y1: pos,
            x2: clamp_soft(camera.offset_x + TICK_LENGTH_PX, 0.0, width),
            y2: pos,
        },
    }
}

fn place_label(axis: Axis, camera: &Camera, width: f64, height: f64, pos: f64, value: f64) -> Label {
    // `Display` for f64 prints `50`, `-100`, `6.25`.
    let text = format!("{value}");
    match axis {
        Axis::X => Label {
            x: pos,
            y: clamp_soft(camera.offset_y + X_LABEL_OFFSET_PX, X_LABEL_OFFSET_PX, height - 5.0),
            text,
            anchor: LabelAnchor::Middle,
        },
        Axis::Y => Label {
            x: clamp_soft(camera.offset_x + Y_LABEL_OFFSET_PX, Y_LABEL_OFFSET_PX, width - 30.0),
            y: pos,
            text,
            anchor: LabelAnchor::Start,
        },
    }
}

/// `max(lo, min(hi, v))`: unlike `f64::clamp` it tolerates `lo > hi` on tiny viewports.
fn clamp_soft(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}
