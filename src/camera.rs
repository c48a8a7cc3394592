#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Transform state of the work zone: a uniform scale followed by a translation.
///
/// `offset_x` / `offset_y` are in screen pixels.
/// `scale` is a zoom factor (1.0 = no zoom), always within [`MIN_ZOOM`, `MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl Camera {
    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Multiply the scale by `factor`, keeping the world point under `screen` fixed.
    ///
    /// The resulting scale is clamped to [`MIN_ZOOM`, `MAX_ZOOM`]. Once the clamp
    /// engages further zooming in that direction leaves the camera untouched.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new_scale / self.scale;
        self.offset_x = screen.x - (screen.x - self.offset_x) * ratio;
        self.offset_y = screen.y - (screen.y - self.offset_y) * ratio;
        self.scale = new_scale;
    }

    /// Translate the view by a screen-space delta. The canvas is unbounded.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }
}
