//! Moving a polygon record between the buffer tray and the canvas.
//!
//! A transfer is a single synchronous remove-then-insert, so the host never
//! observes a state where the polygon is in neither container or in both.

#[cfg(test)]
#[path = "transfer_test.rs"]
mod transfer_test;

use tracing::debug;

use crate::camera::{Camera, Point};
use crate::consts::TILE_SIZE;
use crate::doc::{Container, ContainerKind, PolygonId};

/// Where a transferred polygon ends up in its new container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Buffer tray: no coordinate transform, placement is reset.
    Unplaced,
    /// Canvas: local origin at this world position.
    At(Point),
}

impl Placement {
    /// Placement for a drop at `screen` onto a container of kind `target`.
    ///
    /// Canvas drops are converted to world space and shifted by half a tile so
    /// the polygon's tile is centred under the cursor.
    #[must_use]
    pub fn for_drop(target: ContainerKind, camera: &Camera, screen: Point) -> Self {
        match target {
            ContainerKind::Buffer => Self::Unplaced,
            ContainerKind::Canvas => {
                let world = camera.screen_to_world(screen);
                let half = TILE_SIZE / 2.0;
                Self::At(Point::new(world.x - half, world.y - half))
            }
        }
    }

    fn position(self) -> Point {
        match self {
            Self::Unplaced => Point::default(),
            Self::At(p) => p,
        }
    }
}

/// Move polygon `id` from `source` into `dest` at `placement`.
///
/// Returns the new placement, or `None` (and leaves both containers
/// untouched) when `source` has no such polygon.
pub fn transfer(source: &mut Container, dest: &mut Container, id: &PolygonId, placement: Placement) -> Option<Point> {
    let Some(mut polygon) = source.remove(id) else {
        debug!(%id, from = %source.kind(), "transfer ignored: unknown polygon");
        return None;
    };
    let pos = placement.position();
    polygon.set_position(pos);
    dest.insert(polygon);
    debug!(%id, from = %source.kind(), to = %dest.kind(), x = pos.x, y = pos.y, "polygon transferred");
    Some(pos)
}
