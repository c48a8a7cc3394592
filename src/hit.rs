#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{Container, Polygon, PolygonId};

/// Return the topmost polygon whose outline contains `world_pt`.
///
/// Later polygons are drawn over earlier ones, so the container is scanned
/// back to front.
#[must_use]
pub fn hit_test(world_pt: Point, container: &Container) -> Option<PolygonId> {
    container
        .polygons()
        .iter()
        .rev()
        .find(|p| contains_point(p, world_pt))
        .map(|p| p.id.clone())
}

/// Even-odd point-in-polygon test in world space.
#[must_use]
pub fn contains_point(polygon: &Polygon, world_pt: Point) -> bool {
    let pts: Vec<Point> = polygon.world_points().collect();
    if pts.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let (a, b) = (pts[i], pts[j]);
        if (a.y > world_pt.y) != (b.y > world_pt.y) {
            let cross_x = (b.x - a.x) * (world_pt.y - a.y) / (b.y - a.y) + a.x;
            if world_pt.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
