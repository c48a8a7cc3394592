//! Document model: polygons and the two containers that own them.
//!
//! A `Polygon` is created by the generator and from then on lives in exactly
//! one `Container` at a time: the untransformed buffer tray or the pannable,
//! zoomable work zone. Containers keep insertion order, which doubles as draw
//! order (later polygons are drawn on top and win hit tests).
//!
//! Data flows into this layer from the generator, from persisted JSON, and
//! from the interaction engine (position updates and transfers).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a polygon.
///
/// Freshly generated ids look like `polygon_<32 hex digits>`; ids loaded from
/// storage are kept verbatim whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(pub String);

impl PolygonId {
    /// Build an id from a UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("polygon_{}", uuid.simple()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolygonId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A polygon as stored in a container and in persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Unique identifier for this polygon.
    pub id: PolygonId,
    /// Vertices in the polygon's local frame, in drawing order.
    pub points: Vec<Point>,
    /// Fill color as a CSS color string.
    pub color: String,
    /// Placement offset in world space (work zone); `0` while in the buffer.
    pub x: f64,
    /// Placement offset in world space (work zone); `0` while in the buffer.
    pub y: f64,
}

impl Polygon {
    /// Placement offset as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move the polygon so its local origin sits at `pos`.
    pub fn set_position(&mut self, pos: Point) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Vertices translated by the placement offset.
    pub fn world_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|p| Point::new(p.x + self.x, p.y + self.y))
    }
}

/// Which container a polygon lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// The tray of not-yet-placed polygons. Has no coordinate transform.
    Buffer,
    /// The pannable, zoomable work zone.
    Canvas,
}

impl ContainerKind {
    /// The other container.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buffer => Self::Canvas,
            Self::Canvas => Self::Buffer,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer => f.write_str("buffer"),
            Self::Canvas => f.write_str("canvas"),
        }
    }
}

/// Ordered collection of polygons owned by the buffer tray or the canvas.
#[derive(Debug, Clone)]
pub struct Container {
    kind: ContainerKind,
    polygons: Vec<Polygon>,
}

impl Container {
    /// Create an empty container.
    #[must_use]
    pub fn new(kind: ContainerKind) -> Self {
        Self { kind, polygons: Vec::new() }
    }

    /// Which side this container is.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Append a polygon. A polygon with the same `id` is replaced in place.
    pub fn insert(&mut self, polygon: Polygon) {
        match self.polygons.iter_mut().find(|p| p.id == polygon.id) {
            Some(existing) => *existing = polygon,
            None => self.polygons.push(polygon),
        }
    }

    /// Append every polygon in order.
    pub fn extend(&mut self, polygons: impl IntoIterator<Item = Polygon>) {
        for polygon in polygons {
            self.insert(polygon);
        }
    }

    /// Remove a polygon by id, returning it if it was present.
    pub fn remove(&mut self, id: &PolygonId) -> Option<Polygon> {
        let index = self.polygons.iter().position(|p| &p.id == id)?;
        Some(self.polygons.remove(index))
    }

    /// Return a reference to a polygon by id.
    #[must_use]
    pub fn get(&self, id: &PolygonId) -> Option<&Polygon> {
        self.polygons.iter().find(|p| &p.id == id)
    }

    /// Return a mutable reference to a polygon by id.
    pub fn get_mut(&mut self, id: &PolygonId) -> Option<&mut Polygon> {
        self.polygons.iter_mut().find(|p| &p.id == id)
    }

    /// Whether a polygon with this id is present.
    #[must_use]
    pub fn contains(&self, id: &PolygonId) -> bool {
        self.get(id).is_some()
    }

    /// Polygons in insertion (draw) order.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Replace all polygons with a snapshot.
    pub fn load(&mut self, polygons: Vec<Polygon>) {
        self.polygons.clear();
        self.extend(polygons);
    }

    /// Drop every polygon.
    pub fn clear(&mut self) {
        self.polygons.clear();
    }

    /// Number of polygons currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Returns `true` if the container holds no polygons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
