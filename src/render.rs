//! Rendering: SVG attribute and markup strings for the view layer.
//!
//! This module is the only place that knows what the host draws with. It
//! receives read-only views of polygons, camera state and the axis overlay
//! and produces strings; it never mutates application state.
//!
//! The work zone is layered as: axis marks, then the transformed polygon
//! group, then axis labels on top.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Point};
use crate::consts::{STROKE_COLOR, TILE_SIZE};
use crate::doc::Polygon;
use crate::grid::{AxisOverlay, LabelAnchor};

/// Axis mark and label colour.
const AXIS_COLOR: &str = "#aaa";

/// Axis label font size in pixels.
const LABEL_FONT_SIZE: u32 = 12;

/// The canvas transform as an SVG/CSS `transform` value.
#[must_use]
pub fn transform_attr(camera: &Camera) -> String {
    format!("translate({}, {}) scale({})", camera.offset_x, camera.offset_y, camera.scale)
}

/// A polygon's placement as an SVG `transform` value.
#[must_use]
pub fn placement_attr(placement: Point) -> String {
    format!("translate({}, {})", placement.x, placement.y)
}

/// Vertices as an SVG `points` value: `x,y x,y ...`.
#[must_use]
pub fn points_attr(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 10);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{},{}", p.x, p.y));
    }
    out
}

/// The `<polygon>` element for a polygon's shape, without placement.
#[must_use]
pub fn polygon_shape(polygon: &Polygon) -> String {
    format!(
        r#"<polygon points="{}" fill="{}" stroke="{STROKE_COLOR}" stroke-width="1"/>"#,
        points_attr(&polygon.points),
        escape_attr(&polygon.color),
    )
}

/// A canvas polygon: a group anchored at `placement` wrapping the shape.
#[must_use]
pub fn canvas_polygon(polygon: &Polygon, placement: Point) -> String {
    format!(
        r#"<g class="polygon" data-polygon-id="{}" transform="{}">{}</g>"#,
        escape_attr(polygon.id.as_str()),
        placement_attr(placement),
        polygon_shape(polygon),
    )
}

/// A buffer-tray tile: a standalone, untransformed SVG showing the shape.
#[must_use]
pub fn buffer_tile(polygon: &Polygon) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{TILE_SIZE}" height="{TILE_SIZE}" viewBox="0 0 {TILE_SIZE} {TILE_SIZE}" data-polygon-id="{}">{}</svg>"#,
        escape_attr(polygon.id.as_str()),
        polygon_shape(polygon),
    )
}

/// Axis tick marks (drawn beneath the polygons).
#[must_use]
pub fn axis_marks(overlay: &AxisOverlay) -> String {
    let mut out = String::new();
    for tick in &overlay.ticks {
        let m = tick.mark;
        out.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#,
            m.x1, m.y1, m.x2, m.y2
        ));
    }
    out
}

/// Axis labels (drawn above the polygons).
#[must_use]
pub fn axis_labels(overlay: &AxisOverlay) -> String {
    let mut out = String::new();
    for label in overlay.ticks.iter().filter_map(|t| t.label.as_ref()) {
        let anchor = match label.anchor {
            LabelAnchor::Middle => r#"text-anchor="middle""#,
            LabelAnchor::Start => r#"text-anchor="start" dominant-baseline="middle""#,
        };
        out.push_str(&format!(
            r#"<text x="{}" y="{}" fill="{AXIS_COLOR}" font-size="{LABEL_FONT_SIZE}" font-family="Arial" {anchor}>{}</text>"#,
            label.x, label.y, label.text
        ));
    }
    out
}

/// The complete work zone as one SVG document.
#[must_use]
pub fn work_zone(polygons: &[Polygon], camera: &Camera, overlay: &AxisOverlay, width: f64, height: f64) -> String {
    let mut body = String::new();
    for polygon in polygons {
        body.push_str(&canvas_polygon(polygon, polygon.position()));
    }
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            r#"<g class="axes-group">{marks}</g>"#,
            r#"<g class="polygons-group" transform="{transform}">{body}</g>"#,
            r#"<g class="labels-group">{labels}</g>"#,
            "</svg>",
        ),
        w = width,
        h = height,
        marks = axis_marks(overlay),
        transform = transform_attr(camera),
        body = body,
        labels = axis_labels(overlay),
    )
}

fn escape_attr(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}
