#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn make_polygon(id: &str) -> Polygon {
    Polygon {
        id: PolygonId::from(id),
        points: vec![Point::new(10.0, 10.0), Point::new(50.0, 10.0), Point::new(30.0, 40.0)],
        color: "#3B82F6".to_owned(),
        x: 0.0,
        y: 0.0,
    }
}

// =============================================================
// PolygonId
// =============================================================

#[test]
fn id_from_uuid_has_prefix_and_hex() {
    let id = PolygonId::from_uuid(Uuid::nil());
    assert_eq!(id.as_str(), "polygon_00000000000000000000000000000000");
}

#[test]
fn id_serializes_as_plain_string() {
    let id = PolygonId::from("polygon_1700000000000_abc123xyz");
    assert_eq!(serde_json::to_value(&id).unwrap(), json!("polygon_1700000000000_abc123xyz"));
}

#[test]
fn id_display_matches_inner() {
    assert_eq!(PolygonId::from("p1").to_string(), "p1");
}

// =============================================================
// Polygon
// =============================================================

#[test]
fn polygon_deserializes_from_stored_shape() {
    let raw = json!({
        "id": "polygon_1",
        "points": [{ "x": 1.0, "y": 2.0 }, { "x": 3.5, "y": 4.0 }, { "x": 0.0, "y": 9.9 }],
        "color": "#059669",
        "x": 12.5,
        "y": -7.0
    });
    let poly: Polygon = serde_json::from_value(raw).unwrap();
    assert_eq!(poly.id, PolygonId::from("polygon_1"));
    assert_eq!(poly.points.len(), 3);
    assert_eq!(poly.points[1], Point::new(3.5, 4.0));
    assert_eq!(poly.position(), Point::new(12.5, -7.0));
}

#[test]
fn polygon_world_points_apply_placement() {
    let mut poly = make_polygon("a");
    poly.set_position(Point::new(100.0, -20.0));
    let pts: Vec<Point> = poly.world_points().collect();
    assert_eq!(pts[0], Point::new(110.0, -10.0));
    assert_eq!(pts[2], Point::new(130.0, 20.0));
}

// =============================================================
// ContainerKind
// =============================================================

#[test]
fn container_kind_opposite() {
    assert_eq!(ContainerKind::Buffer.opposite(), ContainerKind::Canvas);
    assert_eq!(ContainerKind::Canvas.opposite(), ContainerKind::Buffer);
}

#[test]
fn container_kind_serde() {
    assert_eq!(serde_json::to_value(ContainerKind::Buffer).unwrap(), json!("buffer"));
    let back: ContainerKind = serde_json::from_value(json!("canvas")).unwrap();
    assert_eq!(back, ContainerKind::Canvas);
}

// =============================================================
// Container
// =============================================================

#[test]
fn container_new_is_empty() {
    let c = Container::new(ContainerKind::Buffer);
    assert!(c.is_empty());
    assert_eq!(c.len(), 0);
    assert_eq!(c.kind(), ContainerKind::Buffer);
}

#[test]
fn container_insert_preserves_order() {
    let mut c = Container::new(ContainerKind::Canvas);
    c.insert(make_polygon("a"));
    c.insert(make_polygon("b"));
    c.insert(make_polygon("c"));
    let ids: Vec<&str> = c.polygons().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn container_insert_same_id_replaces_in_place() {
    let mut c = Container::new(ContainerKind::Canvas);
    c.insert(make_polygon("a"));
    c.insert(make_polygon("b"));
    let mut moved = make_polygon("a");
    moved.x = 42.0;
    c.insert(moved);
    assert_eq!(c.len(), 2);
    assert_eq!(c.polygons()[0].x, 42.0);
}

#[test]
fn container_remove_returns_polygon() {
    let mut c = Container::new(ContainerKind::Buffer);
    c.insert(make_polygon("a"));
    c.insert(make_polygon("b"));
    let removed = c.remove(&PolygonId::from("a")).unwrap();
    assert_eq!(removed.id.as_str(), "a");
    assert_eq!(c.len(), 1);
    assert!(!c.contains(&PolygonId::from("a")));
}

#[test]
fn container_remove_unknown_is_none() {
    let mut c = Container::new(ContainerKind::Buffer);
    c.insert(make_polygon("a"));
    assert!(c.remove(&PolygonId::from("zzz")).is_none());
    assert_eq!(c.len(), 1);
}

#[test]
fn container_remove_twice_second_is_none() {
    let mut c = Container::new(ContainerKind::Buffer);
    c.insert(make_polygon("a"));
    assert!(c.remove(&PolygonId::from("a")).is_some());
    assert!(c.remove(&PolygonId::from("a")).is_none());
}

#[test]
fn container_get_mut_updates() {
    let mut c = Container::new(ContainerKind::Canvas);
    c.insert(make_polygon("a"));
    c.get_mut(&PolygonId::from("a")).unwrap().set_position(Point::new(5.0, 6.0));
    assert_eq!(c.get(&PolygonId::from("a")).unwrap().position(), Point::new(5.0, 6.0));
}

#[test]
fn container_load_replaces_contents() {
    let mut c = Container::new(ContainerKind::Canvas);
    c.insert(make_polygon("old"));
    c.load(vec![make_polygon("x"), make_polygon("y")]);
    assert_eq!(c.len(), 2);
    assert!(!c.contains(&PolygonId::from("old")));
    assert!(c.contains(&PolygonId::from("y")));
}

#[test]
fn container_clear_empties() {
    let mut c = Container::new(ContainerKind::Canvas);
    c.extend([make_polygon("a"), make_polygon("b")]);
    c.clear();
    assert!(c.is_empty());
}
