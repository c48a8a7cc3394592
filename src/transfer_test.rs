#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::Polygon;

fn make_polygon(id: &str) -> Polygon {
    Polygon {
        id: PolygonId::from(id),
        points: vec![Point::new(10.0, 10.0), Point::new(60.0, 15.0), Point::new(35.0, 70.0)],
        color: "#EA580C".to_owned(),
        x: 0.0,
        y: 0.0,
    }
}

fn containers() -> (Container, Container) {
    (Container::new(ContainerKind::Buffer), Container::new(ContainerKind::Canvas))
}

// =============================================================
// Placement::for_drop
// =============================================================

#[test]
fn buffer_drop_is_unplaced() {
    let cam = Camera { scale: 3.0, offset_x: 50.0, offset_y: 50.0 };
    assert_eq!(Placement::for_drop(ContainerKind::Buffer, &cam, Point::new(200.0, 200.0)), Placement::Unplaced);
}

#[test]
fn canvas_drop_centres_tile_under_cursor() {
    let cam = Camera::default();
    assert_eq!(
        Placement::for_drop(ContainerKind::Canvas, &cam, Point::new(200.0, 100.0)),
        Placement::At(Point::new(140.0, 40.0))
    );
}

#[test]
fn canvas_drop_uses_world_coordinates() {
    let cam = Camera { scale: 2.0, offset_x: 100.0, offset_y: -40.0 };
    // world = ((300 - 100) / 2, (160 + 40) / 2) = (100, 100)
    assert_eq!(
        Placement::for_drop(ContainerKind::Canvas, &cam, Point::new(300.0, 160.0)),
        Placement::At(Point::new(40.0, 40.0))
    );
}

// =============================================================
// transfer
// =============================================================

#[test]
fn transfer_moves_membership() {
    let (mut buffer, mut canvas) = containers();
    buffer.insert(make_polygon("a"));
    let id = PolygonId::from("a");
    let pos = transfer(&mut buffer, &mut canvas, &id, Placement::At(Point::new(5.0, 7.0)));
    assert_eq!(pos, Some(Point::new(5.0, 7.0)));
    assert!(!buffer.contains(&id));
    assert_eq!(canvas.get(&id).unwrap().position(), Point::new(5.0, 7.0));
}

#[test]
fn transfer_unknown_id_is_noop() {
    let (mut buffer, mut canvas) = containers();
    buffer.insert(make_polygon("a"));
    let pos = transfer(&mut buffer, &mut canvas, &PolygonId::from("ghost"), Placement::At(Point::new(1.0, 1.0)));
    assert!(pos.is_none());
    assert_eq!(buffer.len(), 1);
    assert!(canvas.is_empty());
}

#[test]
fn transfer_stale_second_drop_is_noop() {
    let (mut buffer, mut canvas) = containers();
    buffer.insert(make_polygon("a"));
    let id = PolygonId::from("a");
    assert!(transfer(&mut buffer, &mut canvas, &id, Placement::At(Point::new(1.0, 2.0))).is_some());
    assert!(transfer(&mut buffer, &mut canvas, &id, Placement::At(Point::new(9.0, 9.0))).is_none());
    assert_eq!(canvas.len(), 1);
    assert_eq!(canvas.get(&id).unwrap().position(), Point::new(1.0, 2.0));
}

#[test]
fn transfer_to_buffer_resets_placement() {
    let (mut buffer, mut canvas) = containers();
    let mut poly = make_polygon("a");
    poly.set_position(Point::new(300.0, -12.0));
    canvas.insert(poly);
    let id = PolygonId::from("a");
    transfer(&mut canvas, &mut buffer, &id, Placement::Unplaced);
    assert_eq!(buffer.get(&id).unwrap().position(), Point::new(0.0, 0.0));
}

#[test]
fn transfer_round_trip_preserves_identity_and_shape() {
    let (mut buffer, mut canvas) = containers();
    let original = make_polygon("a");
    buffer.insert(original.clone());
    let id = original.id.clone();

    transfer(&mut buffer, &mut canvas, &id, Placement::At(Point::new(80.0, 90.0)));
    transfer(&mut canvas, &mut buffer, &id, Placement::Unplaced);

    assert!(canvas.is_empty());
    let back = buffer.get(&id).unwrap();
    assert_eq!(back.id, original.id);
    assert_eq!(back.points, original.points);
    assert_eq!(back.color, original.color);
}

#[test]
fn transfer_appends_to_destination_order() {
    let (mut buffer, mut canvas) = containers();
    canvas.insert(make_polygon("existing"));
    buffer.insert(make_polygon("new"));
    transfer(&mut buffer, &mut canvas, &PolygonId::from("new"), Placement::At(Point::new(0.0, 0.0)));
    let ids: Vec<&str> = canvas.polygons().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["existing", "new"]);
}
