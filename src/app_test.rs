use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use super::*;
use crate::camera::Point;
use crate::doc::{ContainerKind, PolygonId};
use crate::input::DragPayload;

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn buffer_ids<S: KeyValueStore>(app: &App<S>) -> Vec<PolygonId> {
    app.engine().buffer.polygons().iter().map(|p| p.id.clone()).collect()
}

// =============================================================
// create
// =============================================================

#[test]
fn create_appends_to_buffer_only() {
    let mut app = App::new(persist::MemoryStore::new());
    let mut rng = seeded(1);
    assert_eq!(app.create(3, &mut rng), 3);
    assert_eq!(app.create(2, &mut rng), 2);
    assert_eq!(app.engine().buffer.len(), 5);
    assert!(app.engine().canvas.is_empty());
    assert!(app.engine().buffer.polygons().iter().all(|p| p.position() == Point::default()));
}

#[test]
fn create_zero_is_noop() {
    let mut app = App::new(persist::MemoryStore::new());
    assert_eq!(app.create(0, &mut seeded(1)), 0);
    assert!(app.engine().buffer.is_empty());
}

#[test]
fn create_random_batch_in_range() {
    let mut rng = seeded(9);
    for _ in 0..50 {
        let mut app = App::new(persist::MemoryStore::new());
        let n = app.create_random(&mut rng);
        assert!((MIN_BATCH..=MAX_BATCH).contains(&n), "batch size {n}");
        assert_eq!(app.engine().buffer.len(), n);
    }
}

// =============================================================
// save / load
// =============================================================

#[test]
fn save_and_reload_two_buffer_polygons() {
    let mut app = App::new(persist::MemoryStore::new());
    app.create(2, &mut seeded(3));
    let before = buffer_ids(&app);
    app.save(1_000).unwrap();

    let reopened = App::open(app.store().clone());
    assert_eq!(buffer_ids(&reopened), before);
    assert!(reopened.engine().canvas.is_empty());
    assert_eq!(reopened.engine().buffer.polygons(), app.engine().buffer.polygons());
}

#[test]
fn save_includes_canvas_placements() {
    let mut app = App::new(persist::MemoryStore::new());
    app.create(1, &mut seeded(4));
    let id = app.engine().buffer.polygons()[0].id.clone();

    let engine = app.engine_mut();
    engine.on_drag_start(ContainerKind::Buffer, &id);
    let payload = DragPayload::transfer(id.clone(), ContainerKind::Buffer);
    engine.on_drop(ContainerKind::Canvas, Point::new(260.0, 160.0), &payload);
    app.save(2_000).unwrap();

    let state = app.snapshot(2_000);
    assert!(state.buffer.is_empty());
    assert_eq!(state.work.len(), 1);
    assert_eq!(state.work[0].position(), Point::new(200.0, 100.0));

    let reopened = App::open(app.store().clone());
    assert_eq!(reopened.engine().canvas.polygons(), app.engine().canvas.polygons());
}

#[test]
fn load_without_saved_state_leaves_containers() {
    let mut app = App::new(persist::MemoryStore::new());
    app.create(2, &mut seeded(5));
    assert!(!app.load());
    assert_eq!(app.engine().buffer.len(), 2);
}

#[test]
fn open_with_corrupt_data_starts_empty() {
    let mut store = persist::MemoryStore::new();
    store.set(STORAGE_KEY, "[1, 2").unwrap();
    let app = App::open(store);
    assert!(app.engine().buffer.is_empty());
    assert!(app.engine().canvas.is_empty());
}

#[test]
fn open_drops_saved_polygon_claimed_by_both_containers() {
    let tri = json!([{ "x": 0.0, "y": 0.0 }, { "x": 10.0, "y": 0.0 }, { "x": 5.0, "y": 8.0 }]);
    let saved = json!({
        "buffer": [{ "id": "a", "points": tri, "color": "#fff", "x": 0.0, "y": 0.0 }],
        "work": [
            { "id": "a", "points": tri, "color": "#000", "x": 40.0, "y": 40.0 },
            { "id": "flat", "points": [{ "x": 0.0, "y": 0.0 }], "color": "#000", "x": 0.0, "y": 0.0 },
        ],
        "timestamp": 1,
    });
    let mut store = persist::MemoryStore::new();
    store.set(STORAGE_KEY, &saved.to_string()).unwrap();

    let app = App::open(store);
    assert_eq!(buffer_ids(&app), vec![PolygonId::from("a")]);
    assert!(app.engine().canvas.is_empty());
}

#[test]
fn load_replaces_current_contents() {
    let mut app = App::new(persist::MemoryStore::new());
    app.create(2, &mut seeded(6));
    app.save(0).unwrap();
    app.create(5, &mut seeded(7));
    assert_eq!(app.engine().buffer.len(), 7);
    assert!(app.load());
    assert_eq!(app.engine().buffer.len(), 2);
}

// =============================================================
// reset
// =============================================================

#[test]
fn reset_clears_containers_and_storage() {
    let mut app = App::new(persist::MemoryStore::new());
    app.create(4, &mut seeded(8));
    app.save(0).unwrap();
    app.reset().unwrap();
    assert!(app.engine().buffer.is_empty());
    assert!(app.engine().canvas.is_empty());
    assert!(app.store().get(STORAGE_KEY).unwrap().is_none());
    assert!(!app.load());
}
