//! Shared numeric constants for the editor.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed canvas scale.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed canvas scale.
pub const MAX_ZOOM: f64 = 10.0;

/// Scale multiplier applied for one wheel notch towards the user (zoom in).
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale multiplier applied for one wheel notch away from the user (zoom out).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Grid / axes ─────────────────────────────────────────────────

/// Starting tick step in world units before adapting to the current scale.
pub const BASE_TICK_STEP: f64 = 50.0;

/// Minimum on-screen distance between neighbouring ticks, in pixels.
pub const MIN_TICK_SPACING_PX: f64 = 30.0;

/// Maximum on-screen distance between neighbouring ticks, in pixels.
pub const MAX_TICK_SPACING_PX: f64 = 100.0;

/// Length of a tick mark, in screen pixels.
pub const TICK_LENGTH_PX: f64 = 10.0;

/// Distance from the axis line to an x-axis label baseline, in screen pixels.
pub const X_LABEL_OFFSET_PX: f64 = 20.0;

/// Distance from the axis line to the start of a y-axis label, in screen pixels.
pub const Y_LABEL_OFFSET_PX: f64 = 15.0;

// ── Polygons ────────────────────────────────────────────────────

/// Side of the square tile a polygon is drawn in (buffer tray), in local units.
pub const TILE_SIZE: f64 = 120.0;

/// Fewest vertices a generated polygon may have.
pub const MIN_VERTICES: usize = 3;

/// Most vertices a generated polygon may have.
pub const MAX_VERTICES: usize = 10;

/// Fewest polygons produced by one "create" click.
pub const MIN_BATCH: usize = 5;

/// Most polygons produced by one "create" click.
pub const MAX_BATCH: usize = 20;

/// Fill colours a generated polygon picks from.
pub const PALETTE: [&str; 16] = [
    "#B91C1C", "#DC2626", "#EF4444", "#F87171", // reds
    "#7C2D12", "#EA580C", "#F97316", "#FB923C", // oranges
    "#065F46", "#059669", "#10B981", "#34D399", // greens
    "#1E3A8A", "#3B82F6", "#60A5FA", "#93C5FD", // blues
];

/// Outline colour shared by every polygon.
pub const STROKE_COLOR: &str = "#333";

// ── Persistence ─────────────────────────────────────────────────

/// Key under which the saved editor state lives in local storage.
pub const STORAGE_KEY: &str = "polygonEditorData";
