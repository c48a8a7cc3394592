//! Polygon editor: a buffer tray of generated polygons and a pannable,
//! zoomable work zone they can be dragged onto.
//!
//! The library holds everything that isn't DOM glue: the camera transform,
//! polygon generation, the axis overlay, the gesture state machine,
//! cross-container transfer and persistence. It builds natively (tests and the
//! `polyzone` CLI) and, with the `hydrate` feature, as WebAssembly with a thin
//! `wasm_bindgen` handle the page drives.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Toolbar actions: create, save, load, reset |
//! | [`engine`] | Testable [`engine::EngineCore`] and its [`engine::Action`]s |
//! | [`camera`] | Pan/zoom transform and coordinate conversions |
//! | [`doc`] | Polygon records and the two containers |
//! | [`generator`] | Random polygon generation |
//! | [`grid`] | Axis tick step and tick placement |
//! | [`hit`] | Point-in-polygon hit testing |
//! | [`input`] | Input event types, drag payloads and the gesture state machine |
//! | [`transfer`] | Moving a polygon between containers |
//! | [`render`] | SVG markup for the view layer |
//! | [`persist`] | Saved-state format over a key-value store |
//! | [`consts`] | Shared numeric constants (zoom limits, tick spacing, tile size, etc.) |
//! | `web` | Browser bindings (`hydrate` feature only) |

pub mod app;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod generator;
pub mod grid;
pub mod hit;
pub mod input;
pub mod persist;
pub mod render;
pub mod transfer;
#[cfg(feature = "hydrate")]
pub mod web;
