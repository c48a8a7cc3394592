//! Browser bindings: `localStorage` persistence and a `wasm_bindgen` editor handle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the DOM. It forwards raw pointer, wheel and native drag
//! events to [`WebEditor`], which runs them through the engine and hands back
//! the resulting actions as a JSON array for the page to apply. Drag payloads
//! cross the `dataTransfer` boundary as JSON as well.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::camera::Point;
use crate::doc::{ContainerKind, PolygonId};
use crate::input::{Button, DragPayload, Modifiers, WheelDelta};
use crate::persist::{KeyValueStore, StoreError};
use crate::render;

/// Install the panic hook and route log records to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        warn!("console logger already installed");
    }
}

/// [`KeyValueStore`] over `window.localStorage`.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Bind to the window's storage. Without one, every operation fails with
    /// [`StoreError::Unavailable`].
    #[must_use]
    pub fn new() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(storage)) => storage,
            Some(Err(e)) => {
                warn!(error = ?e, "localStorage unavailable");
                None
            }
            None => None,
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(backend_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(backend_error)
    }
}

/// Editor handle exported to the page.
#[wasm_bindgen]
pub struct WebEditor {
    app: App<LocalStorage>,
    rng: StdRng,
}

#[wasm_bindgen]
impl WebEditor {
    /// Open the editor, restoring any saved state.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { app: App::open(LocalStorage::new()), rng: StdRng::from_os_rng() }
    }

    // --- Viewport and pointer ---

    /// # Errors
    ///
    /// Returns `Err` if the actions can't be encoded.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        to_json(&self.app.engine_mut().set_viewport(width, height))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions can't be encoded.
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> Result<String, JsValue> {
        let modifiers = Modifiers { shift, ctrl, alt, meta };
        to_json(&self.app.engine_mut().on_pointer_down(Point::new(x, y), Button::from_dom(button), modifiers))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions can't be encoded.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.app.engine_mut().on_pointer_move(Point::new(x, y)))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions can't be encoded.
    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        to_json(&self.app.engine_mut().on_pointer_up())
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions can't be encoded.
    pub fn pointer_cancel(&mut self) -> Result<String, JsValue> {
        to_json(&self.app.engine_mut().on_pointer_cancel())
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions can't be encoded.
    pub fn blur(&mut self) -> Result<String, JsValue> {
        to_json(&self.app.engine_mut().on_blur())
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions can't be encoded.
    pub fn wheel(&mut self, x: f64, y: f64, dx: f64, dy: f64) -> Result<String, JsValue> {
        to_json(&self.app.engine_mut().on_wheel(Point::new(x, y), WheelDelta { dx, dy }))
    }

    // --- Native drag and drop ---

    /// Start dragging polygon `id` out of `origin` (`"buffer"` or `"canvas"`).
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown container name or if the actions can't be encoded.
    pub fn drag_start(&mut self, origin: &str, id: &str) -> Result<String, JsValue> {
        let origin = parse_kind(origin)?;
        to_json(&self.app.engine_mut().on_drag_start(origin, &PolygonId::from(id)))
    }

    /// The JSON payload for `dataTransfer`, if a cross-container drag is active.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the payload can't be encoded.
    pub fn drag_payload(&self) -> Result<Option<String>, JsValue> {
        self.app.engine().drag_payload().map(to_json).transpose()
    }

    pub fn drag_end(&mut self) {
        self.app.engine_mut().on_drag_end();
    }

    /// Whether `target` would accept the JSON `payload` (drag-over feedback).
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown container name or a malformed payload.
    pub fn accepts_drop(&self, target: &str, payload: &str) -> Result<bool, JsValue> {
        Ok(self.app.engine().accepts_drop(parse_kind(target)?, &parse_payload(payload)?))
    }

    /// Drop the JSON `payload` onto `target` at work-zone pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown container name, a malformed payload, or
    /// if the actions can't be encoded.
    pub fn drop_at(&mut self, target: &str, x: f64, y: f64, payload: &str) -> Result<String, JsValue> {
        let target = parse_kind(target)?;
        let payload = parse_payload(payload)?;
        to_json(&self.app.engine_mut().on_drop(target, Point::new(x, y), &payload))
    }

    // --- Toolbar actions ---

    /// Add a random batch of polygons to the buffer tray. Returns the batch size.
    pub fn create_random(&mut self) -> usize {
        self.app.create_random(&mut self.rng)
    }

    /// # Errors
    ///
    /// Returns `Err` if the state can't be written to `localStorage`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn save(&mut self) -> Result<(), JsValue> {
        let now_ms = js_sys::Date::now() as i64;
        self.app.save(now_ms).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `Err` if the saved state can't be deleted. The containers are cleared regardless.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.app.reset().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // --- Rendering ---

    /// Current canvas transform as a `transform` attribute value.
    #[must_use]
    pub fn transform(&self) -> String {
        render::transform_attr(&self.app.engine().camera())
    }

    /// The whole work zone as SVG markup.
    #[must_use]
    pub fn work_zone_svg(&self) -> String {
        let engine = self.app.engine();
        render::work_zone(
            engine.canvas.polygons(),
            &engine.camera(),
            &engine.axis_overlay(),
            engine.viewport_width,
            engine.viewport_height,
        )
    }

    /// One tile per buffer polygon, in tray order, as a JSON array of SVG strings.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list can't be encoded.
    pub fn buffer_tiles(&self) -> Result<String, JsValue> {
        let tiles: Vec<String> = self.app.engine().buffer.polygons().iter().map(render::buffer_tile).collect();
        to_json(&tiles)
    }
}

impl Default for WebEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_kind(raw: &str) -> Result<ContainerKind, JsValue> {
    match raw {
        "buffer" => Ok(ContainerKind::Buffer),
        "canvas" => Ok(ContainerKind::Canvas),
        other => Err(JsValue::from_str(&format!("unknown container: {other}"))),
    }
}

fn parse_payload(raw: &str) -> Result<DragPayload, JsValue> {
    serde_json::from_str(raw).map_err(|e| JsValue::from_str(&format!("bad drag payload: {e}")))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn backend_error(e: JsValue) -> StoreError {
    StoreError::Backend(format!("{e:?}"))
}
