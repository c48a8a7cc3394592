//! Editor application: the engine plus the user-facing actions around it.
//!
//! `App` pairs an [`EngineCore`] with a [`KeyValueStore`] and implements the
//! toolbar actions: create a batch of random polygons, save, load and reset.
//! Gesture handling goes straight to the engine via [`App::engine_mut`].

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use rand::Rng;
use tracing::info;

use crate::consts::{MAX_BATCH, MIN_BATCH, STORAGE_KEY};
use crate::engine::EngineCore;
use crate::generator;
use crate::persist::{self, KeyValueStore, PersistError, SavedState};

pub struct App<S: KeyValueStore> {
    engine: EngineCore,
    store: S,
}

impl<S: KeyValueStore> App<S> {
    /// An empty editor backed by `store`. Nothing is read yet.
    pub fn new(store: S) -> Self {
        Self { engine: EngineCore::new(), store }
    }

    /// An editor backed by `store`, restored from whatever it has saved.
    pub fn open(store: S) -> Self {
        let mut app = Self::new(store);
        app.load();
        app
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineCore {
        &mut self.engine
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate `count` polygons into the buffer tray. Returns how many were added.
    pub fn create<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        let polygons = generator::generate(count, rng);
        let added = polygons.len();
        self.engine.add_to_buffer(polygons);
        info!(count = added, buffer = self.engine.buffer.len(), "polygons created");
        added
    }

    /// Generate a random-sized batch (5 to 20) into the buffer tray.
    pub fn create_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let count = rng.random_range(MIN_BATCH..=MAX_BATCH);
        self.create(count, rng)
    }

    /// Both containers' current contents, stamped with `now_ms`.
    #[must_use]
    pub fn snapshot(&self, now_ms: i64) -> SavedState {
        SavedState {
            buffer: self.engine.buffer.polygons().to_vec(),
            work: self.engine.canvas.polygons().to_vec(),
            timestamp: now_ms,
        }
    }

    /// Persist both containers.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the state can't be encoded or written.
    pub fn save(&mut self, now_ms: i64) -> Result<(), PersistError> {
        let state = self.snapshot(now_ms);
        persist::save(&mut self.store, STORAGE_KEY, &state)
    }

    /// Replace both containers with the saved state, if there is a readable one.
    ///
    /// Returns whether anything was restored. Missing or unreadable data
    /// leaves the containers untouched.
    pub fn load(&mut self) -> bool {
        let Some(state) = persist::load(&self.store, STORAGE_KEY) else {
            return false;
        };
        self.engine.load(state.buffer, state.work);
        true
    }

    /// Empty both containers and delete the saved state.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the store rejects the delete. The
    /// containers are cleared either way.
    pub fn reset(&mut self) -> Result<(), PersistError> {
        self.engine.clear();
        persist::reset(&mut self.store, STORAGE_KEY)?;
        info!("editor reset");
        Ok(())
    }
}
