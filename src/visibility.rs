// src/visibility.rs
//
// Shown/hidden state of the overlay, persisted as a single string flag.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
};

use crate::config::consts::{STORE_DIR, VISIBILITY_CLOSED, VISIBILITY_KEY, VISIBILITY_OPEN};

/// Key/value persistence for small UI flags.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// One file per key under a directory.
#[derive(Clone, Debug)]
pub struct FileFlagStore {
    dir: PathBuf,
}

impl FileFlagStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    fn path_for(&self, key: &str) -> PathBuf { self.dir.join(key) }
}

impl Default for FileFlagStore {
    fn default() -> Self { Self::new(STORE_DIR) }
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        let text = fs::read_to_string(self.path_for(key)).ok()?;
        Some(text.trim().to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryFlagStore {
    values: HashMap<String, String>,
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> { self.values.get(key).cloned() }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(s!(key), s!(value));
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

pub struct VisibilityController<S: FlagStore> {
    store: S,
    state: Visibility,
}

impl<S: FlagStore> VisibilityController<S> {
    pub fn new(store: S) -> Self {
        Self { store, state: Visibility::Shown }
    }

    /// Shown unless the stored flag explicitly says closed.
    pub fn restore_state(&mut self) -> Visibility {
        self.state = match self.store.get(VISIBILITY_KEY).as_deref() {
            Some(VISIBILITY_CLOSED) => Visibility::Hidden,
            _ => Visibility::Shown,
        };
        logd!("Visibility: restored {:?}", self.state);
        self.state
    }

    pub fn show(&mut self) { self.set(Visibility::Shown); }

    pub fn hide(&mut self) { self.set(Visibility::Hidden); }

    fn set(&mut self, state: Visibility) {
        self.state = state;
        let value = match state {
            Visibility::Shown => VISIBILITY_OPEN,
            Visibility::Hidden => VISIBILITY_CLOSED,
        };
        if let Err(e) = self.store.set(VISIBILITY_KEY, value) {
            loge!("Visibility: cannot persist {}: {}", value, e);
        }
    }

    pub fn state(&self) -> Visibility { self.state }

    pub fn is_shown(&self) -> bool { self.state == Visibility::Shown }

    pub fn store(&self) -> &S { &self.store }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_shown() {
        let mut v = VisibilityController::new(MemoryFlagStore::default());
        assert_eq!(v.restore_state(), Visibility::Shown);
        assert!(v.is_shown());
        v.hide();
        assert!(!v.is_shown());
    }

    #[test]
    fn only_closed_hides() {
        let mut store = MemoryFlagStore::default();
        store.set(VISIBILITY_KEY, "garbage").unwrap();
        let mut v = VisibilityController::new(store);
        assert_eq!(v.restore_state(), Visibility::Shown);

        v.hide();
        assert_eq!(v.store().get(VISIBILITY_KEY).as_deref(), Some("closed"));
        assert_eq!(v.restore_state(), Visibility::Hidden);

        v.show();
        assert_eq!(v.store().get(VISIBILITY_KEY).as_deref(), Some("open"));
    }
}
