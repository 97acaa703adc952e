// File: crates/trainview-core/src/store.rs
// Summary: Series Store: per-key load state, background source loading, and
//          shared axis domains for multi-series charts.
// Notes:
// - Loads run on background threads but every state write happens in
//   `pump`/`pump_blocking` on the owning thread, so completion order does
//   not matter: each source touches only its own key, last writer wins.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::SourceDescriptor;
use crate::series::{self, Series};
use crate::source::{self, LoadError};
use crate::types::AxisDomain;

/// Load state for one metric key.
#[derive(Clone, Debug)]
pub enum SourceState {
    Pending,
    Loaded(Arc<Series>),
    Failed,
}

type Completion = (String, Result<Series, LoadError>);

/// Per-chart mapping from metric key to its load state.
///
/// `request` never blocks and `get` never blocks; callers poll `pump` (or
/// block on `pump_blocking`) from the thread that owns the store to apply
/// finished loads and run `on_update` callbacks.
pub struct SeriesStore {
    base_path: String,
    states: HashMap<String, SourceState>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    listeners: Vec<Box<dyn FnMut(&str)>>,
}

impl SeriesStore {
    pub fn new(base_path: impl Into<String>) -> Self {
        let (tx, rx) = channel();
        Self {
            base_path: base_path.into(),
            states: HashMap::new(),
            tx,
            rx,
            listeners: Vec::new(),
        }
    }

    /// Begin loading a source unless it is already pending or loaded.
    /// A previously failed key is retried (this is the explicit reload
    /// trigger for failures).
    pub fn request(&mut self, descriptor: &SourceDescriptor) {
        match self.states.get(&descriptor.key) {
            Some(SourceState::Pending) | Some(SourceState::Loaded(_)) => return,
            _ => {}
        }
        self.spawn_load(descriptor);
    }

    /// Force a fresh load even when the key is already loaded; completion
    /// replaces the prior series wholesale.
    pub fn reload(&mut self, descriptor: &SourceDescriptor) {
        self.spawn_load(descriptor);
    }

    fn spawn_load(&mut self, descriptor: &SourceDescriptor) {
        self.states.insert(descriptor.key.clone(), SourceState::Pending);
        let tx = self.tx.clone();
        let descriptor = descriptor.clone();
        let base_path = self.base_path.clone();
        std::thread::spawn(move || {
            let result = source::load(&descriptor, &base_path);
            // The store may have been dropped; a dead channel just means
            // nobody wants the result any more.
            let _ = tx.send((descriptor.key, result));
        });
    }

    /// Register a callback fired with the metric key after every state
    /// transition applied by `pump`.
    pub fn on_update(&mut self, callback: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(callback));
    }

    /// Apply all finished loads. Returns the keys that transitioned.
    pub fn pump(&mut self) -> Vec<String> {
        let mut updated = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            updated.push(self.apply(completion));
        }
        self.notify(&updated);
        updated
    }

    /// Wait up to `timeout` for at least one completion, then drain the
    /// rest. Returns the keys that transitioned.
    pub fn pump_blocking(&mut self, timeout: Duration) -> Vec<String> {
        let mut updated = Vec::new();
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => updated.push(self.apply(completion)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                return updated;
            }
        }
        while let Ok(completion) = self.rx.try_recv() {
            updated.push(self.apply(completion));
        }
        self.notify(&updated);
        updated
    }

    /// Pump until every key in `keys` is loaded or `timeout` elapses.
    /// Returns whether all keys finished loading.
    pub fn pump_until_loaded(&mut self, keys: &[&str], timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.all_loaded(keys) {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.pump_blocking(deadline - now);
        }
        true
    }

    fn apply(&mut self, (key, result): Completion) -> String {
        match result {
            Ok(s) => {
                debug!(key = %key, samples = s.len(), "series loaded");
                self.states.insert(key.clone(), SourceState::Loaded(Arc::new(s)));
            }
            Err(e) => {
                warn!(key = %key, error = %e, "series load failed");
                self.states.insert(key.clone(), SourceState::Failed);
            }
        }
        key
    }

    fn notify(&mut self, keys: &[String]) {
        for key in keys {
            for listener in &mut self.listeners {
                listener(key);
            }
        }
    }

    /// The loaded series for a key; `None` while pending or after a failed
    /// load so callers can show a loading state instead of rendering on
    /// partial data.
    pub fn get(&self, key: &str) -> Option<Arc<Series>> {
        match self.states.get(key) {
            Some(SourceState::Loaded(s)) => Some(Arc::clone(s)),
            _ => None,
        }
    }

    pub fn state(&self, key: &str) -> Option<&SourceState> {
        self.states.get(key)
    }

    /// True when every listed key has finished loading. Gates rendering of
    /// multi-series charts on exactly the series the display requires.
    pub fn all_loaded(&self, keys: &[&str]) -> bool {
        keys.iter().all(|k| matches!(self.states.get(*k), Some(SourceState::Loaded(_))))
    }

    /// Union of x extents across the required keys' loaded series. The
    /// shared time axis is always this explicit union, never whichever
    /// source happened to resolve first.
    pub fn shared_x_domain(&self, keys: &[&str]) -> Option<AxisDomain> {
        let loaded: Vec<Arc<Series>> = keys.iter().filter_map(|k| self.get(k)).collect();
        series::shared_x_domain(loaded.iter().map(Arc::as_ref))
    }

    /// Union of y extents across the required keys' loaded series.
    pub fn shared_y_domain(&self, keys: &[&str]) -> Option<AxisDomain> {
        let loaded: Vec<Arc<Series>> = keys.iter().filter_map(|k| self.get(k)).collect();
        series::shared_y_domain(loaded.iter().map(Arc::as_ref))
    }
}
