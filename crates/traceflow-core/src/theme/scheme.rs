//! Ambient color-scheme observation.
//!
//! The host's light/dark preference is an injected [`ColorSchemeSource`]
//! rather than a global read. Resolution only calls
//! [`ColorSchemeSource::current`]; hosts that re-render on preference changes
//! subscribe to updates.

use std::sync::{Arc, Weak};

use log::{debug, trace};
use parking_lot::Mutex;

use super::ColorScheme;

/// Callback invoked with the new scheme after a preference change.
pub type SchemeCallback = Box<dyn Fn(ColorScheme) + Send + Sync>;

/// A source of the ambient color-scheme preference.
pub trait ColorSchemeSource {
    /// The current preference, or `None` when the host has no preference.
    fn current(&self) -> Option<ColorScheme>;

    /// Registers a callback for preference changes.
    ///
    /// The callback fires at most once per actual change. Order across
    /// subscribers is unspecified.
    fn subscribe(&self, callback: SchemeCallback) -> Subscription;
}

/// Handle returned by [`ColorSchemeSource::subscribe`].
///
/// Unsubscribing is always valid and idempotent. Dropping the handle
/// unsubscribes as well.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that has nothing to cancel.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Stops delivery to the callback. Calling it again has no effect.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// A preference that never changes, e.g. for headless rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColorScheme {
    scheme: Option<ColorScheme>,
}

impl FixedColorScheme {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme: Some(scheme),
        }
    }

    /// A source that reports no preference at all.
    pub fn unknown() -> Self {
        Self { scheme: None }
    }
}

impl ColorSchemeSource for FixedColorScheme {
    fn current(&self) -> Option<ColorScheme> {
        self.scheme
    }

    fn subscribe(&self, _callback: SchemeCallback) -> Subscription {
        Subscription::noop()
    }
}

#[derive(Default)]
struct BroadcasterState {
    current: Option<ColorScheme>,
    next_id: u64,
    subscribers: Vec<(u64, Arc<dyn Fn(ColorScheme) + Send + Sync>)>,
}

/// A source the host pushes preference changes into.
///
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct ColorSchemeBroadcaster {
    state: Arc<Mutex<BroadcasterState>>,
}

impl ColorSchemeBroadcaster {
    pub fn new(initial: Option<ColorScheme>) -> Self {
        Self {
            state: Arc::new(Mutex::new(BroadcasterState {
                current: initial,
                ..Default::default()
            })),
        }
    }

    /// Records a new preference and notifies subscribers.
    ///
    /// Returns `false` and notifies nobody when the preference is unchanged.
    pub fn set(&self, scheme: ColorScheme) -> bool {
        let callbacks: Vec<_> = {
            let mut state = self.state.lock();
            if state.current == Some(scheme) {
                trace!(scheme:% = scheme; "Color scheme unchanged");
                return false;
            }
            state.current = Some(scheme);
            state.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };

        debug!(scheme:% = scheme, subscribers = callbacks.len(); "Color scheme changed");
        // Callbacks run outside the lock so they may call back into the broadcaster.
        for callback in callbacks {
            callback(scheme);
        }
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}

impl ColorSchemeSource for ColorSchemeBroadcaster {
    fn current(&self) -> Option<ColorScheme> {
        self.state.lock().current
    }

    fn subscribe(&self, callback: SchemeCallback) -> Subscription {
        let id = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.subscribers.push((id, Arc::from(callback)));
            id
        };

        let state: Weak<Mutex<BroadcasterState>> = Arc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.lock().subscribers.retain(|(sub_id, _)| *sub_id != id);
            }
        })
    }
}

impl std::fmt::Debug for ColorSchemeBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ColorSchemeBroadcaster")
            .field("current", &state.current)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}
