use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::template::color::HexColor;

type Listener = Box<dyn FnMut(HexColor) + Send>;

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener)>>,
}

/// Hub for colors picked from screen by a platform eyedropper.
///
/// Whether picking exists is decided once, when the hub is built. Subscribing to an unsupported
/// hub yields `None` and the feature is simply unavailable.
#[derive(Clone)]
pub struct ColorPickEvents {
    supported: bool,
    listeners: Arc<Listeners>,
}

impl ColorPickEvents {
    /// Build a hub for a platform that does (`true`) or does not support picking.
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            listeners: Arc::new(Listeners::default()),
        }
    }

    /// Whether the platform supports picking.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Register `listener` for picked colors.
    ///
    /// The listener stays registered until the returned handle is dropped or
    /// [`PickerSubscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, listener: F) -> Option<PickerSubscription>
    where
        F: FnMut(HexColor) + Send + 'static,
    {
        if !self.supported {
            tracing::info!("color picking is not supported on this platform");
            return None;
        }
        let id = self.listeners.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(listener)));
        Some(PickerSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        })
    }

    /// Deliver a picked color to every live listener, in subscription order.
    ///
    /// Listeners run under the hub lock and must not subscribe or unsubscribe from the callback.
    pub fn emit(&self, color: HexColor) {
        let mut entries = self
            .listeners
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, listener) in entries.iter_mut() {
            listener(color);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Registration handle returned by [`ColorPickEvents::subscribe`]; unsubscribes on drop.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct PickerSubscription {
    id: u64,
    listeners: std::sync::Weak<Listeners>,
}

impl PickerSubscription {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {}
}

impl Drop for PickerSubscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        listeners
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/picker.rs"]
mod tests;
