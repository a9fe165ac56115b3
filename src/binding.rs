//! Shared, observable values for the application's text and selection.
//! - Use [`Binding<T>`] for owned values inside your application state.
//! - Use [`WeakBinding<T>`] to give non-owning handles for those values to callbacks.
//!
//! Every change bumps the binding's version and runs its observers, so the application can
//! tell when a new reconciliation pass is due.
//!
//! A [`WeakBinding`] becomes invalid once every owning [`Binding`] is dropped; its operations then return `None`.
//!
//! Observers must be `Send + Sync`, so they can't capture a
//! [`SyncBridge`](crate::bridge::SyncBridge), which is tied to the UI thread. An observer should
//! only mark that a pass is due (an `AtomicBool`, or a wakeup sent to the UI loop); the UI loop
//! then calls [`SyncBridge::reconcile`](crate::bridge::SyncBridge::reconcile) on its next turn.
//! Without observers, the loop can poll [`SyncBridge::is_stale`](crate::bridge::SyncBridge::is_stale).
//!
//! ## Example
//! ```
//! use editbridge::prelude::*;
//!
//! let text = Binding::new(String::from("let a = 5"));
//! let handle = text.downgrade();
//!
//! assert_eq!(handle.set(String::from("let a = 6")), Some(true));
//! assert_eq!(text.version(), 1);
//! ```

use std::{
    fmt,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Identifies an observer registered with [`Binding::observe`].
    pub struct ObserverKey;
}

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    value: RwLock<T>,
    version: AtomicU64,
    observers: Mutex<SlotMap<ObserverKey, Observer<T>>>,
}

impl<T: Clone> Shared<T> {
    // Called after the value lock is released. Observers are snapshotted so they may
    // observe, unobserve, or write to this binding themselves.
    fn changed(&self) {
        self.version.fetch_add(1, Ordering::AcqRel);

        let observers: Vec<Observer<T>> = self.observers.lock().values().cloned().collect();
        if observers.is_empty() {
            return;
        }

        let value = self.value.read().clone();
        for observer in observers {
            observer(&value);
        }
    }
}

/// A shared value that notifies observers when it changes.
///
/// Cloning a [`Binding`] creates another owner of the same value.
pub struct Binding<T: Send + Sync + 'static>(Arc<Shared<T>>);

impl<T: Send + Sync + 'static> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Send + Sync + Default + 'static> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Send + Sync + 'static> From<T> for Binding<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("Binding");
        match self.0.value.try_read() {
            Some(value) => ds.field("value", &*value),
            None => ds.field("status", &"locked"),
        };
        ds.field("version", &self.version()).finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> Binding<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Shared {
            value: RwLock::new(value),
            version: AtomicU64::new(0),
            observers: Mutex::new(SlotMap::with_key()),
        }))
    }

    /// Returns a read guard to the value.
    ///
    /// Don't hold the guard while writing to the binding, or it will deadlock.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.value.read()
    }

    /// Returns a clone of the value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.read().clone()
    }

    /// Returns the number of changes made to the value so far.
    pub fn version(&self) -> u64 {
        self.0.version.load(Ordering::Acquire)
    }

    /// Sets the value, but only bumps the version and notifies observers if it actually changed.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&self, new: T) -> bool
    where
        T: PartialEq + Clone,
    {
        {
            let mut value = self.0.value.write();
            if *value == new {
                return false;
            }
            *value = new;
        }
        self.0.changed();
        true
    }

    /// Replaces the value, returning the old one. Always counts as a change.
    pub fn replace(&self, new: T) -> T
    where
        T: Clone,
    {
        let old = std::mem::replace(&mut *self.0.value.write(), new);
        self.0.changed();
        old
    }

    /// Modifies the value in place. Counts as a change only if the value differs afterwards.
    pub fn update<R>(&self, func: impl FnOnce(&mut T) -> R) -> R
    where
        T: PartialEq + Clone,
    {
        let (result, changed) = {
            let mut value = self.0.value.write();
            let before = value.clone();
            let result = func(&mut *value);
            (result, *value != before)
        };
        if changed {
            self.0.changed();
        }
        result
    }

    /// Registers a callback that runs after every change, with the new value.
    pub fn observe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> ObserverKey {
        self.0.observers.lock().insert(Arc::new(observer))
    }

    /// Removes an observer. Returns `false` if it was already removed.
    pub fn unobserve(&self, key: ObserverKey) -> bool {
        self.0.observers.lock().remove(key).is_some()
    }

    /// Returns a [`WeakBinding`] that references the same value without keeping it alive.
    pub fn downgrade(&self) -> WeakBinding<T> {
        WeakBinding(Arc::downgrade(&self.0))
    }
}

/// A non-owning handle to a [`Binding`].
///
/// Intended to be stored in callbacks.
pub struct WeakBinding<T: Send + Sync + 'static>(Weak<Shared<T>>);

impl<T: Send + Sync + 'static> Clone for WeakBinding<T> {
    fn clone(&self) -> Self {
        Self(Weak::clone(&self.0))
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for WeakBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakBinding").field("alive", &self.is_alive()).finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> WeakBinding<T> {
    /// Checks if any owning [`Binding`] is still alive.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn upgrade(&self) -> Option<Binding<T>> {
        self.0.upgrade().map(Binding)
    }

    /// Returns a clone of the value, or `None` if the binding was dropped.
    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.upgrade().map(|binding| binding.get())
    }

    /// Returns the current version, or `None` if the binding was dropped.
    pub fn version(&self) -> Option<u64> {
        self.upgrade().map(|binding| binding.version())
    }

    /// Sets the value if the binding is alive. Returns whether the value changed.
    pub fn set(&self, new: T) -> Option<bool>
    where
        T: PartialEq + Clone,
    {
        self.upgrade().map(|binding| binding.set(new))
    }

    /// Modifies the value in place if the binding is alive.
    pub fn update<R>(&self, func: impl FnOnce(&mut T) -> R) -> Option<R>
    where
        T: PartialEq + Clone,
    {
        self.upgrade().map(|binding| binding.update(func))
    }
}
