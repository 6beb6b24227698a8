//! Value cells with change detection.
//!
//! A [`Property<T>`] wraps a value behind a lock and reports whether a write
//! actually changed it, so the owner can decide whether to notify anyone.
//! Pair it with a [`Signal`](crate::Signal) or a plain callback:
//!
//! ```
//! use sectionlist_core::{Property, Signal};
//!
//! struct Query {
//!     text: Property<Option<String>>,
//!     changed: Signal<Option<String>>,
//! }
//!
//! impl Query {
//!     fn set(&self, text: Option<String>) {
//!         if self.text.set(text.clone()) {
//!             self.changed.emit(text);
//!         }
//!     }
//! }
//!
//! let query = Query { text: Property::new(None), changed: Signal::new() };
//! query.set(Some("an".into()));
//! assert_eq!(query.text.get().as_deref(), Some("an"));
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with change detection.
///
/// `Property<T>` uses interior mutability and is `Send + Sync` whenever `T`
/// is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    ///
    /// For large values prefer [`with`](Self::with).
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite the value unconditionally, without reporting a change.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if it differs from the previous one.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the previous one if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.value.read())
            .finish()
    }
}
