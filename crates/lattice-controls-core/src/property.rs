//! Property system for Lattice Controls.
//!
//! This module provides reactive properties with change notification.
//! Properties are the data backbone of the engines - when a property changes,
//! it emits a signal to notify interested parties.
//!
//! # Property Types
//!
//! - **Property<T>**: A value with change detection but no notification
//! - **ObservableProperty<T>**: A property paired with a `changed` signal
//!
//! # Example
//!
//! ```
//! use lattice_controls_core::ObservableProperty;
//!
//! let filter = ObservableProperty::new(String::new());
//! filter.changed.connect(|text| println!("filter is now {text:?}"));
//!
//! assert!(filter.set("age".to_string()));
//! assert!(!filter.set("age".to_string()));
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::logging::targets;
use crate::signal::Signal;

/// A reactive property that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. When `set()` is
/// called, it compares the new value with the current one and returns whether
/// the value actually changed.
///
/// # Example
///
/// ```
/// use lattice_controls_core::Property;
///
/// let prop = Property::new(42);
/// assert_eq!(prop.get(), 42);
///
/// // Setting same value returns false (no change)
/// assert!(!prop.set(42));
///
/// // Setting different value returns true (changed)
/// assert!(prop.set(100));
/// assert_eq!(prop.get(), 100);
/// ```
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

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
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

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
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
            .field("value", &self.get())
            .finish()
    }
}

/// A property that notifies its observers after every mutation.
///
/// The value is written before `changed` is emitted, so a slot that reads
/// the property back always sees the new value.
pub struct ObservableProperty<T> {
    value: Property<T>,
    /// Emitted with the new value after it has been installed.
    pub changed: Signal<T>,
}

impl<T: Clone + Send + 'static> ObservableProperty<T> {
    /// Create a new observable property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: Property::new(value),
            changed: Signal::new(),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.value.with(f)
    }

    /// Install a value and notify observers unconditionally.
    ///
    /// Used for wholesale replacement of derived state, where every
    /// recompute is an event even if it happens to equal the previous one.
    pub fn publish(&self, value: T) {
        self.value.set_silent(value.clone());
        tracing::trace!(target: targets::PROPERTY, "property published");
        self.changed.emit(value);
    }
}

impl<T: Clone + PartialEq + Send + 'static> ObservableProperty<T> {
    /// Set the value, notifying observers and returning `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        if self.value.set(value.clone()) {
            tracing::trace!(target: targets::PROPERTY, "property changed");
            self.changed.emit(value);
            true
        } else {
            false
        }
    }
}

impl<T: Clone + Default + Send + 'static> Default for ObservableProperty<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for ObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("value", &self.value.get())
            .field("observers", &self.changed.connection_count())
            .finish()
    }
}
