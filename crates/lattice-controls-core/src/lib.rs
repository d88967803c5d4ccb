//! Core primitives for Lattice Controls.
//!
//! This crate provides the pieces the property sheet and validation engines
//! are built on:
//!
//! - **Signal/Slot System**: Synchronous observer lists with disconnect support
//! - **Property System**: Reactive values with change notification
//! - **Values**: A dynamic [`Value`] with [`TypeTag`] dispatch
//! - **Controls**: The [`Control`] abstraction over host widgets, and
//!   [`ValueControl`], an in-memory implementation
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_controls_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Threading
//!
//! Everything here is `Send + Sync`, but the engines built on top assume a
//! single UI thread: every notification is delivered synchronously, and a
//! recompute finishes before the next event is handled.

pub mod control;
mod error;
pub mod logging;
pub mod property;
pub mod signal;
pub mod value;

pub use control::{Control, ControlId, ControlKind, Decoration, ValueControl};
pub use error::{CoreError, Result};
pub use property::{ObservableProperty, Property};
pub use signal::{ConnectionId, Signal};
pub use value::{Color, TypeTag, Value};
