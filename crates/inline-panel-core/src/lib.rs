//! Core primitives for Inline Panel.
//!
//! This crate provides the reactive building blocks the controller crate is
//! written against:
//!
//! - **Signal/Slot System**: Type-safe notifications from controllers to views
//! - **Property System**: Values with change detection
//! - **Logging**: Tracing targets and performance spans
//!
//! # Example
//!
//! ```
//! use inline_panel_core::{Property, Signal};
//!
//! let label = Property::new(String::new());
//! let label_changed = Signal::<String>::new();
//!
//! label_changed.connect(|text| println!("label is now {text:?}"));
//!
//! if label.set(" 1".to_string()) {
//!     label_changed.emit(label.get());
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
