//! Core systems shared by the NVS component crates.
//!
//! This crate provides the small amount of infrastructure every widget needs
//! regardless of how it draws:
//!
//! - [`Signal`]: Qt-style signal/slot notification used by widgets to report
//!   clicks, selection changes and expansion changes.
//! - [`logging`]: `tracing` target and span names, so applications can filter
//!   diagnostics per subsystem.
//!
//! # Example
//!
//! ```
//! use nvs_core::Signal;
//!
//! let clicked = Signal::<()>::new();
//! clicked.connect(|_| println!("clicked"));
//! clicked.emit(());
//! ```

pub mod logging;
mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
