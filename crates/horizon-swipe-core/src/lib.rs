//! Core systems for Horizon Swipe.
//!
//! This crate provides the foundations the swipe control is built on:
//!
//! - **Signal System**: Type-safe observer notifications
//! - **Errors**: Shared error types
//! - **Logging**: `tracing` targets and span helpers
//! - **Thread Affinity**: Checks that swipe state stays on the UI thread
//!
//! # Signal Example
//!
//! ```
//! use horizon_swipe_core::Signal;
//!
//! let opened = Signal::<bool>::new();
//! let conn_id = opened.connect(|animated| {
//!     println!("panel opened (animated: {})", animated);
//! });
//!
//! opened.emit(true);
//! opened.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use error::SignalError;
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
