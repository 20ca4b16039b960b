//! Animation support for swipe offsets.
//!
//! This module provides easing functions and a frame-driven tween used to
//! animate the swipe offset and the expansion of a trigger button.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_swipe::animation::{Easing, Tween};
//!
//! let mut close = Tween::new(-120.0, 0.0, Duration::from_millis(300), Easing::EaseOutCubic);
//! while !close.advance(Duration::from_millis(16)).is_finished() {}
//! assert_eq!(close.value(), 0.0);
//! ```

mod easing;
mod tween;

pub use easing::{ease, lerp_eased, Easing};
pub use tween::{AnimationStep, Tween};
