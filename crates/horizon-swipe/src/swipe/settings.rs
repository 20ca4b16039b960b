//! Swipe and expansion settings.
//!
//! Each direction of a row carries one [`SwipeSettings`] and one
//! [`ExpansionSettings`]. They are plain data: the consumer mutates them in
//! the button factory callback or through the row setters, and the
//! controller reads them on every gesture.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{SwipeError, SwipeResult};
use crate::geometry::Color;

/// Default ratio of the button group width past which release keeps the panel open.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 0.5;

/// Default open/close animation duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Default resistance applied to drag distance beyond the button group.
pub const DEFAULT_DAMPING: f32 = 0.5;

/// Default extra distance, as a ratio of the group width, a drag may overscroll.
pub const DEFAULT_MAX_OVERSCROLL_RATIO: f32 = 0.25;

/// Default release velocity (points per second) that decides open/close on its own.
pub const DEFAULT_FLING_VELOCITY: f32 = 800.0;

/// Default ratio of the group width past which the expansion button triggers.
pub const DEFAULT_EXPANSION_THRESHOLD: f32 = 1.5;

/// Default duration of the expand/collapse animation of the trigger button.
pub const DEFAULT_EXPANSION_DURATION_MS: u64 = 200;

/// How buttons move while the panel is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeTransition {
    /// Buttons spread proportionally inside the revealed area.
    #[default]
    Border,
    /// The button group is attached to the content edge and slides with it.
    Drag,
    /// Each button is clipped from its center outward as the reveal grows.
    ClipCenter,
    /// Buttons stay pinned at their final position; content slides over them.
    StaticOuter,
    /// Buttons are pinned and rotate into place around their inner edge.
    Rotate3d,
}

/// Per-direction swipe configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeSettings {
    /// Button motion style.
    pub transition: SwipeTransition,
    /// Whether swiping in this direction is allowed at all.
    pub enable_swipe: bool,
    /// Ratio of the group width past which release keeps the panel open.
    pub threshold: f32,
    /// Whether a tap outside the buttons closes an open panel.
    pub toggle_swipe_on_tap: bool,
    /// Inset of the button group from the row border.
    pub offset: f32,
    /// Duration of open/close animations.
    #[serde(with = "crate::config::duration_ms")]
    pub animation_duration: Duration,
    /// Easing of open/close animations.
    pub easing: Easing,
    /// Fraction of drag distance applied beyond the group width (0 = hard stop).
    pub damping: f32,
    /// Maximum overscroll beyond the group width, as a ratio of the group width.
    pub max_overscroll_ratio: f32,
    /// Release velocity that decides open/close regardless of offset.
    pub fling_velocity: f32,
    /// Keep each button's own width instead of equalizing them.
    pub allows_buttons_with_different_width: bool,
    /// Fill behind the buttons; transparent when unset.
    #[serde(skip)]
    pub background_color: Option<Color>,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            transition: SwipeTransition::Border,
            enable_swipe: true,
            threshold: DEFAULT_SWIPE_THRESHOLD,
            toggle_swipe_on_tap: true,
            offset: 0.0,
            animation_duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
            easing: Easing::EaseOutCubic,
            damping: DEFAULT_DAMPING,
            max_overscroll_ratio: DEFAULT_MAX_OVERSCROLL_RATIO,
            fling_velocity: DEFAULT_FLING_VELOCITY,
            allows_buttons_with_different_width: false,
            background_color: None,
        }
    }
}

impl SwipeSettings {
    /// Settings with the given transition and defaults elsewhere.
    pub fn with_transition(transition: SwipeTransition) -> Self {
        Self {
            transition,
            ..Self::default()
        }
    }

    /// Check that the numeric values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::InvalidSetting`] naming the offending field.
    pub fn validate(&self) -> SwipeResult<()> {
        if !(self.threshold > 0.0) {
            return Err(SwipeError::invalid("threshold", "must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(SwipeError::invalid("damping", "must be within 0..=1"));
        }
        if !(self.max_overscroll_ratio >= 0.0) {
            return Err(SwipeError::invalid("max_overscroll_ratio", "must not be negative"));
        }
        if !(self.fling_velocity > 0.0) {
            return Err(SwipeError::invalid("fling_velocity", "must be greater than 0"));
        }
        if !self.offset.is_finite() {
            return Err(SwipeError::invalid("offset", "must be finite"));
        }
        Ok(())
    }
}

/// Per-direction expansion configuration.
///
/// Expansion is disabled unless `button_index` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionSettings {
    /// Index of the expandable button in its group.
    pub button_index: Option<usize>,
    /// Ratio of the group width past which the button expands and triggers.
    pub threshold: f32,
    /// Fill the whole row on trigger instead of bouncing back.
    pub fill_on_trigger: bool,
    /// Duration of the expand/collapse animation.
    #[serde(with = "crate::config::duration_ms")]
    pub animation_duration: Duration,
    /// Background of the expanded button; the button's own color when unset.
    #[serde(skip)]
    pub expansion_color: Option<Color>,
}

impl Default for ExpansionSettings {
    fn default() -> Self {
        Self {
            button_index: None,
            threshold: DEFAULT_EXPANSION_THRESHOLD,
            fill_on_trigger: false,
            animation_duration: Duration::from_millis(DEFAULT_EXPANSION_DURATION_MS),
            expansion_color: None,
        }
    }
}

impl ExpansionSettings {
    /// Expansion of `button_index` at `threshold`.
    pub fn new(button_index: usize, threshold: f32, fill_on_trigger: bool) -> Self {
        Self {
            button_index: Some(button_index),
            threshold,
            fill_on_trigger,
            ..Self::default()
        }
    }

    /// Whether an expansion button is configured.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.button_index.is_some()
    }

    /// Check that the numeric values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::InvalidSetting`] naming the offending field.
    pub fn validate(&self) -> SwipeResult<()> {
        if !(self.threshold > 0.0) {
            return Err(SwipeError::invalid("expansion.threshold", "must be greater than 0"));
        }
        Ok(())
    }
}
