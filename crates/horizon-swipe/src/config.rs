//! TOML-loadable defaults for swipeable rows.
//!
//! A [`SwipeConfig`] carries the gesture thresholds and the default swipe
//! and expansion settings of both directions. Every field has a default, so
//! a file only needs the values it changes. Durations are written in
//! milliseconds.
//!
//! ```
//! use horizon_swipe::config::SwipeConfig;
//! use horizon_swipe::swipe::SwipeTransition;
//!
//! let config = SwipeConfig::from_toml_str(r#"
//!     allows_multiple_swipe = false
//!
//!     [gesture]
//!     tap_timeout = 250
//!
//!     [right.swipe]
//!     transition = "clip_center"
//!     animation_duration = 250
//!
//!     [right.expansion]
//!     button_index = 0
//!     threshold = 1.4
//!     fill_on_trigger = true
//! "#).unwrap();
//!
//! assert_eq!(config.right.swipe.transition, SwipeTransition::ClipCenter);
//! assert_eq!(config.right.expansion.button_index, Some(0));
//! assert_eq!(config.left.swipe.threshold, 0.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SwipeError, SwipeResult};
use crate::gesture::GestureConfig;
use crate::swipe::{ExpansionSettings, SwipeSettings};

/// Settings of one direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionConfig {
    /// Swipe behavior.
    pub swipe: SwipeSettings,
    /// Expansion behavior.
    pub expansion: ExpansionSettings,
}

impl DirectionConfig {
    /// Check both parts.
    ///
    /// # Errors
    ///
    /// Returns the first [`SwipeError::InvalidSetting`] found.
    pub fn validate(&self) -> SwipeResult<()> {
        self.swipe.validate()?;
        self.expansion.validate()
    }
}

/// Defaults applied to every row of a [`SwipeTable`](crate::swipe::SwipeTable).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Let several rows stay open at once.
    pub allows_multiple_swipe: bool,
    /// Deliver a tap that dismissed another row's panel to the tapped row.
    pub touch_on_dismiss_swipe: bool,
    /// Gesture thresholds.
    pub gesture: GestureConfig,
    /// Left group (revealed by a left-to-right swipe).
    pub left: DirectionConfig,
    /// Right group (revealed by a right-to-left swipe).
    pub right: DirectionConfig,
}

impl SwipeConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::ConfigParse`] for malformed TOML and
    /// [`SwipeError::InvalidSetting`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> SwipeResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> SwipeResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SwipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: "horizon_swipe::config", path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Serialize to a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::ConfigSerialize`] if serialization fails.
    pub fn to_toml_string(&self) -> SwipeResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`SwipeError::InvalidSetting`] found.
    pub fn validate(&self) -> SwipeResult<()> {
        if !(self.gesture.tap_slop >= 0.0) {
            return Err(SwipeError::invalid("gesture.tap_slop", "must not be negative"));
        }
        if !(self.gesture.commit_distance >= 0.0) {
            return Err(SwipeError::invalid("gesture.commit_distance", "must not be negative"));
        }
        self.left.validate()?;
        self.right.validate()
    }
}

/// Serde adapter storing a [`Duration`](std::time::Duration) as whole milliseconds.
pub mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as milliseconds.
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    /// Deserialize from milliseconds.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
