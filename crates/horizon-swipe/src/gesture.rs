//! Pointer sample classification for swipeable rows.
//!
//! [`SwipeGestureRecognizer`] consumes the samples of a single active
//! pointer and turns them into one-dimensional swipe phases. It also
//! recognizes plain taps and cedes primarily vertical drags to the host
//! list so scrolling keeps working.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_swipe::gesture::{PointerPhase, PointerSample, SwipeGesture, SwipeGestureRecognizer};
//! use horizon_swipe::Point;
//!
//! let mut recognizer = SwipeGestureRecognizer::new();
//! let t0 = Instant::now();
//!
//! recognizer.process(&PointerSample::new(1, Point::new(200.0, 20.0), t0, PointerPhase::Began));
//! let began = recognizer.process(&PointerSample::new(
//!     1,
//!     Point::new(170.0, 22.0),
//!     t0 + Duration::from_millis(16),
//!     PointerPhase::Moved,
//! ));
//! assert!(matches!(began, Some(SwipeGesture::Began { .. })));
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Default maximum movement for a tap in points.
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

/// Default maximum duration of a tap in milliseconds.
pub const DEFAULT_TAP_TIMEOUT_MS: u64 = 300;

/// Default horizontal distance before a swipe direction is locked.
pub const DEFAULT_COMMIT_DISTANCE: f32 = 12.0;

/// Default window over which release velocity is averaged, in milliseconds.
pub const DEFAULT_VELOCITY_WINDOW_MS: u64 = 100;

/// Phase of a raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer went down.
    Began,
    /// Pointer moved while down.
    Moved,
    /// Pointer went up.
    Ended,
    /// The platform cancelled the pointer (e.g. the row scrolled away).
    Cancelled,
}

/// One raw pointer sample in row coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pointer identifier; only one pointer is tracked at a time.
    pub id: u64,
    /// Position in row-local coordinates.
    pub position: Point,
    /// When the sample was taken.
    pub timestamp: Instant,
    /// Sample phase.
    pub phase: PointerPhase,
}

impl PointerSample {
    /// Create a new sample.
    pub fn new(id: u64, position: Point, timestamp: Instant, phase: PointerPhase) -> Self {
        Self {
            id,
            position,
            timestamp,
            phase,
        }
    }
}

/// A classified swipe gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeGesture {
    /// A primarily horizontal drag was recognized.
    Began {
        /// Horizontal translation since the pointer went down.
        translation: f32,
    },
    /// The drag moved.
    Changed {
        /// Horizontal translation since the pointer went down.
        translation: f32,
        /// Horizontal velocity in points per second.
        velocity: f32,
    },
    /// The pointer was released while dragging.
    Ended {
        /// Final horizontal translation.
        translation: f32,
        /// Release velocity in points per second.
        velocity: f32,
    },
    /// The platform cancelled the drag.
    Cancelled,
    /// The movement was primarily vertical; the host list owns it.
    Ceded,
    /// A tap (short press without movement).
    Tap {
        /// Where the tap happened, in row coordinates.
        position: Point,
    },
}

/// Configuration for the swipe gesture recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum movement allowed for a tap.
    pub tap_slop: f32,
    /// Maximum duration for a tap.
    #[serde(with = "crate::config::duration_ms")]
    pub tap_timeout: Duration,
    /// Horizontal distance a drag must cover before its direction is locked.
    pub commit_distance: f32,
    /// Window over which velocity is averaged.
    #[serde(with = "crate::config::duration_ms")]
    pub velocity_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: DEFAULT_TAP_SLOP,
            tap_timeout: Duration::from_millis(DEFAULT_TAP_TIMEOUT_MS),
            commit_distance: DEFAULT_COMMIT_DISTANCE,
            velocity_window: Duration::from_millis(DEFAULT_VELOCITY_WINDOW_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackingState {
    /// No pointer down.
    Idle,
    /// Pointer down, not yet classified.
    Possible,
    /// Horizontal drag in progress.
    Panning,
    /// Vertical movement; ignored until the pointer goes up.
    Ceded,
}

/// Recognizes swipe drags and taps from a single pointer.
#[derive(Debug)]
pub struct SwipeGestureRecognizer {
    config: GestureConfig,
    state: TrackingState,
    pointer_id: u64,
    start_pos: Point,
    start_time: Option<Instant>,
    /// Recent (timestamp, x) samples used for velocity.
    history: VecDeque<(Instant, f32)>,
}

impl Default for SwipeGestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeGestureRecognizer {
    /// Creates a new recognizer with default configuration.
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Creates a new recognizer with the given configuration.
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            state: TrackingState::Idle,
            pointer_id: 0,
            start_pos: Point::ZERO,
            start_time: None,
            history: VecDeque::new(),
        }
    }

    /// The recognizer configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next pointer.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Whether a horizontal drag is in progress.
    pub fn is_panning(&self) -> bool {
        self.state == TrackingState::Panning
    }

    /// Processes one pointer sample.
    pub fn process(&mut self, sample: &PointerSample) -> Option<SwipeGesture> {
        if sample.phase != PointerPhase::Began
            && (self.state == TrackingState::Idle || sample.id != self.pointer_id)
        {
            return None;
        }

        match sample.phase {
            PointerPhase::Began => self.handle_began(sample),
            PointerPhase::Moved => self.handle_moved(sample),
            PointerPhase::Ended => self.handle_ended(sample),
            PointerPhase::Cancelled => self.handle_cancelled(),
        }
    }

    /// Drops any tracked pointer without emitting events.
    pub fn reset(&mut self) {
        self.state = TrackingState::Idle;
        self.start_time = None;
        self.history.clear();
    }

    fn handle_began(&mut self, sample: &PointerSample) -> Option<SwipeGesture> {
        if self.state != TrackingState::Idle {
            if sample.id != self.pointer_id {
                // A second pointer while one is tracked is ignored.
                return None;
            }
            tracing::debug!(target: "horizon_swipe::gesture", "pointer restarted without end");
        }

        self.reset();
        self.state = TrackingState::Possible;
        self.pointer_id = sample.id;
        self.start_pos = sample.position;
        self.start_time = Some(sample.timestamp);
        self.record(sample);
        None
    }

    fn handle_moved(&mut self, sample: &PointerSample) -> Option<SwipeGesture> {
        self.record(sample);
        let delta = sample.position.to_vec2() - self.start_pos.to_vec2();

        match self.state {
            TrackingState::Possible => {
                if delta.length() <= self.config.tap_slop {
                    return None;
                }
                if delta.x.abs() > delta.y.abs() {
                    tracing::debug!(target: "horizon_swipe::gesture", dx = delta.x, dy = delta.y, "horizontal drag recognized");
                    self.state = TrackingState::Panning;
                    Some(SwipeGesture::Began {
                        translation: delta.x,
                    })
                } else {
                    tracing::debug!(target: "horizon_swipe::gesture", dx = delta.x, dy = delta.y, "vertical drag ceded to host list");
                    self.state = TrackingState::Ceded;
                    Some(SwipeGesture::Ceded)
                }
            }
            TrackingState::Panning => Some(SwipeGesture::Changed {
                translation: delta.x,
                velocity: self.velocity(),
            }),
            TrackingState::Ceded | TrackingState::Idle => None,
        }
    }

    fn handle_ended(&mut self, sample: &PointerSample) -> Option<SwipeGesture> {
        self.record(sample);
        let delta = sample.position.to_vec2() - self.start_pos.to_vec2();

        let gesture = match self.state {
            TrackingState::Possible => {
                let duration = self
                    .start_time
                    .map(|start| sample.timestamp.saturating_duration_since(start))
                    .unwrap_or_default();
                (duration <= self.config.tap_timeout).then_some(SwipeGesture::Tap {
                    position: sample.position,
                })
            }
            TrackingState::Panning => Some(SwipeGesture::Ended {
                translation: delta.x,
                velocity: self.velocity(),
            }),
            TrackingState::Ceded | TrackingState::Idle => None,
        };

        self.reset();
        gesture
    }

    fn handle_cancelled(&mut self) -> Option<SwipeGesture> {
        let was_panning = self.state == TrackingState::Panning;
        self.reset();
        was_panning.then_some(SwipeGesture::Cancelled)
    }

    fn record(&mut self, sample: &PointerSample) {
        self.history.push_back((sample.timestamp, sample.position.x));
        while let Some(&(t, _)) = self.history.front() {
            if sample.timestamp.saturating_duration_since(t) > self.config.velocity_window
                && self.history.len() > 2
            {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Average horizontal velocity over the sampling window, in points per second.
    fn velocity(&self) -> f32 {
        let (Some(&(t0, x0)), Some(&(t1, x1))) = (self.history.front(), self.history.back()) else {
            return 0.0;
        };
        let dt = t1.saturating_duration_since(t0).as_secs_f32();
        if dt <= f32::EPSILON {
            0.0
        } else {
            (x1 - x0) / dt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t0: Instant, ms: u64, x: f32, y: f32, phase: PointerPhase) -> PointerSample {
        PointerSample::new(1, Point::new(x, y), t0 + Duration::from_millis(ms), phase)
    }

    #[test]
    fn test_horizontal_drag_phases() {
        let mut recognizer = SwipeGestureRecognizer::new();
        let t0 = Instant::now();

        assert_eq!(recognizer.process(&sample(t0, 0, 300.0, 20.0, PointerPhase::Began)), None);
        assert_eq!(
            recognizer.process(&sample(t0, 16, 280.0, 21.0, PointerPhase::Moved)),
            Some(SwipeGesture::Began { translation: -20.0 })
        );
        assert!(recognizer.is_panning());

        match recognizer.process(&sample(t0, 32, 250.0, 21.0, PointerPhase::Moved)) {
            Some(SwipeGesture::Changed { translation, velocity }) => {
                assert_eq!(translation, -50.0);
                assert!(velocity < 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }

        match recognizer.process(&sample(t0, 48, 240.0, 21.0, PointerPhase::Ended)) {
            Some(SwipeGesture::Ended { translation, .. }) => assert_eq!(translation, -60.0),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!recognizer.is_panning());
    }

    #[test]
    fn test_vertical_drag_is_ceded() {
        let mut recognizer = SwipeGestureRecognizer::new();
        let t0 = Instant::now();

        recognizer.process(&sample(t0, 0, 100.0, 20.0, PointerPhase::Began));
        assert_eq!(
            recognizer.process(&sample(t0, 16, 104.0, 40.0, PointerPhase::Moved)),
            Some(SwipeGesture::Ceded)
        );
        // Later horizontal movement does not start a swipe.
        assert_eq!(recognizer.process(&sample(t0, 32, 20.0, 40.0, PointerPhase::Moved)), None);
        assert_eq!(recognizer.process(&sample(t0, 48, 20.0, 40.0, PointerPhase::Ended)), None);
    }

    #[test]
    fn test_tap() {
        let mut recognizer = SwipeGestureRecognizer::new();
        let t0 = Instant::now();

        recognizer.process(&sample(t0, 0, 50.0, 20.0, PointerPhase::Began));
        recognizer.process(&sample(t0, 40, 52.0, 21.0, PointerPhase::Moved));
        assert_eq!(
            recognizer.process(&sample(t0, 80, 52.0, 21.0, PointerPhase::Ended)),
            Some(SwipeGesture::Tap {
                position: Point::new(52.0, 21.0)
            })
        );
    }

    #[test]
    fn test_long_press_is_not_a_tap() {
        let mut recognizer = SwipeGestureRecognizer::new();
        let t0 = Instant::now();

        recognizer.process(&sample(t0, 0, 50.0, 20.0, PointerPhase::Began));
        assert_eq!(recognizer.process(&sample(t0, 900, 50.0, 20.0, PointerPhase::Ended)), None);
    }

    #[test]
    fn test_cancel_while_panning() {
        let mut recognizer = SwipeGestureRecognizer::new();
        let t0 = Instant::now();

        recognizer.process(&sample(t0, 0, 100.0, 20.0, PointerPhase::Began));
        recognizer.process(&sample(t0, 16, 130.0, 20.0, PointerPhase::Moved));
        assert_eq!(
            recognizer.process(&sample(t0, 32, 130.0, 20.0, PointerPhase::Cancelled)),
            Some(SwipeGesture::Cancelled)
        );
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut recognizer = SwipeGestureRecognizer::new();
        let t0 = Instant::now();

        recognizer.process(&sample(t0, 0, 100.0, 20.0, PointerPhase::Began));
        let other = PointerSample::new(2, Point::new(10.0, 20.0), t0, PointerPhase::Began);
        assert_eq!(recognizer.process(&other), None);
        let other_move = PointerSample::new(
            2,
            Point::new(60.0, 20.0),
            t0 + Duration::from_millis(10),
            PointerPhase::Moved,
        );
        assert_eq!(recognizer.process(&other_move), None);
        assert!(!recognizer.is_panning());
    }

    #[test]
    fn test_velocity_uses_recent_window() {
        let mut recognizer = SwipeGestureRecognizer::new();
        let t0 = Instant::now();

        // Slow start, then a fast flick in the last 50ms.
        recognizer.process(&sample(t0, 0, 300.0, 20.0, PointerPhase::Began));
        recognizer.process(&sample(t0, 400, 285.0, 20.0, PointerPhase::Moved));
        recognizer.process(&sample(t0, 500, 280.0, 20.0, PointerPhase::Moved));
        recognizer.process(&sample(t0, 525, 250.0, 20.0, PointerPhase::Moved));
        match recognizer.process(&sample(t0, 550, 220.0, 20.0, PointerPhase::Ended)) {
            Some(SwipeGesture::Ended { velocity, .. }) => {
                // 60pt over 50ms = 1200 pt/s; the slow start is outside the window.
                assert!(velocity < -1000.0, "velocity was {velocity}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
