//! Swipeable rows.
//!
//! - [`SwipeController`]: the per-row state machine (offset, direction,
//!   button groups, animation, expansion trigger).
//! - [`SwipeRow`]: a controller composed with consumer [`RowContent`] and a
//!   gesture recognizer.
//! - [`SwipeTable`]: owns the rows of one list and enforces the
//!   single-open policy.
//! - [`ActionButton`], [`SwipeSettings`], [`ExpansionSettings`]: what is
//!   revealed and how it behaves.

mod button;
mod controller;
mod layout;
mod row;
mod settings;
mod state;
mod table;

pub use button::{ActionButton, ButtonCallback, DEFAULT_BUTTON_PADDING, DEFAULT_CONTENT_WIDTH};
pub use controller::{SwipeCompletion, SwipeController, SwipeDelegate, TapOutcome};
pub use layout::{ButtonFrame, SwipeLayout};
pub use row::{RowContent, RowEvent, SwipeRow};
pub use settings::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_DAMPING, DEFAULT_EXPANSION_DURATION_MS,
    DEFAULT_EXPANSION_THRESHOLD, DEFAULT_FLING_VELOCITY, DEFAULT_MAX_OVERSCROLL_RATIO,
    DEFAULT_SWIPE_THRESHOLD, ExpansionSettings, SwipeSettings, SwipeTransition,
};
pub use state::{RevealState, RowHandle, RowId, SwipeDirection, SwipePhase, SwipeState};
pub use table::SwipeTable;
