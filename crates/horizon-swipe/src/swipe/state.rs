//! Swipe state types.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a row inside a [`SwipeTable`](super::SwipeTable).
    pub struct RowId;
}

/// Which side's button group is active.
///
/// Positive offsets belong to `LeftToRight` (the left group is revealed),
/// negative offsets to `RightToLeft` (the right group is revealed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// No direction chosen.
    #[default]
    None,
    /// Finger moves right; reveals the left buttons.
    LeftToRight,
    /// Finger moves left; reveals the right buttons.
    RightToLeft,
}

impl SwipeDirection {
    /// Direction implied by the sign of an offset.
    pub fn from_offset(offset: f32) -> Self {
        if offset > 0.0 {
            Self::LeftToRight
        } else if offset < 0.0 {
            Self::RightToLeft
        } else {
            Self::None
        }
    }

    /// Sign of offsets in this direction (0 for `None`).
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::LeftToRight => 1.0,
            Self::RightToLeft => -1.0,
        }
    }

    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }

    /// Whether a direction has been chosen.
    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::None
    }
}

/// Phase of the swipe state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SwipePhase {
    /// No reveal. Initial and terminal phase.
    #[default]
    Closed,
    /// The user is dragging the row.
    Dragging,
    /// Animating toward `target`; `trigger` fires the expansion button on completion.
    Animating { target: f32, trigger: bool },
    /// Panel held open in the given direction.
    Open(SwipeDirection),
}

impl SwipePhase {
    /// Whether the row shows or is moving toward a reveal.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Snapshot of a controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeState {
    /// Current signed offset.
    pub offset: f32,
    /// Active direction; `None` exactly when `offset` is zero and idle.
    pub direction: SwipeDirection,
    /// A drag is in progress.
    pub is_dragging: bool,
    /// An animation is in flight.
    pub is_animating: bool,
}

/// Visual reveal state reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    /// Nothing revealed.
    #[default]
    None,
    /// Buttons revealed in the given direction.
    Swiping(SwipeDirection),
    /// The expansion button is expanded in the given direction.
    Expanding(SwipeDirection),
}

/// Identifies the row (and the content bound to it) a callback refers to.
///
/// `binding` changes every time new content is bound to the row, so a
/// consumer can tell a handle captured for old content from a current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowHandle {
    /// The row.
    pub row: RowId,
    /// Content binding generation.
    pub binding: u64,
}

impl RowHandle {
    /// Create a handle.
    pub fn new(row: RowId, binding: u64) -> Self {
        Self { row, binding }
    }
}
