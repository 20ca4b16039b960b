//! Horizon Swipe - swipeable list rows with action buttons.
//!
//! A horizontal drag on a list row slides its content aside and reveals a
//! group of action buttons on the opposite edge. Buttons can follow one of
//! several transition styles, a designated button can expand and trigger
//! when the drag goes far enough, and rows cooperate with the host list's
//! reuse lifecycle.
//!
//! The crate is headless: it consumes pointer samples and frame ticks, and
//! produces per-frame geometry ([`SwipeLayout`]) that a toolkit paints.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_swipe::prelude::*;
//!
//! struct Cell;
//! impl RowContent for Cell {
//!     fn layout_content_view(&mut self, _frame: Rect) {}
//! }
//!
//! let mut table = SwipeTable::new();
//! let id = table.insert(Cell);
//! let row = table.row_mut(id).unwrap();
//! row.set_size(Size::new(320.0, 64.0));
//! row.set_right_buttons(
//!     vec![
//!         ActionButton::new("Delete", Color::RED).with_width(80.0),
//!         ActionButton::new("More", Color::LIGHT_GRAY).with_width(80.0),
//!     ],
//!     SwipeSettings::with_transition(SwipeTransition::Border),
//! );
//!
//! let t0 = Instant::now();
//! let sample = |x: f32, ms: u64, phase| PointerSample::new(1, Point::new(x, 30.0), t0 + Duration::from_millis(ms), phase);
//! table.handle_pointer(id, &sample(300.0, 0, PointerPhase::Began)).unwrap();
//! table.handle_pointer(id, &sample(250.0, 100, PointerPhase::Moved)).unwrap();
//! table.handle_pointer(id, &sample(180.0, 200, PointerPhase::Moved)).unwrap();
//! table.handle_pointer(id, &sample(180.0, 400, PointerPhase::Ended)).unwrap();
//! while table.tick(Duration::from_millis(16)) {}
//!
//! let row = table.row_mut(id).unwrap();
//! assert_eq!(row.controller().offset(), -160.0);
//! assert_eq!(row.layout().buttons.len(), 2);
//! ```

pub mod action_sheet;
pub mod animation;
pub mod config;
mod error;
pub mod geometry;
pub mod gesture;
pub mod swipe;

pub use horizon_swipe_core::{
    logging, ConnectionGuard, ConnectionId, PerfSpan, Signal, SignalError, ThreadAffinity,
};

pub use config::{DirectionConfig, SwipeConfig};
pub use error::{SwipeError, SwipeResult};
pub use geometry::{Color, EdgeInsets, Point, Rect, Size};
pub use swipe::{
    ActionButton, ExpansionSettings, RevealState, RowContent, RowHandle, RowId, SwipeController,
    SwipeDelegate, SwipeDirection, SwipeLayout, SwipeRow, SwipeSettings, SwipeTable,
    SwipeTransition,
};

/// Commonly used types.
pub mod prelude {
    pub use crate::action_sheet::{ActionSheet, SheetChoice, SheetTicket};
    pub use crate::config::SwipeConfig;
    pub use crate::error::{SwipeError, SwipeResult};
    pub use crate::geometry::{Color, EdgeInsets, Point, Rect, Size};
    pub use crate::gesture::{PointerPhase, PointerSample};
    pub use crate::swipe::{
        ActionButton, ExpansionSettings, RevealState, RowContent, RowEvent, RowHandle, RowId,
        SwipeController, SwipeDelegate, SwipeDirection, SwipeLayout, SwipePhase, SwipeRow,
        SwipeSettings, SwipeTable, SwipeTransition, TapOutcome,
    };
    pub use horizon_swipe_core::Signal;
}
