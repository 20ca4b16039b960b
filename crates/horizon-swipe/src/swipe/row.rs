//! A swipeable row: consumer content composed with a swipe controller.
//!
//! [`SwipeRow`] feeds pointer samples through a [`SwipeGestureRecognizer`]
//! into its [`SwipeController`], and lays out the consumer's
//! [`RowContent`] at the translated frame every time it is asked for a
//! layout.
//!
//! # Example
//!
//! ```
//! use horizon_swipe::prelude::*;
//!
//! struct Label(Rect);
//!
//! impl RowContent for Label {
//!     fn layout_content_view(&mut self, frame: Rect) {
//!         self.0 = frame;
//!     }
//! }
//!
//! let mut row = SwipeRow::new(RowHandle::default(), Label(Rect::ZERO));
//! row.set_right_buttons(
//!     vec![ActionButton::new("Delete", Color::RED).with_width(80.0)],
//!     SwipeSettings::default(),
//! );
//! row.set_size(Size::new(320.0, 60.0));
//! row.show_swipe(SwipeDirection::RightToLeft, false);
//!
//! let layout = row.layout();
//! assert_eq!(layout.content_offset, -80.0);
//! assert_eq!(row.content().0.left(), -80.0);
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::geometry::{Rect, Size};
use crate::gesture::{GestureConfig, PointerSample, SwipeGesture, SwipeGestureRecognizer};
use crate::swipe::button::ActionButton;
use crate::swipe::controller::{SwipeCompletion, SwipeController, SwipeDelegate, TapOutcome};
use crate::swipe::layout::SwipeLayout;
use crate::swipe::settings::{ExpansionSettings, SwipeSettings};
use crate::swipe::state::{RowHandle, SwipeDirection};

/// Consumer-provided content hosted inside a swipeable row.
pub trait RowContent {
    /// Place the content at `frame` (row coordinates, already translated).
    fn layout_content_view(&mut self, frame: Rect);

    /// New data was bound to the row.
    fn on_bind_content(&mut self, _row: &RowHandle) {}

    /// The row is about to be reused for other data.
    fn on_reuse(&mut self) {}
}

/// What a pointer sample did to the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    /// Nothing happened (sample absorbed by the recognizer).
    None,
    /// A horizontal drag started.
    DragStarted,
    /// The drag moved.
    Dragged,
    /// The drag was released.
    Released,
    /// The drag was cancelled.
    Cancelled,
    /// The movement was vertical; the host list scrolls.
    Ceded,
    /// A tap was routed.
    Tap(TapOutcome),
}

/// A list row that reveals action buttons when swiped.
#[derive(Debug)]
pub struct SwipeRow<C> {
    recognizer: SwipeGestureRecognizer,
    controller: SwipeController,
    content: C,
    size: Size,
    /// `on_reuse` already ran for the current binding.
    released: bool,
}

impl<C: RowContent> SwipeRow<C> {
    /// Create a closed row around `content`.
    pub fn new(handle: RowHandle, content: C) -> Self {
        Self {
            recognizer: SwipeGestureRecognizer::new(),
            controller: SwipeController::new(handle),
            content,
            size: Size::ZERO,
            released: false,
        }
    }

    /// The row handle passed to callbacks.
    pub fn handle(&self) -> RowHandle {
        self.controller.handle()
    }

    /// The hosted content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the hosted content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Take the hosted content out of the row.
    pub fn into_content(self) -> C {
        self.content
    }

    /// The swipe state machine.
    pub fn controller(&self) -> &SwipeController {
        &self.controller
    }

    /// Mutable access to the swipe state machine.
    pub fn controller_mut(&mut self) -> &mut SwipeController {
        &mut self.controller
    }

    /// Set the gesture thresholds; the commit distance also goes to the controller.
    pub fn set_gesture_config(&mut self, config: GestureConfig) {
        self.controller.set_commit_distance(config.commit_distance);
        self.recognizer.set_config(config);
    }

    /// Set the consumer hooks.
    pub fn set_delegate(&mut self, delegate: Option<Arc<dyn SwipeDelegate>>) {
        self.controller.set_delegate(delegate);
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Classify a pointer sample without applying it.
    pub fn classify(&mut self, sample: &PointerSample) -> Option<SwipeGesture> {
        self.recognizer.process(sample)
    }

    /// Apply a classified gesture to the controller.
    pub fn apply_gesture(&mut self, gesture: SwipeGesture) -> RowEvent {
        match gesture {
            SwipeGesture::Began { translation } => {
                self.controller.begin_drag(translation);
                RowEvent::DragStarted
            }
            SwipeGesture::Changed { translation, .. } => {
                self.controller.drag_to(translation);
                RowEvent::Dragged
            }
            SwipeGesture::Ended {
                translation,
                velocity,
            } => {
                self.controller.end_drag(translation, velocity);
                RowEvent::Released
            }
            SwipeGesture::Cancelled => {
                self.controller.cancel_drag();
                RowEvent::Cancelled
            }
            SwipeGesture::Ceded => RowEvent::Ceded,
            SwipeGesture::Tap { position } => RowEvent::Tap(self.controller.tap(position)),
        }
    }

    /// Feed one pointer sample.
    pub fn handle_pointer(&mut self, sample: &PointerSample) -> RowEvent {
        match self.classify(sample) {
            Some(gesture) => self.apply_gesture(gesture),
            None => RowEvent::None,
        }
    }

    /// Advance animations. Returns whether more ticks are needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.controller.tick(dt)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Current row size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the row.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.controller.set_row_size(size);
    }

    /// Compute this frame's geometry and place the content accordingly.
    pub fn layout(&mut self) -> SwipeLayout {
        let layout = self.controller.layout(self.size);
        self.content.layout_content_view(layout.content_frame);
        layout
    }

    /// Re-place the content at the current offset after its data changed.
    pub fn refresh_content_view(&mut self) {
        let offset = self.controller.offset();
        self.content
            .layout_content_view(Rect::new(offset, 0.0, self.size.width, self.size.height));
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Reuse the row for new data: close, drop buttons, notify the content.
    pub fn bind(&mut self, handle: RowHandle) {
        self.recognizer.reset();
        self.controller.reset_for_reuse(handle);
        if !self.released {
            self.content.on_reuse();
        }
        self.released = false;
        self.content.on_bind_content(&handle);
        self.refresh_content_view();
    }

    /// The row left the screen; it closes without animation.
    pub fn unbind(&mut self) {
        self.recognizer.reset();
        self.controller.hide_swipe(false);
        if !self.released {
            self.released = true;
            self.content.on_reuse();
        }
    }

    // =========================================================================
    // Swipe API
    // =========================================================================

    /// Assign the left group.
    pub fn set_left_buttons(&mut self, buttons: Vec<ActionButton>, settings: SwipeSettings) {
        self.controller.set_left_buttons(buttons, settings);
    }

    /// Assign the right group.
    pub fn set_right_buttons(&mut self, buttons: Vec<ActionButton>, settings: SwipeSettings) {
        self.controller.set_right_buttons(buttons, settings);
    }

    /// Set the left expansion.
    pub fn set_left_expansion(&mut self, expansion: ExpansionSettings) {
        self.controller.set_left_expansion(expansion);
    }

    /// Set the right expansion.
    pub fn set_right_expansion(&mut self, expansion: ExpansionSettings) {
        self.controller.set_right_expansion(expansion);
    }

    /// Close the panel.
    pub fn hide_swipe(&mut self, animated: bool) {
        self.controller.hide_swipe(animated);
    }

    /// Open the panel in `direction`.
    pub fn show_swipe(&mut self, direction: SwipeDirection, animated: bool) {
        self.controller.show_swipe(direction, animated);
    }

    /// Reveal `direction` and trigger its expansion button.
    pub fn expand_swipe(&mut self, direction: SwipeDirection, animated: bool) {
        self.controller.expand_swipe(direction, animated);
    }

    /// Move the panel to `offset`.
    pub fn set_swipe_offset(&mut self, offset: f32, animated: bool, completion: Option<SwipeCompletion>) {
        self.controller.set_swipe_offset(offset, animated, completion);
    }

    /// Rebuild the button groups.
    pub fn refresh_buttons(&mut self, using_delegate: bool) {
        self.controller.refresh_buttons(using_delegate);
    }
}
