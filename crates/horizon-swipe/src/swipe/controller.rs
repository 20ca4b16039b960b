//! The swipe state machine.
//!
//! A [`SwipeController`] owns everything a swipeable row knows about its
//! reveal: the signed offset, the locked direction, both button groups and
//! their settings, the in-flight animation and the expansion state. It is
//! driven by gesture phases, programmatic calls and [`tick`] from the
//! host's frame clock, and produces a [`SwipeLayout`] on demand.
//!
//! # Phases
//!
//! ```text
//! Closed --drag committed--> Dragging --release--> Animating --done--> Open | Closed
//!   ^                                                                   |
//!   +------------------ tap / hide / drag back / reuse -----------------+
//! ```
//!
//! Offsets are signed: positive reveals the left group
//! ([`SwipeDirection::LeftToRight`]), negative the right group.
//!
//! [`tick`]: SwipeController::tick

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use horizon_swipe_core::{Signal, ThreadAffinity};

use crate::animation::{AnimationStep, Easing, Tween};
use crate::geometry::{Point, Size};
use crate::gesture::DEFAULT_COMMIT_DISTANCE;
use crate::swipe::button::ActionButton;
use crate::swipe::layout::{LayoutParams, SwipeLayout, compute_layout, effective_widths, group_width};
use crate::swipe::settings::{ExpansionSettings, SwipeSettings};
use crate::swipe::state::{RevealState, RowHandle, SwipeDirection, SwipePhase, SwipeState};

/// Completion run when a programmatic offset change settles.
pub type SwipeCompletion = Box<dyn FnOnce() + Send>;

/// Consumer hooks consulted by the controller.
///
/// Every method has a default, so implementors only override what they
/// need. Hooks receive the [`RowHandle`] of the row they concern.
pub trait SwipeDelegate: Send + Sync {
    /// Whether swiping `direction` is allowed right now.
    fn can_swipe(&self, _row: &RowHandle, _direction: SwipeDirection) -> bool {
        true
    }

    /// Build the buttons for `direction`, adjusting its settings in place.
    ///
    /// Called lazily the first time a direction is revealed after a bind or
    /// refresh, and only when no buttons were assigned explicitly.
    fn swipe_buttons(
        &self,
        _row: &RowHandle,
        _direction: SwipeDirection,
        _settings: &mut SwipeSettings,
        _expansion: &mut ExpansionSettings,
    ) -> Vec<ActionButton> {
        Vec::new()
    }

    /// A button was tapped or triggered by expansion.
    ///
    /// Returns whether the panel should hide. Combined with the button's own
    /// callback: the panel hides only when both agree.
    fn button_tapped(
        &self,
        _row: &RowHandle,
        _index: usize,
        _direction: SwipeDirection,
        _from_expansion: bool,
    ) -> bool {
        true
    }
}

/// What a tap on the row did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// A button was hit and activated.
    Activated {
        /// Index of the button in its group.
        index: usize,
        /// Whether the panel started hiding afterwards.
        auto_hide: bool,
    },
    /// The tap closed the open panel.
    Closed,
    /// The panel is revealed and swallowed the tap.
    Consumed,
    /// Nothing is revealed; the host should handle the tap.
    PassThrough,
}

/// One direction's configuration and button cache.
#[derive(Default)]
struct SideGroup {
    settings: SwipeSettings,
    expansion: ExpansionSettings,
    /// Buttons set explicitly by the consumer.
    assigned: Vec<ActionButton>,
    /// Buttons in use; `None` until first needed.
    loaded: Option<Vec<ActionButton>>,
}

impl SideGroup {
    fn buttons(&self) -> &[ActionButton] {
        self.loaded.as_deref().unwrap_or(&[])
    }

    fn widths(&self) -> Vec<f32> {
        effective_widths(
            self.buttons(),
            self.settings.allows_buttons_with_different_width,
        )
    }

    fn group_width(&self) -> f32 {
        group_width(&self.widths(), self.settings.offset)
    }

    fn expansion_index(&self) -> Option<usize> {
        self.expansion
            .button_index
            .filter(|&index| index < self.buttons().len())
    }

    fn discard(&mut self) {
        self.assigned.clear();
        self.loaded = None;
    }
}

struct DragState {
    start_offset: f32,
    committed: bool,
    /// Directions refused during this gesture.
    refused_left: bool,
    refused_right: bool,
}

struct OffsetAnimation {
    tween: Tween,
    /// Expansion button to fire when the animation completes.
    trigger: Option<usize>,
    completion: Option<SwipeCompletion>,
}

struct ExpansionVisual {
    index: usize,
    tween: Tween,
}

impl ExpansionVisual {
    fn is_expanding(&self) -> bool {
        self.tween.to() > 0.0
    }
}

/// State machine of one swipeable row.
pub struct SwipeController {
    handle: RowHandle,
    delegate: Option<Arc<dyn SwipeDelegate>>,
    left: SideGroup,
    right: SideGroup,
    phase: SwipePhase,
    offset: f32,
    direction: SwipeDirection,
    row_size: Size,
    commit_distance: f32,
    drag: Option<DragState>,
    animation: Option<OffsetAnimation>,
    expansion: Option<ExpansionVisual>,
    /// `will_begin_swiping` was emitted and `did_end_swiping` is owed.
    announced: bool,
    gesture_active: bool,
    reveal: RevealState,
    thread: ThreadAffinity,

    /// Emitted when the offset leaves zero.
    pub will_begin_swiping: Signal<SwipeDirection>,
    /// Emitted when the row returns to closed.
    pub did_end_swiping: Signal<SwipeDirection>,
    /// Emitted after a button's callback ran: `(index, direction)`.
    pub button_activated: Signal<(usize, SwipeDirection)>,
    /// Emitted when the reveal state changes: `(state, gesture_active)`.
    pub state_changed: Signal<(RevealState, bool)>,
}

impl fmt::Debug for SwipeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeController")
            .field("handle", &self.handle)
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .field("direction", &self.direction)
            .field("has_delegate", &self.delegate.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for SwipeController {
    fn default() -> Self {
        Self::new(RowHandle::default())
    }
}

impl SwipeController {
    /// Create a closed controller for `handle`.
    pub fn new(handle: RowHandle) -> Self {
        Self {
            handle,
            delegate: None,
            left: SideGroup::default(),
            right: SideGroup::default(),
            phase: SwipePhase::Closed,
            offset: 0.0,
            direction: SwipeDirection::None,
            row_size: Size::ZERO,
            commit_distance: DEFAULT_COMMIT_DISTANCE,
            drag: None,
            animation: None,
            expansion: None,
            announced: false,
            gesture_active: false,
            reveal: RevealState::None,
            thread: ThreadAffinity::current(),
            will_begin_swiping: Signal::new(),
            did_end_swiping: Signal::new(),
            button_activated: Signal::new(),
            state_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The row this controller belongs to.
    pub fn handle(&self) -> RowHandle {
        self.handle
    }

    /// Current phase.
    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Current signed offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Locked direction, `None` while closed.
    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    /// Snapshot of the state.
    pub fn state(&self) -> SwipeState {
        SwipeState {
            offset: self.offset,
            direction: self.direction,
            is_dragging: self.drag.is_some(),
            is_animating: self.animation.is_some(),
        }
    }

    /// Last reported reveal state.
    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    /// Whether the user's finger is driving the row.
    pub fn is_swipe_gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Whether `tick` still has work to do.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some() || self.expansion.as_ref().is_some_and(|e| !e.tween.is_finished())
    }

    /// Index of the expanded button, if any.
    pub fn expanded_button(&self) -> Option<usize> {
        self.expansion
            .as_ref()
            .filter(|e| e.is_expanding())
            .map(|e| e.index)
    }

    /// Distance a drag must cover before a direction is locked.
    pub fn commit_distance(&self) -> f32 {
        self.commit_distance
    }

    /// Change the commit distance.
    pub fn set_commit_distance(&mut self, distance: f32) {
        self.commit_distance = distance.max(0.0);
    }

    /// Set the consumer hooks.
    pub fn set_delegate(&mut self, delegate: Option<Arc<dyn SwipeDelegate>>) {
        self.thread.debug_assert_same_thread();
        self.delegate = delegate;
    }

    /// Record the row size used for fill targets and tap hit testing.
    pub fn set_row_size(&mut self, size: Size) {
        self.row_size = size;
    }

    /// Settings of one direction.
    pub fn settings(&self, direction: SwipeDirection) -> Option<&SwipeSettings> {
        self.side(direction).map(|side| &side.settings)
    }

    /// Mutable settings of one direction.
    pub fn settings_mut(&mut self, direction: SwipeDirection) -> Option<&mut SwipeSettings> {
        self.side_mut(direction).map(|side| &mut side.settings)
    }

    /// Expansion settings of one direction.
    pub fn expansion(&self, direction: SwipeDirection) -> Option<&ExpansionSettings> {
        self.side(direction).map(|side| &side.expansion)
    }

    /// Buttons currently loaded for a direction.
    pub fn buttons(&self, direction: SwipeDirection) -> &[ActionButton] {
        self.side(direction).map(SideGroup::buttons).unwrap_or(&[])
    }

    /// Width of a direction's loaded group, inset included.
    pub fn group_width(&self, direction: SwipeDirection) -> f32 {
        self.side(direction).map(SideGroup::group_width).unwrap_or(0.0)
    }

    /// Largest drag magnitude allowed in `direction`.
    pub fn overscroll_limit(&self, direction: SwipeDirection) -> f32 {
        let Some(side) = self.side(direction) else {
            return 0.0;
        };
        let ratio = if side.expansion_index().is_some() {
            (side.expansion.threshold - 1.0).max(0.0) + side.settings.max_overscroll_ratio
        } else {
            side.settings.max_overscroll_ratio
        };
        side.group_width() * (1.0 + ratio)
    }

    fn side(&self, direction: SwipeDirection) -> Option<&SideGroup> {
        match direction {
            SwipeDirection::LeftToRight => Some(&self.left),
            SwipeDirection::RightToLeft => Some(&self.right),
            SwipeDirection::None => None,
        }
    }

    fn side_mut(&mut self, direction: SwipeDirection) -> Option<&mut SideGroup> {
        match direction {
            SwipeDirection::LeftToRight => Some(&mut self.left),
            SwipeDirection::RightToLeft => Some(&mut self.right),
            SwipeDirection::None => None,
        }
    }

    // =========================================================================
    // Buttons
    // =========================================================================

    /// Assign the left group (revealed by a left-to-right swipe).
    pub fn set_left_buttons(&mut self, buttons: Vec<ActionButton>, settings: SwipeSettings) {
        self.assign_buttons(SwipeDirection::LeftToRight, buttons, settings);
    }

    /// Assign the right group (revealed by a right-to-left swipe).
    pub fn set_right_buttons(&mut self, buttons: Vec<ActionButton>, settings: SwipeSettings) {
        self.assign_buttons(SwipeDirection::RightToLeft, buttons, settings);
    }

    /// Set the expansion of the left group.
    pub fn set_left_expansion(&mut self, expansion: ExpansionSettings) {
        self.left.expansion = expansion;
    }

    /// Set the expansion of the right group.
    pub fn set_right_expansion(&mut self, expansion: ExpansionSettings) {
        self.right.expansion = expansion;
    }

    fn assign_buttons(
        &mut self,
        direction: SwipeDirection,
        buttons: Vec<ActionButton>,
        settings: SwipeSettings,
    ) {
        self.thread.debug_assert_same_thread();
        let shown = self.direction == direction;
        if shown {
            self.close_now();
        }
        if let Some(side) = self.side_mut(direction) {
            side.assigned = buttons;
            side.settings = settings;
            side.loaded = None;
        }
    }

    /// Load a direction's buttons if needed; returns whether any exist.
    fn ensure_loaded(&mut self, direction: SwipeDirection) -> bool {
        let handle = self.handle;
        let delegate = self.delegate.clone();
        let Some(side) = self.side_mut(direction) else {
            return false;
        };
        if side.loaded.is_none() {
            let buttons = if !side.assigned.is_empty() {
                side.assigned.clone()
            } else if let Some(delegate) = delegate {
                let buttons =
                    delegate.swipe_buttons(&handle, direction, &mut side.settings, &mut side.expansion);
                if buttons.is_empty() {
                    tracing::warn!(
                        target: "horizon_swipe::controller",
                        ?direction,
                        "button factory returned no buttons"
                    );
                }
                buttons
            } else {
                Vec::new()
            };
            side.loaded = Some(buttons);
        }
        !side.buttons().is_empty()
    }

    /// Whether a drag may reveal `direction`.
    fn allows(&mut self, direction: SwipeDirection) -> bool {
        let enabled = self
            .side(direction)
            .is_some_and(|side| side.settings.enable_swipe);
        if !enabled {
            return false;
        }
        if let Some(delegate) = &self.delegate {
            if !delegate.can_swipe(&self.handle, direction) {
                return false;
            }
        }
        self.ensure_loaded(direction)
    }

    /// Drop loaded buttons so they are rebuilt.
    ///
    /// With `using_delegate`, explicitly assigned buttons are dropped as well
    /// and the delegate factory supplies the next groups. A shown group is
    /// reloaded immediately.
    pub fn refresh_buttons(&mut self, using_delegate: bool) {
        self.thread.debug_assert_same_thread();
        for side in [&mut self.left, &mut self.right] {
            side.loaded = None;
            if using_delegate {
                side.assigned.clear();
            }
        }

        let direction = self.direction;
        if !direction.is_some() {
            return;
        }
        if !self.ensure_loaded(direction) {
            self.close_now();
            return;
        }
        if let Some(expansion) = &self.expansion {
            if self.side(direction).and_then(SideGroup::expansion_index) != Some(expansion.index) {
                self.expansion = None;
            }
        }
        if matches!(self.phase, SwipePhase::Open(_)) && self.expansion.is_none() {
            let target = direction.sign() * self.group_width(direction);
            self.set_offset_value(target);
        }
        self.update_reveal();
    }

    // =========================================================================
    // Gesture input
    // =========================================================================

    /// A horizontal drag started with `translation` since pointer down.
    pub fn begin_drag(&mut self, translation: f32) {
        self.thread.debug_assert_same_thread();

        // Grabbing a moving row stops it where it is.
        if let Some(animation) = self.animation.take() {
            tracing::debug!(
                target: "horizon_swipe::animation",
                offset = self.offset,
                dropped_trigger = animation.trigger.is_some(),
                "animation interrupted by drag"
            );
        }

        if self.offset == 0.0 && self.direction.is_some() {
            self.close_now();
        }
        let committed = self.offset != 0.0;
        self.drag = Some(DragState {
            start_offset: self.offset,
            committed,
            refused_left: false,
            refused_right: false,
        });
        self.phase = SwipePhase::Dragging;
        self.gesture_active = true;
        tracing::debug!(target: "horizon_swipe::controller", offset = self.offset, "drag began");
        self.drag_to(translation);
    }

    /// The drag moved to `translation` since pointer down.
    pub fn drag_to(&mut self, translation: f32) {
        let Some(drag) = &self.drag else {
            return;
        };
        let start = drag.start_offset;
        let raw = start + translation;

        if !drag.committed {
            if translation.abs() < self.commit_distance {
                return;
            }
            let direction = SwipeDirection::from_offset(raw);
            let refused = match direction {
                SwipeDirection::LeftToRight => drag.refused_left,
                SwipeDirection::RightToLeft => drag.refused_right,
                SwipeDirection::None => true,
            };
            if refused {
                return;
            }
            if !self.allows(direction) {
                if let Some(drag) = &mut self.drag {
                    match direction {
                        SwipeDirection::LeftToRight => drag.refused_left = true,
                        _ => drag.refused_right = true,
                    }
                }
                tracing::debug!(target: "horizon_swipe::controller", ?direction, "swipe refused");
                return;
            }
            if let Some(drag) = &mut self.drag {
                drag.committed = true;
            }
            self.direction = direction;
            tracing::debug!(target: "horizon_swipe::controller", ?direction, "direction committed");
        }

        let direction = self.direction;
        let sign = direction.sign();
        let magnitude = (raw * sign).max(0.0);
        let magnitude = self.constrain(direction, magnitude);
        self.set_offset_value(sign * magnitude);
        self.update_expansion(magnitude);
        self.update_reveal();

        tracing::trace!(
            target: "horizon_swipe::controller",
            translation,
            offset = self.offset,
            "drag"
        );
    }

    /// Apply elastic damping and the overscroll cap to a drag magnitude.
    fn constrain(&self, direction: SwipeDirection, magnitude: f32) -> f32 {
        let Some(side) = self.side(direction) else {
            return 0.0;
        };
        let group = side.group_width();
        let limit = self.overscroll_limit(direction);
        let damped = if side.expansion_index().is_some() || magnitude <= group {
            magnitude
        } else {
            group + (magnitude - group) * side.settings.damping
        };
        damped.min(limit)
    }

    fn update_expansion(&mut self, magnitude: f32) {
        let Some(side) = self.side(self.direction) else {
            return;
        };
        let Some(index) = side.expansion_index() else {
            return;
        };
        let past = magnitude >= side.expansion.threshold * side.group_width();
        let duration = side.expansion.animation_duration;

        let expanding = self.expansion.as_ref().map(ExpansionVisual::is_expanding);
        match (expanding, past) {
            (None, true) => {
                tracing::debug!(target: "horizon_swipe::controller", index, "button expanded");
                self.expansion = Some(ExpansionVisual {
                    index,
                    tween: Tween::new(0.0, 1.0, duration, Easing::EaseOut),
                });
            }
            (Some(false), true) => {
                if let Some(visual) = &mut self.expansion {
                    visual.tween.retarget(1.0);
                }
            }
            (Some(true), false) => {
                tracing::debug!(target: "horizon_swipe::controller", index, "button collapsed");
                self.collapse_expansion();
            }
            _ => {}
        }
    }

    /// The pointer was released with `velocity` (points per second).
    pub fn end_drag(&mut self, translation: f32, velocity: f32) {
        self.thread.debug_assert_same_thread();
        self.drag_to(translation);
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.gesture_active = false;

        let direction = self.direction;
        if !drag.committed || self.offset == 0.0 || !direction.is_some() {
            self.close_now();
            return;
        }

        if let Some(index) = self.expanded_button() {
            self.trigger(direction, index);
            return;
        }

        let (group, threshold, fling) = match self.side(direction) {
            Some(side) => (
                side.group_width(),
                side.settings.threshold,
                side.settings.fling_velocity,
            ),
            None => return,
        };
        let open = if velocity.abs() >= fling {
            velocity * direction.sign() > 0.0
        } else {
            group > 0.0 && self.offset.abs() / group >= threshold
        };
        tracing::debug!(
            target: "horizon_swipe::controller",
            offset = self.offset,
            velocity,
            open,
            "drag released"
        );

        if open {
            self.animate_side(direction, direction.sign() * group, None, None);
        } else {
            self.animate_side(direction, 0.0, None, None);
        }
    }

    /// The platform cancelled the drag; the row returns to closed.
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            self.gesture_active = false;
            tracing::debug!(target: "horizon_swipe::controller", "drag cancelled");
            let direction = self.direction;
            if direction.is_some() && self.offset != 0.0 {
                self.animate_side(direction, 0.0, None, None);
            } else {
                self.close_now();
            }
        }
    }

    /// Route a tap at `position` (row coordinates).
    pub fn tap(&mut self, position: Point) -> TapOutcome {
        self.thread.debug_assert_same_thread();
        let direction = self.direction;
        if !direction.is_some() || self.offset == 0.0 {
            return TapOutcome::PassThrough;
        }

        // The expansion button fires when the fill settles.
        if self.animation.as_ref().is_some_and(|animation| animation.trigger.is_some()) {
            tracing::debug!(target: "horizon_swipe::controller", "tap ignored during expansion trigger");
            return TapOutcome::Consumed;
        }

        if let Some(index) = self.layout(self.row_size).button_at(position) {
            let auto_hide = self.activate_button(direction, index, false);
            if auto_hide {
                self.hide_swipe(true);
            }
            return TapOutcome::Activated { index, auto_hide };
        }

        let toggle = self
            .side(direction)
            .is_some_and(|side| side.settings.toggle_swipe_on_tap);
        if toggle {
            self.hide_swipe(true);
            TapOutcome::Closed
        } else {
            TapOutcome::Consumed
        }
    }

    /// Run a button's callback and the delegate hook; returns the combined auto-hide.
    fn activate_button(&mut self, direction: SwipeDirection, index: usize, from_expansion: bool) -> bool {
        let Some(button) = self.buttons(direction).get(index).cloned() else {
            return false;
        };
        tracing::debug!(
            target: "horizon_swipe::controller",
            index,
            title = button.title(),
            from_expansion,
            "button activated"
        );
        let hide = button.activate(&self.handle);
        self.button_activated.emit((index, direction));
        let delegate_hide = self
            .delegate
            .as_ref()
            .is_none_or(|delegate| delegate.button_tapped(&self.handle, index, direction, from_expansion));
        hide && delegate_hide
    }

    /// Fire the expansion button of `direction`.
    fn trigger(&mut self, direction: SwipeDirection, index: usize) {
        let Some(side) = self.side(direction) else {
            return;
        };
        let fill = side.expansion.fill_on_trigger;
        let group = side.group_width();
        let fill_width = self.row_size.width.max(group * side.expansion.threshold);
        let sign = direction.sign();

        tracing::debug!(target: "horizon_swipe::controller", index, fill, "expansion triggered");
        if fill {
            self.animate_side(direction, sign * fill_width, Some(index), None);
        } else {
            let auto_hide = self.activate_button(direction, index, true);
            self.collapse_expansion();
            let target = if auto_hide { 0.0 } else { sign * group };
            let duration = self
                .side(direction)
                .map(|side| side.settings.animation_duration)
                .unwrap_or_default();
            self.animate_to(target, duration, Easing::EaseOutBack, None, None);
        }
    }

    fn collapse_expansion(&mut self) {
        if let Some(visual) = &mut self.expansion {
            if visual.is_expanding() {
                visual.tween.retarget(0.0);
            }
        }
    }

    // =========================================================================
    // Programmatic control
    // =========================================================================

    /// Close the panel. Safe in any state; repeated calls are no-ops.
    pub fn hide_swipe(&mut self, animated: bool) {
        self.thread.debug_assert_same_thread();
        if self.phase == SwipePhase::Closed && self.offset == 0.0 {
            return;
        }
        if let SwipePhase::Animating { target, .. } = self.phase {
            if target == 0.0 && animated {
                return;
            }
        }
        self.drag = None;
        self.gesture_active = false;

        let direction = self.direction;
        if animated && direction.is_some() && self.offset != 0.0 {
            self.collapse_expansion();
            self.animate_side(direction, 0.0, None, None);
        } else {
            self.close_now();
        }
    }

    /// Open the panel in `direction`. No-op when that side has no buttons.
    pub fn show_swipe(&mut self, direction: SwipeDirection, animated: bool) {
        self.thread.debug_assert_same_thread();
        if !self.prepare_reveal(direction) {
            return;
        }
        let target = direction.sign() * self.group_width(direction);
        if animated {
            self.animate_side(direction, target, None, None);
        } else {
            self.jump_to(target);
        }
    }

    /// Reveal `direction` fully and trigger its expansion button.
    pub fn expand_swipe(&mut self, direction: SwipeDirection, animated: bool) {
        self.thread.debug_assert_same_thread();
        if !self.prepare_reveal(direction) {
            return;
        }
        let Some(side) = self.side(direction) else {
            return;
        };
        let Some(index) = side.expansion_index() else {
            tracing::debug!(target: "horizon_swipe::controller", ?direction, "no expansion button");
            return;
        };
        let mut tween = if animated {
            Tween::new(0.0, 1.0, side.expansion.animation_duration, Easing::EaseOut)
        } else {
            Tween::new(0.0, 1.0, Duration::ZERO, Easing::EaseOut)
        };
        if !animated {
            tween.advance(Duration::ZERO);
            let limit = direction.sign() * self.overscroll_limit(direction);
            self.expansion = Some(ExpansionVisual { index, tween });
            self.jump_to(limit);
        } else {
            self.expansion = Some(ExpansionVisual { index, tween });
        }
        self.trigger(direction, index);
        if !animated {
            self.finish_animation_now();
        }
    }

    /// Move the panel to `offset`, optionally animated.
    ///
    /// `completion` runs once the offset is reached. The magnitude is capped
    /// at the direction's overscroll limit, and an offset toward a side
    /// without buttons is treated as zero.
    pub fn set_swipe_offset(&mut self, offset: f32, animated: bool, completion: Option<SwipeCompletion>) {
        self.thread.debug_assert_same_thread();
        let direction = SwipeDirection::from_offset(offset);
        let target = if direction.is_some() && self.prepare_reveal(direction) {
            direction.sign() * offset.abs().min(self.overscroll_limit(direction))
        } else {
            0.0
        };

        if animated && target != self.offset {
            let side = if direction.is_some() { direction } else { self.direction };
            let (duration, easing) = self
                .side(side)
                .map(|s| (s.settings.animation_duration, s.settings.easing))
                .unwrap_or((Duration::ZERO, Easing::default()));
            self.animate_to(target, duration, easing, None, completion);
        } else {
            if target == 0.0 {
                self.hide_swipe(false);
            } else {
                self.jump_to(target);
            }
            if let Some(completion) = completion {
                completion();
            }
        }
    }

    /// Make sure `direction` can be shown; closes the other side first.
    fn prepare_reveal(&mut self, direction: SwipeDirection) -> bool {
        if !direction.is_some() || !self.ensure_loaded(direction) {
            tracing::debug!(target: "horizon_swipe::controller", ?direction, "nothing to reveal");
            return false;
        }
        self.drag = None;
        self.gesture_active = false;
        if self.direction.is_some() && self.direction != direction {
            self.close_now();
        }
        true
    }

    fn set_phase_direction(&mut self, direction: SwipeDirection) {
        if !self.direction.is_some() {
            self.direction = direction;
        }
    }

    // =========================================================================
    // Animation
    // =========================================================================

    fn animate_side(
        &mut self,
        direction: SwipeDirection,
        target: f32,
        trigger: Option<usize>,
        completion: Option<SwipeCompletion>,
    ) {
        let (duration, easing) = self
            .side(direction)
            .map(|side| (side.settings.animation_duration, side.settings.easing))
            .unwrap_or((Duration::ZERO, Easing::default()));
        self.animate_to(target, duration, easing, trigger, completion);
    }

    fn animate_to(
        &mut self,
        target: f32,
        duration: Duration,
        easing: Easing,
        trigger: Option<usize>,
        completion: Option<SwipeCompletion>,
    ) {
        if let Some(previous) = self.animation.take() {
            tracing::debug!(
                target: "horizon_swipe::animation",
                target = previous.tween.to(),
                "animation superseded"
            );
            self.settle(previous, false);
        }

        if target != 0.0 {
            self.set_phase_direction(SwipeDirection::from_offset(target));
        }
        tracing::debug!(
            target: "horizon_swipe::animation",
            from = self.offset,
            to = target,
            ?duration,
            "animation started"
        );
        self.phase = SwipePhase::Animating {
            target,
            trigger: trigger.is_some(),
        };
        self.animation = Some(OffsetAnimation {
            tween: Tween::new(self.offset, target, duration, easing),
            trigger,
            completion,
        });
        self.update_reveal();
    }

    /// Advance animations by `dt`. Returns whether more ticks are needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.thread.debug_assert_same_thread();

        if let Some(visual) = &mut self.expansion {
            visual.tween.advance(dt);
            if visual.tween.is_finished() && !visual.is_expanding() {
                self.expansion = None;
                self.update_reveal();
            }
        }

        if let Some(animation) = &mut self.animation {
            match animation.tween.advance(dt) {
                AnimationStep::Running(value) => {
                    let value = self.no_flip(value);
                    self.set_offset_value(value);
                    self.update_reveal();
                }
                AnimationStep::Finished(_) => {
                    if let Some(animation) = self.animation.take() {
                        self.settle(animation, true);
                    }
                }
            }
        }

        self.is_animating()
    }

    /// Keep an animated value on the locked side of zero.
    fn no_flip(&self, value: f32) -> f32 {
        let sign = self.direction.sign();
        if sign != 0.0 && value * sign < 0.0 { 0.0 } else { value }
    }

    fn finish_animation_now(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.settle(animation, true);
        }
    }

    /// Apply an animation's end state; fires its trigger when `fire` is set.
    fn settle(&mut self, animation: OffsetAnimation, fire: bool) {
        let target = animation.tween.to();
        if target == 0.0 {
            self.close_now();
        } else {
            self.jump_to(target);
        }

        if fire {
            if let Some(index) = animation.trigger {
                let direction = self.direction;
                let auto_hide = self.activate_button(direction, index, true);
                if auto_hide {
                    self.hide_swipe(true);
                }
            }
        }

        if let Some(completion) = animation.completion {
            completion();
        }
    }

    // =========================================================================
    // State changes
    // =========================================================================

    fn set_offset_value(&mut self, offset: f32) {
        self.offset = offset;
        let direction = SwipeDirection::from_offset(offset);
        if direction.is_some() && !self.announced {
            self.announced = true;
            self.direction = direction;
            tracing::debug!(target: "horizon_swipe::controller", ?direction, "swipe began");
            self.will_begin_swiping.emit(direction);
        }
    }

    /// Place the panel at a non-zero offset and hold it open.
    fn jump_to(&mut self, offset: f32) {
        self.set_offset_value(offset);
        self.phase = SwipePhase::Open(self.direction);
        tracing::debug!(target: "horizon_swipe::controller", offset, "open");
        self.update_reveal();
    }

    /// Close immediately: no animation, no trigger.
    fn close_now(&mut self) {
        self.animation = None;
        self.drag = None;
        self.expansion = None;
        self.gesture_active = false;
        self.offset = 0.0;
        self.phase = SwipePhase::Closed;
        let direction = std::mem::take(&mut self.direction);
        if self.announced {
            self.announced = false;
            tracing::debug!(target: "horizon_swipe::controller", ?direction, "closed");
            self.did_end_swiping.emit(direction);
        }
        self.update_reveal();
    }

    fn update_reveal(&mut self) {
        let reveal = if self.offset == 0.0 || !self.direction.is_some() {
            RevealState::None
        } else if self.expanded_button().is_some() {
            RevealState::Expanding(self.direction)
        } else {
            RevealState::Swiping(self.direction)
        };
        if reveal != self.reveal {
            self.reveal = reveal;
            self.state_changed.emit((reveal, self.gesture_active));
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Force the row closed and forget its buttons for new content.
    ///
    /// Pending animations, triggers and completions are dropped.
    pub fn reset_for_reuse(&mut self, handle: RowHandle) {
        self.thread.debug_assert_same_thread();
        self.close_now();
        self.left.discard();
        self.right.discard();
        self.handle = handle;
    }

    /// Stop everything without settling; used when the row goes away.
    pub fn cancel(&mut self) {
        self.animation = None;
        self.drag = None;
        self.expansion = None;
        self.gesture_active = false;
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Geometry for the current frame.
    pub fn layout(&self, row_size: Size) -> SwipeLayout {
        let direction = self.direction;
        let Some(side) = self.side(direction) else {
            return SwipeLayout::closed(row_size);
        };
        let expanded = self
            .expansion
            .as_ref()
            .map(|visual| (visual.index, visual.tween.value(), visual.is_expanding()));
        compute_layout(LayoutParams {
            row_size,
            offset: self.offset,
            direction,
            buttons: side.buttons(),
            settings: &side.settings,
            expansion: &side.expansion,
            expanded,
        })
    }
}

static_assertions::assert_impl_all!(SwipeController: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;
    use crate::swipe::settings::SwipeTransition;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FRAME: Duration = Duration::from_millis(16);

    fn settle(controller: &mut SwipeController) {
        for _ in 0..200 {
            if !controller.tick(FRAME) {
                break;
            }
        }
    }

    fn right_buttons(controller: &mut SwipeController) {
        controller.set_right_buttons(
            vec![
                ActionButton::new("Delete", Color::RED).with_width(60.0),
                ActionButton::new("More", Color::GRAY).with_width(60.0),
            ],
            SwipeSettings::default(),
        );
    }

    fn drag(controller: &mut SwipeController, to: f32, velocity: f32) {
        controller.begin_drag(to.signum() * 11.0);
        controller.drag_to(to / 2.0);
        controller.end_drag(to, velocity);
    }

    #[test]
    fn test_release_above_threshold_opens() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        drag(&mut controller, -96.0, 0.0);
        settle(&mut controller);

        assert_eq!(controller.phase(), SwipePhase::Open(SwipeDirection::RightToLeft));
        assert_eq!(controller.offset(), -120.0);
    }

    #[test]
    fn test_release_below_threshold_closes() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        drag(&mut controller, -40.0, 0.0);
        settle(&mut controller);

        assert_eq!(controller.phase(), SwipePhase::Closed);
        assert_eq!(controller.offset(), 0.0);
        assert_eq!(controller.direction(), SwipeDirection::None);
    }

    #[test]
    fn test_fling_overrides_threshold() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        drag(&mut controller, -30.0, -1200.0);
        settle(&mut controller);
        assert_eq!(controller.offset(), -120.0);

        // Flinging back closes even though the offset is past the threshold.
        controller.begin_drag(0.0);
        controller.end_drag(10.0, 1500.0);
        settle(&mut controller);
        assert_eq!(controller.phase(), SwipePhase::Closed);
    }

    #[test]
    fn test_commit_distance_dead_zone() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        controller.begin_drag(-5.0);
        assert_eq!(controller.offset(), 0.0);
        assert_eq!(controller.direction(), SwipeDirection::None);

        controller.drag_to(-20.0);
        assert_eq!(controller.offset(), -20.0);
        assert_eq!(controller.direction(), SwipeDirection::RightToLeft);
    }

    #[test]
    fn test_direction_without_buttons_is_noop() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        drag(&mut controller, 100.0, 0.0);
        settle(&mut controller);
        assert_eq!(controller.phase(), SwipePhase::Closed);
        assert_eq!(controller.offset(), 0.0);
    }

    #[test]
    fn test_sign_never_flips_while_dragging() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        controller.begin_drag(-20.0);
        controller.drag_to(50.0);
        assert_eq!(controller.offset(), 0.0);
        assert_eq!(controller.direction(), SwipeDirection::RightToLeft);
    }

    #[test]
    fn test_overscroll_is_bounded() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        let limit = controller.overscroll_limit(SwipeDirection::RightToLeft);
        assert_eq!(limit, 0.0);

        controller.begin_drag(-20.0);
        let limit = controller.overscroll_limit(SwipeDirection::RightToLeft);
        assert_eq!(limit, 150.0);
        for translation in [-100.0, -200.0, -400.0, -2000.0] {
            controller.drag_to(translation);
            assert!(controller.offset().abs() <= limit);
        }
        assert_eq!(controller.offset(), -150.0);
    }

    #[test]
    fn test_damping_beyond_group() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        controller.begin_drag(-20.0);
        controller.drag_to(-140.0);
        assert_eq!(controller.offset(), -130.0);
    }

    #[test]
    fn test_hide_twice_equals_once() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        let ended = Arc::new(AtomicUsize::new(0));
        let ended_clone = ended.clone();
        controller.did_end_swiping.connect(move |_| {
            ended_clone.fetch_add(1, Ordering::SeqCst);
        });

        controller.show_swipe(SwipeDirection::RightToLeft, false);
        controller.hide_swipe(true);
        controller.hide_swipe(true);
        settle(&mut controller);
        controller.hide_swipe(true);

        assert_eq!(controller.phase(), SwipePhase::Closed);
        assert_eq!(ended.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_show_and_hide_without_animation() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        controller.show_swipe(SwipeDirection::RightToLeft, false);
        assert_eq!(controller.offset(), -120.0);
        assert_eq!(controller.reveal_state(), RevealState::Swiping(SwipeDirection::RightToLeft));

        controller.hide_swipe(false);
        assert_eq!(controller.phase(), SwipePhase::Closed);
        assert_eq!(controller.reveal_state(), RevealState::None);
    }

    #[test]
    fn test_show_side_without_buttons_is_noop() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        controller.show_swipe(SwipeDirection::LeftToRight, true);
        assert_eq!(controller.phase(), SwipePhase::Closed);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_tap_outside_buttons_closes() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        controller.set_row_size(Size::new(320.0, 60.0));
        controller.show_swipe(SwipeDirection::RightToLeft, false);

        assert_eq!(controller.tap(Point::new(50.0, 30.0)), TapOutcome::Closed);
        settle(&mut controller);
        assert_eq!(controller.phase(), SwipePhase::Closed);
        assert_eq!(controller.tap(Point::new(50.0, 30.0)), TapOutcome::PassThrough);
    }

    #[test]
    fn test_tap_without_toggle_is_consumed() {
        let mut controller = SwipeController::default();
        controller.set_right_buttons(
            vec![ActionButton::new("Delete", Color::RED).with_width(60.0)],
            SwipeSettings {
                toggle_swipe_on_tap: false,
                ..SwipeSettings::default()
            },
        );
        controller.set_row_size(Size::new(320.0, 60.0));
        controller.show_swipe(SwipeDirection::RightToLeft, false);

        assert_eq!(controller.tap(Point::new(50.0, 30.0)), TapOutcome::Consumed);
        assert_eq!(controller.offset(), -60.0);
    }

    #[test]
    fn test_button_returning_false_stays_open() {
        let mut controller = SwipeController::default();
        controller.set_right_buttons(
            vec![ActionButton::new("Trash", Color::RED).with_width(120.0).with_callback(|_| false)],
            SwipeSettings::default(),
        );
        controller.set_row_size(Size::new(320.0, 60.0));
        controller.show_swipe(SwipeDirection::RightToLeft, false);

        let outcome = controller.tap(Point::new(300.0, 30.0));
        assert_eq!(outcome, TapOutcome::Activated { index: 0, auto_hide: false });
        settle(&mut controller);
        assert_eq!(controller.phase(), SwipePhase::Open(SwipeDirection::RightToLeft));
    }

    #[test]
    fn test_delegate_vetoes_auto_hide() {
        struct KeepOpen;
        impl SwipeDelegate for KeepOpen {
            fn button_tapped(&self, _: &RowHandle, _: usize, _: SwipeDirection, _: bool) -> bool {
                false
            }
        }

        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        controller.set_delegate(Some(Arc::new(KeepOpen)));
        controller.set_row_size(Size::new(320.0, 60.0));
        controller.show_swipe(SwipeDirection::RightToLeft, false);

        let outcome = controller.tap(Point::new(300.0, 30.0));
        assert_eq!(outcome, TapOutcome::Activated { index: 0, auto_hide: false });
    }

    #[test]
    fn test_fill_trigger_fires_then_closes() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        let mut controller = SwipeController::default();
        controller.set_right_buttons(
            vec![
                ActionButton::new("Delete", Color::RED)
                    .with_width(60.0)
                    .with_callback(move |_| {
                        fired_clone.fetch_add(1, Ordering::SeqCst);
                        true
                    }),
                ActionButton::new("More", Color::GRAY).with_width(60.0),
            ],
            SwipeSettings::default(),
        );
        controller.set_right_expansion(ExpansionSettings::new(0, 1.1, true));
        controller.set_row_size(Size::new(320.0, 60.0));

        controller.begin_drag(-20.0);
        controller.drag_to(-138.0);
        assert_eq!(controller.offset(), -138.0);
        assert_eq!(controller.expanded_button(), Some(0));
        assert_eq!(controller.reveal_state(), RevealState::Expanding(SwipeDirection::RightToLeft));

        controller.end_drag(-138.0, 0.0);
        assert!(matches!(controller.phase(), SwipePhase::Animating { trigger: true, .. }));
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        settle(&mut controller);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(controller.phase(), SwipePhase::Closed);
    }

    #[test]
    fn test_tap_during_fill_does_not_fire_twice() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        let mut controller = SwipeController::default();
        controller.set_right_buttons(
            vec![
                ActionButton::new("Trash", Color::RED)
                    .with_width(60.0)
                    .with_callback(move |_| {
                        fired_clone.fetch_add(1, Ordering::SeqCst);
                        false
                    }),
                ActionButton::new("More", Color::GRAY).with_width(60.0),
            ],
            SwipeSettings::default(),
        );
        controller.set_right_expansion(ExpansionSettings::new(0, 1.1, true));
        controller.set_row_size(Size::new(320.0, 60.0));

        controller.begin_drag(-20.0);
        controller.drag_to(-138.0);
        controller.end_drag(-138.0, 0.0);
        controller.tick(Duration::from_millis(50));

        assert_eq!(controller.tap(Point::new(300.0, 30.0)), TapOutcome::Consumed);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        settle(&mut controller);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(controller.phase(), SwipePhase::Open(SwipeDirection::RightToLeft));
    }

    #[test]
    fn test_reversal_inside_dead_zone_commits_other_side() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        controller.set_left_buttons(
            vec![ActionButton::new("Read", Color::GRAY).with_width(80.0)],
            SwipeSettings::default(),
        );

        controller.begin_drag(-5.0);
        assert_eq!(controller.direction(), SwipeDirection::None);

        controller.drag_to(20.0);
        assert_eq!(controller.direction(), SwipeDirection::LeftToRight);
        assert_eq!(controller.offset(), 20.0);
    }

    #[test]
    fn test_refused_side_lets_gesture_commit_the_other() {
        struct RightOnly;
        impl SwipeDelegate for RightOnly {
            fn can_swipe(&self, _: &RowHandle, direction: SwipeDirection) -> bool {
                direction == SwipeDirection::RightToLeft
            }
        }

        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        controller.set_left_buttons(
            vec![ActionButton::new("Read", Color::GRAY).with_width(80.0)],
            SwipeSettings::default(),
        );
        controller.set_delegate(Some(Arc::new(RightOnly)));

        controller.begin_drag(15.0);
        assert_eq!(controller.direction(), SwipeDirection::None);
        assert_eq!(controller.offset(), 0.0);

        controller.drag_to(-20.0);
        assert_eq!(controller.direction(), SwipeDirection::RightToLeft);
        assert_eq!(controller.offset(), -20.0);
        assert_eq!(controller.phase(), SwipePhase::Dragging);
    }

    #[test]
    fn test_trigger_without_fill_fires_immediately() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        let mut controller = SwipeController::default();
        controller.set_left_buttons(
            vec![ActionButton::new("Read", Color::GRAY)
                .with_width(80.0)
                .with_callback(move |_| {
                    fired_clone.fetch_add(1, Ordering::SeqCst);
                    false
                })],
            SwipeSettings::default(),
        );
        controller.set_left_expansion(ExpansionSettings::new(0, 1.5, false));

        controller.begin_drag(20.0);
        controller.drag_to(130.0);
        controller.end_drag(130.0, 0.0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        settle(&mut controller);
        assert_eq!(controller.phase(), SwipePhase::Open(SwipeDirection::LeftToRight));
        assert_eq!(controller.offset(), 80.0);
    }

    #[test]
    fn test_superseded_trigger_does_not_fire() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        let mut controller = SwipeController::default();
        controller.set_right_buttons(
            vec![ActionButton::new("Delete", Color::RED)
                .with_width(100.0)
                .with_callback(move |_| {
                    fired_clone.fetch_add(1, Ordering::SeqCst);
                    true
                })],
            SwipeSettings::default(),
        );
        controller.set_right_expansion(ExpansionSettings::new(0, 1.2, true));
        controller.set_row_size(Size::new(320.0, 60.0));

        controller.begin_drag(-20.0);
        controller.end_drag(-125.0, 0.0);
        controller.tick(FRAME);
        controller.hide_swipe(true);
        settle(&mut controller);

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(controller.phase(), SwipePhase::Closed);
    }

    #[test]
    fn test_reuse_forces_closed_and_drops_buttons() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        let mut controller = SwipeController::default();
        controller.set_right_buttons(
            vec![ActionButton::new("Delete", Color::RED)
                .with_width(100.0)
                .with_callback(move |_| {
                    fired_clone.fetch_add(1, Ordering::SeqCst);
                    true
                })],
            SwipeSettings::default(),
        );
        controller.set_right_expansion(ExpansionSettings::new(0, 1.1, true));
        controller.set_row_size(Size::new(320.0, 60.0));

        controller.begin_drag(-20.0);
        controller.end_drag(-120.0, 0.0);
        assert!(controller.is_animating());

        controller.reset_for_reuse(RowHandle::new(Default::default(), 2));
        assert_eq!(controller.phase(), SwipePhase::Closed);
        assert_eq!(controller.offset(), 0.0);
        assert!(controller.buttons(SwipeDirection::RightToLeft).is_empty());

        settle(&mut controller);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(controller.handle().binding, 2);
    }

    #[test]
    fn test_delegate_factory_and_can_swipe() {
        struct Factory {
            calls: AtomicUsize,
        }
        impl SwipeDelegate for Factory {
            fn can_swipe(&self, _: &RowHandle, direction: SwipeDirection) -> bool {
                direction == SwipeDirection::LeftToRight
            }

            fn swipe_buttons(
                &self,
                _: &RowHandle,
                _: SwipeDirection,
                settings: &mut SwipeSettings,
                _: &mut ExpansionSettings,
            ) -> Vec<ActionButton> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                settings.transition = SwipeTransition::Drag;
                vec![ActionButton::new("Read", Color::GRAY).with_width(90.0)]
            }
        }

        let factory = Arc::new(Factory {
            calls: AtomicUsize::new(0),
        });
        let mut controller = SwipeController::default();
        controller.set_delegate(Some(factory.clone()));

        drag(&mut controller, -100.0, 0.0);
        assert_eq!(controller.phase(), SwipePhase::Closed);

        drag(&mut controller, 70.0, 0.0);
        settle(&mut controller);
        assert_eq!(controller.offset(), 90.0);
        assert_eq!(
            controller.settings(SwipeDirection::LeftToRight).map(|s| s.transition),
            Some(SwipeTransition::Drag)
        );

        controller.hide_swipe(false);
        drag(&mut controller, 70.0, 0.0);
        assert_eq!(factory.calls.load(Ordering::SeqCst), 1);

        controller.refresh_buttons(true);
        controller.hide_swipe(false);
        drag(&mut controller, 70.0, 0.0);
        assert_eq!(factory.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_set_swipe_offset_runs_completion() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        let done = Arc::new(Mutex::new(false));
        let done_clone = done.clone();

        controller.set_swipe_offset(
            -60.0,
            true,
            Some(Box::new(move || *done_clone.lock() = true)),
        );
        assert!(!*done.lock());
        settle(&mut controller);
        assert!(*done.lock());
        assert_eq!(controller.phase(), SwipePhase::Open(SwipeDirection::RightToLeft));
        assert_eq!(controller.offset(), -60.0);

        controller.set_swipe_offset(-1000.0, false, None);
        assert_eq!(controller.offset(), -150.0);

        controller.set_swipe_offset(0.0, false, None);
        assert_eq!(controller.phase(), SwipePhase::Closed);
    }

    #[test]
    fn test_expand_swipe_without_animation() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        let mut controller = SwipeController::default();
        controller.set_right_buttons(
            vec![ActionButton::new("Archive", Color::GRAY)
                .with_width(100.0)
                .with_callback(move |_| {
                    fired_clone.fetch_add(1, Ordering::SeqCst);
                    false
                })],
            SwipeSettings::default(),
        );
        controller.set_right_expansion(ExpansionSettings::new(0, 1.5, true));
        controller.set_row_size(Size::new(320.0, 60.0));

        controller.expand_swipe(SwipeDirection::RightToLeft, false);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(controller.offset(), -320.0);
        assert_eq!(controller.phase(), SwipePhase::Open(SwipeDirection::RightToLeft));
    }

    #[test]
    fn test_signals_report_lifecycle() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);
        let events = Arc::new(Mutex::new(Vec::new()));

        let log = events.clone();
        controller.will_begin_swiping.connect(move |dir| log.lock().push(format!("begin {dir:?}")));
        let log = events.clone();
        controller.did_end_swiping.connect(move |dir| log.lock().push(format!("end {dir:?}")));
        let log = events.clone();
        controller
            .state_changed
            .connect(move |(state, active)| log.lock().push(format!("{state:?} {active}")));

        controller.begin_drag(-20.0);
        controller.end_drag(-100.0, 0.0);
        settle(&mut controller);
        controller.hide_swipe(false);

        assert_eq!(
            *events.lock(),
            vec![
                "begin RightToLeft",
                "Swiping(RightToLeft) true",
                "end RightToLeft",
                "None false",
            ]
        );
    }

    #[test]
    fn test_drag_interrupts_animation() {
        let mut controller = SwipeController::default();
        right_buttons(&mut controller);

        controller.show_swipe(SwipeDirection::RightToLeft, true);
        controller.tick(Duration::from_millis(100));
        let grabbed = controller.offset();
        assert!(grabbed < 0.0 && grabbed > -120.0);

        controller.begin_drag(0.0);
        assert_eq!(controller.phase(), SwipePhase::Dragging);
        assert_eq!(controller.offset(), grabbed);
        assert!(!controller.is_animating());
    }
}
