//! Per-frame geometry of a swiped row.
//!
//! The controller turns its offset into a [`SwipeLayout`]: where the
//! content sits and where each revealed button is drawn. Positions are
//! computed along the swipe axis as distances from the row border the
//! buttons are attached to, then mapped to row coordinates.

use horizon_swipe_core::PerfSpan;

use crate::animation::{Easing, ease};
use crate::geometry::{Color, Point, Rect, Size};
use crate::swipe::button::ActionButton;
use crate::swipe::settings::{ExpansionSettings, SwipeSettings, SwipeTransition};
use crate::swipe::state::SwipeDirection;

/// Rotation in degrees of a fully hidden button under [`SwipeTransition::Rotate3d`].
const ROTATE_START_DEGREES: f32 = 90.0;

/// Geometry of one visible button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonFrame {
    /// Index of the button in its group (0 is nearest the row border).
    pub index: usize,
    /// Full frame of the button in row coordinates.
    pub frame: Rect,
    /// Visible part of `frame`.
    pub clip: Rect,
    /// Rotation around the button's inner edge, in degrees.
    pub rotation: f32,
    /// Whether this is the expanded button.
    pub expanded: bool,
    /// Background to paint.
    pub background_color: Color,
}

/// Geometry of a row for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeLayout {
    /// Frame of the consumer's content, translated by the offset.
    pub content_frame: Rect,
    /// Signed horizontal translation of the content.
    pub content_offset: f32,
    /// Direction whose buttons are shown.
    pub direction: SwipeDirection,
    /// Area uncovered by the content, in row coordinates.
    pub revealed: Rect,
    /// Fill painted behind the buttons in `revealed`.
    pub background_color: Color,
    /// Visible buttons in paint order (the expanded button last).
    pub buttons: Vec<ButtonFrame>,
}

impl SwipeLayout {
    /// Layout of a closed row.
    pub fn closed(row_size: Size) -> Self {
        Self {
            content_frame: Rect::new(0.0, 0.0, row_size.width, row_size.height),
            content_offset: 0.0,
            direction: SwipeDirection::None,
            revealed: Rect::ZERO,
            background_color: Color::TRANSPARENT,
            buttons: Vec::new(),
        }
    }

    /// Whether any button is visible.
    pub fn is_revealed(&self) -> bool {
        !self.buttons.is_empty()
    }

    /// The button drawn topmost at `point`.
    pub fn button_at(&self, point: Point) -> Option<usize> {
        self.buttons
            .iter()
            .rev()
            .find(|button| button.clip.contains(point))
            .map(|button| button.index)
    }

    /// Frame of the button at `index`, if visible.
    pub fn button(&self, index: usize) -> Option<&ButtonFrame> {
        self.buttons.iter().find(|button| button.index == index)
    }
}

/// Widths the group lays out with, after the equal-width policy.
pub(crate) fn effective_widths(buttons: &[ActionButton], allows_different_width: bool) -> Vec<f32> {
    if allows_different_width {
        buttons.iter().map(ActionButton::width).collect()
    } else {
        let widest = buttons.iter().map(ActionButton::width).fold(0.0, f32::max);
        vec![widest; buttons.len()]
    }
}

/// Distance from the border to the inner edge of the group.
pub(crate) fn group_width(widths: &[f32], inset: f32) -> f32 {
    if widths.is_empty() {
        0.0
    } else {
        (widths.iter().sum::<f32>() + inset).max(0.0)
    }
}

/// Everything needed to lay out one side.
pub(crate) struct LayoutParams<'a> {
    pub row_size: Size,
    pub offset: f32,
    pub direction: SwipeDirection,
    pub buttons: &'a [ActionButton],
    pub settings: &'a SwipeSettings,
    pub expansion: &'a ExpansionSettings,
    /// Expanded button, its expansion progress (0..=1) and whether it is
    /// still expanding rather than collapsing.
    pub expanded: Option<(usize, f32, bool)>,
}

/// Maps a span measured from the attached border to a row rectangle.
fn edge_rect(direction: SwipeDirection, row_size: Size, near: f32, far: f32) -> Rect {
    let width = (far - near).max(0.0);
    match direction {
        SwipeDirection::RightToLeft => Rect::new(row_size.width - far, 0.0, width, row_size.height),
        _ => Rect::new(near, 0.0, width, row_size.height),
    }
}

pub(crate) fn compute_layout(params: LayoutParams<'_>) -> SwipeLayout {
    let _perf = PerfSpan::new("swipe_layout");

    let LayoutParams {
        row_size,
        offset,
        direction,
        buttons,
        settings,
        expansion,
        expanded,
    } = params;

    let reveal = offset.abs();
    let revealed = edge_rect(direction, row_size, 0.0, reveal);
    let mut layout = SwipeLayout {
        content_frame: Rect::new(offset, 0.0, row_size.width, row_size.height),
        content_offset: offset,
        direction,
        revealed: Rect::ZERO,
        background_color: settings.background_color.unwrap_or(Color::TRANSPARENT),
        buttons: Vec::with_capacity(buttons.len()),
    };

    if !direction.is_some() || reveal <= 0.0 || buttons.is_empty() {
        return layout;
    }
    layout.revealed = revealed;

    let widths = effective_widths(buttons, settings.allows_buttons_with_different_width);
    let inset = settings.offset;
    let group = group_width(&widths, inset);
    let progress = if group > 0.0 { (reveal / group).min(1.0) } else { 1.0 };
    let overscroll = (reveal - group).max(0.0);
    let innermost = widths.len() - 1;

    let mut start = inset;
    let mut expanded_frame = None;
    for (index, (&width, button)) in widths.iter().zip(buttons).enumerate() {
        let span = if index == innermost { width + overscroll } else { width };

        let mut rotation = 0.0;
        let mut extra_clip = None;
        let near = match settings.transition {
            SwipeTransition::Border => start * progress,
            SwipeTransition::Drag => start + (reveal - group).min(0.0),
            SwipeTransition::ClipCenter => {
                let near = start * progress;
                let center = near + span / 2.0;
                let visible = span * progress;
                extra_clip = Some(edge_rect(
                    direction,
                    row_size,
                    center - visible / 2.0,
                    center + visible / 2.0,
                ));
                near
            }
            SwipeTransition::StaticOuter => start,
            SwipeTransition::Rotate3d => {
                rotation = ROTATE_START_DEGREES * (1.0 - ease(Easing::EaseOut, progress));
                start
            }
        };
        start += width;

        let frame = edge_rect(direction, row_size, near, near + span);

        if let Some((expanded_index, amount, expanding)) = expanded {
            if expanded_index == index {
                let frame = frame.lerp(revealed, amount.clamp(0.0, 1.0));
                expanded_frame = Some(ButtonFrame {
                    index,
                    frame,
                    clip: frame.intersect(&revealed).unwrap_or(frame),
                    rotation: 0.0,
                    expanded: expanding,
                    background_color: expansion
                        .expansion_color
                        .unwrap_or_else(|| button.background_color()),
                });
                continue;
            }
        }

        let clip = frame
            .intersect(&revealed)
            .and_then(|clip| match extra_clip {
                Some(extra) => clip.intersect(&extra),
                None => Some(clip),
            });
        if let Some(clip) = clip {
            layout.buttons.push(ButtonFrame {
                index,
                frame,
                clip,
                rotation,
                expanded: false,
                background_color: button.background_color(),
            });
        }
    }

    if let Some(frame) = expanded_frame {
        layout.buttons.push(frame);
    }

    layout
}
