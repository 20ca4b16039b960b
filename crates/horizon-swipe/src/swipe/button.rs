//! Action buttons revealed behind a swiped row.
//!
//! An [`ActionButton`] is a stateless description: title, optional icon,
//! colors, padding and width, plus the callback invoked on activation. The
//! host paints it at the frame the controller computes; the controller
//! calls [`ActionButton::activate`] when it is tapped or triggered by
//! expansion.

use std::fmt;
use std::sync::Arc;

use crate::geometry::{Color, EdgeInsets};
use crate::swipe::state::RowHandle;

/// Default horizontal padding on each side of the title.
pub const DEFAULT_BUTTON_PADDING: f32 = 10.0;

/// Default content (title/icon) width when the host has not measured it.
pub const DEFAULT_CONTENT_WIDTH: f32 = 40.0;

/// Button activation callback.
///
/// Receives the row the button belongs to and returns whether the panel
/// should hide automatically afterwards.
pub type ButtonCallback = Arc<dyn Fn(&RowHandle) -> bool + Send + Sync>;

/// One swipe action.
#[derive(Clone)]
pub struct ActionButton {
    title: String,
    icon: Option<String>,
    background_color: Color,
    title_color: Color,
    padding: EdgeInsets,
    content_width: f32,
    callback: Option<ButtonCallback>,
}

impl fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionButton")
            .field("title", &self.title)
            .field("icon", &self.icon)
            .field("background_color", &self.background_color)
            .field("width", &self.width())
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl ActionButton {
    /// Create a button with a title and background color.
    pub fn new(title: impl Into<String>, background_color: Color) -> Self {
        Self {
            title: title.into(),
            icon: None,
            background_color,
            title_color: Color::WHITE,
            padding: EdgeInsets::horizontal(DEFAULT_BUTTON_PADDING),
            content_width: DEFAULT_CONTENT_WIDTH,
            callback: None,
        }
    }

    /// Set the activation callback.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RowHandle) -> bool + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Set the icon resource name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the padding around the title/icon.
    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the measured width of the title/icon.
    pub fn with_content_width(mut self, width: f32) -> Self {
        self.content_width = width.max(0.0);
        self
    }

    /// Set the total button width, padding included.
    pub fn with_width(mut self, width: f32) -> Self {
        self.content_width = (width - self.padding.horizontal_total()).max(0.0);
        self
    }

    /// Set the title color.
    pub fn with_title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// The button title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The icon resource name.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The background color.
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Change the background color.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// The title color.
    pub fn title_color(&self) -> Color {
        self.title_color
    }

    /// The padding around the title/icon.
    pub fn padding(&self) -> EdgeInsets {
        self.padding
    }

    /// Total width, padding included.
    pub fn width(&self) -> f32 {
        self.content_width + self.padding.horizontal_total()
    }

    /// Whether a callback is attached.
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Invoke the callback for `row`.
    ///
    /// Returns the callback's auto-hide answer, or `true` without a callback.
    pub fn activate(&self, row: &RowHandle) -> bool {
        match &self.callback {
            Some(callback) => callback(row),
            None => true,
        }
    }
}

static_assertions::assert_impl_all!(ActionButton: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_width() {
        let button = ActionButton::new("Delete", Color::RED);
        assert_eq!(button.width(), 60.0);
        assert_eq!(button.with_width(120.0).width(), 120.0);
    }

    #[test]
    fn test_activate_without_callback_auto_hides() {
        let button = ActionButton::new("More", Color::LIGHT_GRAY);
        assert!(!button.has_callback());
        assert!(button.activate(&RowHandle::default()));
    }

    #[test]
    fn test_activate_returns_callback_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let button = ActionButton::new("Trash", Color::RED).with_callback(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            false
        });

        assert!(!button.activate(&RowHandle::default()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_padding_changes_width() {
        let button = ActionButton::new("Flag", Color::GRAY)
            .with_content_width(30.0)
            .with_padding(EdgeInsets::horizontal(15.0));
        assert_eq!(button.width(), 60.0);
    }
}
