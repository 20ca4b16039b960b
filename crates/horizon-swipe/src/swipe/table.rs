//! Host-list adapter owning swipeable rows.
//!
//! [`SwipeTable`] stands between the host's list and its rows. It owns each
//! [`SwipeRow`] under a [`RowId`], forwards the list's reuse notifications
//! ([`bind`](SwipeTable::bind) / [`unbind`](SwipeTable::unbind)) and removal,
//! and enforces the single-open policy: unless multiple swipes are allowed,
//! starting a drag or showing a panel on one row closes every other row
//! immediately. A tap or vertical drag on another row closes the open one
//! with animation; the tap is swallowed unless
//! [`SwipeConfig::touch_on_dismiss_swipe`] is set.

use std::sync::Arc;
use std::time::Duration;

use horizon_swipe_core::ThreadAffinity;
use slotmap::SlotMap;

use crate::config::SwipeConfig;
use crate::error::{SwipeError, SwipeResult};
use crate::gesture::{PointerSample, SwipeGesture};
use crate::swipe::controller::{SwipeDelegate, TapOutcome};
use crate::swipe::row::{RowContent, RowEvent, SwipeRow};
use crate::swipe::state::{RowHandle, RowId, SwipeDirection};

/// Owns the swipeable rows of one list.
pub struct SwipeTable<C> {
    rows: SlotMap<RowId, SwipeRow<C>>,
    config: SwipeConfig,
    delegate: Option<Arc<dyn SwipeDelegate>>,
    next_binding: u64,
    thread: ThreadAffinity,
}

impl<C> std::fmt::Debug for SwipeTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeTable")
            .field("rows", &self.rows.len())
            .field("allows_multiple_swipe", &self.config.allows_multiple_swipe)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

impl<C: RowContent> Default for SwipeTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RowContent> SwipeTable<C> {
    /// Create an empty table with default settings.
    pub fn new() -> Self {
        Self::with_config(SwipeConfig::default())
    }

    /// Create an empty table whose rows start from `config`.
    pub fn with_config(config: SwipeConfig) -> Self {
        Self {
            rows: SlotMap::with_key(),
            config,
            delegate: None,
            next_binding: 0,
            thread: ThreadAffinity::current(),
        }
    }

    /// Defaults applied to new and rebound rows.
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Whether several rows may be open at once.
    pub fn allows_multiple_swipe(&self) -> bool {
        self.config.allows_multiple_swipe
    }

    /// Allow or forbid several open rows.
    pub fn set_allows_multiple_swipe(&mut self, allows: bool) {
        self.config.allows_multiple_swipe = allows;
    }

    /// Whether a tap that dismissed another row still reaches the tapped row.
    pub fn touch_on_dismiss_swipe(&self) -> bool {
        self.config.touch_on_dismiss_swipe
    }

    /// Let a dismissing tap through to the tapped row, or swallow it.
    pub fn set_touch_on_dismiss_swipe(&mut self, deliver: bool) {
        self.config.touch_on_dismiss_swipe = deliver;
    }

    /// Set the consumer hooks for every row.
    pub fn set_delegate(&mut self, delegate: Option<Arc<dyn SwipeDelegate>>) {
        self.thread.debug_assert_same_thread();
        for row in self.rows.values_mut() {
            row.set_delegate(delegate.clone());
        }
        self.delegate = delegate;
    }

    fn next_handle(&mut self, row: RowId) -> RowHandle {
        self.next_binding += 1;
        RowHandle::new(row, self.next_binding)
    }

    fn apply_defaults(config: &SwipeConfig, row: &mut SwipeRow<C>) {
        row.set_gesture_config(config.gesture.clone());
        let controller = row.controller_mut();
        if let Some(settings) = controller.settings_mut(SwipeDirection::LeftToRight) {
            *settings = config.left.swipe.clone();
        }
        if let Some(settings) = controller.settings_mut(SwipeDirection::RightToLeft) {
            *settings = config.right.swipe.clone();
        }
        controller.set_left_expansion(config.left.expansion.clone());
        controller.set_right_expansion(config.right.expansion.clone());
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Add a row hosting `content`.
    pub fn insert(&mut self, content: C) -> RowId {
        self.thread.debug_assert_same_thread();
        let binding = self.next_binding + 1;
        self.next_binding = binding;
        let id = self
            .rows
            .insert_with_key(|id| SwipeRow::new(RowHandle::new(id, binding), content));
        if let Some(row) = self.rows.get_mut(id) {
            Self::apply_defaults(&self.config, row);
            row.set_delegate(self.delegate.clone());
        }
        tracing::debug!(target: "horizon_swipe::table", ?id, "row inserted");
        id
    }

    /// Remove a row, cancelling its animation without settling it.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::UnknownRow`] if `id` is not in the table.
    pub fn remove_row(&mut self, id: RowId) -> SwipeResult<C> {
        self.thread.debug_assert_same_thread();
        let mut row = self.rows.remove(id).ok_or_else(|| unknown(id))?;
        row.controller_mut().cancel();
        tracing::debug!(target: "horizon_swipe::table", ?id, "row removed");
        Ok(row.into_content())
    }

    /// Borrow a row.
    pub fn row(&self, id: RowId) -> Option<&SwipeRow<C>> {
        self.rows.get(id)
    }

    /// Mutably borrow a row.
    pub fn row_mut(&mut self, id: RowId) -> Option<&mut SwipeRow<C>> {
        self.rows.get_mut(id)
    }

    fn try_row_mut(&mut self, id: RowId) -> SwipeResult<&mut SwipeRow<C>> {
        self.rows.get_mut(id).ok_or_else(|| unknown(id))
    }

    /// Whether `id` is in the table.
    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains_key(id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &SwipeRow<C>)> {
        self.rows.iter()
    }

    /// Rows that are not closed.
    pub fn open_rows(&self) -> Vec<RowId> {
        self.rows
            .iter()
            .filter(|(_, row)| row.controller().phase().is_active())
            .map(|(id, _)| id)
            .collect()
    }

    // =========================================================================
    // Reuse
    // =========================================================================

    /// The list bound new data to the row.
    ///
    /// The row closes synchronously, forgets its buttons and returns to the
    /// table defaults. Handles captured before the call carry an older
    /// binding.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::UnknownRow`] if `id` is not in the table.
    pub fn bind(&mut self, id: RowId) -> SwipeResult<RowHandle> {
        self.thread.debug_assert_same_thread();
        if !self.rows.contains_key(id) {
            return Err(unknown(id));
        }
        let handle = self.next_handle(id);
        let config = self.config.clone();
        let row = self.try_row_mut(id)?;
        row.bind(handle);
        Self::apply_defaults(&config, row);
        tracing::debug!(target: "horizon_swipe::table", ?id, binding = handle.binding, "row bound");
        Ok(handle)
    }

    /// The row left the screen and waits for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::UnknownRow`] if `id` is not in the table.
    pub fn unbind(&mut self, id: RowId) -> SwipeResult<()> {
        self.thread.debug_assert_same_thread();
        self.try_row_mut(id)?.unbind();
        tracing::debug!(target: "horizon_swipe::table", ?id, "row unbound");
        Ok(())
    }

    // =========================================================================
    // Input and animation
    // =========================================================================

    /// Feed a pointer sample to a row.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::UnknownRow`] if `id` is not in the table.
    pub fn handle_pointer(&mut self, id: RowId, sample: &PointerSample) -> SwipeResult<RowEvent> {
        self.thread.debug_assert_same_thread();
        let gesture = self.try_row_mut(id)?.classify(sample);
        let Some(gesture) = gesture else {
            return Ok(RowEvent::None);
        };
        match gesture {
            SwipeGesture::Began { .. } => {
                self.close_others(id, false);
            }
            SwipeGesture::Tap { .. } => {
                if self.close_others(id, true) && !self.config.touch_on_dismiss_swipe {
                    return Ok(RowEvent::Tap(TapOutcome::Closed));
                }
            }
            SwipeGesture::Ceded => {
                self.close_others(id, true);
            }
            _ => {}
        }
        Ok(self.try_row_mut(id)?.apply_gesture(gesture))
    }

    /// Advance every row's animations. Returns whether any row still animates.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut animating = false;
        for row in self.rows.values_mut() {
            animating |= row.tick(dt);
        }
        animating
    }

    /// Close every row except `keep`. Returns whether any row was open.
    fn close_others(&mut self, keep: RowId, animated: bool) -> bool {
        if self.config.allows_multiple_swipe {
            return false;
        }
        let mut closed = false;
        for (id, row) in self.rows.iter_mut() {
            if id != keep && row.controller().phase().is_active() {
                tracing::debug!(target: "horizon_swipe::table", ?id, animated, "closing other open row");
                row.hide_swipe(animated);
                closed = true;
            }
        }
        closed
    }

    // =========================================================================
    // Programmatic control
    // =========================================================================

    /// Open a row's panel, closing the others first.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::UnknownRow`] if `id` is not in the table.
    pub fn show_swipe(&mut self, id: RowId, direction: SwipeDirection, animated: bool) -> SwipeResult<()> {
        self.thread.debug_assert_same_thread();
        if !self.rows.contains_key(id) {
            return Err(unknown(id));
        }
        self.close_others(id, false);
        self.try_row_mut(id)?.show_swipe(direction, animated);
        Ok(())
    }

    /// Reveal a row and trigger its expansion button, closing the others first.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::UnknownRow`] if `id` is not in the table.
    pub fn expand_swipe(&mut self, id: RowId, direction: SwipeDirection, animated: bool) -> SwipeResult<()> {
        self.thread.debug_assert_same_thread();
        if !self.rows.contains_key(id) {
            return Err(unknown(id));
        }
        self.close_others(id, false);
        self.try_row_mut(id)?.expand_swipe(direction, animated);
        Ok(())
    }

    /// Close a row's panel.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::UnknownRow`] if `id` is not in the table.
    pub fn hide_swipe(&mut self, id: RowId, animated: bool) -> SwipeResult<()> {
        self.thread.debug_assert_same_thread();
        self.try_row_mut(id)?.hide_swipe(animated);
        Ok(())
    }

    /// Close every row (e.g. when the list starts scrolling).
    pub fn hide_all(&mut self, animated: bool) {
        for row in self.rows.values_mut() {
            row.hide_swipe(animated);
        }
    }
}

fn unknown(id: RowId) -> SwipeError {
    tracing::warn!(target: "horizon_swipe::table", ?id, "unknown row");
    SwipeError::UnknownRow(id)
}
