//! A single-pending choice menu.
//!
//! Swipe actions such as "More" usually ask the user to pick one of a few
//! options. [`ActionSheet`] models that request/response exchange without
//! drawing anything: [`open`](ActionSheet::open) registers a one-shot
//! callback and returns a [`SheetTicket`]; the host shows the options and
//! calls [`resolve`](ActionSheet::resolve) with the ticket and the user's
//! choice. Only one request is pending at a time. Opening a new one cancels
//! the previous request, and resolving with an old ticket is an error.
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use horizon_swipe::action_sheet::{ActionSheet, SheetChoice};
//!
//! let mut sheet = ActionSheet::new("Options", ["Reply", "Forward"]);
//! let picked = Arc::new(Mutex::new(None));
//! let picked_clone = picked.clone();
//! let ticket = sheet.open(move |choice| *picked_clone.lock() = Some(choice));
//!
//! sheet.resolve(ticket, SheetChoice::Option(1)).unwrap();
//! assert_eq!(*picked.lock(), Some(SheetChoice::Option(1)));
//! assert!(sheet.resolve(ticket, SheetChoice::Cancel).is_err());
//! ```

use std::fmt;

use horizon_swipe_core::Signal;

use crate::error::{SwipeError, SwipeResult};

/// Identifies one `open` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetTicket(u64);

/// The user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetChoice {
    /// The option at this index was picked.
    Option(usize),
    /// The sheet was dismissed.
    Cancel,
}

type ChoiceCallback = Box<dyn FnOnce(SheetChoice) + Send>;

struct Pending {
    ticket: SheetTicket,
    callback: ChoiceCallback,
}

/// A titled list of options answered at most once per request.
pub struct ActionSheet {
    title: String,
    options: Vec<String>,
    cancel_label: String,
    pending: Option<Pending>,
    next_ticket: u64,
    /// Emitted with every delivered choice.
    pub finished: Signal<SheetChoice>,
}

impl fmt::Debug for ActionSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSheet")
            .field("title", &self.title)
            .field("options", &self.options)
            .field("pending", &self.pending.as_ref().map(|p| p.ticket))
            .finish()
    }
}

impl ActionSheet {
    /// Create a sheet with a title and options.
    pub fn new<I, S>(title: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            options: options.into_iter().map(Into::into).collect(),
            cancel_label: "Cancel".to_owned(),
            pending: None,
            next_ticket: 0,
            finished: Signal::new(),
        }
    }

    /// Change the label of the dismiss entry.
    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    /// The title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The options, in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The dismiss label.
    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    /// Whether a request is waiting for an answer.
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending request's ticket.
    pub fn pending_ticket(&self) -> Option<SheetTicket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    /// Start a request. A request still pending is cancelled first.
    pub fn open<F>(&mut self, on_choice: F) -> SheetTicket
    where
        F: FnOnce(SheetChoice) + Send + 'static,
    {
        if let Some(previous) = self.pending.take() {
            tracing::debug!(target: "horizon_swipe::action_sheet", ticket = previous.ticket.0, "action sheet request superseded");
            self.deliver(previous, SheetChoice::Cancel);
        }
        self.next_ticket += 1;
        let ticket = SheetTicket(self.next_ticket);
        self.pending = Some(Pending {
            ticket,
            callback: Box::new(on_choice),
        });
        ticket
    }

    /// Answer the request identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::StaleTicket`] if `ticket` is not the pending
    /// request, and [`SwipeError::InvalidChoice`] if the option index is out
    /// of range (the request stays pending).
    pub fn resolve(&mut self, ticket: SheetTicket, choice: SheetChoice) -> SwipeResult<()> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                tracing::warn!(target: "horizon_swipe::action_sheet", ticket = ticket.0, "stale action sheet ticket");
                return Err(SwipeError::StaleTicket);
            }
        }
        if let SheetChoice::Option(index) = choice {
            if index >= self.options.len() {
                return Err(SwipeError::InvalidChoice(index));
            }
        }
        if let Some(pending) = self.pending.take() {
            self.deliver(pending, choice);
        }
        Ok(())
    }

    /// Dismiss the pending request, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.deliver(pending, SheetChoice::Cancel);
        }
    }

    fn deliver(&self, pending: Pending, choice: SheetChoice) {
        (pending.callback)(choice);
        self.finished.emit(choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<SheetChoice>>>, impl Fn() -> ChoiceCallback) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let make = move || -> ChoiceCallback {
            let log = log_clone.clone();
            Box::new(move |choice| log.lock().push(choice))
        };
        (log, make)
    }

    #[test]
    fn test_resolve_delivers_once() {
        let mut sheet = ActionSheet::new("Options", ["Reply", "Flag"]);
        let (log, make) = recorder();
        let ticket = sheet.open(make());

        assert!(sheet.is_open());
        sheet.resolve(ticket, SheetChoice::Option(0)).unwrap();
        assert!(!sheet.is_open());
        assert!(matches!(
            sheet.resolve(ticket, SheetChoice::Option(0)),
            Err(SwipeError::StaleTicket)
        ));
        assert_eq!(*log.lock(), vec![SheetChoice::Option(0)]);
    }

    #[test]
    fn test_open_supersedes_pending_request() {
        let mut sheet = ActionSheet::new("Options", ["Reply"]);
        let (log, make) = recorder();
        let first = sheet.open(make());
        let second = sheet.open(make());

        assert_ne!(first, second);
        assert!(sheet.resolve(first, SheetChoice::Option(0)).is_err());
        sheet.resolve(second, SheetChoice::Option(0)).unwrap();
        assert_eq!(*log.lock(), vec![SheetChoice::Cancel, SheetChoice::Option(0)]);
    }

    #[test]
    fn test_out_of_range_choice_keeps_request() {
        let mut sheet = ActionSheet::new("Options", ["Reply"]);
        let (log, make) = recorder();
        let ticket = sheet.open(make());

        assert!(matches!(
            sheet.resolve(ticket, SheetChoice::Option(3)),
            Err(SwipeError::InvalidChoice(3))
        ));
        assert_eq!(sheet.pending_ticket(), Some(ticket));
        sheet.cancel();
        assert_eq!(*log.lock(), vec![SheetChoice::Cancel]);
    }

    #[test]
    fn test_finished_signal() {
        let mut sheet = ActionSheet::new("Options", ["Reply"]);
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        sheet.finished.connect(move |_| *count_clone.lock() += 1);

        let ticket = sheet.open(|_| {});
        sheet.resolve(ticket, SheetChoice::Cancel).unwrap();
        assert_eq!(*count.lock(), 1);
    }
}
