//! Mail inbox example: swipe actions built by a delegate.
//!
//! Simulates a user swiping rows of an inbox. Left swipes toggle the read
//! flag; right swipes reveal Trash, Flag and More, where a long swipe trashes
//! the message and More asks for a choice through an action sheet.
//!
//! Run with: RUST_LOG=horizon_swipe=debug cargo run -p horizon-swipe --example mail_demo

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use horizon_swipe::prelude::*;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

const ROW_SIZE: Size = Size::new(375.0, 72.0);
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
struct Mail {
    from: &'static str,
    subject: &'static str,
    read: bool,
    flagged: bool,
}

/// Work requested from button callbacks, applied by the main loop.
#[derive(Debug, Clone, Copy)]
enum Command {
    ToggleRead(RowId),
    ToggleFlag(RowId),
    Trash(RowId),
    More(RowId),
}

struct MailCell {
    mail: Mail,
    frame: Rect,
}

impl RowContent for MailCell {
    fn layout_content_view(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn on_bind_content(&mut self, handle: &RowHandle) {
        tracing::info!(row = ?handle.row, subject = self.mail.subject, "bound");
    }
}

struct Inbox {
    read: Mutex<HashMap<RowId, bool>>,
    commands: Arc<Mutex<Vec<Command>>>,
}

impl Inbox {
    fn queue(&self, command: Command) -> impl Fn(&RowHandle) -> bool + Send + Sync + 'static {
        let commands = self.commands.clone();
        move |_| {
            commands.lock().push(command);
            true
        }
    }
}

impl SwipeDelegate for Inbox {
    fn swipe_buttons(
        &self,
        row: &RowHandle,
        direction: SwipeDirection,
        settings: &mut SwipeSettings,
        expansion: &mut ExpansionSettings,
    ) -> Vec<ActionButton> {
        let id = row.row;
        match direction {
            SwipeDirection::LeftToRight => {
                let read = self.read.lock().get(&id).copied().unwrap_or(false);
                settings.transition = SwipeTransition::ClipCenter;
                *expansion = ExpansionSettings::new(0, 1.5, false);
                let title = if read { "Unread" } else { "Read" };
                vec![ActionButton::new(title, Color::from_rgb(0.0, 0.48, 1.0))
                    .with_width(90.0)
                    .with_callback(self.queue(Command::ToggleRead(id)))]
            }
            SwipeDirection::RightToLeft => {
                settings.transition = SwipeTransition::Border;
                *expansion = ExpansionSettings::new(0, 1.5, true);
                vec![
                    ActionButton::new("Trash", Color::RED)
                        .with_icon("trash")
                        .with_callback(self.queue(Command::Trash(id))),
                    ActionButton::new("Flag", Color::from_rgb(1.0, 0.58, 0.0))
                        .with_callback(self.queue(Command::ToggleFlag(id))),
                    ActionButton::new("More", Color::LIGHT_GRAY)
                        .with_title_color(Color::BLACK)
                        .with_callback(self.queue(Command::More(id))),
                ]
            }
            SwipeDirection::None => Vec::new(),
        }
    }
}

/// Feeds a straight horizontal drag into the table, then lifts the finger.
fn swipe(table: &mut SwipeTable<MailCell>, id: RowId, from: f32, to: f32) -> SwipeResult<()> {
    let t0 = Instant::now();
    let at = |x: f32, ms: u64, phase| PointerSample::new(1, Point::new(x, 36.0), t0 + Duration::from_millis(ms), phase);

    table.handle_pointer(id, &at(from, 0, PointerPhase::Began))?;
    for step in 1..=10u64 {
        let x = from + (to - from) * step as f32 / 10.0;
        table.handle_pointer(id, &at(x, step * 30, PointerPhase::Moved))?;
    }
    table.handle_pointer(id, &at(to, 500, PointerPhase::Ended))?;
    run_animations(table);
    Ok(())
}

fn tap(table: &mut SwipeTable<MailCell>, id: RowId, x: f32) -> SwipeResult<RowEvent> {
    let t0 = Instant::now();
    table.handle_pointer(id, &PointerSample::new(1, Point::new(x, 36.0), t0, PointerPhase::Began))?;
    let event = table.handle_pointer(
        id,
        &PointerSample::new(1, Point::new(x, 36.0), t0 + Duration::from_millis(80), PointerPhase::Ended),
    )?;
    run_animations(table);
    Ok(event)
}

fn run_animations(table: &mut SwipeTable<MailCell>) {
    let mut frames = 0;
    while table.tick(FRAME) {
        frames += 1;
    }
    tracing::debug!(frames, "animations settled");
}

fn apply(table: &mut SwipeTable<MailCell>, inbox: &Inbox, sheet: &mut ActionSheet) -> SwipeResult<()> {
    let commands: Vec<Command> = std::mem::take(&mut *inbox.commands.lock());
    for command in commands {
        match command {
            Command::ToggleRead(id) => {
                if let Some(row) = table.row_mut(id) {
                    let mail = &mut row.content_mut().mail;
                    mail.read = !mail.read;
                    inbox.read.lock().insert(id, mail.read);
                    tracing::info!(subject = mail.subject, read = mail.read, "read toggled");
                    // The button title depends on the read flag.
                    row.refresh_buttons(true);
                }
            }
            Command::ToggleFlag(id) => {
                if let Some(row) = table.row_mut(id) {
                    let mail = &mut row.content_mut().mail;
                    mail.flagged = !mail.flagged;
                    tracing::info!(subject = mail.subject, flagged = mail.flagged, "flag toggled");
                }
            }
            Command::Trash(id) => {
                let cell = table.remove_row(id)?;
                inbox.read.lock().remove(&id);
                tracing::info!(from = cell.mail.from, subject = cell.mail.subject, "trashed");
            }
            Command::More(id) => {
                let ticket = sheet.open(move |choice| {
                    tracing::info!(row = ?id, ?choice, "more options answered");
                });
                // Stand-in for the user picking "Forward".
                sheet.resolve(ticket, SheetChoice::Option(1))?;
            }
        }
    }
    Ok(())
}

fn print_inbox(table: &SwipeTable<MailCell>) {
    for (id, row) in table.iter() {
        let mail = &row.content().mail;
        println!(
            "{:?} {:<8} {:<28} read={:<5} flagged={:<5} x={:<6} {:?}",
            id,
            mail.from,
            mail.subject,
            mail.read,
            mail.flagged,
            row.content().frame.left(),
            row.controller().phase()
        );
    }
}

fn main() -> SwipeResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let commands = Arc::new(Mutex::new(Vec::new()));
    let inbox = Arc::new(Inbox {
        read: Mutex::new(HashMap::new()),
        commands: commands.clone(),
    });

    let mut table = SwipeTable::new();
    table.set_delegate(Some(inbox.clone()));

    let mails = [
        Mail { from: "Ada", subject: "Lunch on Friday?", read: false, flagged: false },
        Mail { from: "Grace", subject: "Build failures on main", read: false, flagged: false },
        Mail { from: "Linus", subject: "Re: patch series v3", read: true, flagged: false },
    ];
    let mut ids = Vec::new();
    for mail in mails {
        let read = mail.read;
        let id = table.insert(MailCell { mail, frame: Rect::ZERO });
        if let Some(row) = table.row_mut(id) {
            row.set_size(ROW_SIZE);
        }
        inbox.read.lock().insert(id, read);
        ids.push(id);
    }

    let mut sheet = ActionSheet::new("Message", ["Reply", "Forward", "Move"]);
    sheet.finished.connect(|choice| tracing::info!(?choice, "action sheet closed"));

    // Left swipe past the expansion threshold marks the first mail read.
    swipe(&mut table, ids[0], 20.0, 180.0)?;
    apply(&mut table, &inbox, &mut sheet)?;

    // Open the second row's actions, then tap Flag (the middle button).
    swipe(&mut table, ids[1], 360.0, 260.0)?;
    if let Some(row) = table.row_mut(ids[1]) {
        let layout = row.layout();
        if let Some(flag) = layout.button(1) {
            let x = flag.frame.center().x;
            let event = tap(&mut table, ids[1], x)?;
            tracing::info!(?event, "tapped flag");
        }
    }
    apply(&mut table, &inbox, &mut sheet)?;

    // Opening the third row closes any other open row first.
    table.show_swipe(ids[1], SwipeDirection::RightToLeft, true)?;
    run_animations(&mut table);
    swipe(&mut table, ids[2], 360.0, 250.0)?;
    tracing::info!(open = ?table.open_rows(), "after opening third row");

    // Tap More on the open third row.
    if let Some(row) = table.row_mut(ids[2]) {
        let layout = row.layout();
        if let Some(more) = layout.button(2) {
            let x = more.frame.center().x;
            tap(&mut table, ids[2], x)?;
        }
    }
    apply(&mut table, &inbox, &mut sheet)?;

    // A long swipe trashes the second mail.
    swipe(&mut table, ids[1], 370.0, 40.0)?;
    apply(&mut table, &inbox, &mut sheet)?;

    print_inbox(&table);
    Ok(())
}
