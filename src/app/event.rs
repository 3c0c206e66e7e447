//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a blocking reader on
//! tokio's blocking pool that forwards them over a channel, so the main loop
//! can `select!` between input and the scroll timers.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Wheel notches: positive = down, negative = up.
    Wheel { notches: i8 },
    Mouse(MouseEvent),
    Resize(u16, u16),
}

fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollDown => Some(AppEvent::Wheel { notches: 1 }),
            MouseEventKind::ScrollUp => Some(AppEvent::Wheel { notches: -1 }),
            MouseEventKind::Moved => None,
            _ => Some(AppEvent::Mouse(m)),
        },
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawns a reader that polls the terminal for events and sends them
/// through the returned channel.  The reader exits once the receiver is
/// dropped; `poll_interval` bounds how long that takes to notice.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            let has_event = event::poll(poll_interval).unwrap_or(false);
            if !has_event {
                continue;
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            if let Some(app_event) = translate(ev) {
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn mouse(kind: MouseEventKind) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn wheel_events_become_notches() {
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollDown)),
            Some(AppEvent::Wheel { notches: 1 })
        ));
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollUp)),
            Some(AppEvent::Wheel { notches: -1 })
        ));
        assert!(translate(mouse(MouseEventKind::Moved)).is_none());
    }

    #[test]
    fn key_releases_are_dropped() {
        let mut k = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(translate(CtEvent::Key(k)), Some(AppEvent::Key(_))));
        k.kind = KeyEventKind::Release;
        assert!(translate(CtEvent::Key(k)).is_none());
    }
}
