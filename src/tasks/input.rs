//! Keyboard reader task

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// User commands understood by the scheduler loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    Pause,
    Resume,
    Skip,
}

/// Map a key press to a control; anything unbound is ignored
pub fn map_key(key: &KeyEvent) -> Option<Control> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Control::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Control::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Control::Pause),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Control::Resume),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Control::Skip),
        _ => None,
    }
}

/// Background task that turns terminal key events into [`Control`]s.
///
/// Ends when the event stream fails or the scheduler drops its receiver.
pub async fn keyboard_input_task(tx: mpsc::Sender<Control>) {
    info!("Starting keyboard input task");
    let mut events = EventStream::new();

    while let Some(event) = events.next().await {
        let key = match event {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                break;
            }
        };

        let Some(control) = map_key(&key) else {
            continue;
        };
        debug!("Key {:?} -> {:?}", key.code, control);
        if tx.send(control).await.is_err() {
            debug!("Scheduler gone, stopping keyboard input task");
            break;
        }
    }
}
