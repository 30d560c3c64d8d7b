use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseButton, MouseEventKind,
};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::animation::Invalidate;
use crate::error::{TickError, TickResult};

/// Application-level events
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// User key press
    Key(KeyEvent),
    /// Primary pointer press at (column, row)
    Press(u16, u16),
    /// Repaint request
    Redraw,
    /// Scheduled animation frame is due
    Frame,
    /// Terminal resize
    Resize(u16, u16),
}

/// Handles event collection from the terminal and from redraw requests.
///
/// Uses crossterm's async `EventStream` (via `futures::StreamExt`) so no
/// tokio worker thread is ever blocked on input.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new event handler and spawn the input reader task.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));

        let input_tx = tx.clone();
        let input_stop = stop.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let maybe_event = reader.next().await;
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let event = match maybe_event {
                    Some(Ok(event)) => translate(event),
                    Some(Err(e)) => {
                        tracing::warn!("input stream error: {}", e);
                        return;
                    }
                    None => return,
                };
                if let Some(event) = event {
                    if input_tx.send(event).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx, tx, stop }
    }

    /// Handle the animation driver uses to request repaints
    pub fn redraw_handle(&self) -> RedrawHandle {
        RedrawHandle::new(self.tx.clone())
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Signal the input task to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Keep only key presses, primary button presses and resizes
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Event::Press(mouse.column, mouse.row)),
            _ => None,
        },
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Posts [`Event::Redraw`] and delayed [`Event::Frame`] into the main loop's queue
#[derive(Debug, Clone)]
pub struct RedrawHandle {
    tx: mpsc::UnboundedSender<Event>,
}

impl RedrawHandle {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { tx }
    }
}

impl Invalidate for RedrawHandle {
    fn invalidate(&self) {
        if self.tx.send(Event::Redraw).is_err() {
            tracing::trace!("redraw dropped, event loop gone");
        }
    }

    fn invalidate_after(&self, delay: Duration) -> TickResult<()> {
        if self.tx.is_closed() {
            return Err(TickError::Redraw("event loop gone".into()));
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Event::Frame).is_err() {
                tracing::trace!("frame dropped, event loop gone");
            }
        });
        Ok(())
    }
}
