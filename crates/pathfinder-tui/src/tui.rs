use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use pathfinder_core::{ChatReply, Notifier, SessionEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tracing::warn;

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

const TICK_RATE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    Session(SessionEvent),
    Reply(ChatReply),
}

/// Single consumer over every source the UI reacts to: the terminal, a
/// tick timer, session notifications and delayed chat replies.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    reply_tx: mpsc::UnboundedSender<ChatReply>,
}

impl EventHandler {
    pub fn new(notifier: &Notifier) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let tx_events = tx.clone();
        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            while let Some(evt) = reader.next().await {
                let app_event = match evt {
                    // Only key presses, not releases
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                    Ok(Event::Mouse(mouse)) => Some(AppEvent::Mouse(mouse)),
                    Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                    Ok(_) => None,
                    Err(e) => {
                        warn!("terminal event error: {}", e);
                        None
                    }
                };

                if let Some(event) = app_event {
                    if tx_events.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        let tx_tick = tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_RATE);
            loop {
                interval.tick().await;
                if tx_tick.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        let tx_session = tx.clone();
        let mut session_events = notifier.subscribe();
        tokio::spawn(async move {
            loop {
                let event = match session_events.recv().await {
                    Ok(event) => event,
                    // Missed something; treat it as an outside change and re-read
                    Err(RecvError::Lagged(_)) => SessionEvent::ExternalChange,
                    Err(RecvError::Closed) => break,
                };
                if tx_session.send(AppEvent::Session(event)).is_err() {
                    break;
                }
            }
        });

        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<ChatReply>();
        tokio::spawn(async move {
            while let Some(reply) = reply_rx.recv().await {
                if tx.send(AppEvent::Reply(reply)).is_err() {
                    break;
                }
            }
        });

        Self { rx, reply_tx }
    }

    /// Sender handed to chat timers
    pub fn reply_sender(&self) -> mpsc::UnboundedSender<ChatReply> {
        self.reply_tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;
    execute!(io::stderr(), crossterm::event::EnableMouseCapture)?;

    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

pub fn restore() -> Result<()> {
    execute!(io::stderr(), crossterm::event::DisableMouseCapture)?;
    execute!(io::stderr(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Install panic hook to restore terminal on panic
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
