use std::{
    ops::{Deref, DerefMut},
    time::Duration,
};

use color_eyre::eyre::Result;

use crossterm::event::EventStream;
use flume::{Receiver, Sender};
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEvent, KeyEventKind,
        MouseEvent,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend as Backend, crossterm};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Debug)]
pub enum TerminalEvent {
    Init,
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

pub struct Tui {
    pub terminal: ratatui::Terminal<Backend<std::io::Stdout>>,
    pub event_rx: Receiver<TerminalEvent>,
    pub event_tx: Sender<TerminalEvent>,
    pub mouse: bool,
    reader: Option<tokio::task::JoinHandle<()>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(Backend::new(std::io::stdout()))?;
        let (event_tx, event_rx) = flume::unbounded();

        Ok(Self {
            terminal,
            event_rx,
            event_tx,
            mouse: false,
            reader: None,
        })
    }

    pub fn mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    fn start(&mut self) {
        let event_tx = self.event_tx.clone();
        self.reader = Some(tokio::spawn(async move {
            let _ = event_tx.send_async(TerminalEvent::Init).await;
            let mut reader = EventStream::new();
            let mut frame_interval = tokio::time::interval(FRAME_INTERVAL);
            loop {
                let frame_delay = frame_interval.tick();
                let crossterm_event = reader.next().fuse();

                let event = tokio::select! {
                    _ = frame_delay => TerminalEvent::Tick,
                    Some(Ok(evt)) = crossterm_event => match evt {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            TerminalEvent::Key(key)
                        }
                        CrosstermEvent::Mouse(mouse) => TerminalEvent::Mouse(mouse),
                        CrosstermEvent::Resize(x, y) => TerminalEvent::Resize(x, y),
                        _ => continue,
                    },
                };

                if event_tx.send_async(event).await.is_err() {
                    break;
                }
            }
        }));
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(std::io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        if self.mouse {
            crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
        }
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            if self.mouse {
                crossterm::execute!(std::io::stdout(), DisableMouseCapture)?;
            }
            Self::restore()?;
        }
        Ok(())
    }

    pub fn restore() -> Result<()> {
        crossterm::execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub async fn next(&self) -> Option<TerminalEvent> {
        self.event_rx.recv_async().await.ok()
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<Backend<std::io::Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
