use std::{cell::Cell, sync::Arc};

use flume::{Receiver, Sender};
use ratatui::{Frame, layout::Rect};
use tracing::info;

use crate::{
    audio::{
        config::PlayerConfig,
        controller::PlaybackController,
        playback::RodioEngineFactory,
        traits::BookSource,
    },
    book::source::SimulatedSource,
    event::events::Event,
    http::{self, HttpSource},
    ui::message::AppMessage,
};

use super::{tui, util::handler::EventHandler};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub controller: PlaybackController,
    pub should_quit: bool,
    /// Where the scrub bar was last drawn, for mapping mouse clicks.
    pub scrub_area: Cell<Rect>,
}

impl App {
    pub fn new(config: PlayerConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let client = http::client()?;

        let source: Arc<dyn BookSource> = match &config.book_url {
            Some(url) => {
                info!(url = url.as_str(), "book_source_http");
                Arc::new(HttpSource::new(client.clone(), url.clone()))
            }
            None => Arc::new(SimulatedSource::new(config.fetch_delay)),
        };
        let engines = Arc::new(RodioEngineFactory::new(client));
        let controller = PlaybackController::new(source, engines, event_tx.clone(), config);

        Ok(Self {
            event_rx,
            event_tx,
            controller,
            should_quit: false,
            scrub_area: Cell::new(Rect::default()),
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?.mouse(true);
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| self.ui(f))?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        tui.exit()?;
        Ok(())
    }

    pub fn update(&mut self, msg: AppMessage) {
        match msg.into_command() {
            Some(cmd) => self.controller.handle_command(cmd),
            None => self.should_quit = true,
        }
    }

    fn ui(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}
