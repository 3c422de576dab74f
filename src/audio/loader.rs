use std::sync::Arc;

use flume::Sender;
use tracing::{info, warn};

use crate::{
    audio::traits::{BookSource, EngineFactory, EngineHandle},
    event::events::Event,
};

/// Fetches the book, then opens the engine for its audio. Each stage reports
/// back over the event channel so the controller applies results in order.
#[derive(Clone)]
pub struct BookLoader {
    source: Arc<dyn BookSource>,
    engines: Arc<dyn EngineFactory>,
}

impl BookLoader {
    pub fn new(source: Arc<dyn BookSource>, engines: Arc<dyn EngineFactory>) -> Self {
        Self { source, engines }
    }

    pub async fn run(&self, event_tx: Sender<Event>) {
        let book = match self.source.fetch().await {
            Ok(book) => book,
            Err(e) => {
                warn!(error = %e, "book_fetch_failed");
                let _ = event_tx.send_async(Event::BookFetched(Err(e))).await;
                return;
            }
        };

        info!(
            audio_url = book.audio_url.as_str(),
            key_points = book.key_points.len(),
            "book_fetched"
        );
        let audio_url = book.audio_url.clone();
        if event_tx.send_async(Event::BookFetched(Ok(book))).await.is_err() {
            return;
        }

        let opened = self.engines.open(&audio_url).await;
        match &opened {
            Ok(_) => info!(audio_url = audio_url.as_str(), "engine_opened"),
            Err(e) => warn!(audio_url = audio_url.as_str(), error = %e, "engine_open_failed"),
        }
        let _ = event_tx
            .send_async(Event::EngineOpened(opened.map(EngineHandle)))
            .await;
    }
}
