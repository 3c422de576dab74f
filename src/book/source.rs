use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    audio::{error::AudioError, traits::BookSource},
    book::Book,
};

/// Stands in for a book API: waits, then hands back the demo book.
pub struct SimulatedSource {
    delay: Duration,
    book: Book,
}

impl SimulatedSource {
    pub fn new(delay: Duration) -> Self {
        Self::with_book(delay, Book::demo())
    }

    pub fn with_book(delay: Duration, book: Book) -> Self {
        Self { delay, book }
    }
}

#[async_trait]
impl BookSource for SimulatedSource {
    async fn fetch(&self) -> Result<Book, AudioError> {
        debug!(delay_ms = self.delay.as_millis() as u64, "simulated_fetch_started");
        tokio::time::sleep(self.delay).await;
        Ok(self.book.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn resolves_after_the_configured_delay() {
        let source = SimulatedSource::new(Duration::from_secs(2));
        let fetch = tokio::spawn(async move { source.fetch().await });
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(1900)).await;
        assert!(!fetch.is_finished());

        tokio::time::advance(Duration::from_millis(200)).await;
        let book = fetch.await.unwrap().unwrap();
        assert_eq!(book, Book::demo());
        assert_eq!(book.key_points.len(), 4);
    }
}
