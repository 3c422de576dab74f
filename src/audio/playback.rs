use std::{io::Cursor, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url};
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, info, warn};

use crate::{
    audio::{
        error::AudioError,
        traits::{AudioEngine, EngineFactory},
        util::{construct_sink, extension_hint, setup_device_config},
    },
    http,
};

type BoxedSource = Box<dyn Source + Send>;
type SourceLoader = Box<dyn Fn() -> Result<BoxedSource, AudioError> + Send>;

/// A decoded book on its own output stream. Starts paused.
///
/// The sink drops a source once it has played to the end, so the engine keeps
/// a loader that decodes the book again when play or seek finds the sink empty.
pub struct PlaybackEngine {
    _stream: Option<OutputStream>,
    sink: Sink,
    reload: SourceLoader,
}

impl PlaybackEngine {
    pub fn from_bytes(bytes: Vec<u8>, hint: Option<&str>) -> Result<Self, AudioError> {
        let bytes: Arc<[u8]> = bytes.into();
        let hint = hint.map(str::to_owned);
        let reload: SourceLoader = Box::new(move || {
            decode(bytes.clone(), hint.as_deref()).map(|decoder| Box::new(decoder) as BoxedSource)
        });
        let first = reload()?;

        let (device, stream_config, sample_format) = setup_device_config()?;
        let (stream, sink) = construct_sink(device, &stream_config, sample_format)?;

        Ok(Self::with_sink(sink, Some(stream), first, reload))
    }

    fn with_sink(
        sink: Sink,
        stream: Option<OutputStream>,
        first: BoxedSource,
        reload: SourceLoader,
    ) -> Self {
        sink.pause();
        sink.append(first);
        Self {
            _stream: stream,
            sink,
            reload,
        }
    }

    fn ensure_source(&self) -> Result<(), AudioError> {
        if !self.sink.empty() {
            return Ok(());
        }
        let source = (self.reload)()?;
        self.sink.append(source);
        debug!("playback_source_reloaded");
        Ok(())
    }
}

fn decode(
    bytes: Arc<[u8]>,
    hint: Option<&str>,
) -> Result<Decoder<Cursor<Arc<[u8]>>>, AudioError> {
    let byte_len = bytes.len() as u64;
    let mut builder = Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(byte_len)
        .with_seekable(true);
    if let Some(hint) = hint {
        builder = builder.with_hint(hint);
    }
    builder
        .build()
        .map_err(|e| AudioError::EngineOpenFailed(format!("undecodable audio: {e}")))
}

impl AudioEngine for PlaybackEngine {
    fn play(&self) {
        if let Err(e) = self.ensure_source() {
            warn!(error = %e, "playback_reload_failed");
            return;
        }
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn seek(&self, position: Duration) -> Result<(), AudioError> {
        self.ensure_source()
            .map_err(AudioError::into_playback_failure)?;
        self.sink
            .try_seek(position)
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))
    }

    fn set_rate(&self, rate: f32) {
        self.sink.set_speed(rate);
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}

pub struct RodioEngineFactory {
    client: Client,
}

impl RodioEngineFactory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EngineFactory for RodioEngineFactory {
    async fn open(&self, url: &str) -> Result<Box<dyn AudioEngine>, AudioError> {
        let url = Url::parse(url)
            .map_err(|e| AudioError::EngineOpenFailed(format!("invalid audio url {url:?}: {e}")))?;
        let hint = extension_hint(url.path());

        let start = std::time::Instant::now();
        let bytes = http::download(&self.client, url.clone()).await?;
        info!(
            url = url.as_str(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "audio_downloaded"
        );

        let engine = tokio::task::spawn_blocking(move || {
            PlaybackEngine::from_bytes(bytes, hint.as_deref())
        })
        .await
        .map_err(|e| AudioError::EngineOpenFailed(e.to_string()))??;

        debug!(url = url.as_str(), "playback_engine_ready");
        Ok(Box::new(engine))
    }
}
