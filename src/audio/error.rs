use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("Failed to load book: {0}")]
    FetchFailed(String),

    #[error("could not open audio: {0}")]
    EngineOpenFailed(String),

    #[error("Failed to play audio: {0}")]
    PlaybackFailed(String),

    #[error("Audio output device error: {0}")]
    DeviceError(String),
}

impl AudioError {
    /// Wraps any error into the catch-all surfaced to the listener.
    pub fn into_playback_failure(self) -> Self {
        match self {
            Self::PlaybackFailed(_) => self,
            other => Self::PlaybackFailed(other.to_string()),
        }
    }
}
