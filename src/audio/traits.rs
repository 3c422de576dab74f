use crate::{audio::error::AudioError, book::Book};
use async_trait::async_trait;
use std::{fmt, time::Duration};

#[async_trait]
pub trait BookSource: Send + Sync {
    async fn fetch(&self) -> Result<Book, AudioError>;
}

#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn open(&self, url: &str) -> Result<Box<dyn AudioEngine>, AudioError>;
}

pub trait AudioEngine: Send {
    fn play(&self);
    fn pause(&self);
    fn seek(&self, position: Duration) -> Result<(), AudioError>;
    fn set_rate(&self, rate: f32);
    fn position(&self) -> Duration;

    fn is_finished(&self) -> bool {
        false
    }
}

/// An opened engine in transit from the loader to the controller.
pub struct EngineHandle(pub Box<dyn AudioEngine>);

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("position", &self.0.position())
            .finish()
    }
}
