use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    audio::{
        error::AudioError,
        traits::{AudioEngine, BookSource, EngineFactory},
    },
    book::Book,
};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Play,
    Pause,
    Seek(Duration),
    Rate(f32),
}

#[derive(Default)]
struct EngineLog {
    calls: Vec<EngineCall>,
    position: Duration,
    finished: bool,
}

#[derive(Clone, Default)]
pub struct FakeEngine {
    log: Arc<Mutex<EngineLog>>,
}

impl FakeEngine {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn last_seek(&self) -> Option<Duration> {
        self.calls().into_iter().rev().find_map(|call| match call {
            EngineCall::Seek(pos) => Some(pos),
            _ => None,
        })
    }

    pub fn set_position(&self, position: Duration) {
        self.log.lock().unwrap().position = position;
    }

    pub fn set_finished(&self, finished: bool) {
        self.log.lock().unwrap().finished = finished;
    }

    fn record(&self, call: EngineCall) {
        self.log.lock().unwrap().calls.push(call);
    }
}

impl AudioEngine for FakeEngine {
    // Like the rodio engine, play and seek reload a finished source.
    fn play(&self) {
        let mut log = self.log.lock().unwrap();
        log.finished = false;
        log.calls.push(EngineCall::Play);
    }

    fn pause(&self) {
        self.record(EngineCall::Pause);
    }

    fn seek(&self, position: Duration) -> Result<(), AudioError> {
        let mut log = self.log.lock().unwrap();
        log.finished = false;
        log.position = position;
        log.calls.push(EngineCall::Seek(position));
        Ok(())
    }

    fn set_rate(&self, rate: f32) {
        self.record(EngineCall::Rate(rate));
    }

    fn position(&self) -> Duration {
        self.log.lock().unwrap().position
    }

    fn is_finished(&self) -> bool {
        self.log.lock().unwrap().finished
    }
}

#[derive(Clone)]
pub struct FakeFactory {
    failure: Option<String>,
    opened: Arc<Mutex<Vec<String>>>,
}

impl FakeFactory {
    pub fn working() -> Self {
        Self {
            failure: None,
            opened: Arc::default(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            opened: Arc::default(),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl EngineFactory for FakeFactory {
    async fn open(&self, url: &str) -> Result<Box<dyn AudioEngine>, AudioError> {
        self.opened.lock().unwrap().push(url.to_string());
        match &self.failure {
            Some(reason) => Err(AudioError::EngineOpenFailed(reason.clone())),
            None => Ok(Box::new(FakeEngine::default())),
        }
    }
}

pub struct FakeSource(Result<Book, AudioError>);

impl FakeSource {
    pub fn ok(book: Book) -> Self {
        Self(Ok(book))
    }

    pub fn failing(reason: &str) -> Self {
        Self(Err(AudioError::FetchFailed(reason.to_string())))
    }
}

#[async_trait]
impl BookSource for FakeSource {
    async fn fetch(&self) -> Result<Book, AudioError> {
        self.0.clone()
    }
}
