use crate::{
    audio::{error::AudioError, traits::EngineHandle},
    book::Book,
};

#[derive(Debug)]
pub enum Event {
    BookFetched(Result<Book, AudioError>),
    EngineOpened(Result<EngineHandle, AudioError>),
    PlaybackTick,
}
