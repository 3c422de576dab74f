use crate::audio::commands::AudioCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Quit,
    TogglePlayPause,
    SeekForward,
    SeekBackward,
    PreviousKeyPoint,
    NextKeyPoint,
    ToggleSpeed,
    ToggleViewMode,
    // seconds
    Scrub(f64),
}

impl AppMessage {
    pub fn into_command(self) -> Option<AudioCommand> {
        Some(match self {
            AppMessage::Quit => return None,
            AppMessage::TogglePlayPause => AudioCommand::TogglePlayback,
            AppMessage::SeekForward => AudioCommand::SeekForward,
            AppMessage::SeekBackward => AudioCommand::SeekBackward,
            AppMessage::PreviousKeyPoint => AudioCommand::PreviousKeyPoint,
            AppMessage::NextKeyPoint => AudioCommand::NextKeyPoint,
            AppMessage::ToggleSpeed => AudioCommand::ToggleSpeed,
            AppMessage::ToggleViewMode => AudioCommand::ToggleViewMode,
            AppMessage::Scrub(seconds) => AudioCommand::SeekTo(seconds),
        })
    }
}
