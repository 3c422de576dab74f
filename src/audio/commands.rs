#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    LoadBook,
    TogglePlayback,
    SeekForward,
    SeekBackward,
    SeekTo(f64),
    PreviousKeyPoint,
    NextKeyPoint,
    ToggleSpeed,
    ToggleViewMode,
}
