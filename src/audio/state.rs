use crate::audio::config::DEFAULT_DURATION_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    #[default]
    Normal,
    Double,
}

impl Speed {
    pub fn multiplier(self) -> u8 {
        match self {
            Speed::Normal => 1,
            Speed::Double => 2,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Speed::Normal => Speed::Double,
            Speed::Double => Speed::Normal,
        }
    }
}

/// Which face of the player is shown; the toggle carries no other behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Audio,
    Text,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Audio => ViewMode::Text,
            ViewMode::Text => ViewMode::Audio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Playing,
    Paused,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_time: f64,
    pub duration: f64,
    pub is_playing: bool,
    pub speed: Speed,
    /// 0 is "before the first key point", 1..=N address real ones.
    pub key_point: usize,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub view_mode: ViewMode,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::with_duration(DEFAULT_DURATION_SECS)
    }
}

impl PlaybackState {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            current_time: 0.0,
            duration,
            is_playing: false,
            speed: Speed::default(),
            key_point: 0,
            is_loading: false,
            last_error: None,
            view_mode: ViewMode::default(),
        }
    }

    pub fn clamp_time(&self, seconds: f64) -> f64 {
        if seconds.is_nan() {
            return 0.0;
        }
        seconds.clamp(0.0, self.duration.max(0.0))
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
