use std::time::Duration;

pub const DEFAULT_DURATION_SECS: f64 = 300.0;
/// Longest book length accepted from a source; anything above is capped.
pub const MAX_DURATION_SECS: f64 = 1_000_000.0;

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub seek_forward_secs: u64,
    pub seek_backward_secs: u64,
    pub tick_interval: Duration,
    pub default_duration_secs: f64,
    pub fetch_delay: Duration,
    /// When set, the book is fetched from this URL instead of the built-in demo.
    pub book_url: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_forward_secs: 10,
            seek_backward_secs: 5,
            tick_interval: Duration::from_secs(1),
            default_duration_secs: DEFAULT_DURATION_SECS,
            fetch_delay: Duration::from_secs(2),
            book_url: None,
        }
    }
}

impl PlayerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse_u64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            seek_forward_secs: parse_u64("AUDIOBOOK_SEEK_FORWARD_SECS")
                .unwrap_or(defaults.seek_forward_secs),
            seek_backward_secs: parse_u64("AUDIOBOOK_SEEK_BACKWARD_SECS")
                .unwrap_or(defaults.seek_backward_secs),
            fetch_delay: parse_u64("AUDIOBOOK_FETCH_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_delay),
            book_url: lookup("AUDIOBOOK_BOOK_URL").filter(|url| !url.trim().is_empty()),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("AUDIOBOOK_SEEK_FORWARD_SECS", "30"),
            ("AUDIOBOOK_SEEK_BACKWARD_SECS", "not-a-number"),
            ("AUDIOBOOK_FETCH_DELAY_MS", "250"),
            ("AUDIOBOOK_BOOK_URL", "  "),
        ]);
        let config = PlayerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.seek_forward_secs, 30);
        assert_eq!(config.seek_backward_secs, 5);
        assert_eq!(config.fetch_delay, Duration::from_millis(250));
        assert_eq!(config.book_url, None);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
    }
}
