pub mod source;

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_COVER_URL: &str =
    "https://images.wallpapersden.com/image/wxl-galaxies-pixel-art_75749.jpg";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub cover_url: String,
    pub audio_url: String,
    #[serde(rename = "bookLenght", alias = "bookLength")]
    pub total_duration_secs: f64,
    pub key_points: Vec<KeyPoint>,
}

/// Two books are the same book when they point at the same audio.
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.audio_url == other.audio_url
    }
}

impl Eq for Book {}

impl Book {
    pub fn demo() -> Self {
        Self {
            cover_url: "https://img0-placeit-net.s3-accelerate.amazonaws.com/uploads/stage/stage_image/40050/optimized_large_thumb_stage.jpg".to_string(),
            audio_url: "https://cdn.pixabay.com/audio/2022/03/10/audio_b195486a22.mp3".to_string(),
            total_duration_secs: 300.0,
            key_points: vec![
                KeyPoint::new("00-45", "The turtle wins the race"),
                KeyPoint::new("01-00", "Float like a feather, sting like a bee."),
                KeyPoint::new("01-38", "Si vi pacem para belum."),
                KeyPoint::new("01-55", "OK Computer."),
            ],
        }
    }

    pub fn key_point_seconds(&self, index: usize) -> Option<f64> {
        self.key_points.get(index).and_then(KeyPoint::seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    /// "MM-SS"
    pub timestamp: String,
    pub title: String,
}

impl KeyPoint {
    pub fn new(timestamp: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            title: title.into(),
        }
    }

    pub fn seconds(&self) -> Option<f64> {
        parse_timestamp(&self.timestamp)
    }
}

pub fn parse_timestamp(timestamp: &str) -> Option<f64> {
    let mut parts = timestamp.split('-');
    let (minutes, seconds) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
    };

    Some(parse(minutes)? * 60.0 + parse(seconds)?)
}
