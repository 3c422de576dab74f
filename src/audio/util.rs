use rodio::{
    Device, DeviceTrait, OutputStream, OutputStreamBuilder, Sink,
    cpal::{
        BufferSize, SampleFormat, SampleRate, StreamConfig, default_host,
        traits::HostTrait,
    },
};

use crate::audio::error::AudioError;

const BUFFER_FRAMES: u32 = 4096;

pub fn setup_device_config() -> Result<(Device, StreamConfig, SampleFormat), AudioError> {
    let device = default_host()
        .default_output_device()
        .ok_or_else(|| AudioError::DeviceError("no default output device".to_string()))?;

    let preferred = device
        .supported_output_configs()
        .ok()
        .and_then(|configs| configs.max_by_key(|cfg| cfg.max_sample_rate().0));

    let (config, sample_format) = match preferred {
        Some(cfg) => (
            StreamConfig {
                channels: cfg.channels(),
                sample_rate: cfg.max_sample_rate(),
                buffer_size: BufferSize::Fixed(BUFFER_FRAMES),
            },
            cfg.sample_format(),
        ),
        None => (
            StreamConfig {
                channels: 2,
                sample_rate: SampleRate(48000),
                buffer_size: BufferSize::Fixed(BUFFER_FRAMES),
            },
            SampleFormat::F32,
        ),
    };

    Ok((device, config, sample_format))
}

pub fn construct_sink(
    device: Device,
    config: &StreamConfig,
    sample_format: SampleFormat,
) -> Result<(OutputStream, Sink), AudioError> {
    let stream = OutputStreamBuilder::default()
        .with_buffer_size(config.buffer_size)
        .with_sample_rate(config.sample_rate.0)
        .with_device(device)
        .with_sample_format(sample_format)
        .open_stream_or_fallback()
        .map_err(|e| AudioError::DeviceError(e.to_string()))?;
    let sink = Sink::connect_new(stream.mixer());

    Ok((stream, sink))
}

/// Decoder hint from the URL path, e.g. "mp3" for `.../book.mp3?sig=..`.
pub fn extension_hint(path: &str) -> Option<String> {
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    (!ext.is_empty() && ext.len() <= 5).then(|| ext.to_ascii_lowercase())
}
