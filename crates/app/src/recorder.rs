//! Microphone capture for the Audio Void. Samples accumulate in a shared
//! buffer while the stream is alive; stopping encodes a 16-bit WAV.

use anyhow::{bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct VoiceRecorder {
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
    channels: u16,
    // Capture runs for as long as this handle lives.
    _stream: cpal::Stream,
}

fn on_stream_error(err: cpal::StreamError) {
    tracing::warn!(error = %err, "input stream error");
}

impl VoiceRecorder {
    /// Open the default input device and start capturing.
    pub fn start() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .context("No input device available")?;
        let supported = device
            .default_input_config()
            .context("No supported input configuration")?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        let stream_config: cpal::StreamConfig = supported.config();

        let samples: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));

        let stream = match supported.sample_format() {
            SampleFormat::F32 => {
                let buf = samples.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[f32], _| buf.lock().extend_from_slice(data),
                    on_stream_error,
                    None,
                )?
            }
            SampleFormat::I16 => {
                let buf = samples.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _| {
                        buf.lock()
                            .extend(data.iter().map(|s| f32::from(*s) / f32::from(i16::MAX)))
                    },
                    on_stream_error,
                    None,
                )?
            }
            other => bail!("Unsupported sample format: {:?}", other),
        };
        stream.play()?;

        Ok(Self {
            samples,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    /// Stop capturing and encode what was heard.
    pub fn stop(self) -> Result<Vec<u8>> {
        let samples = std::mem::take(&mut *self.samples.lock());
        drop(self._stream);
        encode_wav(&samples, self.sample_rate, self.channels)
    }
}

fn encode_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for sample in samples {
            let clamped = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer.write_sample(clamped)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wav_roundtrip() {
        let samples = vec![0.0_f32, 0.5, -0.5, 1.0, -1.0];
        let bytes = encode_wav(&samples, 44_100, 1).unwrap();

        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        let decoded: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(decoded.len(), 5);
        assert_eq!(decoded[0], 0);
        assert_eq!(decoded[3], i16::MAX);
    }

    #[test]
    fn test_encode_wav_clamps_out_of_range() {
        let bytes = encode_wav(&[2.0_f32, -2.0], 16_000, 1).unwrap();
        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        let decoded: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(decoded[0], i16::MAX);
        assert_eq!(decoded[1], -i16::MAX);
    }
}
