use crate::source::SoundSource;
use confidant_core::{AudioChunk, AudioError};
use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use std::time::Duration;
use tokio::sync::mpsc;

// ── AudioCapture ──────────────────────────────────────────────

/// Continuous microphone capture. The cpal callback converts f32 frames to
/// 16-bit PCM, accumulates fixed-size chunks and pushes them into an
/// unbounded channel; `next_chunk` drains it from the consuming side.
pub struct AudioCapture {
    device_name: String,
    sample_rate: u32,
    chunk_samples: usize,
    stream: Option<Stream>,
    tx: mpsc::UnboundedSender<AudioChunk>,
    rx: mpsc::UnboundedReceiver<AudioChunk>,
}

impl AudioCapture {
    pub fn new(device_name: &str, sample_rate: u32, chunk_samples: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            device_name: device_name.to_string(),
            sample_rate,
            chunk_samples,
            stream: None,
            tx,
            rx,
        }
    }

    fn find_device(&self) -> Result<Device, AudioError> {
        let host = cpal::default_host();
        if self.device_name == "default" {
            return host.default_input_device().ok_or(AudioError::NoInputDevice);
        }
        let mut devices = host
            .input_devices()
            .map_err(|e| AudioError::DeviceEnumeration(e.to_string()))?;
        devices
            .find(|d| d.name().map(|n| n == self.device_name).unwrap_or(false))
            .ok_or_else(|| AudioError::DeviceNotFound(self.device_name.clone()))
    }

    fn build_stream(&self, device: &Device) -> Result<Stream, AudioError> {
        let config = StreamConfig {
            channels: 1,
            sample_rate: SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let sample_rate = self.sample_rate;
        let chunk_samples = self.chunk_samples;
        let tx = self.tx.clone();
        let mut pending: Vec<i16> = Vec::with_capacity(chunk_samples);

        let err_callback = |err: cpal::StreamError| {
            tracing::error!("capture stream error: {}", err);
        };

        device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    for &sample in data {
                        let s = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                        pending.push(s);
                        if pending.len() >= chunk_samples {
                            let chunk = AudioChunk {
                                samples: std::mem::replace(
                                    &mut pending,
                                    Vec::with_capacity(chunk_samples),
                                ),
                                sample_rate,
                            };
                            // Receiver dropped means shutdown; nothing to do
                            let _ = tx.send(chunk);
                        }
                    }
                },
                err_callback,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))
    }

    /// Discard any chunks still queued from a previous listening session so
    /// stale audio cannot leak into a new recognition window.
    fn drain_queue(&mut self) {
        let mut dropped = 0usize;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::debug!("dropped {dropped} stale audio chunk(s)");
        }
    }
}

#[async_trait(?Send)]
impl SoundSource for AudioCapture {
    fn start(&mut self) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        self.drain_queue();

        let device = self.find_device()?;
        let stream = self.build_stream(&device)?;
        stream
            .play()
            .map_err(|e| AudioError::StreamStart(e.to_string()))?;
        self.stream = Some(stream);
        tracing::info!(
            device = %self.device_name,
            sample_rate = self.sample_rate,
            "audio capture started"
        );
        Ok(())
    }

    fn stop(&mut self) {
        if self.stream.take().is_some() {
            tracing::info!("audio capture stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    async fn next_chunk(&mut self, wait: Duration) -> Option<AudioChunk> {
        tokio::time::timeout(wait, self.rx.recv()).await.ok().flatten()
    }
}
