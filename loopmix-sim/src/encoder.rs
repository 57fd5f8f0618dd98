//! Simulated chunked encoder emitting a steady PCM tone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use loopmix_core::{EncoderCallback, EncoderEvent, MediaEncoder, SessionError};

use crate::tone;

/// Interval between emitted chunks while running.
const CHUNK_INTERVAL: Duration = Duration::from_millis(20);

/// Samples of tone packed into each chunk.
const CHUNK_SAMPLES: usize = 960;

pub struct SimEncoder {
    mime: String,
    sample_rate: u32,
    callback: Option<EncoderCallback>,
    stop_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SimEncoder {
    pub fn new(mime: impl Into<String>, sample_rate: u32) -> Self {
        Self {
            mime: mime.into(),
            sample_rate,
            callback: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    fn chunk_payload(sample_rate: u32) -> Vec<u8> {
        tone::pcm_bytes(&tone::sine_pcm(440.0, sample_rate, CHUNK_SAMPLES))
    }
}

impl MediaEncoder for SimEncoder {
    fn mime_type(&self) -> &str {
        &self.mime
    }

    fn start(&mut self, callback: EncoderCallback) -> Result<(), SessionError> {
        if self.worker.is_some() {
            return Err(SessionError::EncoderFailure("encoder already started".into()));
        }
        self.callback = Some(callback.clone());
        self.stop_flag.store(false, Ordering::SeqCst);

        let stop = Arc::clone(&self.stop_flag);
        let payload = Self::chunk_payload(self.sample_rate);
        let worker = thread::Builder::new()
            .name("sim-encoder".into())
            .spawn(move || {
                while !stop.load(Ordering::SeqCst) {
                    thread::sleep(CHUNK_INTERVAL);
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    callback(EncoderEvent::Chunk(payload.clone()));
                }
            })
            .map_err(|e| SessionError::EncoderFailure(format!("failed to spawn encoder: {e}")))?;
        self.worker = Some(worker);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SessionError> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            worker
                .join()
                .map_err(|_| SessionError::EncoderFailure("encoder thread panicked".into()))?;
        }
        // Flush one final chunk, then signal the halt.
        if let Some(callback) = self.callback.take() {
            callback(EncoderEvent::Chunk(Self::chunk_payload(self.sample_rate)));
            callback(EncoderEvent::Stopped);
        }
        Ok(())
    }
}
