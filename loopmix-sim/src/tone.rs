//! Deterministic test tones for the simulated encoder.

use std::f32::consts::TAU;

/// Generate `samples` samples of a sine tone at `freq_hz`.
pub fn sine_pcm(freq_hz: f32, sample_rate: u32, samples: usize) -> Vec<f32> {
    let step = TAU * freq_hz / sample_rate as f32;
    (0..samples).map(|n| (step * n as f32).sin()).collect()
}

/// Pack normalized samples as little-endian signed 16-bit PCM.
pub fn pcm_bytes(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let value = (clamped * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tone_starts_at_zero_phase() {
        let tone = sine_pcm(440.0, 48_000, 16);
        assert_relative_eq!(tone[0], 0.0);
        assert!(tone[1] > 0.0);
    }

    #[test]
    fn tone_completes_a_cycle() {
        // 480 Hz at 48 kHz has a period of exactly 100 samples.
        let tone = sine_pcm(480.0, 48_000, 101);
        assert_relative_eq!(tone[100], tone[0], epsilon = 1e-3);
    }

    #[test]
    fn pcm_packing_is_two_bytes_per_sample() {
        let bytes = pcm_bytes(&[0.0, 1.0, -1.0]);
        assert_eq!(bytes.len(), 6);
        assert_eq!(&bytes[0..2], &[0, 0]);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), i16::MAX);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let bytes = pcm_bytes(&[2.0]);
        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), i16::MAX);
    }
}
