//! Loudness envelope and frequency snapshot derived from analyser buffers.

use crate::constants::{
    ENERGY_CURVE, SAMPLE_CENTER, SPIKE_SAMPLE_COUNT, VOLUME_GAIN, VOLUME_SMOOTHING,
};
use crate::error::AudioFrameError;

/// One analyser snapshot.
///
/// `time_domain` holds unsigned byte samples centred at 128.
/// `frequency` holds byte magnitudes in `[0, 255]`, one per bin, and always has
/// half as many entries as `time_domain`. Buffer lengths are fixed once the
/// frame is built so callers can refill them in place every frame.
#[derive(Clone, Debug)]
pub struct AudioFrame {
    time_domain: Vec<u8>,
    frequency: Vec<u8>,
}

impl AudioFrame {
    pub fn new(time_domain: Vec<u8>, frequency: Vec<u8>) -> Result<Self, AudioFrameError> {
        if time_domain.is_empty() {
            return Err(AudioFrameError::EmptyTimeDomain);
        }
        let expected = time_domain.len() / 2;
        if frequency.len() != expected {
            return Err(AudioFrameError::BinCountMismatch {
                samples: time_domain.len(),
                expected,
                bins: frequency.len(),
            });
        }
        Ok(Self {
            time_domain,
            frequency,
        })
    }

    /// Silent frame sized for an analyser with the given FFT size.
    pub fn silent(fft_size: usize) -> Result<Self, AudioFrameError> {
        Self::new(
            vec![SAMPLE_CENTER as u8; fft_size],
            vec![0; fft_size / 2],
        )
    }

    #[inline]
    pub fn time_domain(&self) -> &[u8] {
        &self.time_domain
    }

    #[inline]
    pub fn frequency(&self) -> &[u8] {
        &self.frequency
    }

    /// Mutable views for in-place refills. Lengths cannot change through these.
    pub fn buffers_mut(&mut self) -> (&mut [u8], &mut [u8]) {
        (&mut self.time_domain, &mut self.frequency)
    }
}

/// Where the microphone signal stands, as reported to the status text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioStatus {
    #[default]
    Idle,
    Connecting,
    Active,
    Declined,
    Denied,
    Unsupported,
}

impl AudioStatus {
    pub fn is_error(self) -> bool {
        matches!(self, AudioStatus::Denied | AudioStatus::Unsupported)
    }
}

/// RMS of centred samples, scaled by the fixed gain and clamped to 1.
pub fn compute_volume(samples: &[u8]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples
        .iter()
        .map(|&s| {
            let centered = (s as f32 - SAMPLE_CENTER) / SAMPLE_CENTER;
            centered * centered
        })
        .sum();
    let rms = (sum_squares / samples.len() as f32).sqrt();
    (rms * VOLUME_GAIN).min(1.0)
}

/// Number of leading bins that particles are mapped onto.
#[inline]
pub fn usable_bins(bins: usize) -> usize {
    bins.min(SPIKE_SAMPLE_COUNT)
}

/// Stable bin assignment for a particle's `freq_seed`.
#[inline]
pub fn bin_index(freq_seed: f32, usable: usize) -> Option<usize> {
    if usable == 0 {
        return None;
    }
    Some((freq_seed * usable as f32).floor() as usize % usable)
}

/// Power curve over a normalized byte magnitude; quiet bins fall away faster.
#[inline]
pub fn bin_energy(magnitude: u8) -> f32 {
    (magnitude as f32 / 255.0).powf(ENERGY_CURVE)
}

/// Smoothed loudness consumed by the simulator.
#[derive(Clone, Debug, Default)]
pub struct AudioEnvelope {
    volume: f32,
    target_volume: f32,
}

impl AudioEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the latest snapshot. A missing frame targets silence.
    pub fn update(&mut self, frame: Option<&AudioFrame>) {
        self.target_volume = frame.map_or(0.0, |f| compute_volume(f.time_domain()));
        self.volume += (self.target_volume - self.volume) * VOLUME_SMOOTHING;
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[inline]
    pub fn target_volume(&self) -> f32 {
        self.target_volume
    }

    /// Drop back to silence immediately. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.volume = 0.0;
        self.target_volume = 0.0;
    }
}
