//! Engine context that sequences one frame: envelope, pointer, simulate, draw.

use crate::audio::{AudioEnvelope, AudioFrame, AudioStatus};
use crate::compositor::{BoundsReport, Compositor};
use crate::config::SphereConfig;
use crate::constants::{PHASE_BASE_STEP, PHASE_VOLUME_STEP};
use crate::error::SphereError;
use crate::particles::{ParticleField, StripeBuckets};
use crate::pointer::{PointerField, PointerForceModel};
use crate::simulator::{FrameGeometry, FrameParams, PositionState, SphereSimulator};
use crate::surface::DrawSurface;

/// Summary of one drawn frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameReport {
    pub geometry: FrameGeometry,
    pub time_phase: f64,
    pub bounds: Option<BoundsReport>,
}

pub struct SphereEngine {
    config: SphereConfig,
    field: ParticleField,
    buckets: StripeBuckets,
    simulator: SphereSimulator,
    envelope: AudioEnvelope,
    pointer: PointerForceModel,
    compositor: Compositor,
    audio_status: AudioStatus,
    time_phase: f64,
    frame_count: u64,
}

impl SphereEngine {
    pub fn new(config: SphereConfig) -> Result<Self, SphereError> {
        config.validate()?;
        let field = ParticleField::new(config.particle_count, config.stripe_count, config.seed);
        let buckets = StripeBuckets::new(&field);
        let simulator = SphereSimulator::new(field.len());
        log::info!(
            "[engine] particles={} stripes={} seed={}",
            field.len(),
            buckets.len(),
            config.seed
        );
        Ok(Self {
            compositor: Compositor::new(config.self_check),
            config,
            field,
            buckets,
            simulator,
            envelope: AudioEnvelope::new(),
            pointer: PointerForceModel::new(),
            audio_status: AudioStatus::Idle,
            time_phase: 0.0,
            frame_count: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn buckets(&self) -> &StripeBuckets {
        &self.buckets
    }

    #[inline]
    pub fn positions(&self) -> &[PositionState] {
        self.simulator.positions()
    }

    #[inline]
    pub fn pointer(&self) -> &PointerForceModel {
        &self.pointer
    }

    /// Input handlers write press/move/release/leave through this.
    #[inline]
    pub fn pointer_mut(&mut self) -> &mut PointerForceModel {
        &mut self.pointer
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.envelope.volume()
    }

    #[inline]
    pub fn time_phase(&self) -> f64 {
        self.time_phase
    }

    /// Jump the animation to `time_phase` without touching spikes or audio.
    pub fn seek(&mut self, time_phase: f64) {
        self.time_phase = time_phase;
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn audio_status(&self) -> AudioStatus {
        self.audio_status
    }

    pub fn set_audio_status(&mut self, status: AudioStatus) {
        if status != self.audio_status {
            log::info!("[engine] audio {:?} -> {:?}", self.audio_status, status);
        }
        self.audio_status = status;
    }

    /// Silence the envelope after the audio source goes away. Idempotent.
    pub fn reset_audio(&mut self) {
        self.envelope.reset();
    }

    /// Advance one fixed step with the latest audio snapshot and draw it.
    pub fn advance_frame(
        &mut self,
        audio: Option<&AudioFrame>,
        surface: &mut dyn DrawSurface,
    ) -> FrameReport {
        self.envelope.update(audio);
        let volume = f64::from(self.envelope.volume());
        self.time_phase += PHASE_BASE_STEP + volume * PHASE_VOLUME_STEP;
        self.pointer.advance();
        self.frame_count += 1;
        log::trace!(
            "[frame {}] volume={:.3} target={:.3} phase={:.3} pointer={:?}",
            self.frame_count,
            self.envelope.volume(),
            self.envelope.target_volume(),
            self.time_phase,
            self.pointer.phase()
        );
        self.simulate_and_draw(audio.map(AudioFrame::frequency), surface)
    }

    /// Redraw at the current phase and volume without stepping the envelope,
    /// the pointer or the phase. Used after a resize or when audio is declined.
    /// `audio` is the last snapshot already fed to the envelope; `None` once
    /// the source is gone.
    pub fn render(
        &mut self,
        audio: Option<&AudioFrame>,
        surface: &mut dyn DrawSurface,
    ) -> FrameReport {
        self.simulate_and_draw(audio.map(AudioFrame::frequency), surface)
    }

    fn simulate_and_draw(
        &mut self,
        spectrum: Option<&[u8]>,
        surface: &mut dyn DrawSurface,
    ) -> FrameReport {
        let geometry = FrameGeometry::new(surface.size(), self.envelope.volume());
        self.pointer.recenter(geometry.center);
        let params = FrameParams {
            geometry,
            time_phase: self.time_phase,
            pointer: PointerField::resolve(&self.pointer, geometry.center, geometry.radius),
            spectrum,
        };
        self.simulator.update(&self.field, &params);
        let bounds = self.compositor.draw(
            surface,
            &geometry,
            self.simulator.positions(),
            &mut self.buckets,
        );
        FrameReport {
            geometry,
            time_phase: self.time_phase,
            bounds,
        }
    }
}
