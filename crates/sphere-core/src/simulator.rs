//! Per-frame orbit, shell deformation and spike dynamics for every particle.

use crate::audio::{bin_energy, bin_index, usable_bins};
use crate::constants::*;
use crate::particles::ParticleField;
use crate::pointer::PointerField;
use glam::Vec2;
use std::f64::consts::TAU;

/// Drawn state of one particle. Only `spike` carries over between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionState {
    /// Spike tip in surface coordinates.
    pub tip: Vec2,
    /// Shell point before spike extension.
    pub core: Vec2,
    /// Depth proxy in `[0, 1]`.
    pub z: f32,
    /// Unwrapped orbit angle; grows with the phase.
    pub theta: f64,
    pub spike: f32,
}

/// Centre and radius for the current surface size and loudness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    pub size: Vec2,
    pub center: Vec2,
    /// Smaller half-dimension of the surface.
    pub base_radius: f32,
    pub radius: f32,
    /// Uniform shrink applied when the loud radius would overflow.
    pub radius_scale: f32,
    pub volume: f32,
    pub volume_boost: f32,
    pub freedom: f32,
}

impl FrameGeometry {
    pub fn new(size: Vec2, volume: f32) -> Self {
        let center = size * 0.5;
        let base_radius = center.x.min(center.y).max(0.0);
        let volume_boost = volume * volume;
        let dynamic_scale = 1.0 + volume * RADIUS_VOLUME_GAIN + volume_boost * RADIUS_BOOST_GAIN;
        let raw_radius = base_radius * SPHERE_FRACTION * dynamic_scale;
        let max_radius = base_radius * RADIUS_CLAMP;
        let radius_scale = if raw_radius > max_radius {
            max_radius / raw_radius
        } else {
            1.0
        };
        Self {
            size,
            center,
            base_radius,
            radius: raw_radius * radius_scale,
            radius_scale,
            volume,
            volume_boost,
            freedom: (volume_boost * FREEDOM_GAIN).min(FREEDOM_MAX) * radius_scale,
        }
    }
}

/// Spike the particle is pulled toward this frame.
#[inline]
pub fn target_spike(energy: f32, volume: f32, freedom: f32, pointer_boost: f32) -> f32 {
    energy * (1.6 + freedom * 0.8)
        + volume * volume * 0.7
        + volume * 0.48
        + pointer_boost * POINTER_MAX_BOOST
}

/// Attack rate; louder audio and a harder press respond faster.
#[inline]
pub fn spike_response(volume: f32, pointer_strength: f32) -> f32 {
    SPIKE_ATTACK_BASE + volume * SPIKE_ATTACK_VOLUME + pointer_strength * SPIKE_ATTACK_POINTER
}

/// Attack toward `target`, then the multiplicative release with a small
/// constant floor-seeking term. Never negative.
#[inline]
pub fn step_spike(spike: f32, target: f32, response: f32) -> f32 {
    let attacked = spike + (target - spike) * response;
    (attacked * SPIKE_MIN_RETENTION - SPIKE_DECAY * 0.01).max(0.0)
}

/// Per-frame inputs to [`SphereSimulator::update`].
#[derive(Clone, Copy, Debug)]
pub struct FrameParams<'a> {
    pub geometry: FrameGeometry,
    /// Unbounded animation phase, kept wide so long sessions keep moving.
    pub time_phase: f64,
    pub pointer: PointerField,
    /// Frequency magnitudes, or `None` when no audio is connected.
    pub spectrum: Option<&'a [u8]>,
}

/// Owns the position arena; entries are overwritten in place every frame.
pub struct SphereSimulator {
    positions: Vec<PositionState>,
}

impl SphereSimulator {
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![PositionState::default(); count],
        }
    }

    #[inline]
    pub fn positions(&self) -> &[PositionState] {
        &self.positions
    }

    pub fn update(&mut self, field: &ParticleField, params: &FrameParams<'_>) {
        let g = &params.geometry;
        let volume = g.volume;
        let freedom = g.freedom;
        let radius = g.radius;
        let time_phase = params.time_phase;
        let v = volume as f64;
        let f = freedom as f64;
        let warp_phase = time_phase * (0.6 + f * 0.4);
        let chaos_phase = time_phase * (1.2 + f * 0.9);
        let offset_scale = g.base_radius * freedom * g.radius_scale;
        let stripes = field.stripe_count() as f64;

        let spectrum = params.spectrum.unwrap_or(&[]);
        let usable = usable_bins(spectrum.len());
        let response = spike_response(volume, params.pointer.strength);
        let spike_reach = 1.0 + freedom * 0.45;

        // Phase arguments stay in f64 until the trig; narrowing first would
        // swallow the per-frame step once the phase gets large.
        for (particle, state) in field.particles().iter().zip(self.positions.iter_mut()) {
            let band_factor = particle.band as f64 / stripes;
            let seed = particle.seed as f64;
            let energy = bin_index(particle.freq_seed, usable)
                .map_or(0.0, |i| bin_energy(spectrum[i]));

            let theta = particle.theta0 as f64
                + time_phase * (0.7 + band_factor * 0.18 + v * 0.7 + f * 0.2)
                + (time_phase * 0.85 + seed * 3.1).sin() * (0.12 + v * 0.2)
                + (chaos_phase * 1.6 + seed * 8.4).cos() * (0.08 + f * 0.95);
            let phi = particle.phi0 as f64
                + (time_phase * 0.65 + seed * 4.2).sin() * (0.28 + v * 0.45 + f * 0.18)
                + (warp_phase * 1.1 + seed * 6.7).cos() * (0.05 + f * 0.75);
            let wobble = (time_phase * 1.4 + seed * 6.0).sin() * (0.08 + v * 0.18 + f * 0.55)
                + (chaos_phase * 2.2 + seed * 12.5).sin() * (f * 0.4);

            let x = (theta.cos() * (phi + wobble * 0.5).cos()) as f32;
            let y = (phi + wobble).sin() as f32;
            let z = (theta.sin() * (phi + wobble * 0.4).cos()) as f32;

            let shell_warp = (1.0
                + (warp_phase * 2.4 + seed * 9.3).sin() * (f * 0.8)
                + (chaos_phase * 1.9 + band_factor * TAU).cos() * (f * 0.5))
                as f32;
            let offset = Vec2::new(
                (chaos_phase * 2.8 + seed * 14.2).sin() as f32 * offset_scale * 0.55,
                (chaos_phase * 2.5 + seed * 10.9).cos() as f32 * offset_scale * 0.5,
            );

            let core = g.center + Vec2::new(x, y) * radius * shell_warp + offset;
            let radial = core - g.center;
            let radial_distance = radial.length().max(POINTER_EPSILON);
            let radial_dir = radial / radial_distance;

            let pointer_boost = params.pointer.boost(radial_dir, radial_distance);
            let target = target_spike(energy, volume, freedom, pointer_boost);
            state.spike = step_spike(state.spike, target, response);

            let spike_length =
                radius * (SPIKE_BASE_RATIO + state.spike * SPIKE_LENGTH_SCALE) * spike_reach;
            state.tip = core + radial_dir * spike_length;
            state.core = core;
            state.z = (z + 1.0) * 0.5;
            state.theta = theta;
        }
    }
}
