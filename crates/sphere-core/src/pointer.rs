//! Pointer interaction state and the per-frame attractor it produces.

use crate::constants::*;
use glam::Vec2;

/// Coarse interaction phase, useful for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerPhase {
    #[default]
    Idle,
    Hovering,
    Pressing,
    Dragging,
    Released,
}

/// Raw and smoothed pointer with its sustained strength and press shock.
///
/// Event handlers only write the raw position and the target/impulse fields.
/// Everything derived is recomputed in [`PointerForceModel::advance`].
#[derive(Clone, Debug, Default)]
pub struct PointerForceModel {
    pub position: Vec2,
    pub smooth: Vec2,
    pub strength: f32,
    pub target_strength: f32,
    pub shock: f32,
    pub is_down: bool,
    pub has_interacted: bool,
    phase: PointerPhase,
}

impl PointerForceModel {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn press(&mut self, pos: Vec2) {
        self.has_interacted = true;
        self.is_down = true;
        self.target_strength = PRESS_STRENGTH;
        self.shock = PRESS_SHOCK;
        self.position = pos;
        self.phase = PointerPhase::Pressing;
    }

    pub fn move_to(&mut self, pos: Vec2) {
        self.position = pos;
        if self.is_down {
            self.target_strength = DRAG_STRENGTH;
            self.phase = PointerPhase::Dragging;
        } else {
            self.target_strength = self.target_strength.max(HOVER_STRENGTH);
            self.phase = PointerPhase::Hovering;
        }
    }

    pub fn release(&mut self) {
        self.is_down = false;
        self.target_strength = self.target_strength.max(RELEASE_STRENGTH);
        self.shock = self.shock.max(RELEASE_SHOCK);
        self.phase = PointerPhase::Released;
    }

    pub fn leave(&mut self) {
        self.is_down = false;
        self.target_strength = 0.0;
        self.phase = PointerPhase::Idle;
    }

    /// Park the pointer at `center` until the first interaction.
    pub fn recenter(&mut self, center: Vec2) {
        if self.has_interacted {
            return;
        }
        self.position = center;
        self.smooth = center;
    }

    /// One fixed step of target decay, smoothing and shock release.
    pub fn advance(&mut self) {
        if !self.is_down && self.target_strength > 0.0 {
            self.target_strength = (self.target_strength - POINTER_TARGET_DECAY).max(0.0);
        }
        self.smooth += (self.position - self.smooth) * (POINTER_SMOOTHNESS * POINTER_FOLLOW_GAIN);
        self.strength += (self.target_strength - self.strength) * POINTER_SMOOTHNESS;
        self.shock *= POINTER_SHOCK_DECAY;

        if !self.is_down
            && self.target_strength == 0.0
            && matches!(self.phase, PointerPhase::Hovering | PointerPhase::Released)
        {
            self.phase = PointerPhase::Idle;
        }
    }

    /// Sustained strength plus the decaying shock, capped.
    #[inline]
    pub fn effective_strength(&self) -> f32 {
        (self.strength * 1.4 + self.shock * 0.9).min(POINTER_STRENGTH_MAX)
    }
}

#[inline]
fn gaussian_falloff(excess: f32) -> f32 {
    let x = excess.max(0.0) / POINTER_DISTANCE_FALLOFF;
    (-x * x).exp()
}

/// Frame-constant view of the pointer relative to the sphere.
#[derive(Clone, Copy, Debug)]
pub struct PointerField {
    pub strength: f32,
    pub active: bool,
    /// Unit direction from the sphere centre toward the smoothed pointer.
    pub direction: Vec2,
    /// Pointer distance from centre in units of the sphere radius.
    pub normalized_distance: f32,
    pub base_influence: f32,
    radius: f32,
}

impl PointerField {
    pub fn resolve(pointer: &PointerForceModel, center: Vec2, radius: f32) -> Self {
        let delta = pointer.smooth - center;
        let distance = delta.length();
        let strength = pointer.effective_strength();
        let active = strength > POINTER_ACTIVE_THRESHOLD;
        let radius = radius.max(POINTER_EPSILON);
        let normalized_distance = distance / radius;
        let surface_bias = gaussian_falloff(normalized_distance - POINTER_SURFACE_OFFSET);
        let base_influence = if active {
            strength * surface_bias.max(POINTER_MIN_INFLUENCE)
        } else {
            0.0
        };
        let direction = if distance > POINTER_EPSILON {
            delta / distance
        } else {
            Vec2::new(0.0, -1.0)
        };
        Self {
            strength,
            active,
            direction,
            normalized_distance,
            base_influence,
            radius,
        }
    }

    /// Radial push for a shell point at `radial_distance` along `radial_dir`.
    /// Zero for points facing away from the pointer.
    pub fn boost(&self, radial_dir: Vec2, radial_distance: f32) -> f32 {
        if !self.active {
            return 0.0;
        }
        let alignment = radial_dir.dot(self.direction).max(0.0);
        if alignment <= 0.0 {
            return 0.0;
        }
        let radial_ratio = radial_distance / self.radius;
        let closeness = gaussian_falloff(radial_ratio - self.normalized_distance);
        self.base_influence * alignment.powf(POINTER_ALIGNMENT_EXP) * (0.45 + closeness * 0.9)
    }
}
