//! Shape, spike and interaction tuning constants.
//!
//! Every rate here is applied once per frame. Nothing is scaled by elapsed
//! wall-clock time, so the visual pacing follows the display cadence.

// Field layout
pub const DEFAULT_PARTICLE_COUNT: usize = 3400;
pub const DEFAULT_STRIPE_COUNT: usize = 4;
pub const DEFAULT_FIELD_SEED: u64 = 42;
pub const THETA_JITTER: f32 = 0.6; // spread of base theta around the band centre
pub const PHI_SPAN: f32 = std::f32::consts::PI * 0.75; // latitude range of base phi

// Sphere sizing
pub const SPHERE_FRACTION: f32 = 0.5; // share of the smaller half-dimension
pub const RADIUS_CLAMP: f32 = 0.94; // rendered radius never exceeds this share
pub const RADIUS_VOLUME_GAIN: f32 = 0.32;
pub const RADIUS_BOOST_GAIN: f32 = 0.8;
pub const FREEDOM_GAIN: f32 = 3.2;
pub const FREEDOM_MAX: f32 = 4.5;

// Audio envelope
pub const SAMPLE_CENTER: f32 = 128.0; // unsigned byte samples are centred here
pub const VOLUME_GAIN: f32 = 3.8;
pub const VOLUME_SMOOTHING: f32 = 0.12;
pub const SPIKE_SAMPLE_COUNT: usize = 256; // cap on frequency bins mapped to particles
pub const ENERGY_CURVE: f32 = 1.6;

// Phase
pub const PHASE_BASE_STEP: f64 = 0.017;
pub const PHASE_VOLUME_STEP: f64 = 0.32;

// Spike dynamics
pub const SPIKE_LENGTH_SCALE: f32 = 1.35;
pub const SPIKE_BASE_RATIO: f32 = 0.05;
pub const SPIKE_DECAY: f32 = 0.17; // constant release, applied x0.01
pub const SPIKE_MIN_RETENTION: f32 = 0.94;
pub const SPIKE_ATTACK_BASE: f32 = 0.34;
pub const SPIKE_ATTACK_VOLUME: f32 = 0.45;
pub const SPIKE_ATTACK_POINTER: f32 = 0.28;

// Pointer force field
pub const POINTER_ALIGNMENT_EXP: f32 = 3.1;
pub const POINTER_DISTANCE_FALLOFF: f32 = 0.85;
pub const POINTER_MAX_BOOST: f32 = 4.4;
pub const POINTER_SMOOTHNESS: f32 = 0.18;
pub const POINTER_FOLLOW_GAIN: f32 = 1.4; // smoothed position follows faster than strength
pub const POINTER_TARGET_DECAY: f32 = 0.1;
pub const POINTER_SHOCK_DECAY: f32 = 0.88;
pub const POINTER_ACTIVE_THRESHOLD: f32 = 0.02;
pub const POINTER_STRENGTH_MAX: f32 = 1.9;
pub const POINTER_MIN_INFLUENCE: f32 = 0.12;
pub const POINTER_SURFACE_OFFSET: f32 = 0.2;
pub const POINTER_EPSILON: f32 = 1e-4;

// Interaction targets
pub const PRESS_STRENGTH: f32 = 1.1;
pub const PRESS_SHOCK: f32 = 1.4;
pub const DRAG_STRENGTH: f32 = 1.05;
pub const HOVER_STRENGTH: f32 = 0.38;
pub const RELEASE_STRENGTH: f32 = 0.18;
pub const RELEASE_SHOCK: f32 = 0.22;

// Compositor
pub const BACKDROP_FADE: f32 = 0.62;
pub const LINK_STRIDE: usize = 2;
pub const LINK_MIN_SPIKE: f32 = 0.01;
