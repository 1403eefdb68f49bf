// Host-side tests for tuning constants and their relationships.

use sphere_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn decay_factors_are_contractive() {
    assert!(SPIKE_MIN_RETENTION > 0.0 && SPIKE_MIN_RETENTION < 1.0);
    assert!(POINTER_SHOCK_DECAY > 0.0 && POINTER_SHOCK_DECAY < 1.0);
    assert!(VOLUME_SMOOTHING > 0.0 && VOLUME_SMOOTHING < 1.0);
    assert!(POINTER_SMOOTHNESS * POINTER_FOLLOW_GAIN < 1.0);
    assert!(SPIKE_DECAY > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn radius_fits_inside_clamp_when_quiet() {
    assert!(SPHERE_FRACTION < RADIUS_CLAMP);
    assert!(RADIUS_CLAMP < 1.0);
    assert!(FREEDOM_MAX >= FREEDOM_GAIN);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn interaction_targets_are_ordered() {
    assert!(PRESS_STRENGTH > DRAG_STRENGTH);
    assert!(DRAG_STRENGTH > HOVER_STRENGTH);
    assert!(HOVER_STRENGTH > RELEASE_STRENGTH);
    assert!(PRESS_SHOCK > RELEASE_SHOCK);
    assert!(POINTER_ACTIVE_THRESHOLD < POINTER_MIN_INFLUENCE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn defaults_give_every_stripe_particles() {
    assert!(DEFAULT_STRIPE_COUNT > 0);
    assert!(DEFAULT_PARTICLE_COUNT >= DEFAULT_STRIPE_COUNT);
    assert!(SPIKE_SAMPLE_COUNT > 0);
    assert_eq!(LINK_STRIDE, 2);
}
