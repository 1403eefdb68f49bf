// Host-side tests for the pointer state machine and its force field.

use glam::Vec2;
use sphere_core::{
    PointerField, PointerForceModel, PointerPhase, RecordingSurface, SphereConfig, SphereEngine,
};

#[test]
fn press_drag_release_leave_sets_targets() {
    let mut p = PointerForceModel::new();
    assert_eq!(p.phase(), PointerPhase::Idle);

    p.press(Vec2::new(10.0, 20.0));
    assert!(p.is_down && p.has_interacted);
    assert_eq!(p.target_strength, 1.1);
    assert_eq!(p.shock, 1.4);
    assert_eq!(p.position, Vec2::new(10.0, 20.0));
    assert_eq!(p.phase(), PointerPhase::Pressing);

    p.move_to(Vec2::new(30.0, 40.0));
    assert_eq!(p.target_strength, 1.05);
    assert_eq!(p.phase(), PointerPhase::Dragging);

    p.release();
    assert!(!p.is_down);
    assert_eq!(p.target_strength, 1.05);
    assert_eq!(p.shock, 1.4);
    assert_eq!(p.phase(), PointerPhase::Released);

    p.leave();
    assert_eq!(p.target_strength, 0.0);
    assert_eq!(p.phase(), PointerPhase::Idle);
}

#[test]
fn release_after_decay_applies_floors() {
    let mut p = PointerForceModel::new();
    p.press(Vec2::ZERO);
    for _ in 0..40 {
        p.advance();
    }
    assert!(p.shock < 0.22);
    p.release();
    assert_eq!(p.shock, 0.22);
    assert_eq!(p.target_strength, 1.1);
}

#[test]
fn hover_raises_target_and_decays_when_up() {
    let mut p = PointerForceModel::new();
    p.move_to(Vec2::new(5.0, 5.0));
    assert_eq!(p.target_strength, 0.38);
    assert_eq!(p.phase(), PointerPhase::Hovering);
    p.advance();
    assert!((p.target_strength - 0.28).abs() < 1e-6);
    for _ in 0..5 {
        p.advance();
    }
    assert_eq!(p.target_strength, 0.0);
    assert_eq!(p.phase(), PointerPhase::Idle);
}

#[test]
fn released_pointer_returns_to_idle() {
    let mut p = PointerForceModel::new();
    p.press(Vec2::ZERO);
    p.move_to(Vec2::ONE);
    p.release();
    for _ in 0..20 {
        p.advance();
    }
    assert_eq!(p.target_strength, 0.0);
    assert_eq!(p.phase(), PointerPhase::Idle);
}

#[test]
fn advance_smooths_position_strength_and_shock() {
    let mut p = PointerForceModel::new();
    p.press(Vec2::new(100.0, 0.0));
    p.advance();
    assert!((p.smooth.x - 100.0 * 0.18 * 1.4).abs() < 1e-4);
    assert!((p.strength - 1.1 * 0.18).abs() < 1e-6);
    assert!((p.shock - 1.4 * 0.88).abs() < 1e-6);
    // Target does not decay while held.
    assert_eq!(p.target_strength, 1.1);
}

#[test]
fn recenter_only_before_first_interaction() {
    let mut p = PointerForceModel::new();
    p.recenter(Vec2::new(50.0, 60.0));
    assert_eq!(p.smooth, Vec2::new(50.0, 60.0));
    p.press(Vec2::new(1.0, 1.0));
    p.recenter(Vec2::new(70.0, 80.0));
    assert_eq!(p.position, Vec2::new(1.0, 1.0));
}

#[test]
fn inactive_pointer_gives_no_boost() {
    let p = PointerForceModel::new();
    let field = PointerField::resolve(&p, Vec2::ZERO, 100.0);
    assert!(!field.active);
    assert_eq!(field.boost(Vec2::X, 100.0), 0.0);
}

#[test]
fn centered_pointer_points_up() {
    let mut p = PointerForceModel::new();
    p.press(Vec2::new(50.0, 50.0));
    p.smooth = p.position;
    let field = PointerField::resolve(&p, Vec2::new(50.0, 50.0), 100.0);
    assert_eq!(field.direction, Vec2::new(0.0, -1.0));
}

#[test]
fn back_facing_points_get_no_boost() {
    let mut p = PointerForceModel::new();
    p.press(Vec2::new(200.0, 100.0));
    p.smooth = p.position;
    let field = PointerField::resolve(&p, Vec2::new(100.0, 100.0), 100.0);
    assert!(field.active);
    assert!(field.boost(Vec2::X, 100.0) > 0.0);
    assert_eq!(field.boost(-Vec2::X, 100.0), 0.0);
    assert_eq!(field.boost(Vec2::new(-0.6, 0.8), 100.0), 0.0);
    assert_eq!(field.boost(Vec2::Y, 100.0), 0.0);
}

#[test]
fn pressed_particle_outgrows_opposite_hemisphere() {
    let config = SphereConfig {
        particle_count: 600,
        ..SphereConfig::default()
    };
    let mut engine = SphereEngine::new(config).unwrap();
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let report = engine.render(None, &mut surface);
    let center = report.geometry.center;

    let positions = engine.positions().to_vec();
    let (target_idx, target) = positions
        .iter()
        .enumerate()
        .max_by(|a, b| {
            (a.1.core - center)
                .length()
                .total_cmp(&(b.1.core - center).length())
        })
        .unwrap();
    let dir = (target.core - center).normalize();
    let opposite_idx = positions
        .iter()
        .position(|p| (p.core - center).normalize().dot(dir) < -0.5)
        .expect("a particle on the far side");

    engine.pointer_mut().press(target.core);
    engine.advance_frame(None, &mut surface);

    let after = engine.positions();
    assert!(after[target_idx].spike > 0.0);
    assert!(after[target_idx].spike > after[opposite_idx].spike);
    assert_eq!(after[opposite_idx].spike, 0.0);
}
