// Host-side tests for draw-pass ordering and compositing state.

use sphere_core::constants::BACKDROP_FADE;
use sphere_core::{
    AudioFrame, BlendMode, DrawCommand, RecordingSurface, Rgba, SphereConfig, SphereEngine,
};

fn engine(particles: usize, self_check: bool) -> SphereEngine {
    SphereEngine::new(SphereConfig {
        particle_count: particles,
        stripe_count: 4,
        seed: 11,
        self_check,
    })
    .unwrap()
}

fn loud_frame() -> AudioFrame {
    let samples: Vec<u8> = (0..1024).map(|i| if i % 2 == 0 { 90 } else { 166 }).collect();
    AudioFrame::new(samples, vec![220; 512]).unwrap()
}

fn count(commands: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
    commands.iter().filter(|c| pred(c)).count()
}

#[test]
fn backdrop_fade_comes_first() {
    let mut e = engine(100, false);
    let mut surface = RecordingSurface::new(640.0, 480.0);
    e.advance_frame(None, &mut surface);
    let cmds = surface.commands();
    assert_eq!(cmds[0], DrawCommand::FillStyle(Rgba::new(5, 5, 5, BACKDROP_FADE)));
    assert_eq!(
        cmds[1],
        DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            w: 640.0,
            h: 480.0
        }
    );
}

#[test]
fn one_dot_per_particle() {
    let mut e = engine(120, false);
    let mut surface = RecordingSurface::new(640.0, 480.0);
    e.advance_frame(None, &mut surface);
    let rects = count(surface.commands(), |c| matches!(c, DrawCommand::FillRect { .. }));
    assert_eq!(rects, 1 + 120);
}

#[test]
fn passes_run_in_order_and_reset_blend() {
    let mut e = engine(200, false);
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let audio = loud_frame();
    for _ in 0..5 {
        surface.clear();
        e.advance_frame(Some(&audio), &mut surface);
    }
    let cmds = surface.commands();
    let pos = |mode: BlendMode| {
        cmds.iter()
            .position(|c| *c == DrawCommand::BlendMode(mode))
            .unwrap()
    };
    let last_rect = cmds
        .iter()
        .rposition(|c| matches!(c, DrawCommand::FillRect { .. }))
        .unwrap();
    assert!(last_rect < pos(BlendMode::Lighter));
    assert!(pos(BlendMode::Lighter) < pos(BlendMode::Screen));

    let n = cmds.len();
    assert_eq!(cmds[n - 2], DrawCommand::BlendMode(BlendMode::SourceOver));
    assert_eq!(cmds[n - 1], DrawCommand::GlobalAlpha(1.0));
}

#[test]
fn links_only_for_excited_even_particles() {
    let mut e = engine(200, false);
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let audio = loud_frame();
    for _ in 0..3 {
        surface.clear();
        e.advance_frame(Some(&audio), &mut surface);
    }
    let expected_links = e
        .positions()
        .iter()
        .step_by(2)
        .filter(|p| p.spike > 0.01)
        .count();
    assert!(expected_links > 0);
    let strokes = count(surface.commands(), |c| *c == DrawCommand::Stroke);
    assert_eq!(strokes, expected_links + e.buckets().len());
}

#[test]
fn silent_frame_draws_only_stripe_contours() {
    let mut e = engine(80, false);
    let mut surface = RecordingSurface::new(640.0, 480.0);
    e.advance_frame(None, &mut surface);
    let strokes = count(surface.commands(), |c| *c == DrawCommand::Stroke);
    assert_eq!(strokes, 4);
    let moves = count(surface.commands(), |c| matches!(c, DrawCommand::MoveTo(_)));
    let lines = count(surface.commands(), |c| matches!(c, DrawCommand::LineTo(_)));
    assert_eq!(moves, 4);
    assert_eq!(lines, 80 - 4);
}

#[test]
fn contours_follow_theta_order() {
    let mut e = engine(80, false);
    let mut surface = RecordingSurface::new(640.0, 480.0);
    e.advance_frame(None, &mut surface);
    let positions = e.positions();
    for bucket in e.buckets().iter() {
        for pair in bucket.windows(2) {
            assert!(positions[pair[0]].theta <= positions[pair[1]].theta);
        }
    }
}

#[test]
fn self_check_runs_once() {
    let mut e = engine(150, true);
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let first = e.advance_frame(None, &mut surface);
    let report = first.bounds.expect("first frame is checked");
    assert!(report.within_bounds());
    assert!(e.advance_frame(None, &mut surface).bounds.is_none());

    let mut unchecked = engine(150, false);
    assert!(unchecked.advance_frame(None, &mut surface).bounds.is_none());
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * b.abs().max(1.0)
}

fn alpha_at(cmds: &[DrawCommand], i: usize) -> f32 {
    match cmds[i] {
        DrawCommand::GlobalAlpha(a) => a,
        ref other => panic!("expected GlobalAlpha at {i}, got {other:?}"),
    }
}

fn width_at(cmds: &[DrawCommand], i: usize) -> f32 {
    match cmds[i] {
        DrawCommand::LineWidth(w) => w,
        ref other => panic!("expected LineWidth at {i}, got {other:?}"),
    }
}

/// Check every dot, link and stripe style value against the frame's
/// volume and freedom. Returns (link alpha, stripe alpha).
fn check_styling(e: &SphereEngine, cmds: &[DrawCommand], v: f32, f: f32) -> (f32, f32) {
    let dots = cmds
        .iter()
        .position(|c| *c == DrawCommand::FillStyle(Rgba::new(254, 254, 254, 1.0)))
        .unwrap();
    let size_gain = (1.0 + f * 1.8) * (0.85 + 0.5 * 0.24) * 2.0;
    for (k, p) in e.positions().iter().enumerate() {
        let i = dots + 1 + k * 2;
        let alpha = alpha_at(cmds, i);
        assert!(close(alpha, 0.08 + 0.85 * p.z + 0.3 * v + 0.25 * f), "dot {k} alpha {alpha}");
        let side = (0.6 + 2.2 * p.z + 1.2 * v) * size_gain * 0.56;
        match cmds[i + 1] {
            DrawCommand::FillRect { x, y, w, h } => {
                assert!(close(w, side) && close(h, side), "dot {k} side {w}x{h}, want {side}");
                assert!(close(x + w * 0.5, p.tip.x) && close(y + h * 0.5, p.tip.y));
            }
            ref other => panic!("expected FillRect, got {other:?}"),
        }
    }

    let lighter = cmds
        .iter()
        .position(|c| *c == DrawCommand::BlendMode(BlendMode::Lighter))
        .unwrap();
    let link_alpha = alpha_at(cmds, lighter + 1);
    assert!(close(link_alpha, (0.22 + 0.7 * v + 0.6 * f).min(0.85)));
    assert!(close(width_at(cmds, lighter + 3), (0.8 + 1.8 * v + 1.3 * f).max(0.5)));

    let screen = cmds
        .iter()
        .position(|c| *c == DrawCommand::BlendMode(BlendMode::Screen))
        .unwrap();
    let stripe_alpha = alpha_at(cmds, screen + 1);
    assert!(close(stripe_alpha, (0.26 + 0.6 * v + 0.25 * f).min(0.92)));
    assert!(close(width_at(cmds, screen + 2), (1.2 + 2.2 * v + 1.4 * f).max(0.6)));
    (link_alpha, stripe_alpha)
}

#[test]
fn styling_tracks_volume_and_freedom() {
    let mut e = engine(90, false);
    let mut surface = RecordingSurface::new(640.0, 480.0);

    let quiet = e.advance_frame(None, &mut surface);
    assert_eq!(quiet.geometry.volume, 0.0);
    assert_eq!(quiet.geometry.freedom, 0.0);
    let (link_alpha, stripe_alpha) = check_styling(&e, surface.commands(), 0.0, 0.0);
    assert!(close(link_alpha, 0.22));
    assert!(close(stripe_alpha, 0.26));

    let audio = loud_frame();
    let mut loud = quiet;
    for _ in 0..40 {
        surface.clear();
        loud = e.advance_frame(Some(&audio), &mut surface);
    }
    let (v, f) = (loud.geometry.volume, loud.geometry.freedom);
    assert!(v > 0.95 && f > 2.0);
    let (link_alpha, stripe_alpha) = check_styling(&e, surface.commands(), v, f);
    assert_eq!(link_alpha, 0.85);
    assert_eq!(stripe_alpha, 0.92);
}
