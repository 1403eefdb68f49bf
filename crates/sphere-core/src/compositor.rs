//! Ordered draw passes over the simulated positions.

use crate::constants::{BACKDROP_FADE, LINK_MIN_SPIKE, LINK_STRIDE, SPHERE_FRACTION};
use crate::particles::StripeBuckets;
use crate::simulator::{FrameGeometry, PositionState};
use crate::surface::{BlendMode, DrawSurface, Rgba};
use glam::Vec2;

const BACKDROP: Rgba = Rgba::new(5, 5, 5, BACKDROP_FADE);
const DOT_FILL: Rgba = Rgba::new(254, 254, 254, 1.0);
const LINK_STROKE: Rgba = Rgba::new(255, 255, 255, 0.38);
const STRIPE_STROKE: Rgba = Rgba::new(255, 255, 255, 0.28);

/// Bounding box of the spike tips compared to the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsReport {
    pub min: Vec2,
    pub max: Vec2,
    pub size: Vec2,
}

impl BoundsReport {
    pub fn measure(positions: &[PositionState], size: Vec2) -> Self {
        let (min, max) = positions.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(p.tip), hi.max(p.tip)),
        );
        Self { min, max, size }
    }

    pub fn within_bounds(&self) -> bool {
        self.min.x >= 0.0 && self.min.y >= 0.0 && self.max.x <= self.size.x && self.max.y <= self.size.y
    }
}

pub struct Compositor {
    self_check: bool,
}

impl Compositor {
    /// With `self_check`, the first drawn frame is measured once against the
    /// surface bounds.
    pub fn new(self_check: bool) -> Self {
        Self { self_check }
    }

    /// Draw one frame. Returns the bounds report on the self-checked frame.
    pub fn draw(
        &mut self,
        surface: &mut dyn DrawSurface,
        geometry: &FrameGeometry,
        positions: &[PositionState],
        buckets: &mut StripeBuckets,
    ) -> Option<BoundsReport> {
        let volume = geometry.volume;
        let freedom = geometry.freedom;

        surface.set_fill_style(BACKDROP);
        surface.fill_rect(0.0, 0.0, geometry.size.x, geometry.size.y);

        draw_dots(surface, positions, volume, freedom);
        draw_links(surface, positions, volume, freedom);
        draw_stripes(surface, positions, buckets, volume, freedom);

        if !self.self_check {
            return None;
        }
        self.self_check = false;
        let report = BoundsReport::measure(positions, geometry.size);
        if report.within_bounds() {
            log::debug!("[compositor] first frame within bounds: {:?}", report);
        } else {
            log::warn!("[compositor] sphere rendering exceeded surface bounds: {:?}", report);
        }
        Some(report)
    }
}

fn draw_dots(surface: &mut dyn DrawSurface, positions: &[PositionState], volume: f32, freedom: f32) {
    let size_gain = (1.0 + freedom * 1.8) * (0.85 + SPHERE_FRACTION * 0.24) * 2.0;
    surface.set_fill_style(DOT_FILL);
    for p in positions {
        let size = (0.6 + p.z * 2.2 + volume * 1.2) * size_gain;
        let half = size * 0.28;
        surface.set_global_alpha(0.08 + p.z * 0.85 + volume * 0.3 + freedom * 0.25);
        surface.fill_rect(p.tip.x - half, p.tip.y - half, half * 2.0, half * 2.0);
    }
}

// Additive strokes from shell point to tip on every other excited particle.
fn draw_links(surface: &mut dyn DrawSurface, positions: &[PositionState], volume: f32, freedom: f32) {
    surface.set_blend_mode(BlendMode::Lighter);
    surface.set_global_alpha((0.22 + volume * 0.7 + freedom * 0.6).min(0.85));
    surface.set_stroke_style(LINK_STROKE);
    surface.set_line_width((0.8 + volume * 1.8 + freedom * 1.3).max(0.5));
    for p in positions.iter().step_by(LINK_STRIDE) {
        if p.spike <= LINK_MIN_SPIKE {
            continue;
        }
        surface.begin_path();
        surface.move_to(p.core);
        surface.line_to(p.tip);
        surface.stroke();
    }
    reset_compositing(surface);
}

fn draw_stripes(
    surface: &mut dyn DrawSurface,
    positions: &[PositionState],
    buckets: &mut StripeBuckets,
    volume: f32,
    freedom: f32,
) {
    buckets.sort_by_theta(positions);

    surface.set_blend_mode(BlendMode::Screen);
    surface.set_global_alpha((0.26 + volume * 0.6 + freedom * 0.25).min(0.92));
    surface.set_line_width((1.2 + volume * 2.2 + freedom * 1.4).max(0.6));
    surface.set_stroke_style(STRIPE_STROKE);
    for bucket in buckets.iter() {
        let mut points = bucket.iter().map(|&i| positions[i].tip);
        let Some(first) = points.next() else {
            continue;
        };
        surface.begin_path();
        surface.move_to(first);
        for p in points {
            surface.line_to(p);
        }
        surface.stroke();
    }
    reset_compositing(surface);
}

#[inline]
fn reset_compositing(surface: &mut dyn DrawSurface) {
    surface.set_blend_mode(BlendMode::SourceOver);
    surface.set_global_alpha(1.0);
}
