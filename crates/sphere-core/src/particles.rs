//! Immutable particle seeds and their static stripe grouping.

use crate::constants::{PHI_SPAN, THETA_JITTER};
use crate::simulator::PositionState;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Seed attributes of one particle. Fixed for the lifetime of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Stripe membership in `[0, stripe_count)`.
    pub band: usize,
    pub theta0: f32,
    pub phi0: f32,
    /// Drives the per-particle phase offsets of every noise term.
    pub seed: f32,
    /// Selects the frequency bin this particle listens to.
    pub freq_seed: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    stripe_count: usize,
}

impl ParticleField {
    /// Deal `count` particles round-robin over `stripe_count` bands.
    pub fn new(count: usize, stripe_count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stripes = stripe_count.max(1);
        let particles = (0..count)
            .map(|i| {
                let band = i % stripes;
                let band_angle = band as f32 / stripes as f32 * TAU;
                Particle {
                    band,
                    theta0: band_angle + (rng.gen::<f32>() - 0.5) * THETA_JITTER,
                    phi0: (rng.gen::<f32>() - 0.5) * PHI_SPAN,
                    seed: rng.gen(),
                    freq_seed: rng.gen(),
                }
            })
            .collect();
        Self {
            particles,
            stripe_count: stripes,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn stripe_count(&self) -> usize {
        self.stripe_count
    }
}

/// Particle indices grouped by band. Membership never changes; only the
/// order inside a bucket is rearranged before the contour pass.
#[derive(Clone, Debug)]
pub struct StripeBuckets {
    buckets: Vec<Vec<usize>>,
}

impl StripeBuckets {
    pub fn new(field: &ParticleField) -> Self {
        let mut buckets = vec![Vec::new(); field.stripe_count()];
        for (i, p) in field.particles().iter().enumerate() {
            buckets[p.band].push(i);
        }
        Self { buckets }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    pub fn bucket(&self, band: usize) -> Option<&[usize]> {
        self.buckets.get(band).map(Vec::as_slice)
    }

    /// Order every bucket by the frame's resolved theta, ascending.
    pub fn sort_by_theta(&mut self, positions: &[PositionState]) {
        for bucket in &mut self.buckets {
            bucket.sort_unstable_by(|&a, &b| positions[a].theta.total_cmp(&positions[b].theta));
        }
    }
}
