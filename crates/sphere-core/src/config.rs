use crate::constants::{DEFAULT_FIELD_SEED, DEFAULT_PARTICLE_COUNT, DEFAULT_STRIPE_COUNT};
use crate::error::ConfigError;

/// Construction parameters for a [`crate::SphereEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct SphereConfig {
    pub particle_count: usize,
    pub stripe_count: usize,
    /// Seeds the particle field; equal seeds give identical fields.
    pub seed: u64,
    /// Compare the first drawn frame against the surface bounds once.
    pub self_check: bool,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            stripe_count: DEFAULT_STRIPE_COUNT,
            seed: DEFAULT_FIELD_SEED,
            self_check: true,
        }
    }
}

impl SphereConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.stripe_count == 0 {
            return Err(ConfigError::NoStripes);
        }
        if self.stripe_count > self.particle_count {
            return Err(ConfigError::TooManyStripes {
                stripes: self.stripe_count,
                particles: self.particle_count,
            });
        }
        Ok(())
    }
}
