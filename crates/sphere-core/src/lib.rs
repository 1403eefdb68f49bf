//! Audio- and pointer-reactive spiky particle sphere.
//!
//! The crate is platform-neutral: audio buffers arrive as [`AudioFrame`]s,
//! pointer events go through [`SphereEngine::pointer_mut`], and drawing goes
//! to any [`DrawSurface`]. One call to [`SphereEngine::advance_frame`] runs a
//! whole frame to completion.

pub mod audio;
pub mod compositor;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod particles;
pub mod pointer;
pub mod simulator;
pub mod surface;

pub use audio::{AudioEnvelope, AudioFrame, AudioStatus};
pub use compositor::{BoundsReport, Compositor};
pub use config::SphereConfig;
pub use engine::{FrameReport, SphereEngine};
pub use error::{AudioFrameError, ConfigError, SphereError};
pub use particles::{Particle, ParticleField, StripeBuckets};
pub use pointer::{PointerField, PointerForceModel, PointerPhase};
pub use simulator::{FrameGeometry, FrameParams, PositionState, SphereSimulator};
pub use surface::{BlendMode, DrawCommand, DrawSurface, RecordingSurface, Rgba};
