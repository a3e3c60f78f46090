//! Deterministic effect core
//!
//! Every decision an effect makes lives here. This module must stay pure:
//! - Seeded RNG only, passed in or owned explicitly
//! - No DOM, timer, or rendering dependencies
//! - Ticks/steps driven from outside, so tests can drive them directly

pub mod loader;
pub mod particles;
pub mod scroll;
pub mod typewriter;

pub use loader::{LoaderPhase, LoaderSim};
pub use particles::{Particle, ParticleField, link_alpha, pulse_alpha};
pub use scroll::{HeroShift, RevealFlag, SkillFill, active_section, hero_parallax, nav_scrolled};
pub use typewriter::Typewriter;
