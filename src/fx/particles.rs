//! Ambient neon particle field
//!
//! A fixed pool of drifting, pulsing discs with proximity links between
//! close pairs. Simulation only - drawing happens in the glue layer, which
//! reads positions, pulsed alphas and link strengths from here each frame.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{LINK_DISTANCE, LINK_MAX_ALPHA, PALETTE, PARTICLE_COUNT};

/// One drifting disc. Slots are created once and live for the page;
/// `reset` re-rolls a slot in place.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Index into [`PALETTE`]
    pub color: usize,
    pub base_alpha: f32,
    pub phase: f32,
    pub phase_speed: f32,
}

impl Particle {
    fn spawn(rng: &mut Pcg32, bounds: Vec2) -> Self {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 0.0,
            color: 0,
            base_alpha: 0.0,
            phase: 0.0,
            phase_speed: 0.0,
        };
        p.reset(rng, bounds);
        p
    }

    /// Re-roll position, velocity, look and pulse for this slot
    pub fn reset(&mut self, rng: &mut Pcg32, bounds: Vec2) {
        self.pos = Vec2::new(
            rng.random_range(0.0..bounds.x.max(1.0)),
            rng.random_range(0.0..bounds.y.max(1.0)),
        );
        self.vel = Vec2::new(rng.random_range(-0.2..0.2), rng.random_range(-0.2..0.2));
        self.radius = rng.random_range(0.5..3.0);
        self.color = rng.random_range(0..PALETTE.len());
        self.base_alpha = rng.random_range(0.15..0.65);
        self.phase = rng.random_range(0.0..std::f32::consts::TAU);
        self.phase_speed = rng.random_range(0.01..0.03);
    }

    /// Integrate one frame: drift, advance the pulse, reflect off the edges.
    /// Position is not clamped - a particle may sit outside bounds for a
    /// frame - but each crossing flips the velocity component exactly once,
    /// so the next frames walk it back inside.
    pub fn update(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        self.phase += self.phase_speed;
        if (self.pos.x < 0.0 && self.vel.x < 0.0) || (self.pos.x > bounds.x && self.vel.x > 0.0) {
            self.vel.x = -self.vel.x;
        }
        if (self.pos.y < 0.0 && self.vel.y < 0.0) || (self.pos.y > bounds.y && self.vel.y > 0.0) {
            self.vel.y = -self.vel.y;
        }
    }

    /// Current disc opacity: base alpha modulated by the sine pulse
    pub fn alpha(&self) -> f32 {
        pulse_alpha(self.base_alpha, self.phase)
    }

    pub fn color_str(&self) -> &'static str {
        PALETTE[self.color]
    }
}

/// Disc opacity for a given base alpha and pulse phase
#[inline]
pub fn pulse_alpha(base_alpha: f32, phase: f32) -> f32 {
    base_alpha * (0.6 + 0.4 * phase.sin())
}

/// Opacity of the line linking two particles `dist` apart, or `None` when
/// they are too far apart to link. Linear falloff to zero at the threshold.
#[inline]
pub fn link_alpha(dist: f32) -> Option<f32> {
    if dist < LINK_DISTANCE {
        Some((1.0 - dist / LINK_DISTANCE) * LINK_MAX_ALPHA)
    } else {
        None
    }
}

/// The full fixed-size field. Owns its particles and its RNG; the glue layer
/// drives `update` once per animation frame and reads the slots to draw.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let bounds = Vec2::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::spawn(&mut rng, bounds))
            .collect();
        Self {
            particles,
            bounds,
            rng,
        }
    }

    /// Track the canvas when the viewport resizes. Existing particles keep
    /// their positions; reflection just starts using the new edges.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// One simulation frame for every slot
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.update(self.bounds);
        }
    }

    /// Re-roll a slot in place (slots are never destroyed)
    pub fn reset_slot(&mut self, index: usize) {
        if let Some(p) = self.particles.get_mut(index) {
            let bounds = self.bounds;
            p.reset(&mut self.rng, bounds);
        }
    }

    /// All linked pairs this frame: (i, j, line alpha), i < j. O(n²) over 60
    /// slots (1770 pairs) - fine here, needs a spatial index before scaling.
    pub fn links(&self) -> Vec<(usize, usize, f32)> {
        let mut out = Vec::new();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let dist = self.particles[i].pos.distance(self.particles[j].pos);
                if let Some(alpha) = link_alpha(dist) {
                    out.push((i, j, alpha));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_reflection_flips_velocity_once() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut p = Particle::spawn(&mut rng, BOUNDS);
        p.pos = Vec2::new(-1.0, 300.0);
        p.vel = Vec2::new(-0.3, 0.0);

        p.update(BOUNDS);
        assert_eq!(p.vel.x, 0.3);

        // Still outside for a frame, but the sign must not flip back
        while p.pos.x < 0.0 {
            p.update(BOUNDS);
            assert_eq!(p.vel.x, 0.3);
        }
        assert!(p.pos.x >= 0.0);
    }

    #[test]
    fn test_reflection_both_edges() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut p = Particle::spawn(&mut rng, BOUNDS);
        p.pos = Vec2::new(400.0, BOUNDS.y - 0.05);
        p.vel = Vec2::new(0.0, 0.1);
        p.update(BOUNDS);
        assert_eq!(p.vel.y, -0.1);
    }

    #[test]
    fn test_link_alpha_falloff() {
        assert_eq!(link_alpha(0.0), Some(0.08));
        let mid = link_alpha(75.0).unwrap();
        assert!((mid - 0.04).abs() < 1e-6);
        assert!(link_alpha(149.0).unwrap() > 0.0);
        assert_eq!(link_alpha(150.0), None);
        assert_eq!(link_alpha(200.0), None);
    }

    #[test]
    fn test_field_has_fixed_population() {
        let mut field = ParticleField::new(99, 800.0, 600.0);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for _ in 0..100 {
            field.update();
        }
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_spawn_ranges() {
        let field = ParticleField::new(7, 800.0, 600.0);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.pos.x));
            assert!((0.0..600.0).contains(&p.pos.y));
            assert!(p.vel.x.abs() <= 0.2 && p.vel.y.abs() <= 0.2);
            assert!((0.5..3.0).contains(&p.radius));
            assert!(p.color < PALETTE.len());
            assert!((0.15..0.65).contains(&p.base_alpha));
            assert!((0.01..0.03).contains(&p.phase_speed));
        }
    }

    #[test]
    fn test_pulse_alpha_bounds() {
        // Modulation stays within [0.2, 1.0] of the base alpha
        for i in 0..100 {
            let phase = i as f32 * 0.1;
            let a = pulse_alpha(0.5, phase);
            assert!(a >= 0.5 * 0.2 - 1e-6 && a <= 0.5 * 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_reset_slot_rerolls_in_place() {
        let mut field = ParticleField::new(3, 800.0, 600.0);
        let before = field.particles()[5].pos;
        field.reset_slot(5);
        let after = field.particles()[5].pos;
        assert_ne!(before, after);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }

    proptest! {
        /// Link opacity decreases strictly with distance inside the
        /// threshold.
        #[test]
        fn prop_link_alpha_strictly_decreasing(
            d1 in 0.0f32..150.0,
            d2 in 0.0f32..150.0,
        ) {
            prop_assume!(d2 - d1 > 0.01);
            let a1 = link_alpha(d1).unwrap();
            let a2 = link_alpha(d2).unwrap();
            prop_assert!(a1 > a2);
        }

        /// A particle that starts inside bounds stays near them: reflection
        /// never lets it run away.
        #[test]
        fn prop_particles_stay_bounded(seed in any::<u64>()) {
            let mut field = ParticleField::new(seed, 400.0, 300.0);
            for _ in 0..2000 {
                field.update();
            }
            for p in field.particles() {
                prop_assert!(p.pos.x >= -1.0 && p.pos.x <= 401.0);
                prop_assert!(p.pos.y >= -1.0 && p.pos.y <= 301.0);
            }
        }
    }
}
