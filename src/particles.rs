//! Floating hearts and sparkles.
//!
//! Particles are kept in one arena keyed by id, each with an explicit expiry.
//! Nothing schedules a removal per particle: the presenter calls
//! [`ParticleField::reap`] on its frame timer and everything past its expiry
//! is dropped in one sweep.

use rand::Rng;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

const HEART_RISE: Duration = Duration::from_secs(5);
const HEART_MIN_SIZE: f32 = 16.0;
const HEART_SIZE_SPREAD: f32 = 16.0;

/// Rises from the bottom edge at `left` percent of the width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heart {
    pub left: f32,
    pub delay: Duration,
    pub duration: Duration,
    pub size: f32,
}

/// Pops in and out at (`x`, `y`), both percentages of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Heart(Heart),
    Sparkle(Sparkle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub effect: Effect,
    pub spawned_at: Instant,
    pub expires_at: Instant,
}

impl Particle {
    /// Fraction of the animation already played, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        let span = match self.effect {
            Effect::Heart(heart) => heart.delay + heart.duration,
            Effect::Sparkle(_) => self.expires_at.saturating_duration_since(self.spawned_at),
        };
        if span.is_zero() {
            return 1.0;
        }
        let played = now.saturating_duration_since(self.spawned_at);
        (played.as_secs_f32() / span.as_secs_f32()).min(1.0)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct ParticleField {
    next_id: u64,
    particles: BTreeMap<u64, Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_heart<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant, ttl: Duration) -> u64 {
        let heart = Heart {
            left: rng.gen_range(0.0..100.0),
            delay: Duration::ZERO,
            duration: HEART_RISE,
            size: HEART_MIN_SIZE + rng.gen_range(0.0..HEART_SIZE_SPREAD),
        };
        self.insert(Effect::Heart(heart), now, ttl)
    }

    pub fn spawn_sparkle<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: Instant,
        ttl: Duration,
    ) -> u64 {
        let sparkle = Sparkle {
            x: rng.gen_range(0.0..100.0),
            y: rng.gen_range(0.0..100.0),
        };
        self.insert(Effect::Sparkle(sparkle), now, ttl)
    }

    pub fn insert(&mut self, effect: Effect, now: Instant, ttl: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.particles.insert(
            id,
            Particle {
                id,
                effect,
                spawned_at: now,
                expires_at: now + ttl,
            },
        );
        id
    }

    /// Drops every particle whose expiry has passed. Returns how many went.
    pub fn reap(&mut self, now: Instant) -> usize {
        let before = self.particles.len();
        self.particles.retain(|_, p| !p.is_expired(now));
        before - self.particles.len()
    }

    /// Removes everything, used when the surface is torn down.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const HEART_TTL: Duration = Duration::from_secs(6);
    const SPARKLE_TTL: Duration = Duration::from_secs(2);

    #[test]
    fn test_reap_respects_ttl() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::new();
        let t0 = Instant::now();

        field.spawn_heart(&mut rng, t0, HEART_TTL);
        field.spawn_sparkle(&mut rng, t0, SPARKLE_TTL);
        assert_eq!(field.len(), 2);

        assert_eq!(field.reap(t0 + Duration::from_millis(1999)), 0);
        assert_eq!(field.reap(t0 + SPARKLE_TTL), 1);
        assert!(matches!(
            field.iter().next().map(|p| p.effect),
            Some(Effect::Heart(_))
        ));

        assert_eq!(field.reap(t0 + HEART_TTL), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_every_spawn_is_eventually_removed() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut field = ParticleField::new();
        let t0 = Instant::now();

        // Simulate the live timers for a minute, reaping on a 100ms frame.
        let mut spawned = 0;
        let mut reaped = 0;
        for frame in 0..600u64 {
            let now = t0 + Duration::from_millis(frame * 100);
            if frame % 8 == 0 {
                field.spawn_heart(&mut rng, now, HEART_TTL);
                spawned += 1;
            }
            if frame % 16 == 0 {
                field.spawn_sparkle(&mut rng, now, SPARKLE_TTL);
                spawned += 1;
            }
            reaped += field.reap(now);
            assert!(field.len() <= 10, "field grew to {}", field.len());
        }

        reaped += field.reap(t0 + Duration::from_secs(3600));
        assert_eq!(spawned, reaped);
        assert!(field.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_shapes_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::new();
        let now = Instant::now();

        let ids: Vec<u64> = (0..50)
            .map(|i| {
                if i % 2 == 0 {
                    field.spawn_heart(&mut rng, now, HEART_TTL)
                } else {
                    field.spawn_sparkle(&mut rng, now, SPARKLE_TTL)
                }
            })
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(field.len(), 50);

        for particle in field.iter() {
            match particle.effect {
                Effect::Heart(h) => {
                    assert!((0.0..100.0).contains(&h.left));
                    assert!((16.0..32.0).contains(&h.size));
                    assert_eq!(h.duration, Duration::from_secs(5));
                }
                Effect::Sparkle(s) => {
                    assert!((0.0..100.0).contains(&s.x));
                    assert!((0.0..100.0).contains(&s.y));
                }
            }
        }
    }

    #[test]
    fn test_progress() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new();
        let t0 = Instant::now();
        field.spawn_heart(&mut rng, t0, HEART_TTL);

        let heart = field.iter().next().copied().unwrap();
        assert_eq!(heart.progress(t0), 0.0);
        assert!((heart.progress(t0 + Duration::from_millis(2500)) - 0.5).abs() < 1e-3);
        // Finished rising before it expires
        assert_eq!(heart.progress(t0 + Duration::from_millis(5500)), 1.0);
        assert!(!heart.is_expired(t0 + Duration::from_millis(5500)));
    }

    #[test]
    fn test_clear() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = ParticleField::new();
        field.spawn_sparkle(&mut rng, Instant::now(), SPARKLE_TTL);
        field.clear();
        assert!(field.is_empty());
    }
}
