//! Shooting stars: short-lived points that spawn on a fixed cadence and fall
//! with increasing speed until their lifetime runs out.

use crate::config::MeteorConfig;
use crate::constants::METEOR_MAX_CATCH_UP;
use crate::particles::StarVertex;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Meteor {
    pub position: Vec3,
    pub spawned_ms: f64,
    pub lifetime_ms: f64,
}

impl Meteor {
    #[inline]
    pub fn progress(&self, now_ms: f64) -> f32 {
        ((now_ms - self.spawned_ms) / self.lifetime_ms).clamp(0.0, 1.0) as f32
    }
}

#[derive(Clone, Debug)]
pub struct MeteorShower {
    config: MeteorConfig,
    meteors: Vec<Meteor>,
    next_spawn_ms: Option<f64>,
}

impl MeteorShower {
    pub fn new(config: MeteorConfig) -> Self {
        Self {
            config,
            meteors: Vec::with_capacity(config.capacity),
            next_spawn_ms: None,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn update<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        let interval = self.config.spawn_interval_ms;
        let mut next = self.next_spawn_ms.unwrap_or(now_ms + interval);
        // after a long pause (hidden tab) skip the backlog instead of bursting
        if now_ms - next > interval * METEOR_MAX_CATCH_UP {
            next = now_ms;
        }
        while now_ms >= next {
            if self.meteors.len() < self.config.capacity {
                self.spawn(next, rng);
            }
            next += interval;
        }
        self.next_spawn_ms = Some(next);

        let fall = self.config.fall_step;
        self.meteors.retain_mut(|m| {
            if now_ms - m.spawned_ms >= m.lifetime_ms {
                return false;
            }
            m.position.y -= fall * m.progress(now_ms);
            true
        });
    }

    fn spawn<R: Rng + ?Sized>(&mut self, at_ms: f64, rng: &mut R) {
        let extent = self.config.spread * 2.0;
        let (lo, hi) = (self.config.min_lifetime_ms, self.config.max_lifetime_ms);
        let lifetime_ms = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        self.meteors.push(Meteor {
            position: Vec3::new(
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
                self.config.depth,
            ),
            spawned_ms: at_ms,
            lifetime_ms,
        });
    }

    pub fn write_vertices(&self, out: &mut Vec<StarVertex>) {
        out.clear();
        out.extend(self.meteors.iter().map(|m| StarVertex {
            position: m.position.to_array(),
            size: self.config.size,
            color: [1.0, 1.0, 1.0, 1.0],
        }));
    }
}
