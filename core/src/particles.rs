//! Finite-lifetime particle pool.
//!
//! RULE: The pool is deterministic given explicit emit calls.
//! Probabilistic emission ("30% chance per frame") is the caller's
//! concern; the pool only owns advance/decay/removal.
//!
//! Particles never cross the persistence boundary — a pool is rebuilt
//! fresh each run.

/// Downward acceleration applied to every particle, per advance step.
pub const GRAVITY: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Handle returned by `emit`. Stable for the particle's lifetime,
/// never reused within one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParticleId(u64);

#[derive(Debug, Clone, Copy)]
pub struct EmitParams {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub size: f32,
    /// Initial remaining life; also recorded as max_life.
    pub life: f32,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Remaining life as a fraction of max life, in [0, 1].
    /// Renderers use this for per-particle fade.
    pub fn life_ratio(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    next_id: u64,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, params: EmitParams) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            pos: params.pos,
            vel: params.vel,
            color: params.color,
            size: params.size,
            life: params.life,
            max_life: params.life,
        });
        id
    }

    /// Advance every particle one step: integrate position, apply
    /// gravity, decay life. Particles reaching life <= 0 are removed.
    /// Removal order is unspecified — particles are independent.
    pub fn advance(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos.x += p.vel.x;
            p.pos.y += p.vel.y;
            p.vel.y += GRAVITY;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }
}
