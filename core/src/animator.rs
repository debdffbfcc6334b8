//! Trophy animator — procedural idle animation plus the collection
//! burst effect.
//!
//! Purely visual, rebuilt fresh each run; none of this state is ever
//! written to a snapshot.
//!
//! PHASES (fixed, documented, never reordered):
//!   Idle → Collected → Exploding → FadingOut → Done
//!
//! While Idle, six independent phase accumulators advance per frame
//! (pulse, float, rotate, blink-base, blink-flash, halo), each at its
//! own angular speed. A successful hit test collects the trophy and
//! emits one large particle burst; the burst drains through Exploding,
//! then a fade timer runs FadingOut to Done.

use crate::{
    particles::{EmitParams, ParticlePool, Rgb, Vec2},
    rng::EffectRng,
};

/// Particles emitted by the collection burst.
pub const BURST_PARTICLES: usize = 150;

/// Burst particle colors. One is drawn per particle.
pub const BURST_PALETTE: [Rgb; 6] = [
    Rgb::new(255, 215, 0),   // gold
    Rgb::new(255, 236, 120), // pale gold
    Rgb::new(255, 160, 32),  // amber
    Rgb::new(255, 255, 255), // white
    Rgb::new(180, 255, 120), // spring green
    Rgb::new(120, 200, 255), // sky
];

/// FadingOut duration, in the same dt units as `advance`.
pub const FADE_DURATION: f32 = 45.0;

// Fixed angular speeds for the accumulators that are not part of the
// configurable surface, radians per dt unit.
pub const PULSE_SPEED: f32 = 0.08;
pub const FLOAT_SPEED: f32 = 0.04;
pub const BLINK_FLASH_SPEED: f32 = 0.17;
pub const HALO_SPEED: f32 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrophyPhase {
    Idle,
    /// Hit test succeeded this frame; burst has been emitted.
    Collected,
    /// Burst particles still alive.
    Exploding,
    FadingOut,
    Done,
}

/// Recognized animator options. Alpha bounds are clamped to 0..=255
/// on the way in.
#[derive(Debug, Clone, Copy)]
pub struct AnimatorConfig {
    pub blink_speed: f32,
    pub min_alpha: u8,
    pub max_alpha: u8,
    pub float_amplitude: f32,
    pub rotation_speed: f32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            blink_speed: 0.05,
            min_alpha: 90,
            max_alpha: 255,
            float_amplitude: 8.0,
            rotation_speed: 0.02,
        }
    }
}

pub struct TrophyAnimator {
    phase: TrophyPhase,
    config: AnimatorConfig,
    /// Rest position. Rendering floats around origin.y; the rest
    /// position itself never moves.
    origin: Vec2,
    hit_radius: f32,

    pulse_phase: f32,
    float_phase: f32,
    rotate_phase: f32,
    blink_base_phase: f32,
    blink_flash_phase: f32,
    halo_phase: f32,

    pulse_speed: f32,
    float_speed: f32,
    blink_flash_speed: f32,
    halo_speed: f32,

    fade_timer: f32,
    pool: ParticlePool,
    rng: EffectRng,
}

impl TrophyAnimator {
    pub fn new(origin: Vec2, rng: EffectRng) -> Self {
        Self {
            phase: TrophyPhase::Idle,
            config: AnimatorConfig::default(),
            origin,
            hit_radius: 30.0,
            pulse_phase: 0.0,
            float_phase: 0.0,
            rotate_phase: 0.0,
            blink_base_phase: 0.0,
            blink_flash_phase: 0.0,
            halo_phase: 0.0,
            pulse_speed: PULSE_SPEED,
            float_speed: FLOAT_SPEED,
            blink_flash_speed: BLINK_FLASH_SPEED,
            halo_speed: HALO_SPEED,
            fade_timer: 0.0,
            pool: ParticlePool::new(),
            rng,
        }
    }

    // ── Configuration ──────────────────────────────────────────

    pub fn set_blink_speed(&mut self, speed: f32) {
        self.config.blink_speed = speed;
    }

    /// Alpha bounds, each clamped to 0..=255. A min above max is
    /// normalized by swapping.
    pub fn set_alpha_range(&mut self, min_alpha: i32, max_alpha: i32) {
        let lo = min_alpha.clamp(0, 255) as u8;
        let hi = max_alpha.clamp(0, 255) as u8;
        self.config.min_alpha = lo.min(hi);
        self.config.max_alpha = lo.max(hi);
    }

    pub fn set_float_amplitude(&mut self, amplitude: f32) {
        self.config.float_amplitude = amplitude;
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.config.rotation_speed = speed;
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn phase(&self) -> TrophyPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == TrophyPhase::Done
    }

    pub fn float_phase(&self) -> f32 {
        self.float_phase
    }

    /// Rendered vertical position: origin.y + amplitude * sin(float_phase).
    pub fn draw_y(&self) -> f32 {
        self.origin.y + self.config.float_amplitude * self.float_phase.sin()
    }

    pub fn draw_x(&self) -> f32 {
        self.origin.x
    }

    pub fn rotation(&self) -> f32 {
        self.rotate_phase
    }

    /// Pulse scale factor around 1.0.
    pub fn pulse_scale(&self) -> f32 {
        1.0 + 0.06 * self.pulse_phase.sin()
    }

    pub fn halo_intensity(&self) -> f32 {
        0.5 + 0.5 * self.halo_phase.sin()
    }

    /// Rendered alpha while idle. Base blink plus a faster flash
    /// overlay at 30% weight, mapped onto [min_alpha, max_alpha].
    pub fn alpha(&self) -> u8 {
        let min = self.config.min_alpha as f32;
        let max = self.config.max_alpha as f32;
        let base = 0.5 + 0.5 * self.blink_base_phase.sin();
        let flash = 0.5 + 0.5 * self.blink_flash_phase.sin();
        let mix = (base + 0.3 * flash).clamp(0.0, 1.0);
        (min + (max - min) * mix).clamp(min, max) as u8
    }

    /// During FadingOut, remaining opacity in [0, 1]; 1.0 before the
    /// fade starts, 0.0 once Done.
    pub fn fade_opacity(&self) -> f32 {
        match self.phase {
            TrophyPhase::FadingOut => (1.0 - self.fade_timer / FADE_DURATION).clamp(0.0, 1.0),
            TrophyPhase::Done => 0.0,
            _ => 1.0,
        }
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.pool
    }

    // ── Interaction ────────────────────────────────────────────

    /// Hit test against the *current floated* position, not the rest
    /// position. On success while Idle, collects the trophy and emits
    /// the burst. Returns whether the trophy was collected.
    pub fn try_collect(&mut self, x: f32, y: f32) -> bool {
        if self.phase != TrophyPhase::Idle {
            return false;
        }
        let dx = x - self.origin.x;
        let dy = y - self.draw_y();
        if dx * dx + dy * dy > self.hit_radius * self.hit_radius {
            return false;
        }
        self.emit_burst();
        self.phase = TrophyPhase::Collected;
        log::debug!("trophy collected, {} burst particles", self.pool.len());
        true
    }

    fn emit_burst(&mut self) {
        let center = Vec2::new(self.origin.x, self.draw_y());
        for _ in 0..BURST_PARTICLES {
            let angle = self.rng.range_f32(0.0, std::f32::consts::TAU);
            let speed = self.rng.range_f32(1.5, 7.0);
            let color = BURST_PALETTE
                [self.rng.next_u32_below(BURST_PALETTE.len() as u32) as usize];
            self.pool.emit(EmitParams {
                pos: center,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                color,
                size: self.rng.range_f32(1.5, 4.0),
                life: self.rng.range_f32(20.0, 60.0),
            });
        }
    }

    // ── Frame step ─────────────────────────────────────────────

    /// Advance one frame. Driven by the external frame loop; never
    /// blocks within a tick.
    pub fn advance(&mut self, dt: f32) {
        match self.phase {
            TrophyPhase::Idle => {
                self.pulse_phase += self.pulse_speed * dt;
                self.float_phase += self.float_speed * dt;
                self.rotate_phase += self.config.rotation_speed * dt;
                self.blink_base_phase += self.config.blink_speed * dt;
                self.blink_flash_phase += self.blink_flash_speed * dt;
                self.halo_phase += self.halo_speed * dt;
            }
            TrophyPhase::Collected => {
                // Settle into Exploding on the frame after collection.
                self.phase = TrophyPhase::Exploding;
                self.pool.advance(dt);
            }
            TrophyPhase::Exploding => {
                self.pool.advance(dt);
                if self.pool.is_empty() {
                    self.phase = TrophyPhase::FadingOut;
                    self.fade_timer = 0.0;
                }
            }
            TrophyPhase::FadingOut => {
                self.fade_timer += dt;
                if self.fade_timer >= FADE_DURATION {
                    self.phase = TrophyPhase::Done;
                }
            }
            TrophyPhase::Done => {}
        }
    }
}
