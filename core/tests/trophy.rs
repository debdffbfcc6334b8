//! Trophy effect tests — particle pool decay, idle animation math,
//! the collection phase machine.

use garden_core::{
    animator::{TrophyAnimator, TrophyPhase, BURST_PARTICLES, FADE_DURATION, FLOAT_SPEED},
    particles::{EmitParams, ParticlePool, Rgb, Vec2, GRAVITY},
    rng::{EffectRng, EffectStream},
};
use std::f32::consts::FRAC_PI_2;

fn animator(seed: u64) -> TrophyAnimator {
    TrophyAnimator::new(
        Vec2::new(400.0, 300.0),
        EffectRng::new(seed, EffectStream::TrophyBurst),
    )
}

// ── Particle pool ──────────────────────────────────────────────

/// A particle with life = max_life = 10 is gone after 10 advances.
#[test]
fn particle_decays_and_is_removed() {
    let mut pool = ParticlePool::new();
    let id = pool.emit(EmitParams {
        pos: Vec2::new(0.0, 0.0),
        vel: Vec2::new(1.0, -2.0),
        color: Rgb::new(255, 255, 255),
        size: 2.0,
        life: 10.0,
    });

    for step in 1..=9 {
        pool.advance(1.0);
        assert!(
            pool.get(id).is_some(),
            "particle alive after {step} advances"
        );
    }
    pool.advance(1.0);
    assert!(pool.get(id).is_none(), "life <= 0 removes the particle");
    assert!(pool.is_empty());
}

/// Gravity accumulates on velocity; position integrates velocity.
#[test]
fn advance_integrates_position_and_gravity() {
    let mut pool = ParticlePool::new();
    let id = pool.emit(EmitParams {
        pos: Vec2::new(0.0, 0.0),
        vel: Vec2::new(3.0, -1.0),
        color: Rgb::new(0, 0, 0),
        size: 1.0,
        life: 100.0,
    });

    pool.advance(1.0);
    pool.advance(1.0);

    let p = pool.get(id).unwrap();
    assert!((p.pos.x - 6.0).abs() < 1e-6);
    // y: -1.0, then (-1.0 + GRAVITY)
    assert!((p.pos.y - (-2.0 + GRAVITY)).abs() < 1e-6);
    assert!((p.vel.y - (-1.0 + 2.0 * GRAVITY)).abs() < 1e-6);
}

/// Removal only happens through advance; emission alone never shrinks
/// the pool.
#[test]
fn pool_shrinks_only_via_advance() {
    let mut pool = ParticlePool::new();
    for i in 0..20 {
        pool.emit(EmitParams {
            pos: Vec2::default(),
            vel: Vec2::default(),
            color: Rgb::new(10, 10, 10),
            size: 1.0,
            life: (i % 5 + 1) as f32,
        });
    }
    assert_eq!(pool.len(), 20);
    pool.advance(1.0); // kills the life-1 particles
    assert_eq!(pool.len(), 16);
}

// ── Idle animation ─────────────────────────────────────────────

/// With amplitude 8 and float phase π/2, the rendered Y offset is
/// exactly +8 over the rest position.
#[test]
fn float_offset_at_quarter_phase() {
    let mut trophy = animator(1);
    trophy.set_float_amplitude(8.0);

    // One advance whose dt lands the accumulator on π/2.
    trophy.advance(FRAC_PI_2 / FLOAT_SPEED);
    assert!((trophy.float_phase() - FRAC_PI_2).abs() < 1e-4);
    assert!(
        (trophy.draw_y() - 308.0).abs() < 1e-3,
        "draw_y = origin.y + 8 * sin(π/2), got {}",
        trophy.draw_y()
    );
}

/// Hit testing uses the floated position, not the rest position.
#[test]
fn hit_test_uses_floated_y() {
    let mut trophy = animator(2);
    trophy.set_float_amplitude(40.0); // well past the hit radius
    trophy.advance(FRAC_PI_2 / FLOAT_SPEED);

    assert!(
        !trophy.try_collect(400.0, 300.0),
        "rest position misses while the trophy floats 40px below it"
    );
    assert_eq!(trophy.phase(), TrophyPhase::Idle);

    assert!(trophy.try_collect(400.0, 340.0), "floated position hits");
    assert_eq!(trophy.phase(), TrophyPhase::Collected);
}

/// Rendered alpha always stays inside the configured bounds.
#[test]
fn alpha_stays_within_configured_range() {
    let mut trophy = animator(3);
    trophy.set_alpha_range(60, 200);
    for _ in 0..500 {
        trophy.advance(1.0);
        let a = trophy.alpha();
        assert!((60..=200).contains(&a), "alpha {a} outside [60, 200]");
    }
}

/// Alpha bounds clamp to 0..=255 on the way in.
#[test]
fn alpha_range_setter_clamps() {
    let mut trophy = animator(4);
    trophy.set_alpha_range(-20, 300);
    assert_eq!(trophy.config().min_alpha, 0);
    assert_eq!(trophy.config().max_alpha, 255);
}

// ── Collection phase machine ───────────────────────────────────

/// Idle → Collected → Exploding → FadingOut → Done, driven by the
/// burst pool draining and the fade timer.
#[test]
fn phase_machine_runs_to_done() {
    let mut trophy = animator(5);
    assert_eq!(trophy.phase(), TrophyPhase::Idle);

    assert!(trophy.try_collect(400.0, trophy.draw_y()));
    assert_eq!(trophy.phase(), TrophyPhase::Collected);
    assert_eq!(trophy.particles().len(), BURST_PARTICLES);

    trophy.advance(1.0);
    assert_eq!(trophy.phase(), TrophyPhase::Exploding);

    // Burst lifetimes are bounded; the pool must drain.
    let mut steps = 0;
    while trophy.phase() == TrophyPhase::Exploding {
        trophy.advance(1.0);
        steps += 1;
        assert!(steps < 10_000, "burst never drained");
    }
    assert_eq!(trophy.phase(), TrophyPhase::FadingOut);
    assert!(trophy.particles().is_empty());

    trophy.advance(FADE_DURATION);
    assert_eq!(trophy.phase(), TrophyPhase::Done);
    assert!(trophy.is_done());
    assert!((trophy.fade_opacity() - 0.0).abs() < f32::EPSILON);
}

/// A second hit after collection is ignored.
#[test]
fn collect_only_fires_once() {
    let mut trophy = animator(6);
    assert!(trophy.try_collect(400.0, trophy.draw_y()));
    assert!(!trophy.try_collect(400.0, trophy.draw_y()));
    assert_eq!(trophy.particles().len(), BURST_PARTICLES);
}

/// The burst is deterministic for a fixed seed and differs across
/// seeds.
#[test]
fn burst_is_seed_deterministic() {
    let collect = |seed: u64| {
        let mut t = animator(seed);
        t.try_collect(400.0, t.draw_y());
        t.particles()
            .iter()
            .map(|p| (p.pos.x.to_bits(), p.vel.x.to_bits(), p.vel.y.to_bits()))
            .collect::<Vec<_>>()
    };

    assert_eq!(collect(11), collect(11), "same seed, same burst");
    assert_ne!(collect(11), collect(12), "different seed, different burst");
}
