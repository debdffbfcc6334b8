//! level-runner: headless save/restore exerciser for Garden Siege.
//!
//! Usage:
//!   level-runner --seed 12345 --ticks 300 --level 3 --save progress.json

use anyhow::Result;
use garden_core::{
    animator::TrophyAnimator,
    builder,
    entity::{Bullet, BulletKind, CharmEffect, Plant, PlantKind, SeedCard, Zombie, ZombieKind},
    particles::Vec2,
    restore,
    rng::{EffectRng, EffectStream},
    sim::SimulationState,
    store::ProgressStore,
    types::LevelId,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 300u32);
    let level = parse_arg(&args, "--level", 3u32);
    let save_path = args
        .windows(2)
        .find(|w| w[0] == "--save")
        .map(|w| w[1].as_str())
        .unwrap_or("progress.json")
        .to_string();

    println!("Garden Siege — level-runner");
    println!("  seed:   {seed}");
    println!("  ticks:  {ticks}");
    println!("  level:  {level}");
    println!("  save:   {save_path}");
    println!();

    // A mid-level state, as the frame loop would have left it.
    let sim = scripted_level(level);

    // Run the trophy effect across the requested tick count,
    // collecting it halfway through.
    let mut trophy = TrophyAnimator::new(
        Vec2::new(400.0, 300.0),
        EffectRng::new(seed, EffectStream::TrophyBurst),
    );
    for tick in 0..ticks {
        trophy.advance(1.0);
        if tick == ticks / 2 {
            trophy.try_collect(400.0, trophy.draw_y());
        }
    }
    println!("trophy phase after {ticks} ticks: {:?}", trophy.phase());

    // Save, then restore through the progress store.
    let mut store = ProgressStore::load(&save_path);
    let snapshot = builder::build(&sim)?;
    store.save_level(snapshot);
    store.flush()?;
    log::info!("level {level} saved to {}", store.path().display());

    let restored = match store.load_level(level) {
        Some(snapshot) => restore::restore_slot(snapshot, level)?,
        None => SimulationState::new(level),
    };

    print_summary(&sim, &restored, &store);
    Ok(())
}

fn scripted_level(level: LevelId) -> SimulationState {
    let mut sim = SimulationState::new(level);
    sim.sun = 325;
    sim.wave = 4;
    sim.zombies_killed = 17;

    sim.plants.push(Plant::new(PlantKind::Peashooter, 1, 2, 300));
    sim.plants.push(Plant::new(PlantKind::Sunflower, 2, 1, 300));
    sim.plants.push(Plant::new(PlantKind::WallNut, 1, 6, 2800));

    let mut charmed = Zombie::new(ZombieKind::Conehead, 1, 560.0, 450);
    charmed.charmed = true;
    sim.zombies.push(charmed);
    sim.zombies.push(Zombie::new(ZombieKind::Walker, 3, 710.0, 270));
    sim.charm_effects.push(CharmEffect {
        zombie_index: 0,
        remaining: 900,
    });

    sim.bullets.push(Bullet::new(BulletKind::Pea, 1, 310.0, 120.0, 20));
    sim.seeds.push(SeedCard {
        card: PlantKind::CherryBomb,
        slot: 0,
        cooldown_left: 180,
        cooldown_total: 3000,
    });
    sim
}

fn print_summary(before: &SimulationState, after: &SimulationState, store: &ProgressStore) {
    println!();
    println!("── save/restore summary ─────────────────────");
    println!(
        "  sun:       {} -> {}  wave: {} -> {}  kills: {} -> {}",
        before.sun, after.sun, before.wave, after.wave, before.zombies_killed, after.zombies_killed
    );
    println!(
        "  entities:  {} plants, {} zombies, {} bullets, {} seeds restored",
        after.plants.len(),
        after.zombies.len(),
        after.bullets.len(),
        after.seeds.len()
    );
    println!(
        "  charms:    {} restored, latest slot: {:?}",
        after.charm_effects.len(),
        store.latest_saved_level()
    );
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
