//! Snapshot builder — live simulation graph to serializable records.
//!
//! RULES:
//!   - build() reads the simulation; it never mutates it. The only
//!     outside read is process time, for the snapshot timestamp.
//!   - Mid-detonation entities are transient combat state and are
//!     never written to a record (the exclusion policy).
//!   - All-or-nothing: any failure aborts the whole build. A partial
//!     snapshot must never reach the store.

use crate::{
    error::GameResult,
    managers::ManagerState,
    projection,
    sim::SimulationState,
    snapshot::{CharmRecord, EntityRecord, LevelSnapshot, ManagerDocs},
};
use chrono::Utc;
use std::collections::HashMap;

/// Build a snapshot of `sim`, ready for the progress store.
pub fn build(sim: &SimulationState) -> GameResult<LevelSnapshot> {
    let mut entities = Vec::new();

    // Plants, skipping anything mid-detonation.
    for plant in &sim.plants {
        if plant.detonation.is_transient() {
            log::debug!(
                "excluding detonating {:?} at ({}, {}) from snapshot",
                plant.kind,
                plant.row,
                plant.col
            );
            continue;
        }
        entities.push(EntityRecord::Plant(projection::project_plant(plant)));
    }

    // Zombies. Exclusion shifts indices, so record the mapping from
    // live index to snapshot slot index for the charm records below.
    let mut zombie_slots: HashMap<usize, usize> = HashMap::new();
    for (live_index, zombie) in sim.zombies.iter().enumerate() {
        if zombie.detonation.is_transient() {
            log::debug!(
                "excluding detonating {:?} in row {} from snapshot",
                zombie.kind,
                zombie.row
            );
            continue;
        }
        zombie_slots.insert(live_index, zombie_slots.len());
        entities.push(EntityRecord::Zombie(projection::project_zombie(zombie)));
    }

    for bullet in &sim.bullets {
        entities.push(EntityRecord::Bullet(projection::project_bullet(bullet)));
    }
    for seed in &sim.seeds {
        entities.push(EntityRecord::Seed(projection::project_seed(seed)));
    }

    // Charm effects, rewritten onto snapshot slot indices. An effect
    // on an excluded zombie dies with its target.
    let charms = sim
        .charm_effects
        .iter()
        .filter_map(|effect| {
            zombie_slots
                .get(&effect.zombie_index)
                .map(|&slot| CharmRecord {
                    zombie_index: slot,
                    remaining: effect.remaining,
                })
        })
        .collect();

    let managers = ManagerDocs {
        portal: Some(sim.portal.save_data()?),
        ice_trail: Some(sim.ice_trail.save_data()?),
        conveyor: Some(sim.conveyor.save_data()?),
        seed_rain: Some(sim.seed_rain.save_data()?),
        cart: Some(sim.cart.save_data()?),
        music: Some(sim.music.save_data()?),
    };

    Ok(LevelSnapshot {
        current_level: sim.level,
        sun: sim.sun,
        coins_earned: sim.coins_earned,
        wave: sim.wave,
        waves_total: sim.waves_total,
        zombies_killed: sim.zombies_killed,
        entities,
        charms,
        managers,
        created_at: Utc::now(),
    })
}
