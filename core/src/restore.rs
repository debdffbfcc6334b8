//! Snapshot restorer — serializable records back to a live
//! simulation graph.
//!
//! RESTORE ORDER (fixed, documented, never reordered):
//!   1. Global counters and level/wave state
//!   2. Managers (portal, ice trail, conveyor, seed rain, cart, music)
//!   3. Entity lists (plants, zombies, bullets, seeds)
//!   4. Cross-references (charm effects by zombie slot index)
//!
//! Tolerance rules: missing record fields take projection defaults; a
//! manager sub-document that fails to parse leaves that manager at
//! its fresh default (logged, not fatal); a charm record whose slot
//! index is out of range is dropped (logged, not fatal).

use crate::{
    entity::CharmEffect,
    error::GameResult,
    managers::ManagerState,
    projection,
    sim::SimulationState,
    snapshot::{EntityRecord, LevelSnapshot, ManagerDocs},
    types::LevelId,
};

/// Rebuild a live simulation from `snapshot`.
pub fn restore(snapshot: &LevelSnapshot) -> GameResult<SimulationState> {
    // 1. Counters and level state.
    let mut sim = SimulationState::new(snapshot.current_level);
    sim.sun = snapshot.sun;
    sim.coins_earned = snapshot.coins_earned;
    sim.wave = snapshot.wave;
    sim.waves_total = snapshot.waves_total;
    sim.zombies_killed = snapshot.zombies_killed;

    // 2. Managers.
    restore_managers(&mut sim, &snapshot.managers);

    // 3. Entity lists. Zombie slot order is preserved exactly as
    // written; the charm records below depend on it.
    sim.plants.clear();
    sim.zombies.clear();
    sim.bullets.clear();
    sim.seeds.clear();
    for record in &snapshot.entities {
        match record {
            EntityRecord::Plant(r) => sim.plants.push(projection::restore_plant(r)),
            EntityRecord::Zombie(r) => sim.zombies.push(projection::restore_zombie(r)),
            EntityRecord::Bullet(r) => sim.bullets.push(projection::restore_bullet(r)),
            EntityRecord::Seed(r) => sim.seeds.push(projection::restore_seed(r)),
        }
    }

    // 4. Cross-references. Slot indices resolve against the zombie
    // list just rebuilt; anything unresolvable is dropped.
    sim.charm_effects = snapshot
        .charms
        .iter()
        .filter_map(|charm| {
            if charm.zombie_index < sim.zombies.len() {
                Some(CharmEffect {
                    zombie_index: charm.zombie_index,
                    remaining: charm.remaining,
                })
            } else {
                log::warn!(
                    "dropping charm effect on zombie slot {} ({} zombies restored)",
                    charm.zombie_index,
                    sim.zombies.len()
                );
                None
            }
        })
        .collect();

    Ok(sim)
}

/// Restore a snapshot read from slot `requested`. A disagreeing
/// embedded level id is a data-integrity warning; the slot key wins.
pub fn restore_slot(
    snapshot: &LevelSnapshot,
    requested: LevelId,
) -> GameResult<SimulationState> {
    if snapshot.current_level != requested {
        log::warn!(
            "snapshot integrity mismatch: slot {} holds a snapshot for level {} — trusting the slot key",
            requested,
            snapshot.current_level
        );
    }
    let mut sim = restore(snapshot)?;
    sim.level = requested;
    Ok(sim)
}

fn restore_managers(sim: &mut SimulationState, docs: &ManagerDocs) {
    restore_one(&mut sim.portal, docs.portal.as_ref());
    restore_one(&mut sim.ice_trail, docs.ice_trail.as_ref());
    restore_one(&mut sim.conveyor, docs.conveyor.as_ref());
    restore_one(&mut sim.seed_rain, docs.seed_rain.as_ref());
    restore_one(&mut sim.cart, docs.cart.as_ref());
    restore_one(&mut sim.music, docs.music.as_ref());
}

/// A missing sub-document (older snapshot) or a failed parse leaves
/// the manager at its fresh default.
fn restore_one<M: ManagerState>(manager: &mut M, doc: Option<&serde_json::Value>) {
    let Some(doc) = doc else {
        log::debug!("no '{}' sub-document; manager stays default", manager.name());
        return;
    };
    if let Err(err) = manager.restore_from(doc) {
        log::warn!("manager restore degraded to defaults: {err}");
    }
}
