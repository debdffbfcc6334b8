//! Field projection tables — per-kind snapshot field sets and
//! defaults.
//!
//! RULE: every optional attribute on a live entity resolves to its
//! default HERE, exactly once, on the way into or out of a record.
//! Gameplay code never hard-codes a save default; the restorer and
//! the serde schema both read from this module, so a field missing on
//! the live entity and a field missing in an old snapshot land on the
//! same value.

use crate::{
    entity::{Bullet, DetonationState, Plant, SeedCard, Zombie},
    snapshot::{BulletRecord, PlantRecord, SeedRecord, ZombieRecord},
    types::Tick,
};

/// Documented defaults for optional entity attributes.
pub mod defaults {
    use crate::types::Tick;

    /// Stock walking speed, lawn pixels per tick.
    pub const ZOMBIE_SPEED: f32 = 0.23;
    pub const PLANT_SHOOT_TIMER: Tick = 0;
    pub const PLANT_ABILITY_TIMER: Tick = 0;
    pub const ZOMBIE_FROZEN_TIMER: Tick = 0;
    pub const ZOMBIE_BUTTER_TIMER: Tick = 0;
    pub const BULLET_PROGRESS: f32 = 0.0;
    pub const BULLET_PIERCE: u8 = 0;
    pub const BULLET_ARC_HEIGHT: f32 = 0.0;
}

// serde `default = "..."` hooks for the record schema.
pub fn zombie_speed_default() -> f32 {
    defaults::ZOMBIE_SPEED
}

// ── Live entity → record ───────────────────────────────────────

pub fn project_plant(plant: &Plant) -> PlantRecord {
    PlantRecord {
        plant: plant.kind,
        row: plant.row,
        col: plant.col,
        health: plant.health,
        shoot_timer: plant.shoot_timer.unwrap_or(defaults::PLANT_SHOOT_TIMER),
        ability_timer: plant
            .ability_timer
            .unwrap_or(defaults::PLANT_ABILITY_TIMER),
        sleeping: plant.sleeping,
        primed: plant.detonation == DetonationState::Primed,
    }
}

pub fn project_zombie(zombie: &Zombie) -> ZombieRecord {
    ZombieRecord {
        zombie: zombie.kind,
        row: zombie.row,
        x: zombie.x,
        health: zombie.health,
        armor: zombie.armor,
        speed: zombie.speed.unwrap_or(defaults::ZOMBIE_SPEED),
        frozen_timer: zombie
            .frozen_timer
            .unwrap_or(defaults::ZOMBIE_FROZEN_TIMER),
        butter_timer: zombie
            .butter_timer
            .unwrap_or(defaults::ZOMBIE_BUTTER_TIMER),
        charmed: zombie.charmed,
    }
}

pub fn project_bullet(bullet: &Bullet) -> BulletRecord {
    BulletRecord {
        bullet: bullet.kind,
        row: bullet.row,
        x: bullet.x,
        y: bullet.y,
        damage: bullet.damage,
        progress: bullet.progress.unwrap_or(defaults::BULLET_PROGRESS),
        pierce_left: bullet.pierce_left.unwrap_or(defaults::BULLET_PIERCE),
        arc_height: bullet.arc_height.unwrap_or(defaults::BULLET_ARC_HEIGHT),
    }
}

pub fn project_seed(seed: &SeedCard) -> SeedRecord {
    SeedRecord {
        card: seed.card,
        slot: seed.slot,
        cooldown_left: seed.cooldown_left,
        cooldown_total: seed.cooldown_total,
    }
}

// ── Record → live entity ───────────────────────────────────────

pub fn restore_plant(record: &PlantRecord) -> Plant {
    Plant {
        kind: record.plant,
        row: record.row,
        col: record.col,
        health: record.health,
        shoot_timer: Some(record.shoot_timer),
        ability_timer: Some(record.ability_timer),
        sleeping: record.sleeping,
        detonation: if record.primed {
            DetonationState::Primed
        } else {
            DetonationState::Inert
        },
    }
}

pub fn restore_zombie(record: &ZombieRecord) -> Zombie {
    Zombie {
        kind: record.zombie,
        row: record.row,
        x: record.x,
        health: record.health,
        armor: record.armor,
        speed: Some(record.speed),
        frozen_timer: timer_or_none(record.frozen_timer),
        butter_timer: timer_or_none(record.butter_timer),
        charmed: record.charmed,
        detonation: DetonationState::Inert,
    }
}

pub fn restore_bullet(record: &BulletRecord) -> Bullet {
    Bullet {
        kind: record.bullet,
        row: record.row,
        x: record.x,
        y: record.y,
        damage: record.damage,
        progress: Some(record.progress),
        pierce_left: Some(record.pierce_left),
        arc_height: Some(record.arc_height),
    }
}

pub fn restore_seed(record: &SeedRecord) -> SeedCard {
    SeedCard {
        card: record.card,
        slot: record.slot,
        cooldown_left: record.cooldown_left,
        cooldown_total: record.cooldown_total,
    }
}

/// A zero timer round-trips back to "no effect running".
fn timer_or_none(ticks: Tick) -> Option<Tick> {
    if ticks == 0 {
        None
    } else {
        Some(ticks)
    }
}
