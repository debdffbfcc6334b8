//! Snapshot documents — full mid-level state to/from JSON.
//!
//! A snapshot is immutable once written. It captures everything
//! needed to resume a level exactly where it stood: counters, wave
//! state, every live entity, every manager, and the charm
//! cross-references.
//!
//! Schema tolerance: every field added after the first release takes
//! `#[serde(default)]` (or a named default from the projection
//! tables), so older snapshots keep loading.

use crate::{
    entity::{Armor, BulletKind, PlantKind, ZombieKind},
    projection,
    types::{Col, LevelId, Row, Tick},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// The level this snapshot belongs to. Must agree with the slot
    /// key it is stored under; a mismatch is an integrity warning and
    /// the slot key wins.
    pub current_level: LevelId,

    #[serde(default)]
    pub sun: u32,
    #[serde(default)]
    pub coins_earned: u32,
    #[serde(default)]
    pub wave: u32,
    #[serde(default)]
    pub waves_total: u32,
    #[serde(default)]
    pub zombies_killed: u32,

    /// Ordered entity records: plants, zombies, bullets, seeds.
    #[serde(default)]
    pub entities: Vec<EntityRecord>,

    /// Charm effects, keyed by slot index into this snapshot's zombie
    /// records (in entity-list order).
    #[serde(default)]
    pub charms: Vec<CharmRecord>,

    #[serde(default)]
    pub managers: ManagerDocs,

    /// Set once at build time. Snapshots predating the timestamp
    /// field read back as the epoch and sort oldest.
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// Opaque manager sub-documents. Only the owning manager knows the
/// shape of its value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerDocs {
    #[serde(default)]
    pub portal: Option<serde_json::Value>,
    #[serde(default)]
    pub ice_trail: Option<serde_json::Value>,
    #[serde(default)]
    pub conveyor: Option<serde_json::Value>,
    #[serde(default)]
    pub seed_rain: Option<serde_json::Value>,
    #[serde(default)]
    pub cart: Option<serde_json::Value>,
    #[serde(default)]
    pub music: Option<serde_json::Value>,
}

/// One serialized entity. The closed tagged set resolved by a single
/// dispatch at each serialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRecord {
    Plant(PlantRecord),
    Zombie(ZombieRecord),
    Bullet(BulletRecord),
    Seed(SeedRecord),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantRecord {
    pub plant: PlantKind,
    pub row: Row,
    pub col: Col,
    pub health: i32,
    #[serde(default)]
    pub shoot_timer: Tick,
    #[serde(default)]
    pub ability_timer: Tick,
    #[serde(default)]
    pub sleeping: bool,
    /// An armed-and-waiting explosive (risen potato mine) survives a
    /// save; a triggered one never reaches a record at all.
    #[serde(default)]
    pub primed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZombieRecord {
    pub zombie: ZombieKind,
    pub row: Row,
    pub x: f32,
    pub health: i32,
    #[serde(default)]
    pub armor: Option<Armor>,
    #[serde(default = "projection::zombie_speed_default")]
    pub speed: f32,
    #[serde(default)]
    pub frozen_timer: Tick,
    #[serde(default)]
    pub butter_timer: Tick,
    #[serde(default)]
    pub charmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletRecord {
    pub bullet: BulletKind,
    pub row: Row,
    pub x: f32,
    pub y: f32,
    pub damage: i32,
    #[serde(default)]
    pub progress: f32,
    #[serde(default)]
    pub pierce_left: u8,
    #[serde(default)]
    pub arc_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRecord {
    pub card: PlantKind,
    pub slot: u8,
    #[serde(default)]
    pub cooldown_left: Tick,
    #[serde(default)]
    pub cooldown_total: Tick,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharmRecord {
    /// Slot index into the snapshot's zombie records, assigned at
    /// snapshot time. Out-of-range on restore drops the record.
    pub zombie_index: usize,
    #[serde(default)]
    pub remaining: Tick,
}
