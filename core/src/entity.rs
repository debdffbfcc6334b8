//! Live simulation entities.
//!
//! RULE: Optional attributes stay `Option<T>` here. Their defaults
//! live in projection.rs and are resolved exactly once, at the
//! serialization boundary — never scattered through gameplay code.

use crate::types::{Col, Row, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    Peashooter,
    SnowPea,
    Sunflower,
    WallNut,
    CherryBomb,
    PotatoMine,
    MelonPult,
    Spikeweed,
    HypnoShroom,
    PuffShroom,
}

impl PlantKind {
    /// Kinds whose whole purpose is a one-shot detonation.
    pub fn is_explosive(&self) -> bool {
        matches!(self, Self::CherryBomb | Self::PotatoMine)
    }

    /// Mushrooms sleep through daytime levels.
    pub fn is_mushroom(&self) -> bool {
        matches!(self, Self::HypnoShroom | Self::PuffShroom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZombieKind {
    Walker,
    Conehead,
    Buckethead,
    Newspaper,
    PoleVaulter,
    Football,
    Jack,
}

impl ZombieKind {
    pub fn is_explosive(&self) -> bool {
        matches!(self, Self::Jack)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletKind {
    Pea,
    FrozenPea,
    Puff,
    Melon,
    Spike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorKind {
    Cone,
    Bucket,
    Newspaper,
    Helmet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub kind: ArmorKind,
    pub health: i32,
}

/// Detonation lifecycle for explosive entities.
///
/// `Exploding` and `Exploded` are transient combat state; entities in
/// either are excluded from snapshots (the exclusion policy in the
/// snapshot builder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetonationState {
    /// Not an explosive, or explosive but untriggered and unarmed.
    #[default]
    Inert,
    /// Armed and waiting (a risen potato mine). Survives a save.
    Primed,
    Exploding,
    Exploded,
}

impl DetonationState {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Exploding | Self::Exploded)
    }
}

#[derive(Debug, Clone)]
pub struct Plant {
    pub kind: PlantKind,
    pub row: Row,
    pub col: Col,
    pub health: i32,
    /// Ticks until the next shot. Absent for non-shooters.
    pub shoot_timer: Option<Tick>,
    /// Ticks until the special ability fires (mine arming, sun drop).
    pub ability_timer: Option<Tick>,
    pub sleeping: bool,
    pub detonation: DetonationState,
}

impl Plant {
    pub fn new(kind: PlantKind, row: Row, col: Col, health: i32) -> Self {
        Self {
            kind,
            row,
            col,
            health,
            shoot_timer: None,
            ability_timer: None,
            sleeping: false,
            detonation: DetonationState::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Zombie {
    pub kind: ZombieKind,
    pub row: Row,
    /// Horizontal position in lawn pixels; decreases toward the house.
    pub x: f32,
    pub health: i32,
    pub armor: Option<Armor>,
    /// Absent means the kind's stock walking speed.
    pub speed: Option<f32>,
    pub frozen_timer: Option<Tick>,
    pub butter_timer: Option<Tick>,
    pub charmed: bool,
    pub detonation: DetonationState,
}

impl Zombie {
    pub fn new(kind: ZombieKind, row: Row, x: f32, health: i32) -> Self {
        Self {
            kind,
            row,
            x,
            health,
            armor: None,
            speed: None,
            frozen_timer: None,
            butter_timer: None,
            charmed: false,
            detonation: DetonationState::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub kind: BulletKind,
    pub row: Row,
    pub x: f32,
    pub y: f32,
    pub damage: i32,
    /// Flight progress in [0, 1] for lobbed shots.
    pub progress: Option<f32>,
    /// Remaining targets a piercing shot may pass through.
    pub pierce_left: Option<u8>,
    /// Peak arc height for lobbed shots, lawn pixels.
    pub arc_height: Option<f32>,
}

impl Bullet {
    pub fn new(kind: BulletKind, row: Row, x: f32, y: f32, damage: i32) -> Self {
        Self {
            kind,
            row,
            x,
            y,
            damage,
            progress: None,
            pierce_left: None,
            arc_height: None,
        }
    }
}

/// A seed card in the chooser bar, mid-cooldown or ready.
#[derive(Debug, Clone)]
pub struct SeedCard {
    pub card: PlantKind,
    pub slot: u8,
    pub cooldown_left: Tick,
    pub cooldown_total: Tick,
}

/// A hypno-charm effect on one zombie, referenced by index into the
/// live zombie list. Slot indices are reassigned at snapshot time.
#[derive(Debug, Clone)]
pub struct CharmEffect {
    pub zombie_index: usize,
    pub remaining: Tick,
}
