//! The live simulation graph for one in-progress level.
//!
//! This is what the frame loop mutates and what the snapshot builder
//! reads. The animator and particle pool deliberately live outside
//! this struct: they are visual-only and never cross the persistence
//! boundary.

use crate::{
    entity::{Bullet, CharmEffect, Plant, SeedCard, Zombie},
    managers::{
        CartManager, ConveyorManager, IceTrailManager, MusicManager, PortalManager,
        SeedRainManager,
    },
    types::{LevelId, Row},
};

pub const LAWN_ROWS: Row = 5;

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub level: LevelId,

    // Global counters.
    pub sun: u32,
    pub coins_earned: u32,
    pub wave: u32,
    pub waves_total: u32,
    pub zombies_killed: u32,

    // Entity lists. Zombie order matters: charm effects reference
    // zombies by index.
    pub plants: Vec<Plant>,
    pub zombies: Vec<Zombie>,
    pub bullets: Vec<Bullet>,
    pub seeds: Vec<SeedCard>,
    pub charm_effects: Vec<CharmEffect>,

    // Managers.
    pub portal: PortalManager,
    pub ice_trail: IceTrailManager,
    pub conveyor: ConveyorManager,
    pub seed_rain: SeedRainManager,
    pub cart: CartManager,
    pub music: MusicManager,
}

impl SimulationState {
    /// A fresh level: empty lawn, stocked carts, wave counter at zero.
    pub fn new(level: LevelId) -> Self {
        Self {
            level,
            sun: 50,
            coins_earned: 0,
            wave: 0,
            waves_total: 10,
            zombies_killed: 0,
            plants: Vec::new(),
            zombies: Vec::new(),
            bullets: Vec::new(),
            seeds: Vec::new(),
            charm_effects: Vec::new(),
            portal: PortalManager::default(),
            ice_trail: IceTrailManager::default(),
            conveyor: ConveyorManager::default(),
            seed_rain: SeedRainManager::default(),
            cart: CartManager::stocked(LAWN_ROWS),
            music: MusicManager::default(),
        }
    }
}
