//! Stateful level managers — portals, ice trails, conveyor, seed
//! rain, carts, music.
//!
//! RULE: Every manager implements ManagerState. The snapshot builder
//! and restorer treat manager state as an opaque sub-document; only
//! the manager itself knows its shape. Restore is tolerant: missing
//! fields take their serde defaults, so older snapshots stay loadable.

use crate::{
    entity::PlantKind,
    error::{GameError, GameResult},
    types::{Col, Row, Tick},
};
use serde::{Deserialize, Serialize};

/// The contract every manager must fulfill.
pub trait ManagerState {
    /// Unique stable name, used as the sub-document key.
    fn name(&self) -> &'static str;

    /// Pure snapshot accessor. Must not mutate the manager.
    fn save_data(&self) -> GameResult<serde_json::Value>;

    /// Rebuild internal state from a sub-document produced by
    /// `save_data`, possibly by an older version of the game.
    fn restore_from(&mut self, doc: &serde_json::Value) -> GameResult<()>;
}

fn restore_error(manager: &'static str, err: serde_json::Error) -> GameError {
    GameError::ManagerRestore {
        manager,
        reason: err.to_string(),
    }
}

// ── Portals ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalKind {
    White,
    Black,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalRecord {
    pub kind: PortalKind,
    pub row: Row,
    pub col: Col,
    /// Ticks until this portal closes.
    pub remaining: Tick,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalManager {
    #[serde(default)]
    pub portals: Vec<PortalRecord>,
    /// Ticks until the next portal pair opens.
    #[serde(default)]
    pub spawn_timer: Tick,
    #[serde(default)]
    pub active: bool,
}

impl ManagerState for PortalManager {
    fn name(&self) -> &'static str {
        "portal"
    }

    fn save_data(&self) -> GameResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn restore_from(&mut self, doc: &serde_json::Value) -> GameResult<()> {
        let name = self.name();
        *self = serde_json::from_value(doc.clone()).map_err(|e| restore_error(name, e))?;
        Ok(())
    }
}

// ── Ice trails ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceTrailRecord {
    pub row: Row,
    /// Leftmost extent of the trail, lawn pixels.
    pub x_from: f32,
    pub x_to: f32,
    pub remaining: Tick,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IceTrailManager {
    #[serde(default)]
    pub trails: Vec<IceTrailRecord>,
}

impl ManagerState for IceTrailManager {
    fn name(&self) -> &'static str {
        "ice_trail"
    }

    fn save_data(&self) -> GameResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn restore_from(&mut self, doc: &serde_json::Value) -> GameResult<()> {
        let name = self.name();
        *self = serde_json::from_value(doc.clone()).map_err(|e| restore_error(name, e))?;
        Ok(())
    }
}

// ── Conveyor belt ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConveyorManager {
    /// Cards currently riding the belt, house side first.
    #[serde(default)]
    pub belt: Vec<PlantKind>,
    /// Ticks until the next card feeds onto the belt.
    #[serde(default)]
    pub feed_timer: Tick,
    #[serde(default)]
    pub enabled: bool,
}

impl ManagerState for ConveyorManager {
    fn name(&self) -> &'static str {
        "conveyor"
    }

    fn save_data(&self) -> GameResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn restore_from(&mut self, doc: &serde_json::Value) -> GameResult<()> {
        let name = self.name();
        *self = serde_json::from_value(doc.clone()).map_err(|e| restore_error(name, e))?;
        Ok(())
    }
}

// ── Seed rain ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedRainManager {
    /// Ticks until the next card falls.
    #[serde(default)]
    pub drop_timer: Tick,
    /// The card already chosen for the next drop, if any.
    #[serde(default)]
    pub next_card: Option<PlantKind>,
    #[serde(default)]
    pub enabled: bool,
}

impl ManagerState for SeedRainManager {
    fn name(&self) -> &'static str {
        "seed_rain"
    }

    fn save_data(&self) -> GameResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn restore_from(&mut self, doc: &serde_json::Value) -> GameResult<()> {
        let name = self.name();
        *self = serde_json::from_value(doc.clone()).map_err(|e| restore_error(name, e))?;
        Ok(())
    }
}

// ── Lawn carts ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRecord {
    pub row: Row,
    pub x: f32,
    pub launched: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartManager {
    #[serde(default)]
    pub carts: Vec<CartRecord>,
}

impl CartManager {
    /// One unlaunched cart per row — the start-of-level layout.
    pub fn stocked(rows: Row) -> Self {
        Self {
            carts: (0..rows)
                .map(|row| CartRecord {
                    row,
                    x: 0.0,
                    launched: false,
                })
                .collect(),
        }
    }
}

impl ManagerState for CartManager {
    fn name(&self) -> &'static str {
        "cart"
    }

    fn save_data(&self) -> GameResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn restore_from(&mut self, doc: &serde_json::Value) -> GameResult<()> {
        let name = self.name();
        *self = serde_json::from_value(doc.clone()).map_err(|e| restore_error(name, e))?;
        Ok(())
    }
}

// ── Music ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicManager {
    #[serde(default)]
    pub track: Option<String>,
    /// Playback position, milliseconds into the track.
    #[serde(default)]
    pub position_ms: u64,
}

impl ManagerState for MusicManager {
    fn name(&self) -> &'static str {
        "music"
    }

    fn save_data(&self) -> GameResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn restore_from(&mut self, doc: &serde_json::Value) -> GameResult<()> {
        let name = self.name();
        *self = serde_json::from_value(doc.clone()).map_err(|e| restore_error(name, e))?;
        Ok(())
    }
}
