//! Shared primitive types used across the entire game core.

/// A simulation tick. One tick = one frame of the fixed-step loop.
pub type Tick = u32;

/// Level identifier, 1-based as shown to the player.
pub type LevelId = u32;

/// Lawn row index, 0-based from the top.
pub type Row = u8;

/// Lawn column index, 0-based from the house side.
pub type Col = u8;
