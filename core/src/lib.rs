//! garden-core — runtime core of Garden Siege, a tower-defense game.
//!
//! Two halves:
//!   - the save/restore state-reconciliation engine: snapshot a live
//!     entity graph into a durable JSON document and rebuild a
//!     consistent simulation from it (builder, restore, store);
//!   - the decorative trophy effect: procedural idle animation over
//!     layered periodic signals plus a finite-lifetime particle pool
//!     (animator, particles). Visual state never persists.
//!
//! Rendering, input, audio and level configuration live in the host;
//! this crate only consumes their collaborator interfaces.

pub mod animator;
pub mod builder;
pub mod entity;
pub mod error;
pub mod managers;
pub mod particles;
pub mod projection;
pub mod restore;
pub mod rng;
pub mod sim;
pub mod snapshot;
pub mod store;
pub mod types;
