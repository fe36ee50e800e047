//! Physics and collision core of a tile-based 2D action game.
//!
//! Everything in this crate is pure simulation state: no terminal I/O, no
//! rendering. The binary in `main.rs` owns the event loop and draws.

pub mod animation;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod grid;
pub mod projectiles;
