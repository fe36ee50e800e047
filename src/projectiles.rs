//! Fixed-capacity projectile pool.
//!
//! Slots cycle Dead → Active → Poof → Dead.  Spawning takes the lowest dead
//! slot; a full pool drops the spawn.  Slots are always updated in index
//! order and the pool never allocates after construction.

use tracing::{debug, trace};

use crate::animation::Animation;
use crate::entities::{Dir, Flight, Projectile, ProjectileState, Vec2i};
use crate::grid::TileGrid;

pub const PROJECTILES_COUNT: usize = 69;

#[derive(Clone, Debug)]
pub struct ProjectilePool<A> {
    slots: [Projectile<A>; PROJECTILES_COUNT],
}

impl<A: Animation + Clone> ProjectilePool<A> {
    /// Every slot starts dead with its own copy of the two animations.
    pub fn new(active: A, poof: A) -> Self {
        Self {
            slots: std::array::from_fn(|_| Projectile {
                state: ProjectileState::Dead,
                active: active.clone(),
                poof: poof.clone(),
            }),
        }
    }
}

impl<A: Animation> ProjectilePool<A> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Projectile<A>] {
        &self.slots
    }

    /// Activate the first dead slot.  Returns `false` when the pool is full
    /// and the projectile was dropped.
    pub fn spawn(&mut self, pos: Vec2i, vel: Vec2i, dir: Dir) -> bool {
        match self.slots.iter_mut().enumerate().find(|(_, s)| s.state.is_dead()) {
            Some((i, slot)) => {
                slot.state = ProjectileState::Active(Flight { pos, vel, dir });
                slot.active.reset();
                trace!(slot = i, x = pos.x, y = pos.y, "projectile spawned");
                true
            }
            None => {
                debug!("projectile pool full, spawn dropped");
                false
            }
        }
    }

    /// Advance every slot by `dt` milliseconds.
    pub fn update(&mut self, grid: &TileGrid, dt: u32) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            match slot.state {
                ProjectileState::Active(mut flight) => {
                    slot.active.update(dt);
                    flight.pos += flight.vel;
                    let tile = flight.pos.to_tile();
                    if !grid.is_tile_empty(tile) || !grid.is_tile_inbounds(tile) {
                        slot.state = ProjectileState::Poof(flight);
                        slot.poof.reset();
                        trace!(slot = i, x = flight.pos.x, y = flight.pos.y, "projectile hit");
                    } else {
                        slot.state = ProjectileState::Active(flight);
                    }
                }
                ProjectileState::Poof(_) => {
                    slot.poof.update(dt);
                    if slot.poof.is_on_last_frame() {
                        slot.state = ProjectileState::Dead;
                        trace!(slot = i, "projectile recycled");
                    }
                }
                ProjectileState::Dead => {}
            }
        }
    }

    /// Slots that are not dead.  Diagnostics only.
    pub fn count_alive(&self) -> usize {
        self.slots.iter().filter(|s| !s.state.is_dead()).count()
    }
}

