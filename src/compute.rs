//! Per-tick game logic.
//!
//! `Simulation` owns the level, the player and the projectile pool, and is
//! threaded through the front-end loop by `&mut`.  Input helpers set the
//! player's velocity; `tick` then integrates, resolves collisions and steps
//! the projectiles, always in that order.

use tracing::debug;

use crate::animation::{Animation, FrameTimer};
use crate::collision::{resolve_entity_collision, resolve_point_collision};
use crate::config::GameConfig;
use crate::entities::{Actor, Dir, Rect, Tile, Vec2i};
use crate::grid::TileGrid;
use crate::projectiles::ProjectilePool;

/// Directional keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
}

/// Which player animation is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerPose {
    #[default]
    Idle,
    Walking,
}

/// The player actor plus its presentation-only animation state.
#[derive(Clone, Debug)]
pub struct Player {
    pub actor: Actor,
    pub pose: PlayerPose,
    pub idle: FrameTimer,
    pub walking: FrameTimer,
}

impl Player {
    pub fn current_animation(&self) -> &FrameTimer {
        match self.pose {
            PlayerPose::Idle => &self.idle,
            PlayerPose::Walking => &self.walking,
        }
    }

    fn current_animation_mut(&mut self) -> &mut FrameTimer {
        match self.pose {
            PlayerPose::Idle => &mut self.idle,
            PlayerPose::Walking => &mut self.walking,
        }
    }
}

/// Level paint mode while the debug editor has the mouse button down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditBrush {
    #[default]
    Idle,
    Create,
    Delete,
}

pub struct Simulation {
    pub grid: TileGrid,
    pub player: Player,
    pub projectiles: ProjectilePool<FrameTimer>,
    pub config: GameConfig,
    pub brush: EditBrush,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl Simulation {
    pub fn new(config: GameConfig, grid: TileGrid) -> Self {
        let actor = Actor::new(
            Rect::centered(config.player_hitbox),
            Rect::centered(config.player_texbox),
        );
        let player = Player {
            actor,
            pose: PlayerPose::Idle,
            idle: config.player_idle.timer(),
            walking: config.player_walking.timer(),
        };
        let projectiles = ProjectilePool::new(
            config.projectile_active.timer(),
            config.projectile_poof.timer(),
        );
        Self {
            grid,
            player,
            projectiles,
            config,
            brush: EditBrush::Idle,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(GameConfig::default(), TileGrid::default_level())
    }
}

// ── Input-driven state changes ──────────────────────────────────────────────

impl Simulation {
    /// Set horizontal velocity from held keys.  Right wins when both are held.
    pub fn apply_input(&mut self, input: PlayerInput) {
        let speed = self.config.player_speed;
        let player = &mut self.player;
        if input.right {
            player.actor.vel.x = speed;
            player.pose = PlayerPose::Walking;
            player.actor.dir = Dir::Right;
        } else if input.left {
            player.actor.vel.x = -speed;
            player.pose = PlayerPose::Walking;
            player.actor.dir = Dir::Left;
        } else {
            player.actor.vel.x = 0;
            player.pose = PlayerPose::Idle;
        }
    }

    pub fn jump(&mut self) {
        self.player.actor.vel.y = self.config.jump_velocity;
    }

    /// Fire from the player's position in the facing direction.
    /// Returns `false` if the pool was full.
    pub fn shoot(&mut self) -> bool {
        let actor = &self.player.actor;
        let speed = match actor.dir {
            Dir::Right => self.config.projectile_speed,
            Dir::Left => -self.config.projectile_speed,
        };
        self.projectiles.spawn(actor.pos, Vec2i::new(speed, 0), actor.dir)
    }

    pub fn reset_player(&mut self) {
        self.player.actor.pos = Vec2i::ZERO;
        self.player.actor.vel.y = 0;
    }

    /// Debug probe: where `point` would be pushed to.
    pub fn probe(&self, point: Vec2i) -> Vec2i {
        resolve_point_collision(&self.grid, point)
    }

    /// Level-editing write.  Call between ticks only.
    pub fn edit_tile(&mut self, tile: Vec2i, state: Tile) -> bool {
        self.grid.set_tile(tile, state)
    }

    /// Mouse press in the level editor: flip the tile and pick the brush the
    /// drag will paint with.
    pub fn begin_edit(&mut self, tile: Vec2i) {
        let Some(current) = self.grid.tile(tile) else {
            return;
        };
        let (brush, state) = match current {
            Tile::Empty => (EditBrush::Create, Tile::Wall),
            Tile::Wall => (EditBrush::Delete, Tile::Empty),
        };
        self.brush = brush;
        self.edit_tile(tile, state);
        debug!(?brush, x = tile.x, y = tile.y, "edit started");
    }

    /// Mouse drag in the level editor.
    pub fn continue_edit(&mut self, tile: Vec2i) {
        match self.brush {
            EditBrush::Create => {
                self.edit_tile(tile, Tile::Wall);
            }
            EditBrush::Delete => {
                self.edit_tile(tile, Tile::Empty);
            }
            EditBrush::Idle => {}
        }
    }

    pub fn end_edit(&mut self) {
        self.brush = EditBrush::Idle;
    }
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

impl Simulation {
    /// Gravity, integration and wall resolution for the player.
    pub fn step_physics(&mut self) {
        let actor = &mut self.player.actor;
        actor.vel.y += self.config.gravity;
        actor.pos += actor.vel;
        resolve_entity_collision(&self.grid, actor);
    }

    /// Advance animations and projectiles by `dt` milliseconds.
    pub fn update(&mut self, dt: u32) {
        self.player.current_animation_mut().update(dt);
        self.projectiles.update(&self.grid, dt);
    }

    pub fn tick(&mut self, dt: u32) {
        self.step_physics();
        self.update(dt);
    }

    pub fn count_alive_projectiles(&self) -> usize {
        self.projectiles.count_alive()
    }
}
