//! All game entity types.  Pure data, no simulation logic.

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

// ── World constants ───────────────────────────────────────────────────────────

/// Edge length of one tile in world pixels.
pub const TILE_SIZE: i32 = 128;
pub const TILE_SIZE_SQR: i32 = TILE_SIZE * TILE_SIZE;

// ── Integer vector ────────────────────────────────────────────────────────────

/// World-space (pixels) or tile-space integer vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Vec2i = Vec2i { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance between two points.
    pub fn sqr_dist(self, other: Vec2i) -> i32 {
        let d = self - other;
        d.x * d.x + d.y * d.y
    }

    /// The tile containing this world point.
    pub fn to_tile(self) -> Vec2i {
        self / TILE_SIZE
    }
}

/// Shorthand constructor, reads better in tables of points.
pub const fn vec2(x: i32, y: i32) -> Vec2i {
    Vec2i::new(x, y)
}

impl Add for Vec2i {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2i {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl AddAssign for Vec2i {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2i {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<i32> for Vec2i {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Floor division, so `(-1, -1) / 128 == (-1, -1)`.
impl Div<i32> for Vec2i {
    type Output = Self;
    fn div(self, rhs: i32) -> Self {
        Self { x: self.x.div_euclid(rhs), y: self.y.div_euclid(rhs) }
    }
}

// ── Tiles & boxes ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
}

/// Axis-aligned box.  For actors this is an offset relative to `pos`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A `size × size` box centred on the origin.
    pub const fn centered(size: i32) -> Self {
        Self { x: -(size / 2), y: -(size / 2), w: size, h: size }
    }

    pub fn translated(self, by: Vec2i) -> Self {
        Self { x: self.x + by.x, y: self.y + by.y, ..self }
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// Facing direction.  Presentation only; physics never reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dir {
    #[default]
    Right,
    Left,
}

/// A moving box that collides with the tile grid (the player).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Actor {
    pub pos: Vec2i,
    pub vel: Vec2i,
    /// Collision box, relative to `pos`.
    pub hitbox: Rect,
    /// Drawing box, relative to `pos`.
    pub texbox: Rect,
    pub dir: Dir,
}

impl Actor {
    pub fn new(hitbox: Rect, texbox: Rect) -> Self {
        Self { hitbox, texbox, ..Self::default() }
    }

    /// The collision box in world space.
    pub fn world_hitbox(&self) -> Rect {
        self.hitbox.translated(self.pos)
    }

    /// The drawing box in world space.
    pub fn world_texbox(&self) -> Rect {
        self.texbox.translated(self.pos)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Kinematic state of a live projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flight {
    pub pos: Vec2i,
    pub vel: Vec2i,
    pub dir: Dir,
}

/// Lifecycle of a pooled projectile slot.
///
/// `Dead` carries no flight data, so a recycled slot's stale position can't
/// be read.  `Poof` keeps the impact position for drawing but no longer moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectileState {
    #[default]
    Dead,
    Active(Flight),
    Poof(Flight),
}

impl ProjectileState {
    pub fn is_dead(&self) -> bool {
        matches!(self, ProjectileState::Dead)
    }

    pub fn flight(&self) -> Option<&Flight> {
        match self {
            ProjectileState::Active(f) | ProjectileState::Poof(f) => Some(f),
            ProjectileState::Dead => None,
        }
    }
}

/// One pool slot: lifecycle plus its two animation phases.
#[derive(Clone, Debug)]
pub struct Projectile<A> {
    pub state: ProjectileState,
    pub active: A,
    pub poof: A,
}
