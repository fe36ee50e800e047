//! Tile-grid collision resolution.
//!
//! A point embedded in a wall is pushed out through whichever of eight sides
//! (four edges, four corners) is cheapest to reach, where reaching a side
//! that backs onto more wall costs an extra tile per wall crossed.  Actors are
//! resolved by running that point resolver over the four corners of their
//! hitbox.

use tracing::trace;

use crate::entities::{Actor, Vec2i, TILE_SIZE, TILE_SIZE_SQR};
use crate::grid::TileGrid;

/// A corner push at least this long (per axis, in pixels) counts as hitting
/// a surface and kills velocity along that axis.
pub const IMPACT_THRESHOLD: i32 = 5;

/// One way out of a solid tile.
#[derive(Clone, Copy, Debug)]
struct Side {
    /// Squared distance to `escape`, plus one unit per extra wall crossed.
    cost: i32,
    /// Nearest point on this side of the starting tile.
    escape: Vec2i,
    /// Tile offset to march along when the neighbour is also solid.
    step: Vec2i,
    step_cost: i32,
}

impl Side {
    fn new(p: Vec2i, escape: Vec2i, step: Vec2i) -> Self {
        // Cardinal sides only measure along their own axis.
        let probe = Vec2i::new(
            if step.x == 0 { p.x } else { escape.x },
            if step.y == 0 { p.y } else { escape.y },
        );
        let diagonal = step.x != 0 && step.y != 0;
        Self {
            cost: probe.sqr_dist(p),
            escape,
            step,
            step_cost: if diagonal { TILE_SIZE_SQR * 2 } else { TILE_SIZE_SQR },
        }
    }
}

/// Move `p` out of the wall it is in, if any.
///
/// Returns `p` unchanged when its tile is empty.  Otherwise returns a point on
/// the boundary of the wall run, via the cheapest of left, right, top, bottom,
/// top-left, top-right, bottom-left, bottom-right; on equal cost the earlier
/// side in that order wins.
pub fn resolve_point_collision(grid: &TileGrid, p: Vec2i) -> Vec2i {
    let tile = p.to_tile();

    if grid.is_tile_empty(tile) {
        return p;
    }

    let p0 = tile * TILE_SIZE;
    let p1 = (tile + Vec2i::new(1, 1)) * TILE_SIZE;

    let sides = [
        Side::new(p, Vec2i::new(p0.x, p.y), Vec2i::new(-1, 0)),  // left
        Side::new(p, Vec2i::new(p1.x, p.y), Vec2i::new(1, 0)),   // right
        Side::new(p, Vec2i::new(p.x, p0.y), Vec2i::new(0, -1)),  // top
        Side::new(p, Vec2i::new(p.x, p1.y), Vec2i::new(0, 1)),   // bottom
        Side::new(p, Vec2i::new(p0.x, p0.y), Vec2i::new(-1, -1)), // top-left
        Side::new(p, Vec2i::new(p1.x, p0.y), Vec2i::new(1, -1)),  // top-right
        Side::new(p, Vec2i::new(p0.x, p1.y), Vec2i::new(-1, 1)),  // bottom-left
        Side::new(p, Vec2i::new(p1.x, p1.y), Vec2i::new(1, 1)),   // bottom-right
    ];

    let mut closest: Option<(Side, i32)> = None;
    for mut side in sides {
        let mut run = 0;
        while !grid.is_tile_empty(tile + side.step * (run + 1)) {
            side.cost += side.step_cost;
            run += 1;
        }

        // strict: equal cost keeps the earlier side
        if closest.map_or(true, |(best, _)| side.cost < best.cost) {
            closest = Some((side, run));
        }
    }

    match closest {
        Some((side, run)) => side.escape + side.step * (run * TILE_SIZE),
        None => p,
    }
}

/// Push `actor` out of the grid by resolving each hitbox corner in turn.
///
/// Corners go top-left, top-right, bottom-left, bottom-right.  Each push moves
/// the whole box before the next corner is looked at, so later corners see the
/// earlier corrections.  A push of `IMPACT_THRESHOLD` or more along an axis
/// zeroes the actor's velocity on that axis.
pub fn resolve_entity_collision(grid: &TileGrid, actor: &mut Actor) {
    let p0 = Vec2i::new(actor.hitbox.x, actor.hitbox.y) + actor.pos;
    let p1 = p0 + Vec2i::new(actor.hitbox.w, actor.hitbox.h);

    let mut mesh = [
        p0,
        Vec2i::new(p1.x, p0.y),
        Vec2i::new(p0.x, p1.y),
        p1,
    ];

    for i in 0..mesh.len() {
        let corrected = resolve_point_collision(grid, mesh[i]);
        let d = corrected - mesh[i];

        if d.y.abs() >= IMPACT_THRESHOLD {
            actor.vel.y = 0;
        }
        if d.x.abs() >= IMPACT_THRESHOLD {
            actor.vel.x = 0;
        }
        if d != Vec2i::ZERO {
            trace!(corner = i, dx = d.x, dy = d.y, "corner pushed out of wall");
        }

        for point in mesh.iter_mut() {
            *point += d;
        }
        actor.pos += d;
    }
}
