use tile_shooter::animation::Animation;
use tile_shooter::collision::resolve_point_collision;
use tile_shooter::compute::*;
use tile_shooter::config::GameConfig;
use tile_shooter::entities::*;
use tile_shooter::grid::TileGrid;

/// Open level with a full floor on row 4 (top surface at y = 512).
fn floor_sim() -> Simulation {
    let mut rows = vec![".........."; 10];
    rows[4] = "##########";
    let grid = TileGrid::from_rows(&rows).unwrap();
    Simulation::new(GameConfig::default(), grid)
}

fn bottom(sim: &Simulation) -> i32 {
    let hb = sim.player.actor.world_hitbox();
    hb.y + hb.h
}

// ── Simulation::new ───────────────────────────────────────────────────────────

#[test]
fn new_simulation_player_at_origin() {
    let sim = Simulation::default();
    assert_eq!(sim.player.actor.pos, Vec2i::ZERO);
    assert_eq!(sim.player.actor.hitbox, Rect::new(-22, -22, 44, 44));
    assert_eq!(sim.player.actor.texbox, Rect::new(-32, -32, 64, 64));
    assert_eq!(sim.player.pose, PlayerPose::Idle);
    assert_eq!(sim.count_alive_projectiles(), 0);
    assert_eq!(sim.grid, TileGrid::default_level());
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn input_sets_walk_velocity_and_facing() {
    let mut sim = floor_sim();

    sim.apply_input(PlayerInput { left: false, right: true });
    assert_eq!(sim.player.actor.vel.x, 4);
    assert_eq!(sim.player.actor.dir, Dir::Right);
    assert_eq!(sim.player.pose, PlayerPose::Walking);

    sim.apply_input(PlayerInput { left: true, right: false });
    assert_eq!(sim.player.actor.vel.x, -4);
    assert_eq!(sim.player.actor.dir, Dir::Left);

    sim.apply_input(PlayerInput::default());
    assert_eq!(sim.player.actor.vel.x, 0);
    assert_eq!(sim.player.pose, PlayerPose::Idle);
    // facing survives standing still
    assert_eq!(sim.player.actor.dir, Dir::Left);
}

#[test]
fn right_wins_when_both_held() {
    let mut sim = floor_sim();
    sim.apply_input(PlayerInput { left: true, right: true });
    assert_eq!(sim.player.actor.vel.x, 4);
    assert_eq!(sim.player.actor.dir, Dir::Right);
}

#[test]
fn jump_sets_upward_velocity() {
    let mut sim = floor_sim();
    sim.player.actor.vel = vec2(4, 3);
    sim.jump();
    assert_eq!(sim.player.actor.vel, vec2(4, -20));
}

#[test]
fn reset_returns_to_origin_keeping_walk_speed() {
    let mut sim = floor_sim();
    sim.player.actor.pos = vec2(500, 300);
    sim.player.actor.vel = vec2(4, 9);
    sim.reset_player();
    assert_eq!(sim.player.actor.pos, Vec2i::ZERO);
    assert_eq!(sim.player.actor.vel, vec2(4, 0));
}

#[test]
fn shoot_fires_in_facing_direction() {
    let mut sim = floor_sim();
    sim.player.actor.pos = vec2(200, 400);
    assert!(sim.shoot());

    sim.apply_input(PlayerInput { left: true, right: false });
    assert!(sim.shoot());

    let slots = sim.projectiles.slots();
    let first = slots[0].state.flight().copied();
    let second = slots[1].state.flight().copied();
    assert_eq!(first.map(|f| (f.pos, f.vel, f.dir)), Some((vec2(200, 400), vec2(10, 0), Dir::Right)));
    assert_eq!(second.map(|f| (f.vel, f.dir)), Some((vec2(-10, 0), Dir::Left)));
    assert_eq!(sim.count_alive_projectiles(), 2);
}

#[test]
fn shoot_reports_full_pool() {
    let mut sim = floor_sim();
    for _ in 0..sim.projectiles.capacity() {
        assert!(sim.shoot());
    }
    assert!(!sim.shoot());
    assert_eq!(sim.count_alive_projectiles(), sim.projectiles.capacity());
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[test]
fn player_falls_and_lands_on_floor() {
    let mut sim = floor_sim();
    sim.player.actor.pos = vec2(192, 300);
    for _ in 0..100 {
        sim.tick(16);
        assert!(bottom(&sim) <= 512);
    }
    assert_eq!(bottom(&sim), 512);
    assert_eq!(sim.player.actor.pos.x, 192);
}

#[test]
fn walking_into_open_space_moves_horizontally() {
    let mut sim = floor_sim();
    sim.player.actor.pos = vec2(192, 490);
    sim.apply_input(PlayerInput { left: false, right: true });
    for _ in 0..10 {
        sim.tick(16);
    }
    assert_eq!(sim.player.actor.pos.x, 232);
    assert_eq!(bottom(&sim), 512);
}

#[test]
fn projectile_flies_until_it_leaves_the_level() {
    let mut sim = floor_sim();
    sim.player.actor.pos = vec2(192, 490);
    sim.shoot();

    for _ in 0..100 {
        sim.tick(16);
    }
    assert!(matches!(sim.projectiles.slots()[0].state, ProjectileState::Active(_)));

    for _ in 0..100 {
        sim.tick(16);
    }
    assert_eq!(sim.count_alive_projectiles(), 0);
}

#[test]
fn tick_leaves_player_and_projectiles_on_the_same_step() {
    let mut sim = floor_sim();
    sim.edit_tile(vec2(1, 3), Tile::Wall);
    sim.player.actor.pos = vec2(60, 490);
    sim.shoot();

    for k in 1..=6 {
        sim.tick(16);
        assert_eq!(bottom(&sim), 512);
        match sim.projectiles.slots()[0].state {
            ProjectileState::Active(f) => assert_eq!(f.pos, vec2(60 + 10 * k, 490)),
            other => panic!("tick {k}: expected active, got {other:?}"),
        }
    }

    // x = 130 is inside the wall tile: the same tick that moves it there poofs it
    sim.tick(16);
    match sim.projectiles.slots()[0].state {
        ProjectileState::Poof(f) => assert_eq!(f.pos, vec2(130, 490)),
        other => panic!("expected poof, got {other:?}"),
    }
}

#[test]
fn update_advances_current_player_animation_only() {
    let mut sim = floor_sim();
    sim.apply_input(PlayerInput { left: false, right: true });
    sim.update(16);
    assert_eq!(sim.player.walking.frame_current(), 1);
    assert_eq!(sim.player.idle.frame_current(), 0);
    assert_eq!(sim.player.current_animation().frame_current(), 1);
}

// ── Debug probe & level editing ───────────────────────────────────────────────

#[test]
fn probe_resolves_against_live_grid() {
    let mut sim = floor_sim();
    let p = vec2(300, 520);
    assert_eq!(sim.probe(p), resolve_point_collision(&sim.grid, p));
    assert_eq!(sim.probe(p), vec2(300, 512));

    sim.edit_tile(vec2(2, 4), Tile::Empty);
    assert_eq!(sim.probe(p), p);
}

#[test]
fn edit_brush_paints_while_dragging() {
    let mut sim = floor_sim();

    sim.begin_edit(vec2(1, 1));
    assert_eq!(sim.brush, EditBrush::Create);
    assert_eq!(sim.grid.tile(vec2(1, 1)), Some(Tile::Wall));

    sim.continue_edit(vec2(2, 1));
    sim.continue_edit(vec2(3, 1));
    assert_eq!(sim.grid.tile(vec2(3, 1)), Some(Tile::Wall));

    sim.end_edit();
    assert_eq!(sim.brush, EditBrush::Idle);
    sim.continue_edit(vec2(4, 1));
    assert_eq!(sim.grid.tile(vec2(4, 1)), Some(Tile::Empty));
}

#[test]
fn pressing_on_a_wall_erases() {
    let mut sim = floor_sim();
    sim.begin_edit(vec2(0, 4));
    assert_eq!(sim.brush, EditBrush::Delete);
    sim.continue_edit(vec2(1, 4));
    assert!(sim.grid.is_tile_empty(vec2(0, 4)));
    assert!(sim.grid.is_tile_empty(vec2(1, 4)));
    assert!(!sim.grid.is_tile_empty(vec2(2, 4)));
}

#[test]
fn pressing_outside_the_level_is_ignored() {
    let mut sim = floor_sim();
    sim.begin_edit(vec2(-1, 0));
    sim.begin_edit(vec2(10, 10));
    assert_eq!(sim.brush, EditBrush::Idle);
    assert!(!sim.edit_tile(vec2(10, 0), Tile::Wall));
}
