//! Per-frame simulation update
//!
//! One call to [`tick`] advances the whole game by `dt` seconds: paddle and
//! ball motion with axis-separated collision resolution, projectile and
//! upgrade passes, block destruction, level progression and the game-over
//! transition. Order within the frame is fixed and load-bearing; in
//! particular the ball resolves horizontally before vertically.

use glam::Vec2;

use super::collision::{Axis, Side, WallHit, clamp_horizontal, resolve_axis, resolve_wall};
use super::rect::Aabb;
use super::state::{GameEvent, GamePhase, GameState, Projectile, Upgrade};

/// Input signals for a single frame. Movement signals are level-triggered;
/// `fire`, `pause` and `restart` are edge-triggered and should be set for
/// exactly one frame per press.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Launches a resting ball and, cooldown permitting, fires a volley
    pub fire: bool,
    pub pause: bool,
    /// Only honored in the game-over phase
    pub restart: bool,
}

/// Margin past the vertical play bounds before upgrades/projectiles despawn
const OFFSCREEN_MARGIN: f32 = 100.0;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            if input.restart {
                restart(state);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // Large stalls would let the ball step over a whole block between two
    // overlap queries, so the frame delta is bounded here.
    let dt = dt.min(state.config.max_dt);

    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);

    update_paddle(state, input, dt);

    if input.fire {
        state.ball.active = true;
        fire_projectiles(state);
    }

    update_ball(state, dt);
    cull_destroyed_blocks(state);

    update_upgrades(state, dt);
    update_projectiles(state, dt);

    projectile_block_pass(state);
    cull_destroyed_blocks(state);

    upgrade_paddle_pass(state);

    // Level-clear is checked once per frame, so the transition can never
    // fire twice even if detection would re-trigger.
    if state.blocks.is_empty() {
        state.advance_level();
        state.push_event(GameEvent::LevelCleared { level: state.level });
    }

    if state.paddle.hearts == 0 {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!(
            "game over: score {}, high score {}, level {}",
            state.score,
            state.high_score,
            state.level
        );
    }

    state.normalize_order();
}

/// Reset for a new run out of game over. Level goes to 0 so the rebuild
/// brings it to 1 with a fresh paddle, stage and ball.
fn restart(state: &mut GameState) {
    state.score = 0;
    state.projectile_kills = 0;
    state.level = 0;
    state.fire_cooldown = 0.0;
    state.advance_level();
    state.phase = GamePhase::Playing;
    log::info!("run restarted");
}

fn update_paddle(state: &mut GameState, input: &TickInput, dt: f32) {
    let paddle = &mut state.paddle;
    paddle.old_rect = paddle.rect;
    paddle.direction = if input.move_right {
        1.0
    } else if input.move_left {
        -1.0
    } else {
        0.0
    };
    paddle.rect.pos.x += paddle.direction * paddle.speed * dt;
    clamp_horizontal(&mut paddle.rect, state.config.window);
}

/// Spawn one projectile per paddle laser point, if the cooldown allows
fn fire_projectiles(state: &mut GameState) {
    if state.fire_cooldown > 0.0 {
        return;
    }
    state.fire_cooldown = state.config.fire_cooldown;

    let points = state.paddle.laser_points();
    let count = points.len() as u32;
    for point in points {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            rect: Aabb::from_midbottom(point, state.config.projectile_size),
        });
    }
    state.push_event(GameEvent::ProjectileFired { count });
}

fn update_ball(state: &mut GameState, dt: f32) {
    if !state.ball.active {
        state.ball.pin_to(&state.paddle);
        return;
    }

    if state.ball.direction.length_squared() > 0.0 {
        state.ball.direction = state.ball.direction.normalize();
    }
    state.ball.old_rect = state.ball.rect;

    move_ball_axis(state, Axis::Horizontal, dt);
    move_ball_axis(state, Axis::Vertical, dt);
}

/// One axis of ball motion: integrate, resolve against blocks and the
/// paddle, then contain against the window walls.
fn move_ball_axis(state: &mut GameState, axis: Axis, dt: f32) {
    let GameState {
        config,
        paddle,
        ball,
        blocks,
        events,
        ..
    } = state;

    match axis {
        Axis::Horizontal => ball.rect.pos.x += ball.direction.x * ball.speed * dt,
        Axis::Vertical => ball.rect.pos.y += ball.direction.y * ball.speed * dt,
    }

    // Overlap set is queried once, then every member is evaluated, matching
    // the collection's iteration order.
    // Blocks already at zero health are gone as far as collisions are
    // concerned; they only await the cull at the end of the ball update.
    let overlapping: Vec<usize> = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.health > 0 && ball.rect.overlaps(&b.rect))
        .map(|(i, _)| i)
        .collect();

    let mut impact = false;
    for i in overlapping {
        let block = &mut blocks[i];
        if let Some(side) = resolve_axis(
            &mut ball.rect,
            &ball.old_rect,
            &block.rect,
            &block.old_rect(),
            axis,
        ) {
            flip_direction(&mut ball.direction, side);
            impact = true;
        }
        // Any overlapping block takes one damage in this pass
        block.health = block.health.saturating_sub(1);
    }

    // The paddle joins the obstacle set but is never damaged
    if ball.rect.overlaps(&paddle.rect) {
        if let Some(side) = resolve_axis(
            &mut ball.rect,
            &ball.old_rect,
            &paddle.rect,
            &paddle.old_rect,
            axis,
        ) {
            flip_direction(&mut ball.direction, side);
            impact = true;
        }
    }

    match resolve_wall(&mut ball.rect, axis, config.window) {
        WallHit::Bounce => {
            match axis {
                Axis::Horizontal => ball.direction.x *= -1.0,
                Axis::Vertical => ball.direction.y *= -1.0,
            }
            impact = true;
        }
        WallHit::Bottom => {
            // Terminal: the ball deactivates and a heart is lost
            ball.active = false;
            ball.direction.y = -1.0;
            paddle.hearts = paddle.hearts.saturating_sub(1);
            events.push(GameEvent::BallFail);
        }
        WallHit::None => {}
    }

    if impact {
        events.push(GameEvent::BallImpact {
            pos: ball.rect.center(),
        });
    }
}

fn flip_direction(direction: &mut Vec2, side: Side) {
    match side {
        Side::Left | Side::Right => direction.x *= -1.0,
        Side::Top | Side::Bottom => direction.y *= -1.0,
    }
}

/// Remove blocks whose health reached zero. Each removal happens exactly
/// once and rolls a single upgrade-spawn decision.
fn cull_destroyed_blocks(state: &mut GameState) {
    let destroyed: Vec<Vec2> = state
        .blocks
        .iter()
        .filter(|b| b.health == 0)
        .map(|b| b.rect.center())
        .collect();
    if destroyed.is_empty() {
        return;
    }
    state.blocks.retain(|b| b.health > 0);

    use rand::Rng;
    for center in destroyed {
        state.push_event(GameEvent::BlockDestroyed { pos: center });
        if state.rng.random_bool(state.config.upgrade_drop_chance as f64) {
            let kind_index = state.rng.random_range(0..state.config.upgrades.len());
            let kind = state.config.upgrades[kind_index];
            let id = state.next_entity_id();
            state.upgrades.push(Upgrade {
                id,
                rect: Aabb::from_midtop(center, state.config.upgrade_size),
                kind,
            });
        }
    }
}

fn update_upgrades(state: &mut GameState, dt: f32) {
    let bottom_limit = state.config.window.y + OFFSCREEN_MARGIN;
    let fall = state.config.upgrade_fall_speed * dt;
    for upgrade in &mut state.upgrades {
        upgrade.rect.pos.y += fall;
    }
    state.upgrades.retain(|u| u.rect.top() <= bottom_limit);
}

fn update_projectiles(state: &mut GameState, dt: f32) {
    let rise = state.config.projectile_speed * dt;
    for projectile in &mut state.projectiles {
        projectile.rect.pos.y -= rise;
    }
    state
        .projectiles
        .retain(|p| p.rect.bottom() > -OFFSCREEN_MARGIN);
}

/// Projectiles vs blocks: the first overlapping live block takes one damage
/// and consumes the projectile, so a single projectile can never hit twice.
/// Blocks killed earlier in the same pass are not yet culled, so later
/// projectiles must look past them.
fn projectile_block_pass(state: &mut GameState) {
    let GameState {
        config,
        blocks,
        projectiles,
        events,
        score,
        high_score,
        projectile_kills,
        ..
    } = state;

    projectiles.retain(|projectile| {
        let Some(block) = blocks
            .iter_mut()
            .find(|b| b.health > 0 && b.rect.overlaps(&projectile.rect))
        else {
            return true;
        };
        block.health = block.health.saturating_sub(1);
        *projectile_kills += 1;
        *score += config.projectile_score;
        if *score >= *high_score {
            *high_score = *score;
        }
        events.push(GameEvent::ProjectileHit {
            pos: projectile.rect.center(),
        });
        false
    });
}

/// Falling upgrades vs paddle: collect and apply on overlap
fn upgrade_paddle_pass(state: &mut GameState) {
    let GameState {
        config,
        paddle,
        upgrades,
        events,
        ..
    } = state;

    upgrades.retain(|upgrade| {
        if !upgrade.rect.overlaps(&paddle.rect) {
            return true;
        }
        paddle.apply_upgrade(upgrade.kind, config);
        events.push(GameEvent::UpgradeCollected { kind: upgrade.kind });
        false
    });
}
