//! Game state and core simulation types
//!
//! Everything the per-frame update mutates lives on [`GameState`]; the
//! presentation layer reads entity fields back and drains the event queue.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Aabb;
use super::stage::build_stage;
use crate::config::Config;

/// Top-level phase of the game loop. While not `Playing` the core must not
/// integrate motion or resolve collisions (freeze semantics); menu screens on
/// top of `Paused` are the presentation layer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay (includes the ball resting on the paddle)
    Playing,
    /// Frozen; no motion or collision happens
    Paused,
    /// Run ended; waiting for a restart command
    GameOver,
}

/// Discrete feedback events for the render/audio layer, drained once per
/// frame via [`GameState::take_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off a block, the paddle or a wall
    BallImpact { pos: Vec2 },
    /// Ball crossed the bottom boundary; a heart was lost
    BallFail,
    /// Paddle caught a falling upgrade
    UpgradeCollected { kind: UpgradeKind },
    /// A volley of projectiles left the paddle
    ProjectileFired { count: u32 },
    /// A projectile damaged a block and was consumed
    ProjectileHit { pos: Vec2 },
    /// A block's health reached zero and it was removed
    BlockDestroyed { pos: Vec2 },
    /// Last block destroyed; the next stage was built
    LevelCleared { level: u32 },
    /// Hearts ran out
    GameOver { score: u64 },
}

/// Upgrade kinds dropped by destroyed blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    /// Paddle moves faster
    Speed,
    /// One extra heart
    Heart,
    /// Paddle gets wider
    Size,
    /// One extra laser emission point
    Laser,
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Aabb,
    pub old_rect: Aabb,
    /// Horizontal input direction: -1, 0 or +1
    pub direction: f32,
    pub speed: f32,
    /// Lives remaining
    pub hearts: u32,
    /// Number of laser emission points along the paddle top
    pub laser_count: u32,
}

impl Paddle {
    pub fn new(config: &Config) -> Self {
        let midbottom = Vec2::new(
            config.window.x / 2.0,
            config.window.y - config.paddle_bottom_offset,
        );
        let rect = Aabb::from_midbottom(midbottom, config.paddle_size);
        Self {
            rect,
            old_rect: rect,
            direction: 0.0,
            speed: config.paddle_speed,
            hearts: config.start_hearts,
            laser_count: config.start_lasers,
        }
    }

    /// Laser spawn points, recomputed from the current width and laser
    /// count: evenly spaced along the paddle's top edge.
    pub fn laser_points(&self) -> Vec<Vec2> {
        let divider = self.rect.size.x / (self.laser_count + 1) as f32;
        (1..=self.laser_count)
            .map(|i| Vec2::new(self.rect.left() + divider * i as f32, self.rect.top()))
            .collect()
    }

    /// Apply a collected upgrade
    pub fn apply_upgrade(&mut self, kind: UpgradeKind, config: &Config) {
        match kind {
            UpgradeKind::Speed => self.speed += config.upgrade_speed_bonus,
            UpgradeKind::Heart => self.hearts += 1,
            UpgradeKind::Size => {
                let size = Vec2::new(
                    self.rect.size.x * config.upgrade_size_factor,
                    self.rect.size.y,
                );
                self.rect.resize_about_center(size);
            }
            UpgradeKind::Laser => self.laser_count += 1,
        }
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Aabb,
    pub old_rect: Aabb,
    /// Heading; normalized before every movement step when non-zero
    pub direction: Vec2,
    pub speed: f32,
    /// False = resting on the paddle; no motion, no collisions
    pub active: bool,
}

impl Ball {
    /// Create a ball resting on the paddle, heading up at a random diagonal
    pub fn new(config: &Config, paddle: &Paddle, level: u32, rng: &mut Pcg32) -> Self {
        let rect = Aabb::from_midbottom(paddle.rect.midtop(), config.ball_size);
        let x_sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            rect,
            old_rect: rect,
            direction: Vec2::new(x_sign, -1.0),
            speed: Self::speed_for_level(config, level),
            active: false,
        }
    }

    /// Base speed plus the per-level increment
    pub fn speed_for_level(config: &Config, level: u32) -> f32 {
        config.ball_base_speed + level.saturating_sub(1) as f32 * config.ball_level_speed_bonus
    }

    /// Pin an inactive ball to the paddle's top-center
    pub fn pin_to(&mut self, paddle: &Paddle) {
        self.rect.set_midbottom(paddle.rect.midtop());
        self.old_rect = self.rect;
    }
}

/// A destructible block
#[derive(Debug, Clone)]
pub struct Block {
    pub id: u32,
    pub rect: Aabb,
    /// Remaining hits; the block is removed when this reaches zero
    pub health: u8,
}

impl Block {
    /// Blocks never move, so old rect and current rect coincide
    pub fn old_rect(&self) -> Aabb {
        self.rect
    }
}

/// A falling upgrade pickup
#[derive(Debug, Clone)]
pub struct Upgrade {
    pub id: u32,
    pub rect: Aabb,
    pub kind: UpgradeKind,
}

/// A laser projectile travelling up from the paddle
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub rect: Aabb,
}

/// Complete game state. Mutated only by [`super::tick::tick`].
#[derive(Debug, Clone)]
pub struct GameState {
    /// Immutable configuration the state was built against
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current level, 1-based once running
    pub level: u32,
    /// Running score (projectile kills only, per the original rules)
    pub score: u64,
    /// Best score seen, updated in memory during play; persisted by the
    /// caller at game over
    pub high_score: u64,
    /// Blocks destroyed by projectiles this run
    pub projectile_kills: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live blocks, sorted by id for deterministic iteration
    pub blocks: Vec<Block>,
    pub upgrades: Vec<Upgrade>,
    pub projectiles: Vec<Projectile>,
    /// Seconds until the next volley may fire
    pub(crate) fire_cooldown: f32,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh run at level 1. The config must already be validated.
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&config);
        let ball = Ball::new(&config, &paddle, 1, &mut rng);
        let mut state = Self {
            config,
            seed,
            level: 1,
            score: 0,
            high_score: 0,
            projectile_kills: 0,
            phase: GamePhase::Playing,
            paddle,
            ball,
            blocks: Vec::new(),
            upgrades: Vec::new(),
            projectiles: Vec::new(),
            fire_cooldown: 0.0,
            rng,
            events: Vec::new(),
            next_id: 1,
        };
        state.blocks = build_stage(&state.config, state.level, &mut state.next_id);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the events accumulated since the last call. The presentation
    /// layer calls this once per frame.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tear down the current level and build the next one: fresh paddle
    /// (upgrades do not carry over), rebuilt stage, new inactive ball with
    /// level-scaled speed.
    pub(crate) fn advance_level(&mut self) {
        self.level += 1;
        self.upgrades.clear();
        self.projectiles.clear();
        self.paddle = Paddle::new(&self.config);
        self.blocks = build_stage(&self.config, self.level, &mut self.next_id);
        self.ball = Ball::new(&self.config, &self.paddle, self.level, &mut self.rng);
        log::info!(
            "level {} started: {} blocks, ball speed {}",
            self.level,
            self.blocks.len(),
            self.ball.speed
        );
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.blocks.sort_by_key(|b| b.id);
        self.upgrades.sort_by_key(|u| u.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
