//! Game configuration
//!
//! One immutable [`Config`] is built at startup, validated, and handed to
//! [`crate::sim::GameState`]. Nothing in the simulation reads tunables from
//! anywhere else, so a level layout or speed change never requires touching
//! gameplay code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::state::UpgradeKind;

/// Configuration load/validation errors. All of these are fatal at startup;
/// the simulation never runs against a config that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Layout has no rows
    EmptyLayout,
    /// Layout rows are not all the same length
    RaggedLayout { row: usize, len: usize, expected: usize },
    /// Layout contains a character that is neither space nor a digit tier
    InvalidLayoutChar { row: usize, col: usize, ch: char },
    /// A digit tier exceeds `max_tier`
    TierOutOfRange { row: usize, col: usize, tier: u8, max: u8 },
    /// Upgrade kind list is empty
    NoUpgradeKinds,
    /// A dimension or speed that must be positive is not
    NonPositive { field: &'static str },
    /// A count that must be at least one is zero
    ZeroCount { field: &'static str },
    /// Drop chance outside [0, 1]
    BadDropChance { value: f32 },
    /// Underlying JSON parse failure
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyLayout => write!(f, "level layout has no rows"),
            ConfigError::RaggedLayout { row, len, expected } => write!(
                f,
                "layout row {row} has {len} cells, expected {expected}"
            ),
            ConfigError::InvalidLayoutChar { row, col, ch } => write!(
                f,
                "layout cell ({row},{col}) holds {ch:?}, expected space or digit"
            ),
            ConfigError::TierOutOfRange { row, col, tier, max } => write!(
                f,
                "layout cell ({row},{col}) tier {tier} exceeds max tier {max}"
            ),
            ConfigError::NoUpgradeKinds => write!(f, "upgrade kind list is empty"),
            ConfigError::NonPositive { field } => {
                write!(f, "config field `{field}` must be positive")
            }
            ConfigError::ZeroCount { field } => {
                write!(f, "config field `{field}` must be at least 1")
            }
            ConfigError::BadDropChance { value } => {
                write!(f, "upgrade_drop_chance {value} outside [0, 1]")
            }
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Play area size in pixels
    pub window: Vec2,

    // === Stage ===
    /// Level layout: one string per row, space = empty, digit = block tier
    pub layout: Vec<String>,
    /// Gap between block cells
    pub gap: f32,
    /// Vertical offset of the block grid from the window top
    pub top_offset: f32,
    /// Highest block tier; level scaling clamps here
    pub max_tier: u8,

    // === Paddle ===
    pub paddle_size: Vec2,
    pub paddle_speed: f32,
    /// Distance from paddle bottom edge to window bottom
    pub paddle_bottom_offset: f32,
    /// Starting heart count
    pub start_hearts: u32,
    /// Starting laser emission points
    pub start_lasers: u32,

    // === Ball ===
    pub ball_size: Vec2,
    pub ball_base_speed: f32,
    /// Speed added per level beyond the first
    pub ball_level_speed_bonus: f32,

    // === Upgrades ===
    pub upgrade_size: Vec2,
    pub upgrade_fall_speed: f32,
    /// Probability a destroyed block drops an upgrade
    pub upgrade_drop_chance: f32,
    /// Kinds to draw from, uniformly at random
    pub upgrades: Vec<UpgradeKind>,
    /// Paddle speed gained from a Speed upgrade
    pub upgrade_speed_bonus: f32,
    /// Paddle width multiplier from a Size upgrade
    pub upgrade_size_factor: f32,

    // === Projectiles ===
    pub projectile_size: Vec2,
    pub projectile_speed: f32,
    /// Seconds between volleys
    pub fire_cooldown: f32,
    /// Score awarded per projectile block kill
    pub projectile_score: u64,

    /// Upper bound on a single frame's `dt`; larger values are clamped to
    /// keep the axis-separated collision tie-break from tunneling after a
    /// stall
    pub max_dt: f32,
}

impl Default for Config {
    fn default() -> Self {
        let window = Vec2::new(1280.0, 720.0);
        Self {
            window,
            layout: vec![
                "666666666666".to_string(),
                "444557755444".to_string(),
                "333333333333".to_string(),
                "222222222222".to_string(),
                "111111111111".to_string(),
                "            ".to_string(),
            ],
            gap: 2.0,
            top_offset: window.y / 30.0,
            max_tier: 7,
            paddle_size: Vec2::new(window.x / 10.0, window.y / 20.0),
            paddle_speed: 300.0,
            paddle_bottom_offset: 20.0,
            start_hearts: 3,
            start_lasers: 2,
            ball_size: Vec2::new(20.0, 20.0),
            ball_base_speed: 300.0,
            ball_level_speed_bonus: 30.0,
            upgrade_size: Vec2::new(32.0, 32.0),
            upgrade_fall_speed: 300.0,
            upgrade_drop_chance: 0.9,
            upgrades: vec![
                UpgradeKind::Speed,
                UpgradeKind::Laser,
                UpgradeKind::Heart,
                UpgradeKind::Size,
            ],
            upgrade_speed_bonus: 50.0,
            upgrade_size_factor: 1.1,
            projectile_size: Vec2::new(10.0, 20.0),
            projectile_speed: 300.0,
            fire_cooldown: 0.5,
            projectile_score: 100,
            max_dt: 0.05,
        }
    }
}

impl Config {
    /// Grid dimensions implied by the layout (rows, cols)
    pub fn grid_size(&self) -> (usize, usize) {
        let rows = self.layout.len();
        let cols = self.layout.first().map(|r| r.chars().count()).unwrap_or(0);
        (rows, cols)
    }

    /// Block cell size derived from window, grid and gap
    pub fn block_size(&self) -> Vec2 {
        let (rows, cols) = self.grid_size();
        Vec2::new(
            self.window.x / cols.max(1) as f32 - self.gap,
            (self.window.y / 2.0) / rows.max(1) as f32 - self.gap,
        )
    }

    /// Parse a config from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast validation: a config that passes can never corrupt the
    /// simulation mid-game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.is_empty() {
            return Err(ConfigError::EmptyLayout);
        }
        let expected = self.layout[0].chars().count();
        for (row, line) in self.layout.iter().enumerate() {
            let len = line.chars().count();
            if len != expected {
                return Err(ConfigError::RaggedLayout { row, len, expected });
            }
            for (col, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let Some(tier) = ch.to_digit(10) else {
                    return Err(ConfigError::InvalidLayoutChar { row, col, ch });
                };
                let tier = tier as u8;
                if tier == 0 || tier > self.max_tier {
                    return Err(ConfigError::TierOutOfRange {
                        row,
                        col,
                        tier,
                        max: self.max_tier,
                    });
                }
            }
        }

        if self.upgrades.is_empty() {
            return Err(ConfigError::NoUpgradeKinds);
        }
        if !(0.0..=1.0).contains(&self.upgrade_drop_chance) {
            return Err(ConfigError::BadDropChance {
                value: self.upgrade_drop_chance,
            });
        }

        let positive: [(&'static str, f32); 10] = [
            ("window.x", self.window.x),
            ("window.y", self.window.y),
            ("paddle_size.x", self.paddle_size.x),
            ("paddle_size.y", self.paddle_size.y),
            ("paddle_speed", self.paddle_speed),
            ("ball_base_speed", self.ball_base_speed),
            ("upgrade_fall_speed", self.upgrade_fall_speed),
            ("projectile_speed", self.projectile_speed),
            ("ball_size.x", self.ball_size.x),
            ("max_dt", self.max_dt),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        // Zero hearts means instant game over, zero lasers an empty volley
        let counts: [(&'static str, u32); 2] = [
            ("start_hearts", self.start_hearts),
            ("start_lasers", self.start_lasers),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().expect("default config valid");
    }

    #[test]
    fn empty_layout_rejected() {
        let config = Config {
            layout: Vec::new(),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyLayout));
    }

    #[test]
    fn ragged_layout_rejected() {
        let config = Config {
            layout: vec!["11".into(), "111".into()],
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RaggedLayout {
                row: 1,
                len: 3,
                expected: 2
            })
        );
    }

    #[test]
    fn bad_layout_char_rejected() {
        let config = Config {
            layout: vec!["1x1".into()],
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLayoutChar {
                row: 0,
                col: 1,
                ch: 'x'
            })
        );
    }

    #[test]
    fn tier_above_max_rejected() {
        let config = Config {
            layout: vec!["18".into()],
            max_tier: 7,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TierOutOfRange { tier: 8, .. })
        ));
    }

    #[test]
    fn zero_hearts_or_lasers_rejected() {
        let config = Config {
            start_hearts: 0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCount {
                field: "start_hearts"
            })
        );

        let config = Config {
            start_lasers: 0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCount {
                field: "start_lasers"
            })
        );
    }

    #[test]
    fn json_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = Config::from_json_str(&json).unwrap();
        assert_eq!(parsed.layout, config.layout);
        assert_eq!(parsed.max_tier, config.max_tier);
    }

    #[test]
    fn garbage_json_is_a_parse_error() {
        assert!(matches!(
            Config::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
