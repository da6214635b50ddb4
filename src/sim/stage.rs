//! Stage builder
//!
//! Turns the configured character layout plus the current level into a grid
//! of blocks. Higher levels remap every tier upward so the same layout gets
//! strictly harder, clamped at the configured max tier.

use glam::Vec2;

use super::rect::Aabb;
use super::state::Block;
use crate::config::Config;

/// Remap a layout digit for the given level: `tier + (level - 1)`, clamped
/// at `max_tier`. Space and (defensively) any non-digit cell yields `None`.
pub fn tier_for_level(ch: char, level: u32, max_tier: u8) -> Option<u8> {
    let tier = ch.to_digit(10)? as u32;
    if tier == 0 {
        return None;
    }
    let raised = tier + level.saturating_sub(1);
    Some(raised.min(max_tier as u32) as u8)
}

/// Top-left corner of the grid cell at (row, col)
pub fn cell_origin(config: &Config, row: usize, col: usize) -> Vec2 {
    let block = config.block_size();
    Vec2::new(
        col as f32 * (block.x + config.gap) + config.gap / 2.0,
        config.top_offset + row as f32 * (block.y + config.gap) + config.gap / 2.0,
    )
}

/// Build the block set for a level. IDs are allocated from `next_id` so they
/// stay unique across level rebuilds.
pub fn build_stage(config: &Config, level: u32, next_id: &mut u32) -> Vec<Block> {
    let block_size = config.block_size();
    let mut blocks = Vec::new();
    for (row, line) in config.layout.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let Some(health) = tier_for_level(ch, level, config.max_tier) else {
                continue;
            };
            let id = *next_id;
            *next_id += 1;
            blocks.push(Block {
                id,
                rect: Aabb::new(cell_origin(config, row, col), block_size),
                health,
            });
        }
    }
    blocks
}
