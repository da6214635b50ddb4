//! Axis-separated collision resolution
//!
//! The tricky part of the engine: the ball moves one axis at a time, and a
//! hit only counts if this frame's edge has crossed the obstacle's edge
//! while last frame's edges had not. Comparing both current and old rects on
//! both bodies is what disambiguates which side a fast ball came from when a
//! single overlap test would report both axes at once.

use glam::Vec2;

use super::rect::Aabb;

/// Resolution axis; horizontal is always resolved before vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which obstacle edge the moving rect crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Outcome of a window containment check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    /// No wall crossed
    None,
    /// Clamped against a wall; the direction component should flip
    Bounce,
    /// Crossed the bottom boundary: terminal for the ball (no bounce)
    Bottom,
}

/// Gap left between a resolved rect and the obstacle it hit, so the next
/// frame's overlap query doesn't immediately re-report the same contact
pub const NUDGE: f32 = 1.0;

/// Resolve one axis of a detected overlap between a moving rect and a solid
/// obstacle. Returns the obstacle edge that was crossed, with `rect` clamped
/// just outside it, or `None` if the approach didn't cross an edge on this
/// axis (the other axis will claim it).
pub fn resolve_axis(
    rect: &mut Aabb,
    old: &Aabb,
    obstacle: &Aabb,
    obstacle_old: &Aabb,
    axis: Axis,
) -> Option<Side> {
    match axis {
        Axis::Horizontal => {
            if rect.right() >= obstacle.left() && old.right() <= obstacle_old.left() {
                rect.set_right(obstacle.left() - NUDGE);
                return Some(Side::Left);
            }
            if rect.left() <= obstacle.right() && old.left() >= obstacle_old.right() {
                rect.set_left(obstacle.right() + NUDGE);
                return Some(Side::Right);
            }
        }
        Axis::Vertical => {
            if rect.bottom() >= obstacle.top() && old.bottom() <= obstacle_old.top() {
                rect.set_bottom(obstacle.top() - NUDGE);
                return Some(Side::Top);
            }
            if rect.top() <= obstacle.bottom() && old.top() >= obstacle_old.bottom() {
                rect.set_top(obstacle.bottom() + NUDGE);
                return Some(Side::Bottom);
            }
        }
    }
    None
}

/// Contain a bouncing rect (the ball) against the play-area walls on one
/// axis. The bottom wall is special: the rect is not clamped and the caller
/// handles the life-loss path.
pub fn resolve_wall(rect: &mut Aabb, axis: Axis, window: Vec2) -> WallHit {
    match axis {
        Axis::Horizontal => {
            if rect.left() < 0.0 {
                rect.set_left(0.0);
                return WallHit::Bounce;
            }
            if rect.right() > window.x {
                rect.set_right(window.x);
                return WallHit::Bounce;
            }
        }
        Axis::Vertical => {
            if rect.top() < 0.0 {
                rect.set_top(0.0);
                return WallHit::Bounce;
            }
            if rect.bottom() > window.y {
                return WallHit::Bottom;
            }
        }
    }
    WallHit::None
}

/// Pin a non-bouncing rect (the paddle) inside the horizontal window bounds
pub fn clamp_horizontal(rect: &mut Aabb, window: Vec2) {
    if rect.right() > window.x {
        rect.set_right(window.x);
    }
    if rect.left() < 0.0 {
        rect.set_left(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(20.0, 20.0))
    }

    const BLOCK: Aabb = Aabb {
        pos: Vec2::new(100.0, 100.0),
        size: Vec2::new(100.0, 30.0),
    };

    #[test]
    fn crossing_left_edge_clamps_and_reports() {
        // Last frame fully left of the block, this frame overlapping
        let old = rect(70.0, 105.0);
        let mut moving = rect(90.0, 105.0);
        let side = resolve_axis(&mut moving, &old, &BLOCK, &BLOCK, Axis::Horizontal);
        assert_eq!(side, Some(Side::Left));
        assert_eq!(moving.right(), BLOCK.left() - NUDGE);
        // Vertical position untouched by a horizontal resolution
        assert_eq!(moving.top(), 105.0);
    }

    #[test]
    fn crossing_right_edge_clamps_and_reports() {
        let old = rect(210.0, 105.0);
        let mut moving = rect(190.0, 105.0);
        let side = resolve_axis(&mut moving, &old, &BLOCK, &BLOCK, Axis::Horizontal);
        assert_eq!(side, Some(Side::Right));
        assert_eq!(moving.left(), BLOCK.right() + NUDGE);
    }

    #[test]
    fn crossing_top_edge_clamps_and_reports() {
        let old = rect(120.0, 70.0);
        let mut moving = rect(120.0, 90.0);
        let side = resolve_axis(&mut moving, &old, &BLOCK, &BLOCK, Axis::Vertical);
        assert_eq!(side, Some(Side::Top));
        assert_eq!(moving.bottom(), BLOCK.top() - NUDGE);
        assert_eq!(moving.left(), 120.0);
    }

    #[test]
    fn crossing_bottom_edge_clamps_and_reports() {
        let old = rect(120.0, 140.0);
        let mut moving = rect(120.0, 120.0);
        let side = resolve_axis(&mut moving, &old, &BLOCK, &BLOCK, Axis::Vertical);
        assert_eq!(side, Some(Side::Bottom));
        assert_eq!(moving.top(), BLOCK.bottom() + NUDGE);
    }

    #[test]
    fn already_overlapping_last_frame_is_not_a_crossing() {
        // Old rect was already past the block's left edge, so the
        // horizontal pass must not claim this contact
        let old = rect(95.0, 105.0);
        let mut moving = rect(98.0, 105.0);
        let side = resolve_axis(&mut moving, &old, &BLOCK, &BLOCK, Axis::Horizontal);
        assert_eq!(side, None);
        assert_eq!(moving.left(), 98.0);
    }

    #[test]
    fn horizontal_walls_clamp_and_bounce() {
        let window = Vec2::new(1280.0, 720.0);
        let mut moving = rect(-5.0, 100.0);
        assert_eq!(resolve_wall(&mut moving, Axis::Horizontal, window), WallHit::Bounce);
        assert_eq!(moving.left(), 0.0);

        let mut moving = rect(1270.0, 100.0);
        assert_eq!(resolve_wall(&mut moving, Axis::Horizontal, window), WallHit::Bounce);
        assert_eq!(moving.right(), window.x);
    }

    #[test]
    fn top_wall_bounces_bottom_wall_is_terminal() {
        let window = Vec2::new(1280.0, 720.0);
        let mut moving = rect(100.0, -3.0);
        assert_eq!(resolve_wall(&mut moving, Axis::Vertical, window), WallHit::Bounce);
        assert_eq!(moving.top(), 0.0);

        let mut moving = rect(100.0, 710.0);
        assert_eq!(resolve_wall(&mut moving, Axis::Vertical, window), WallHit::Bottom);
        // No clamp on the terminal case
        assert_eq!(moving.top(), 710.0);
    }

    #[test]
    fn paddle_clamp_pins_without_bounce() {
        let window = Vec2::new(1280.0, 720.0);
        let mut paddle = Aabb::new(Vec2::new(1250.0, 680.0), Vec2::new(128.0, 36.0));
        clamp_horizontal(&mut paddle, window);
        assert_eq!(paddle.right(), window.x);
        let mut paddle = Aabb::new(Vec2::new(-40.0, 680.0), Vec2::new(128.0, 36.0));
        clamp_horizontal(&mut paddle, window);
        assert_eq!(paddle.left(), 0.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A horizontally contained rect always ends up inside the walls
            #[test]
            fn horizontal_wall_containment(x in -500.0f32..1800.0) {
                let window = Vec2::new(1280.0, 720.0);
                let mut moving = rect(x, 100.0);
                resolve_wall(&mut moving, Axis::Horizontal, window);
                prop_assert!(moving.left() >= 0.0);
                prop_assert!(moving.right() <= window.x);
            }

            /// A resolved horizontal hit never moves the rect vertically,
            /// and vice versa
            #[test]
            fn resolution_is_single_axis(
                old_x in 0.0f32..80.0,
                new_x in 80.0f32..99.0,
                y in 90.0f32..120.0,
            ) {
                let old = rect(old_x, y);
                let mut moving = rect(new_x, y);
                resolve_axis(&mut moving, &old, &BLOCK, &BLOCK, Axis::Horizontal);
                prop_assert_eq!(moving.top(), y);
            }

            /// After a reported crossing the rect no longer overlaps the
            /// obstacle
            #[test]
            fn resolved_rect_is_outside_obstacle(
                old_x in 0.0f32..80.0,
                new_x in 81.0f32..150.0,
            ) {
                let old = rect(old_x, 105.0);
                let mut moving = rect(new_x, 105.0);
                if resolve_axis(&mut moving, &old, &BLOCK, &BLOCK, Axis::Horizontal).is_some() {
                    prop_assert!(!moving.overlaps(&BLOCK));
                }
            }
        }
    }
}
