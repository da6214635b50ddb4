//! Axis-aligned bounding rectangles
//!
//! Every movable entity keeps two of these: its current rect and the rect it
//! had at the start of the frame's motion pass ("old rect"). The pair is what
//! lets the collision resolver decide which side an obstacle was approached
//! from.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle. `pos` is the top-left corner; the y axis
/// grows downward, matching screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Build a rect of `size` whose bottom-center sits at `midbottom`
    pub fn from_midbottom(midbottom: Vec2, size: Vec2) -> Self {
        Self {
            pos: midbottom - Vec2::new(size.x / 2.0, size.y),
            size,
        }
    }

    /// Build a rect of `size` whose top-center sits at `midtop`
    pub fn from_midtop(midtop: Vec2, size: Vec2) -> Self {
        Self {
            pos: midtop - Vec2::new(size.x / 2.0, 0.0),
            size,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn midtop(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    /// Translate so the left edge lands on `x`
    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    /// Translate so the right edge lands on `x`
    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    /// Translate so the top edge lands on `y`
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    /// Translate so the bottom edge lands on `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Translate so the bottom-center lands on `midbottom`
    pub fn set_midbottom(&mut self, midbottom: Vec2) {
        self.pos = midbottom - Vec2::new(self.size.x / 2.0, self.size.y);
    }

    /// Resize in place, keeping the center fixed
    pub fn resize_about_center(&mut self, size: Vec2) {
        let center = self.center();
        self.size = size;
        self.pos = center - size / 2.0;
    }

    /// Overlap test, exclusive on touching edges
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let rect = Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(40.0, 60.0));
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 50.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 80.0);
        assert_eq!(rect.center(), Vec2::new(30.0, 50.0));
        assert_eq!(rect.midtop(), Vec2::new(30.0, 20.0));
        assert_eq!(rect.midbottom(), Vec2::new(30.0, 80.0));
    }

    #[test]
    fn edge_setters_translate() {
        let mut rect = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        rect.set_right(100.0);
        assert_eq!(rect.left(), 90.0);
        rect.set_bottom(50.0);
        assert_eq!(rect.top(), 40.0);
        assert_eq!(rect.size, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn resize_keeps_center() {
        let mut rect = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 20.0));
        let center = rect.center();
        rect.resize_about_center(Vec2::new(110.0, 20.0));
        assert_eq!(rect.center(), center);
        assert_eq!(rect.size.x, 110.0);
    }

    #[test]
    fn overlap_is_exclusive_on_edges() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let overlapping = Aabb::new(Vec2::new(9.0, 9.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
    }
}
