//! Integer axis-aligned rectangles with classic 2D sprite-library arithmetic.
//!
//! Positions are top-left origin, y down, in logical pixels. Helpers that
//! halve a size (`inflate`, `center`, `set_midtop`) use Rust integer
//! division, which truncates toward zero. `inflate(-5, -5)` therefore moves
//! the origin by +2 and shrinks each side by 5.

use glam::IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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

    /// A rect at the origin with the given size.
    pub const fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, w as i32, h as i32)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn topleft(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn set_topleft(&mut self, point: IVec2) {
        self.x = point.x;
        self.y = point.y;
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn set_center(&mut self, point: IVec2) {
        self.x = point.x - self.w / 2;
        self.y = point.y - self.h / 2;
    }

    pub fn midtop(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y)
    }

    pub fn set_midtop(&mut self, point: IVec2) {
        self.x = point.x - self.w / 2;
        self.y = point.y;
    }

    /// Same size, re-centred on `center`.
    pub fn with_center(mut self, center: IVec2) -> Self {
        self.set_center(center);
        self
    }

    pub fn move_by(&self, delta: IVec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    pub fn move_in_place(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Grow (or shrink, for negative deltas) around the centre.
    pub fn inflate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x - dx / 2, self.y - dy / 2, self.w + dx, self.h + dy)
    }

    /// Overlap test. Rects that only share an edge do not collide, and a
    /// rect without positive area never collides.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && self.y < other.bottom()
            && self.right() > other.x
            && self.bottom() > other.y
    }

    /// True when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
            && self.right() > other.x
            && self.bottom() > other.y
    }

    pub fn contains_point(&self, point: IVec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Intersection of two rects, or `None` when they do not overlap.
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}
