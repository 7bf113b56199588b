//! The player's fist: glued to the cursor, jabs while a button is held.

use chimp_core::{FrameContext, Rect, Sprite, Surface};
use glam::IVec2;

/// Visual jab applied while punching.
pub const PUNCH_OFFSET: IVec2 = IVec2::new(5, 10);
/// The hit test shrinks the fist by this much on each axis.
pub const HITBOX_SHRINK: i32 = 5;

pub struct Fist {
    image: Surface,
    rect: Rect,
    punching: bool,
}

impl Fist {
    pub fn new(image: Surface) -> Self {
        let rect = image.rect();
        Self {
            image,
            rect,
            punching: false,
        }
    }

    pub fn is_punching(&self) -> bool {
        self.punching
    }

    pub fn hitbox(&self) -> Rect {
        self.rect.inflate(-HITBOX_SHRINK, -HITBOX_SHRINK)
    }

    /// Start a punch and report whether it lands on `target`. A second punch
    /// before `unpunch` is ignored and never lands.
    pub fn punch(&mut self, target: &dyn Sprite) -> bool {
        if self.punching {
            return false;
        }
        self.punching = true;
        self.hitbox().collides(&target.rect())
    }

    pub fn unpunch(&mut self) {
        self.punching = false;
    }
}

impl Sprite for Fist {
    fn image(&self) -> &Surface {
        &self.image
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, frame: &FrameContext) {
        self.rect.set_midtop(frame.mouse_position);
        if self.punching {
            self.rect.move_in_place(PUNCH_OFFSET);
        }
    }
}
