//! The structural contract shared by every on-screen entity: it has an image,
//! it has a rect matching that image, it updates once per frame, and it can
//! draw itself.

use glam::IVec2;

use crate::rect::Rect;
use crate::surface::Surface;

/// Read-only per-frame inputs handed to `Sprite::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameContext {
    /// Cursor position in logical pixels.
    pub mouse_position: IVec2,
}

pub trait Sprite {
    fn image(&self) -> &Surface;

    /// Invariant: sized like `image()` after every image change.
    fn rect(&self) -> Rect;

    fn update(&mut self, frame: &FrameContext);

    fn draw(&self, target: &mut Surface) {
        target.blit(self.image(), self.rect().topleft());
    }
}

/// Update every sprite in slice order.
pub fn update_all(sprites: &mut [&mut dyn Sprite], frame: &FrameContext) {
    for sprite in sprites.iter_mut() {
        sprite.update(frame);
    }
}

/// Draw every sprite in slice order, later sprites on top.
pub fn draw_all(sprites: &[&dyn Sprite], target: &mut Surface) {
    for sprite in sprites {
        sprite.draw(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    struct Block {
        image: Surface,
        rect: Rect,
        updates: u32,
    }

    impl Block {
        fn new(color: [u8; 3], at: IVec2) -> Self {
            let image = Surface::filled(4, 4, color);
            let mut rect = image.rect();
            rect.set_topleft(at);
            Self {
                image,
                rect,
                updates: 0,
            }
        }
    }

    impl Sprite for Block {
        fn image(&self) -> &Surface {
            &self.image
        }

        fn rect(&self) -> Rect {
            self.rect
        }

        fn update(&mut self, frame: &FrameContext) {
            self.updates += 1;
            self.rect.set_topleft(frame.mouse_position);
        }
    }

    #[test]
    fn later_sprites_draw_on_top() {
        let red = Block::new([255, 0, 0], IVec2::new(0, 0));
        let blue = Block::new([0, 0, 255], IVec2::new(2, 2));
        let mut frame = Surface::filled(8, 8, [0, 0, 0]);
        draw_all(&[&red, &blue], &mut frame);
        assert_eq!(frame.get_at(3, 3), Some(Rgba([0, 0, 255, 255])));
        assert_eq!(frame.get_at(1, 1), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(frame.get_at(7, 7), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn update_all_visits_each_sprite_once() {
        let mut a = Block::new([1, 1, 1], IVec2::ZERO);
        let mut b = Block::new([2, 2, 2], IVec2::ZERO);
        let frame = FrameContext {
            mouse_position: IVec2::new(3, 5),
        };
        update_all(&mut [&mut a, &mut b], &frame);
        assert_eq!((a.updates, b.updates), (1, 1));
        assert_eq!(b.rect().topleft(), IVec2::new(3, 5));
    }
}
