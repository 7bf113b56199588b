//! The chimp patrols the top of the screen and spins a full turn when hit.

use chimp_core::{FrameContext, Rect, Sprite, Surface};
use glam::IVec2;

pub const CHIMP_START: IVec2 = IVec2::new(10, 10);
/// Horizontal pixels per frame while walking.
pub const CHIMP_SPEED: i32 = 12;
/// Degrees added per frame while spinning.
pub const SPIN_STEP: u32 = 12;
pub const FULL_TURN: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChimpState {
    Walking,
    Spinning,
}

impl ChimpState {
    pub fn as_str(self) -> &'static str {
        match self {
            ChimpState::Walking => "Walking",
            ChimpState::Spinning => "Spinning",
        }
    }
}

enum Motion {
    Walking,
    /// `original` is the image at the moment of the hit; every spin frame
    /// rotates it rather than the previous frame.
    Spinning { dizzy: u32, original: Surface },
}

pub struct Chimp {
    image: Surface,
    rect: Rect,
    area: Rect,
    move_speed: i32,
    motion: Motion,
}

impl Chimp {
    /// A walking chimp at `CHIMP_START`, confined to `area`.
    pub fn new(image: Surface, area: Rect) -> Self {
        let mut rect = image.rect();
        rect.set_topleft(CHIMP_START);
        Self {
            image,
            rect,
            area,
            move_speed: CHIMP_SPEED,
            motion: Motion::Walking,
        }
    }

    pub fn state(&self) -> ChimpState {
        match self.motion {
            Motion::Walking => ChimpState::Walking,
            Motion::Spinning { .. } => ChimpState::Spinning,
        }
    }

    pub fn is_dizzy(&self) -> bool {
        matches!(self.motion, Motion::Spinning { .. })
    }

    /// Degrees spun so far; 0 while walking.
    pub fn dizzy(&self) -> u32 {
        match self.motion {
            Motion::Walking => 0,
            Motion::Spinning { dizzy, .. } => dizzy,
        }
    }

    pub fn move_speed(&self) -> i32 {
        self.move_speed
    }

    /// Start spinning. Ignored while already spinning.
    pub fn punched(&mut self) {
        if self.is_dizzy() {
            return;
        }
        self.motion = Motion::Spinning {
            dizzy: 1,
            original: self.image.clone(),
        };
    }

    fn walk(&mut self) {
        let mut next = self.rect.move_by(IVec2::new(self.move_speed, 0));
        if !self.area.contains(&next) && self.leaves_area(&next) {
            self.move_speed = -self.move_speed;
            next = self.rect.move_by(IVec2::new(self.move_speed, 0));
            self.image = self.image.flip_horizontal();
        }
        self.rect = next;
    }

    /// Whether the edge facing the direction of travel is past the area.
    fn leaves_area(&self, next: &Rect) -> bool {
        if self.move_speed > 0 {
            next.right() > self.area.right()
        } else if self.move_speed < 0 {
            next.left() < self.area.left()
        } else {
            false
        }
    }

    fn spin(&mut self) {
        let center = self.rect.center();
        let finished = match &mut self.motion {
            Motion::Walking => return,
            Motion::Spinning { dizzy, original } => {
                *dizzy += SPIN_STEP;
                if *dizzy >= FULL_TURN {
                    true
                } else {
                    self.image = original.rotate(*dizzy as f32);
                    false
                }
            }
        };
        if finished {
            if let Motion::Spinning { original, .. } =
                std::mem::replace(&mut self.motion, Motion::Walking)
            {
                self.image = original;
            }
        }
        self.rect = self.image.rect().with_center(center);
    }
}

impl Sprite for Chimp {
    fn image(&self) -> &Surface {
        &self.image
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _frame: &FrameContext) {
        if self.is_dizzy() {
            self.spin();
        } else {
            self.walk();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const SCREEN: Rect = Rect::new(0, 0, 800, 600);

    /// 40x30 with a marker pixel in the top-left so flips and turns show.
    fn chimp_image() -> Surface {
        let mut image = Surface::filled(40, 30, [120, 80, 40]);
        image.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        image
    }

    fn tick(chimp: &mut Chimp) {
        chimp.update(&FrameContext::default());
    }

    #[test]
    fn starts_walking_right_at_spawn() {
        let chimp = Chimp::new(chimp_image(), SCREEN);
        assert_eq!(chimp.rect(), Rect::new(10, 10, 40, 30));
        assert_eq!(chimp.move_speed(), CHIMP_SPEED);
        assert_eq!(chimp.state(), ChimpState::Walking);
        assert_eq!(chimp.dizzy(), 0);
    }

    #[test]
    fn walks_by_speed_each_frame() {
        let mut chimp = Chimp::new(chimp_image(), SCREEN);
        tick(&mut chimp);
        tick(&mut chimp);
        assert_eq!(chimp.rect().topleft(), IVec2::new(34, 10));
    }

    #[test]
    fn bounces_off_right_edge_with_one_flip() {
        let mut chimp = Chimp::new(chimp_image(), SCREEN);
        let original = chimp.image().clone();

        // x = 10 + 12k stays inside while x + 40 <= 800, so k <= 62.
        for _ in 0..62 {
            tick(&mut chimp);
        }
        assert_eq!(chimp.rect().left(), 754);
        assert_eq!(chimp.move_speed(), CHIMP_SPEED);

        tick(&mut chimp);
        assert_eq!(chimp.move_speed(), -CHIMP_SPEED);
        assert_eq!(chimp.rect().left(), 742);
        assert_eq!(*chimp.image(), original.flip_horizontal());

        // Next frame keeps walking left without flipping back.
        tick(&mut chimp);
        assert_eq!(chimp.move_speed(), -CHIMP_SPEED);
        assert_eq!(chimp.rect().left(), 730);
        assert_eq!(*chimp.image(), original.flip_horizontal());
    }

    #[test]
    fn patrol_never_leaves_area_and_flips_once_per_contact() {
        let mut chimp = Chimp::new(chimp_image(), SCREEN);
        let mut flips = 0;
        let mut last_speed = chimp.move_speed();
        for _ in 0..500 {
            tick(&mut chimp);
            assert!(SCREEN.contains(&chimp.rect()));
            if chimp.move_speed() != last_speed {
                flips += 1;
                last_speed = chimp.move_speed();
            }
        }
        // Each crossing of the 744 px track takes 62 or 63 frames.
        assert!((7..=8).contains(&flips), "unexpected flip count {flips}");
        assert_eq!(*chimp.image() == chimp_image(), flips % 2 == 0);
    }

    #[test]
    fn punched_is_idempotent_while_spinning() {
        let mut chimp = Chimp::new(chimp_image(), SCREEN);
        chimp.punched();
        assert_eq!(chimp.dizzy(), 1);
        tick(&mut chimp);
        assert_eq!(chimp.dizzy(), 13);

        chimp.punched();
        assert_eq!(chimp.dizzy(), 13);
        assert_eq!(chimp.state(), ChimpState::Spinning);
    }

    #[test]
    fn spin_takes_thirty_frames_and_restores_image() {
        let mut chimp = Chimp::new(chimp_image(), SCREEN);
        tick(&mut chimp);
        let before = chimp.image().clone();
        let center = chimp.rect().center();

        chimp.punched();
        for frame in 1..30 {
            tick(&mut chimp);
            assert!(chimp.is_dizzy(), "stopped spinning early at frame {frame}");
            assert_eq!(chimp.rect().center(), center);
            assert_eq!(chimp.rect().w as u32, chimp.image().width());
            assert_eq!(chimp.rect().h as u32, chimp.image().height());
        }
        tick(&mut chimp);

        assert_eq!(chimp.state(), ChimpState::Walking);
        assert_eq!(chimp.dizzy(), 0);
        assert_eq!(*chimp.image(), before);
        assert_eq!(chimp.rect().center(), center);
        assert_eq!(chimp.move_speed(), CHIMP_SPEED);
    }

    #[test]
    fn spin_frames_rotate_the_pristine_original() {
        let mut chimp = Chimp::new(chimp_image(), SCREEN);
        let before = chimp.image().clone();
        chimp.punched();
        for _ in 0..7 {
            tick(&mut chimp);
        }
        // 1 + 7 * 12 = 85 degrees
        assert_eq!(chimp.dizzy(), 85);
        assert_eq!(*chimp.image(), before.rotate(85.0));
    }

    #[test]
    fn does_not_walk_while_spinning() {
        let mut chimp = Chimp::new(chimp_image(), SCREEN);
        let center = chimp.rect().center();
        chimp.punched();
        for _ in 0..10 {
            tick(&mut chimp);
            assert_eq!(chimp.rect().center(), center);
        }
    }
}
