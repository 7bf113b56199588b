//! Headless game state: sprites, sound cues, and the per-frame step.
//!
//! `Game::step` consumes one frame's input events in order, updates the fist
//! then the chimp, and composites background, fist and chimp into `screen`.
//! Presenting `screen` is the caller's job.

use chimp_audio::Playable;
use chimp_core::input::{InputEvent, Key};
use chimp_core::sprite::{draw_all, update_all};
use chimp_core::{FrameContext, Rect, Rgb, Sprite, Surface};
use chimp_render::TitleFont;
use glam::IVec2;

use crate::assets::{AssetLoader, ColorKey};
use crate::chimp::Chimp;
use crate::config::GameConfig;
use crate::fist::Fist;
use crate::subsystems::Subsystems;

pub const BACKGROUND_COLOR: Rgb = [250, 250, 250];
pub const TITLE_COLOR: Rgb = [10, 10, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStats {
    pub hits: u32,
    pub whiffs: u32,
    pub frames: u64,
}

pub struct Sounds {
    pub whiff: Box<dyn Playable>,
    pub punch: Box<dyn Playable>,
}

pub struct Game {
    fist: Fist,
    chimp: Chimp,
    sounds: Sounds,
    background: Surface,
    screen: Surface,
    stats: GameStats,
}

impl Game {
    pub fn new(fist: Fist, chimp: Chimp, sounds: Sounds, background: Surface) -> Self {
        let screen = background.clone();
        Self {
            fist,
            chimp,
            sounds,
            background,
            screen,
            stats: GameStats::default(),
        }
    }

    /// Load every asset from `config.asset_dir` and lay out the opening frame.
    /// Any missing image or sound is fatal.
    pub fn load(config: &GameConfig, subsystems: &Subsystems) -> Result<Self, String> {
        let loader = AssetLoader::new(&config.asset_dir);
        log::info!("Loading assets from {}", loader.dir().display());

        let sounds = Sounds {
            whiff: loader.load_sound(&subsystems.audio, "whiff.wav")?,
            punch: loader.load_sound(&subsystems.audio, "punch.wav")?,
        };
        let (chimp_image, _) = loader.load_image("monkey.png", ColorKey::TopLeft)?;
        let (fist_image, _) = loader.load_image("fist.png", ColorKey::TopLeft)?;

        let (width, height) = config.screen_size();
        let background = build_background(
            width,
            height,
            subsystems.font.as_ref(),
            &config.title_text,
        );
        let area = Rect::from_size(width, height);

        Ok(Self::new(
            Fist::new(fist_image),
            Chimp::new(chimp_image, area),
            sounds,
            background,
        ))
    }

    /// Handle one input event. Returns `Terminate` on quit or Escape.
    pub fn handle_event(&mut self, event: InputEvent) -> FrameOutcome {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                log::info!("Quit requested ({event:?})");
                return FrameOutcome::Terminate;
            }
            InputEvent::MouseDown(_) => {
                if self.fist.punch(&self.chimp) {
                    self.sounds.punch.play();
                    self.chimp.punched();
                    self.stats.hits += 1;
                    log::debug!("Hit at {:?}", self.fist.rect().midtop());
                } else {
                    self.sounds.whiff.play();
                    self.stats.whiffs += 1;
                    log::debug!("Whiff at {:?}", self.fist.rect().midtop());
                }
            }
            InputEvent::MouseUp(_) => self.fist.unpunch(),
            InputEvent::KeyDown(_) => {}
        }
        FrameOutcome::Continue
    }

    /// Run one frame: events in order, then updates, then the draw.
    /// Nothing is updated or drawn once an event terminates the game.
    pub fn step(&mut self, events: &[InputEvent], mouse: IVec2) -> FrameOutcome {
        for &event in events {
            if self.handle_event(event) == FrameOutcome::Terminate {
                return FrameOutcome::Terminate;
            }
        }

        let frame = FrameContext {
            mouse_position: mouse,
        };
        let mut sprites: [&mut dyn Sprite; 2] = [&mut self.fist, &mut self.chimp];
        update_all(&mut sprites, &frame);

        self.screen.clone_from(&self.background);
        let sprites: [&dyn Sprite; 2] = [&self.fist, &self.chimp];
        draw_all(&sprites, &mut self.screen);

        self.stats.frames += 1;
        FrameOutcome::Continue
    }

    /// Draw order: fist first, chimp on top.
    pub fn sprites(&self) -> [&dyn Sprite; 2] {
        [&self.fist, &self.chimp]
    }

    pub fn fist(&self) -> &Fist {
        &self.fist
    }

    pub fn chimp(&self) -> &Chimp {
        &self.chimp
    }

    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }
}

/// Solid backdrop with the title centred along the top edge when a font is
/// available.
pub fn build_background(
    width: u32,
    height: u32,
    font: Option<&TitleFont>,
    title: &str,
) -> Surface {
    let mut background = Surface::filled(width, height, BACKGROUND_COLOR);
    if let Some(font) = font {
        let text = font.render(title, TITLE_COLOR);
        let mut text_rect = text.rect();
        text_rect.set_midtop(IVec2::new(width as i32 / 2, 0));
        background.blit(&text, text_rect.topleft());
    }
    background
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chimp_core::input::MouseBtn;
    use image::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub(crate) type PlayLog = Rc<RefCell<Vec<&'static str>>>;

    struct RecordingSound {
        name: &'static str,
        log: PlayLog,
    }

    impl Playable for RecordingSound {
        fn play(&self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    pub(crate) const FIST_COLOR: Rgb = [200, 150, 100];
    pub(crate) const CHIMP_COLOR: Rgb = [120, 80, 40];

    /// 20x20 fist, 40x30 chimp on an 800x600 screen, sounds recorded.
    pub(crate) fn test_game() -> (Game, PlayLog) {
        let log: PlayLog = Rc::new(RefCell::new(Vec::new()));
        let sounds = Sounds {
            whiff: Box::new(RecordingSound {
                name: "whiff",
                log: log.clone(),
            }),
            punch: Box::new(RecordingSound {
                name: "punch",
                log: log.clone(),
            }),
        };
        let background = build_background(800, 600, None, "");
        let game = Game::new(
            Fist::new(Surface::filled(20, 20, FIST_COLOR)),
            Chimp::new(
                Surface::filled(40, 30, CHIMP_COLOR),
                Rect::from_size(800, 600),
            ),
            sounds,
            background,
        );
        (game, log)
    }

    fn pixel(game: &Game, point: IVec2) -> Option<Rgba<u8>> {
        game.screen().get_at(point.x as u32, point.y as u32)
    }

    fn opaque(color: Rgb) -> Rgba<u8> {
        Rgba([color[0], color[1], color[2], 255])
    }

    #[test]
    fn hit_starts_spin_and_plays_punch() {
        let (mut game, log) = test_game();
        // Chimp walks to (22, 10); fist midtop lands on its centre.
        game.step(&[], IVec2::new(42, 20));
        assert!(game.fist().rect().collides(&game.chimp().rect()));

        assert_eq!(
            game.handle_event(InputEvent::MouseDown(MouseBtn::Left)),
            FrameOutcome::Continue
        );
        assert_eq!(game.chimp().dizzy(), 1);
        assert_eq!(*log.borrow(), vec!["punch"]);
        assert_eq!(game.stats().hits, 1);

        let before = game.chimp().image().clone();
        for _ in 0..29 {
            game.step(&[], IVec2::new(42, 20));
            assert!(game.chimp().is_dizzy());
        }
        game.step(&[], IVec2::new(42, 20));
        assert!(!game.chimp().is_dizzy());
        assert_eq!(*game.chimp().image(), before);
        assert_eq!(game.chimp().move_speed(), crate::chimp::CHIMP_SPEED);
    }

    #[test]
    fn miss_plays_whiff_and_chimp_keeps_walking() {
        let (mut game, log) = test_game();
        game.step(&[], IVec2::new(700, 500));
        let outcome = game.step(&[InputEvent::MouseDown(MouseBtn::Left)], IVec2::new(700, 500));

        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(*log.borrow(), vec!["whiff"]);
        assert_eq!(game.chimp().dizzy(), 0);
        assert_eq!(game.stats().whiffs, 1);
        assert_eq!(game.stats().hits, 0);
    }

    #[test]
    fn any_button_punches() {
        let (mut game, log) = test_game();
        game.step(&[], IVec2::new(700, 500));
        game.step(
            &[
                InputEvent::MouseDown(MouseBtn::Right),
                InputEvent::MouseUp(MouseBtn::Right),
                InputEvent::MouseDown(MouseBtn::Other(8)),
            ],
            IVec2::new(700, 500),
        );
        assert_eq!(*log.borrow(), vec!["whiff", "whiff"]);
        assert!(game.fist().is_punching());
    }

    #[test]
    fn punch_while_punching_whiffs_without_hitting() {
        let (mut game, log) = test_game();
        game.step(&[], IVec2::new(42, 20));
        game.handle_event(InputEvent::MouseDown(MouseBtn::Left));
        game.handle_event(InputEvent::MouseDown(MouseBtn::Right));
        assert_eq!(*log.borrow(), vec!["punch", "whiff"]);
        assert_eq!(game.stats().hits, 1);
    }

    #[test]
    fn escape_stops_before_update_and_draw() {
        let (mut game, log) = test_game();
        game.step(&[], IVec2::new(100, 100));
        let fist_rect = game.fist().rect();
        let chimp_rect = game.chimp().rect();
        let screen = game.screen().clone();

        let outcome = game.step(
            &[
                InputEvent::KeyDown(Key::Escape),
                InputEvent::MouseDown(MouseBtn::Left),
            ],
            IVec2::new(400, 400),
        );

        assert_eq!(outcome, FrameOutcome::Terminate);
        assert!(log.borrow().is_empty());
        assert_eq!(game.fist().rect(), fist_rect);
        assert_eq!(game.chimp().rect(), chimp_rect);
        assert_eq!(*game.screen(), screen);
        assert_eq!(game.stats().frames, 1);
    }

    #[test]
    fn quit_after_a_punch_still_plays_that_punch() {
        let (mut game, log) = test_game();
        game.step(&[], IVec2::new(700, 500));
        let outcome = game.step(
            &[InputEvent::MouseDown(MouseBtn::Left), InputEvent::Quit],
            IVec2::new(700, 500),
        );
        assert_eq!(outcome, FrameOutcome::Terminate);
        assert_eq!(*log.borrow(), vec!["whiff"]);
    }

    #[test]
    fn f3_is_not_a_game_event() {
        let (mut game, log) = test_game();
        let outcome = game.step(&[InputEvent::KeyDown(Key::F3)], IVec2::new(10, 10));
        assert_eq!(outcome, FrameOutcome::Continue);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn chimp_is_drawn_over_fist() {
        let (mut game, _) = test_game();
        // Fist (32, 30, 20, 20) hangs below the chimp's bottom edge at y = 40.
        game.step(&[], IVec2::new(42, 30));
        let overlap = game
            .fist()
            .rect()
            .clip(&game.chimp().rect())
            .expect("fist and chimp overlap");

        assert_eq!(pixel(&game, overlap.topleft()), Some(opaque(CHIMP_COLOR)));
        let fist_only = IVec2::new(game.fist().rect().left(), game.fist().rect().bottom() - 1);
        assert!(!game.chimp().rect().contains_point(fist_only));
        assert_eq!(pixel(&game, fist_only), Some(opaque(FIST_COLOR)));
        assert_eq!(pixel(&game, IVec2::new(700, 500)), Some(opaque(BACKGROUND_COLOR)));
    }

    #[test]
    fn each_frame_redraws_from_background() {
        let (mut game, _) = test_game();
        game.step(&[], IVec2::new(400, 300));
        game.step(&[], IVec2::new(600, 300));
        // The fist left (390..410, 300..320) behind.
        assert_eq!(pixel(&game, IVec2::new(395, 305)), Some(opaque(BACKGROUND_COLOR)));
        assert_eq!(pixel(&game, IVec2::new(595, 305)), Some(opaque(FIST_COLOR)));
    }

    #[test]
    fn background_title_is_centred_along_the_top() {
        let font = TitleFont::builtin(36.0).expect("bundled font parses");
        let background = build_background(800, 600, Some(&font), "Treff apen!");

        let mut min_x = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut solid = 0;
        for y in 0..600 {
            for x in 0..800 {
                let Some(p) = background.get_at(x, y) else {
                    continue;
                };
                if p == opaque(BACKGROUND_COLOR) {
                    continue;
                }
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                if p == opaque(TITLE_COLOR) {
                    solid += 1;
                }
            }
        }

        assert!(solid > 50, "only {solid} title-coloured pixels");
        assert!(max_y < 50, "title reaches down to y = {max_y}");
        let mid = (min_x + max_x) / 2;
        assert!(mid.abs_diff(400) <= 8, "title centred at x = {mid}");
    }

    #[test]
    fn background_without_font_is_plain() {
        let background = build_background(8, 4, None, "Treff apen!");
        assert!(background
            .as_raw()
            .chunks(4)
            .all(|p| p == [250, 250, 250, 255]));
    }

    #[test]
    fn load_fails_when_images_are_missing() {
        let config = GameConfig {
            asset_dir: "/no/such/asset/dir".into(),
            ..GameConfig::default()
        };
        let err = Game::load(&config, &Subsystems::headless())
            .err()
            .expect("missing assets are fatal");
        assert!(err.contains("monkey.png"));
    }
}
