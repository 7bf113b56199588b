use crate::game::{FrameOutcome, Game};
use chimp_core::input::{InputEvent, Key, MouseBtn};
use glam::IVec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    /// Cursor position for this frame. Omitted means "where it was".
    #[serde(default)]
    pub mouse: Option<[i32; 2]>,
    /// Delivered on the first repetition only.
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplayEvent {
    MouseDown,
    MouseUp,
    Escape,
    Quit,
}

impl ReplayEvent {
    fn to_input(self) -> InputEvent {
        match self {
            ReplayEvent::MouseDown => InputEvent::MouseDown(MouseBtn::Left),
            ReplayEvent::MouseUp => InputEvent::MouseUp(MouseBtn::Left),
            ReplayEvent::Escape => InputEvent::KeyDown(Key::Escape),
            ReplayEvent::Quit => InputEvent::Quit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub mouse: IVec2,
    pub events: Vec<InputEvent>,
}

impl ReplaySequence {
    pub fn expanded_steps(&self) -> Vec<ReplayStep> {
        let mut out = Vec::new();
        let mut mouse = IVec2::ZERO;
        for frame in &self.frames {
            if let Some([x, y]) = frame.mouse {
                mouse = IVec2::new(x, y);
            }
            for i in 0..frame.repeat.max(1) {
                let events = if i == 0 {
                    frame.events.iter().map(|e| e.to_input()).collect()
                } else {
                    Vec::new()
                };
                out.push(ReplayStep { mouse, events });
            }
        }
        out
    }
}

/// Step `game` through `replay`. Returns how many steps ran and the final
/// outcome; a terminating step ends the run early.
pub fn run_replay(game: &mut Game, replay: &ReplaySequence) -> (usize, FrameOutcome) {
    let mut stepped = 0;
    for step in replay.expanded_steps() {
        stepped += 1;
        if game.step(&step.events, step.mouse) == FrameOutcome::Terminate {
            return (stepped, FrameOutcome::Terminate);
        }
    }
    (stepped, FrameOutcome::Continue)
}

pub fn parse_replay(raw: &str) -> Result<ReplaySequence, String> {
    let replay: ReplaySequence =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse replay JSON: {e}"))?;
    validate_replay(&replay)?;
    Ok(replay)
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_replay(&raw).map_err(|e| format!("{e} ({})", path.display()))
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chimp::{ChimpState, CHIMP_SPEED};
    use chimp_core::Sprite;
    use crate::game::tests::test_game;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "chimp_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    const HIT_AND_SPIN: &str = r#"{
      "frames": [
        { "mouse": [42, 20] },
        { "events": ["mouse_down"], "repeat": 15 },
        { "events": ["mouse_up"], "repeat": 15 },
        { "repeat": 5 }
      ]
    }"#;

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(&path, HIT_AND_SPIN).expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let steps = replay.expanded_steps();
        assert_eq!(steps.len(), 36);
        assert!(steps.iter().all(|s| s.mouse == IVec2::new(42, 20)));
        assert_eq!(
            steps[1].events,
            vec![InputEvent::MouseDown(MouseBtn::Left)]
        );
        assert!(steps[2].events.is_empty());
        assert_eq!(steps[16].events, vec![InputEvent::MouseUp(MouseBtn::Left)]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let err = parse_replay(r#"{ "frames": [] }"#).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
    }

    #[test]
    fn unknown_event_is_rejected() {
        assert!(parse_replay(r#"{ "frames": [ { "events": ["kick"] } ] }"#).is_err());
    }

    #[test]
    fn scripted_hit_spins_for_thirty_frames() {
        let (mut game, log) = test_game();
        let replay = parse_replay(HIT_AND_SPIN).expect("replay should parse");

        let (stepped, outcome) = run_replay(&mut game, &replay);

        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(stepped, 36);
        assert_eq!(*log.borrow(), vec!["punch"]);
        // Hit on step 2, whose update is the first spin frame; 30 spin
        // frames end on step 31 and the last five steps walk again.
        assert_eq!(game.chimp().state(), ChimpState::Walking);
        assert_eq!(game.chimp().move_speed(), CHIMP_SPEED);
        assert!(!game.fist().is_punching());
        assert_eq!(game.stats().frames, 36);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = parse_replay(
            r#"{
              "frames": [
                { "mouse": [300, 200], "repeat": 10 },
                { "mouse": [120, 25], "events": ["mouse_down"], "repeat": 3 },
                { "events": ["mouse_up"], "repeat": 40 },
                { "mouse": [600, 400], "events": ["mouse_down", "mouse_up"], "repeat": 20 }
              ]
            }"#,
        )
        .expect("replay should parse");

        let (mut first, first_log) = test_game();
        let (mut second, second_log) = test_game();
        run_replay(&mut first, &replay);
        run_replay(&mut second, &replay);

        assert_eq!(first.chimp().rect(), second.chimp().rect());
        assert_eq!(first.fist().rect(), second.fist().rect());
        assert_eq!(first.stats(), second.stats());
        assert_eq!(*first_log.borrow(), *second_log.borrow());
        assert_eq!(first.screen(), second.screen());
    }

    #[test]
    fn escape_ends_the_run_early() {
        let (mut game, _) = test_game();
        let replay = parse_replay(
            r#"{
              "frames": [
                { "mouse": [100, 100], "repeat": 4 },
                { "events": ["escape"] },
                { "repeat": 50 }
              ]
            }"#,
        )
        .expect("replay should parse");

        let (stepped, outcome) = run_replay(&mut game, &replay);
        assert_eq!(outcome, FrameOutcome::Terminate);
        assert_eq!(stepped, 5);
        assert_eq!(game.stats().frames, 4);
    }
}
