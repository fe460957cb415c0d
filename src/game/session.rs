use crate::core::clock::SongClock;
use crate::core::display::Display;
use crate::core::input::LaneInput;
use crate::core::stage::{Stage, StageEvent};
use crate::game::chart::{Chart, NoteColor};
use crate::game::hit::HitJudge;
use crate::game::judgment::JudgeGrade;
use crate::game::note;
use crate::game::scoring::ScoreState;
use crate::game::spawn::SpawnScheduler;
use crate::game::summary::StageSummary;
use log::warn;

/// One song playthrough: wires the stage, spawn scheduler and hit judge
/// together. The host drives it with two ticks per loop iteration, a
/// fixed-rate `physics_tick` for motion/lifecycle and a `logic_tick` for
/// spawning, input and display updates.
pub struct PlaySession {
    stage: Stage,
    scheduler: SpawnScheduler,
    judge: HitJudge,
    display: Option<Box<dyn Display>>,
    fall_step: f32,
    notes_spawned: u32,
    notes_missed_offscreen: u32,
    display_warned: bool,
}

impl PlaySession {
    pub fn new(chart: Chart, display: Option<Box<dyn Display>>, fall_step: f32) -> Self {
        Self {
            stage: Stage::new(),
            scheduler: SpawnScheduler::new(chart),
            judge: HitJudge::new(),
            display,
            fall_step,
            notes_spawned: 0,
            notes_missed_offscreen: 0,
            display_warned: false,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn score(&self) -> &ScoreState {
        self.judge.score()
    }

    pub fn fall_step(&self) -> f32 {
        self.fall_step
    }

    /// Fixed-rate simulation step: note motion, hit-zone transitions,
    /// off-screen and grace-deadline destruction.
    pub fn physics_tick(&mut self, clock: &dyn SongClock) {
        let now = clock.elapsed_seconds();
        let outcome = note::physics_step(&mut self.stage, self.fall_step, now);
        self.notes_missed_offscreen += outcome.missed_offscreen;

        for event in outcome.zone_events {
            match event {
                StageEvent::ZoneEntered(handle) => self.judge.on_zone_entered(handle),
                StageEvent::ZoneExited(handle) => {
                    self.judge.on_zone_exited(handle);
                    self.stage
                        .schedule_despawn(handle, now + note::ZONE_EXIT_GRACE_S);
                }
            }
        }
    }

    /// Variable-rate logic step: spawn due batches, poll one press per
    /// lane, push progress and score text to the display.
    pub fn logic_tick(&mut self, clock: &dyn SongClock, input: &dyn LaneInput) {
        let now = clock.elapsed_seconds();
        let spawned = self.scheduler.tick(now, &mut self.stage);
        self.notes_spawned += spawned.len() as u32;

        for color in NoteColor::ALL {
            if input.just_pressed(color) {
                let grade = self.judge.handle_press(color, &mut self.stage);
                let text = format_score_text(grade, self.judge.score());
                self.push_score_text(&text);
            }
        }

        let frame = SpawnScheduler::current_frame(now);
        let percent = self.scheduler.progress_percent(frame);
        self.push_progress(percent);
    }

    /// Every charted note has spawned (or been dropped) and left the stage.
    pub fn is_complete(&self) -> bool {
        self.scheduler.is_done() && self.stage.is_empty()
    }

    pub fn summary(&self) -> StageSummary {
        let score = self.judge.score();
        StageSummary {
            score: score.score(),
            max_combo: score.max_combo(),
            perfects: score.perfects(),
            greats: score.greats(),
            goods: score.goods(),
            missed_presses: score.misses(),
            notes_spawned: self.notes_spawned,
            notes_missed_offscreen: self.notes_missed_offscreen,
            song_length_frames: self.scheduler.song_length(),
        }
    }

    fn push_progress(&mut self, percent: f32) {
        match self.display.as_mut() {
            Some(display) => display.set_progress(percent),
            None => self.warn_display_missing(),
        }
    }

    fn push_score_text(&mut self, text: &str) {
        match self.display.as_mut() {
            Some(display) => display.set_score_text(text),
            None => self.warn_display_missing(),
        }
    }

    fn warn_display_missing(&mut self) {
        if !self.display_warned {
            warn!("no display attached; progress and score text are disabled");
            self.display_warned = true;
        }
    }
}

fn format_score_text(grade: JudgeGrade, score: &ScoreState) -> String {
    format!(
        "{}\nScore:\n{}\nCombo:\n{}\nMultiplier:\n{}",
        grade.as_str(),
        score.score(),
        score.combo(),
        score.multiplier()
    )
}

#[cfg(test)]
mod tests {
    use super::{PlaySession, format_score_text};
    use crate::core::clock::ManualClock;
    use crate::core::display::Display;
    use crate::core::stage::HIT_ZONE_CENTER_Y;
    use crate::game::chart::{Chart, NoteColor};
    use crate::game::judgment::JudgeGrade;
    use crate::game::note::FALL_STEP;
    use crate::game::parsing::parse_chart_str;
    use crate::game::scoring::ScoreState;
    use std::sync::{Arc, Mutex};

    const NO_PRESS: [bool; 4] = [false; 4];

    #[derive(Clone, Default)]
    struct RecordingDisplay {
        progress: Arc<Mutex<Vec<f32>>>,
        texts: Arc<Mutex<Vec<String>>>,
    }

    impl Display for RecordingDisplay {
        fn set_progress(&mut self, percent: f32) {
            self.progress.lock().unwrap().push(percent);
        }

        fn set_score_text(&mut self, text: &str) {
            self.texts.lock().unwrap().push(text.to_string());
        }
    }

    fn single_note_chart(frame: u32, color: NoteColor) -> Chart {
        let mut chart = Chart::default();
        chart.frames.insert(frame, vec![color]);
        chart.song_length = frame;
        chart
    }

    /// Steps physics+logic at 60 Hz until the red note reaches the zone
    /// center, then presses the requested lane once.
    fn run_until_center_and_press(chart: Chart, press: NoteColor) -> PlaySession {
        let mut session = PlaySession::new(chart, None, FALL_STEP);
        let mut clock = ManualClock::new();
        let dt = 1.0 / 60.0;
        let mut pressed = false;

        for _ in 0..20_000 {
            clock.advance(dt);
            session.physics_tick(&clock);

            let mut presses = NO_PRESS;
            if !pressed {
                let at_center = session.stage().notes().any(|(_, n)| {
                    n.in_zone && (n.position.y - HIT_ZONE_CENTER_Y).abs() <= FALL_STEP / 2.0
                });
                if at_center {
                    presses[press.lane()] = true;
                    pressed = true;
                }
            }
            session.logic_tick(&clock, &presses);
            if pressed {
                break;
            }
        }
        session
    }

    #[test]
    fn spawned_note_is_hit_at_the_center_for_a_perfect() {
        let session = run_until_center_and_press(
            single_note_chart(96, NoteColor::Red),
            NoteColor::Red,
        );
        let summary = session.summary();
        assert_eq!(summary.notes_spawned, 1);
        assert_eq!(summary.perfects, 1);
        assert_eq!(summary.max_combo, 1);
        assert_eq!(summary.score, 2.0);
        assert!(session.stage().is_empty(), "judged note is destroyed");
        assert!(session.is_complete());
    }

    #[test]
    fn wrong_lane_press_misses_and_note_falls_through() {
        let mut session = run_until_center_and_press(
            single_note_chart(96, NoteColor::Red),
            NoteColor::Blue,
        );
        assert_eq!(session.score().misses(), 1);
        assert_eq!(session.score().score(), 0.0);

        // Let the unjudged note run out: it exits the zone, the 1s grace
        // passes, and the stage drains without any scoring miss.
        let mut clock = ManualClock::new();
        clock.advance(10.0);
        for _ in 0..20_000 {
            clock.advance(1.0 / 60.0);
            session.physics_tick(&clock);
            session.logic_tick(&clock, &NO_PRESS);
            if session.is_complete() {
                break;
            }
        }
        assert!(session.is_complete());
        assert_eq!(session.score().misses(), 1, "fall-through is not a scoring miss");
    }

    #[test]
    fn unreadable_chart_leaves_the_session_idle() {
        let chart = Chart::default(); // what the app uses after a load failure
        let mut session = PlaySession::new(chart, None, FALL_STEP);
        let clock = ManualClock::new();
        session.physics_tick(&clock);
        session.logic_tick(&clock, &NO_PRESS);
        assert!(session.is_complete());
        assert_eq!(session.summary().notes_spawned, 0);
    }

    #[test]
    fn missing_display_degrades_without_crashing() {
        let mut session =
            PlaySession::new(single_note_chart(48, NoteColor::Green), None, FALL_STEP);
        let mut clock = ManualClock::new();
        for _ in 0..20 {
            clock.advance(1.0 / 60.0);
            session.physics_tick(&clock);
            session.logic_tick(&clock, &NO_PRESS);
        }
        assert_eq!(session.summary().notes_spawned, 1);
    }

    #[test]
    fn display_receives_progress_and_score_text() {
        let display = RecordingDisplay::default();
        let progress = display.progress.clone();
        let texts = display.texts.clone();

        let mut session = PlaySession::new(
            single_note_chart(96, NoteColor::Red),
            Some(Box::new(display)),
            FALL_STEP,
        );
        let mut clock = ManualClock::new();
        clock.advance(1.0 / 60.0);
        session.physics_tick(&clock);
        session.logic_tick(&clock, &[true, false, false, false]);

        assert_eq!(progress.lock().unwrap().len(), 1);
        let texts = texts.lock().unwrap();
        assert_eq!(texts.len(), 1, "a press updates the score text immediately");
        assert!(texts[0].starts_with("Missed!"), "no note is anywhere near the zone: {}", texts[0]);
    }

    #[test]
    fn chart_text_drives_an_end_to_end_playthrough() {
        let chart = parse_chart_str("[ExpertSingle]\n{\n48 = N 1 0\n96 = N 2 0\n}\n");
        let mut session = PlaySession::new(chart, None, FALL_STEP);
        let mut clock = ManualClock::new();
        let dt = 1.0 / 60.0;

        for _ in 0..40_000 {
            clock.advance(dt);
            session.physics_tick(&clock);

            let mut presses = NO_PRESS;
            for (_, n) in session.stage().notes() {
                if n.in_zone && (n.position.y - HIT_ZONE_CENTER_Y).abs() <= FALL_STEP / 2.0 {
                    presses[n.color.lane()] = true;
                }
            }
            session.logic_tick(&clock, &presses);
            if session.is_complete() {
                break;
            }
        }

        let summary = session.summary();
        assert_eq!(summary.notes_spawned, 2);
        assert_eq!(summary.notes_judged(), 2);
        assert_eq!(summary.missed_presses, 0);
        assert_eq!(summary.max_combo, 2);
        assert!(summary.song_length_frames >= 96);
    }

    #[test]
    fn score_text_matches_the_display_layout() {
        let mut score = ScoreState::new();
        score.register_hit(JudgeGrade::Perfect);
        let text = format_score_text(JudgeGrade::Perfect, &score);
        assert_eq!(text, "Perfect!\nScore:\n2\nCombo:\n1\nMultiplier:\n1");
    }
}
