use crate::core::stage::{NoteHandle, Stage};
use crate::game::chart::NoteColor;
use crate::game::judgment::{self, JudgeGrade};
use crate::game::scoring::ScoreState;
use log::debug;
use smallvec::SmallVec;

/// Judges key-presses against the notes currently overlapping the hit zone
/// and owns the session's score state.
pub struct HitJudge {
    /// Most-recently-entered first.
    overlapping: SmallVec<[NoteHandle; 8]>,
    score: ScoreState,
}

impl Default for HitJudge {
    fn default() -> Self {
        Self::new()
    }
}

impl HitJudge {
    pub fn new() -> Self {
        Self {
            overlapping: SmallVec::new(),
            score: ScoreState::new(),
        }
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn on_zone_entered(&mut self, handle: NoteHandle) {
        self.overlapping.insert(0, handle);
    }

    pub fn on_zone_exited(&mut self, handle: NoteHandle) {
        self.overlapping.retain(|h| *h != handle);
    }

    /// Judges one key-press for `color`. When several notes of that color
    /// overlap the zone, the most recently entered one wins. A matchless
    /// press is a miss: combo resets, score stays put.
    pub fn handle_press(&mut self, color: NoteColor, stage: &mut Stage) -> JudgeGrade {
        let mut matched: Option<(NoteHandle, f32)> = None;
        for handle in &self.overlapping {
            if let Some(note) = stage.note(*handle)
                && note.color == color
            {
                matched = Some((*handle, note.position.y));
                break;
            }
        }

        let Some((handle, note_y)) = matched else {
            debug!("missed press for {}", color.as_str());
            self.score.register_miss();
            return JudgeGrade::Miss;
        };

        let distance = note_y - stage.zone_center_y();
        let grade = judgment::classify_distance(distance);
        self.score.register_hit(grade);
        stage.despawn(handle);
        self.overlapping.retain(|h| *h != handle);
        debug!(
            "note hit: {} {} ({:+.1}px)",
            color.as_str(),
            grade.as_str(),
            distance
        );
        grade
    }
}
