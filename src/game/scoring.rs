use crate::game::judgment::JudgeGrade;

pub const COMBO_PER_MULTIPLIER_TIER: u32 = 10;
pub const MAX_MULTIPLIER: u32 = 4;

/// Score multiplier as a step function of combo: x1 below 10 consecutive
/// hits, one tier per 10 after that, capped at x4.
#[inline(always)]
pub const fn multiplier_for_combo(combo: u32) -> u32 {
    let tier = combo / COMBO_PER_MULTIPLIER_TIER + 1;
    if tier > MAX_MULTIPLIER { MAX_MULTIPLIER } else { tier }
}

/// Score, combo and multiplier for one play session, plus the per-grade
/// counts the stage summary reports. The multiplier is recomputed from
/// combo after every event, so it can never go stale across a miss.
#[derive(Clone, Debug)]
pub struct ScoreState {
    score: f32,
    combo: u32,
    multiplier: u32,
    max_combo: u32,
    perfects: u32,
    greats: u32,
    goods: u32,
    misses: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0.0,
            combo: 0,
            multiplier: multiplier_for_combo(0),
            max_combo: 0,
            perfects: 0,
            greats: 0,
            goods: 0,
            misses: 0,
        }
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Awards a successful hit: the current multiplier applies to this
    /// note's weight, then combo advances and the multiplier is refreshed.
    pub fn register_hit(&mut self, grade: JudgeGrade) {
        self.score += self.multiplier as f32 * grade.accuracy_weight();
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.multiplier = multiplier_for_combo(self.combo);
        match grade {
            JudgeGrade::Perfect => self.perfects += 1,
            JudgeGrade::Great => self.greats += 1,
            JudgeGrade::Good => self.goods += 1,
            JudgeGrade::Miss => {}
        }
    }

    /// A press with no matching note: combo and multiplier reset, score
    /// stays untouched.
    pub fn register_miss(&mut self) {
        self.combo = 0;
        self.multiplier = multiplier_for_combo(0);
        self.misses += 1;
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn perfects(&self) -> u32 {
        self.perfects
    }

    pub fn greats(&self) -> u32 {
        self.greats
    }

    pub fn goods(&self) -> u32 {
        self.goods
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }
}
