// Distance windows are in pixels from the hit-zone center line.
pub const PERFECT_RANGE_PX: f32 = 15.0;
pub const GREAT_RANGE_PX: f32 = 64.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JudgeGrade {
    Perfect,
    Great,
    Good,
    /// A press with no matching overlapping note.
    Miss,
}

impl JudgeGrade {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect!",
            Self::Great => "Great!",
            Self::Good => "Good!",
            Self::Miss => "Missed!",
        }
    }

    /// Score weight: `score += multiplier * weight` on a hit.
    pub const fn accuracy_weight(self) -> f32 {
        match self {
            Self::Perfect => 2.0,
            Self::Great => 1.5,
            Self::Good => 1.0,
            Self::Miss => 0.0,
        }
    }
}

/// Grades the vertical distance between a note and the hit-zone center.
/// Anything outside the Great window is still a Good; only a matchless
/// press misses.
#[inline(always)]
pub fn classify_distance(distance_px: f32) -> JudgeGrade {
    let dist = distance_px.abs();
    if dist < PERFECT_RANGE_PX {
        JudgeGrade::Perfect
    } else if dist < GREAT_RANGE_PX {
        JudgeGrade::Great
    } else {
        JudgeGrade::Good
    }
}

#[cfg(test)]
mod tests {
    use super::{JudgeGrade, classify_distance};

    #[test]
    fn classifies_by_distance_from_center() {
        assert_eq!(classify_distance(0.0), JudgeGrade::Perfect);
        assert_eq!(classify_distance(30.0), JudgeGrade::Great);
        assert_eq!(classify_distance(100.0), JudgeGrade::Good);
        assert_eq!(classify_distance(200.0), JudgeGrade::Good);
    }

    #[test]
    fn windows_are_half_open() {
        assert_eq!(classify_distance(14.999), JudgeGrade::Perfect);
        assert_eq!(classify_distance(15.0), JudgeGrade::Great);
        assert_eq!(classify_distance(63.999), JudgeGrade::Great);
        assert_eq!(classify_distance(64.0), JudgeGrade::Good);
    }

    #[test]
    fn distance_sign_does_not_matter() {
        assert_eq!(classify_distance(-10.0), JudgeGrade::Perfect);
        assert_eq!(classify_distance(-30.0), JudgeGrade::Great);
    }
}
