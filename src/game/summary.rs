use serde::Serialize;

/// End-of-stage results for one playthrough. Printed as JSON by the app
/// driver; nothing is persisted across sessions.
#[derive(Clone, Debug, Serialize)]
pub struct StageSummary {
    pub score: f32,
    pub max_combo: u32,
    pub perfects: u32,
    pub greats: u32,
    pub goods: u32,
    pub missed_presses: u32,
    pub notes_spawned: u32,
    pub notes_missed_offscreen: u32,
    pub song_length_frames: u32,
}

impl StageSummary {
    pub fn notes_judged(&self) -> u32 {
        self.perfects + self.greats + self.goods
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }
}
