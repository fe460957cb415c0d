use crate::core::stage::{Stage, StageEvent};
use crate::game::chart::NoteColor;
use glam::Vec2;
use log::debug;

// Lane geometry: fixed x per color, fixed off-screen start.
pub const LANE_X_RED: f32 = 385.0;
pub const LANE_X_YELLOW: f32 = 513.0;
pub const LANE_X_GREEN: f32 = 641.0;
pub const LANE_X_BLUE: f32 = 769.0;
pub const SPAWN_Y: f32 = -100.0;

/// Downward step per physics tick.
pub const FALL_STEP: f32 = 6.0;
/// Past this y an unjudged note counts as missed and is destroyed.
pub const OFFSCREEN_Y: f32 = 4000.0;
/// Grace window before a note that left the hit zone unjudged despawns.
pub const ZONE_EXIT_GRACE_S: f32 = 1.0;

#[inline(always)]
pub const fn lane_x(color: NoteColor) -> f32 {
    match color {
        NoteColor::Red => LANE_X_RED,
        NoteColor::Yellow => LANE_X_YELLOW,
        NoteColor::Green => LANE_X_GREEN,
        NoteColor::Blue => LANE_X_BLUE,
    }
}

#[inline(always)]
pub fn spawn_position(color: NoteColor) -> Vec2 {
    Vec2::new(lane_x(color), SPAWN_Y)
}

/// What one fixed-rate step did to the stage.
pub struct StepOutcome {
    pub zone_events: Vec<StageEvent>,
    pub missed_offscreen: u32,
}

/// One fixed-rate motion and lifecycle step for every live note: fall by
/// `fall_step`, report hit-zone crossings, destroy notes that fell
/// off-screen unjudged or whose zone-exit grace deadline passed.
pub fn physics_step(stage: &mut Stage, fall_step: f32, now_s: f32) -> StepOutcome {
    for handle in stage.live_handles() {
        stage.translate(handle, Vec2::new(0.0, fall_step));
    }

    let zone_events = stage.sweep_zone_transitions();

    let mut missed_offscreen = 0;
    for handle in stage.live_handles() {
        let Some(note) = stage.note(handle) else { continue };
        if note.position.y > OFFSCREEN_Y {
            debug!("note missed: {} fell off-screen", note.color.as_str());
            stage.despawn(handle);
            missed_offscreen += 1;
        } else if note.despawn_at.is_some_and(|deadline| now_s >= deadline) {
            stage.despawn(handle);
        }
    }

    StepOutcome { zone_events, missed_offscreen }
}
