use crate::core::stage::{NoteHandle, Stage};
use crate::game::chart::{Chart, FRAMES_PER_SECOND, NoteColor};
use crate::game::note;
use log::debug;
use std::collections::BTreeMap;

/// Frames around "now" that count as due. One chart frame is ~5ms, so the
/// window mostly absorbs tick-rate jitter.
pub const SPAWN_BUFFER_FRAMES: u32 = 1;
/// Extra frames past the last charted note before progress reads 100%.
pub const PROGRESS_TAIL_FRAMES: u32 = 1600;

/// Owns the pending spawn timetable for one playthrough and converts the
/// song clock into chart frames. Each charted frame spawns its batch at
/// most once; the frame is removed from the map as it spawns.
pub struct SpawnScheduler {
    pending: BTreeMap<u32, Vec<NoteColor>>,
    song_length: u32,
}

impl SpawnScheduler {
    pub fn new(chart: Chart) -> Self {
        Self {
            pending: chart.frames,
            song_length: chart.song_length,
        }
    }

    #[inline(always)]
    pub fn current_frame(elapsed_seconds: f32) -> u32 {
        (elapsed_seconds * FRAMES_PER_SECOND) as u32
    }

    pub fn song_length(&self) -> u32 {
        self.song_length
    }

    /// True once every charted frame has spawned or been dropped.
    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Unclamped: may exceed 100 near song end, the caller's display decides.
    pub fn progress_percent(&self, current_frame: u32) -> f32 {
        current_frame as f32 / (self.song_length + PROGRESS_TAIL_FRAMES) as f32 * 100.0
    }

    /// Spawns every pending batch whose frame lies within the buffer window
    /// around the current frame. Frames the clock jumped clean over are
    /// dropped so the pending map always drains.
    pub fn tick(&mut self, elapsed_seconds: f32, stage: &mut Stage) -> Vec<NoteHandle> {
        let current = Self::current_frame(elapsed_seconds);
        let earliest = current.saturating_sub(SPAWN_BUFFER_FRAMES);
        let latest = current + SPAWN_BUFFER_FRAMES;

        let due: Vec<u32> = self.pending.range(..=latest).map(|(f, _)| *f).collect();
        let mut spawned = Vec::new();
        for frame in due {
            let Some(colors) = self.pending.remove(&frame) else { continue };
            if frame < earliest {
                debug!("dropping stale chart frame {frame} (current {current})");
                continue;
            }
            for color in colors {
                spawned.push(stage.spawn(color, note::spawn_position(color)));
            }
        }
        spawned
    }
}
