use crate::config;
use crate::core::clock::{ManualClock, MonotonicClock, SongClock};
use crate::core::display::LogDisplay;
use crate::core::input::InputState;
use crate::core::stage::HIT_ZONE_CENTER_Y;
use crate::game::chart::{Chart, FRAMES_PER_SECOND, NoteColor};
use crate::game::parsing;
use crate::game::session::PlaySession;
use log::{error, info, warn};
use std::path::Path;
use std::thread;
use std::time::Duration;
use winit::keyboard::KeyCode;

const TICK_RATE_HZ: f32 = 60.0;

/// Demo driver clock: fast-forward by default, wall clock in realtime mode.
enum DriverClock {
    Manual(ManualClock),
    Monotonic(MonotonicClock),
}

impl DriverClock {
    fn as_song_clock(&self) -> &dyn SongClock {
        match self {
            Self::Manual(clock) => clock,
            Self::Monotonic(clock) => clock,
        }
    }

    fn step(&mut self, dt: f32) {
        match self {
            Self::Manual(clock) => clock.advance(dt),
            Self::Monotonic(_) => thread::sleep(Duration::from_secs_f32(dt)),
        }
    }
}

/// Runs one headless autoplay session over the configured chart and prints
/// the stage summary as JSON. Autoplay presses go through the real keymap
/// and edge-filtered input path.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::get();

    let chart = match parsing::load_chart_file(Path::new(&cfg.chart_path)) {
        Ok(chart) => chart,
        Err(e) => {
            // Fatal for the playthrough, not the process: run an idle session.
            error!("{e}; no notes will spawn this session");
            Chart::default()
        }
    };

    let song_length = chart.song_length;
    let mut session = PlaySession::new(chart, Some(Box::new(LogDisplay)), cfg.note_speed);
    let mut input = InputState::new(cfg.keymap.clone());
    let mut clock = if cfg.realtime {
        DriverClock::Monotonic(MonotonicClock::start_now())
    } else {
        DriverClock::Manual(ManualClock::new())
    };

    let dt = 1.0 / TICK_RATE_HZ;
    // Song length plus slack for the last note to fall out and drain.
    let max_ticks = ((song_length as f32 / FRAMES_PER_SECOND + 30.0) * TICK_RATE_HZ) as u32;

    let mut pressed_keys: Vec<KeyCode> = Vec::new();
    for _ in 0..max_ticks {
        clock.step(dt);
        session.physics_tick(clock.as_song_clock());

        // Release last tick's keys so a new note can re-trigger the edge.
        for key in pressed_keys.drain(..) {
            input.handle_key(key, false);
        }
        for color in autoplay_lanes(&session) {
            if let Some(key) = input.keymap().key_for(color) {
                input.handle_key(key, true);
                pressed_keys.push(key);
            }
        }

        session.logic_tick(clock.as_song_clock(), &input);
        input.end_tick();

        if session.is_complete() {
            break;
        }
    }

    if !session.is_complete() {
        warn!("tick cap reached before the stage drained");
    }

    let summary = session.summary();
    info!(
        "session finished: score {}, max combo {}, {}/{} notes judged",
        summary.score,
        summary.max_combo,
        summary.notes_judged(),
        summary.notes_spawned
    );
    println!("{}", summary.to_json()?);
    Ok(())
}

/// Lanes whose note is crossing the zone center this tick, deduplicated.
fn autoplay_lanes(session: &PlaySession) -> Vec<NoteColor> {
    let half_step = session.fall_step() / 2.0;
    let mut lanes = Vec::new();
    for (_, note) in session.stage().notes() {
        if note.in_zone
            && (note.position.y - HIT_ZONE_CENTER_Y).abs() <= half_step
            && !lanes.contains(&note.color)
        {
            lanes.push(note.color);
        }
    }
    lanes
}
