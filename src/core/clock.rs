use std::time::Instant;

/// Monotonic elapsed-time source for one song playthrough.
pub trait SongClock {
    fn elapsed_seconds(&self) -> f32;
}

/// Wall-clock implementation backed by `Instant`, started at song start.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start_now() -> Self {
        Self { start: Instant::now() }
    }
}

impl SongClock for MonotonicClock {
    fn elapsed_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Hand-stepped clock for the headless driver and tests.
#[derive(Default)]
pub struct ManualClock {
    elapsed: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

impl SongClock for ManualClock {
    fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }
}
