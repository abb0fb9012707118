//! Game clock with fixed-timestep accumulator

use std::time::Instant;

/// Tracks elapsed time and provides a fixed-timestep accumulator for physics updates
pub struct GameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last tick in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    /// Longest gap fed into the accumulator in one tick
    pub max_frame_time: f64,
    /// Accumulated time for fixed-step consumption
    accumulator: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            max_frame_time: 0.25,
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    /// Create a new game clock with default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game clock with a custom fixed timestep
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    pub fn with_max_frame_time(mut self, seconds: f64) -> Self {
        self.max_frame_time = seconds;
        self
    }

    /// Advance the clock from the wall clock. Call once per loop iteration.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Feed an explicit amount of elapsed time
    pub fn advance(&mut self, elapsed: f64) {
        // Clamp to avoid spiral of death; max/min never panic and drop NaN
        self.delta_time = elapsed.max(0.0).min(self.max_frame_time.max(0.0));
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Forget accumulated time and restart from now (e.g. after a pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.delta_time = 0.0;
        self.first_tick = true;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }

    /// Get the interpolation alpha for rendering between fixed steps
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator / self.fixed_timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert!((clock.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn test_custom_timestep() {
        let clock = GameClock::with_fixed_timestep(30.0);
        assert!((clock.fixed_timestep - 1.0 / 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = GameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time, 0.0);
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn test_advance_yields_whole_steps() {
        let mut clock = GameClock::new();
        clock.advance(2.5 / 60.0);

        let mut steps = 0;
        while clock.should_fixed_update() {
            clock.consume_fixed_step();
            steps += 1;
        }
        assert_eq!(steps, 2);
        assert!((clock.interpolation_alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_advance_clamps_long_gaps() {
        let mut clock = GameClock::new().with_max_frame_time(0.11);
        clock.advance(5.0);
        assert!((clock.delta_time - 0.11).abs() < 1e-12);

        let mut steps = 0;
        while clock.should_fixed_update() {
            clock.consume_fixed_step();
            steps += 1;
        }
        assert_eq!(steps, 6);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut clock = GameClock::new();
        clock.advance(-1.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.total_time, 0.0);
    }

    #[test]
    fn test_bad_inputs_never_accumulate() {
        let mut clock = GameClock::new().with_max_frame_time(-1.0);
        clock.advance(0.5);
        assert_eq!(clock.delta_time, 0.0);
        assert!(!clock.should_fixed_update());

        let mut clock = GameClock::new();
        clock.advance(f64::NAN);
        assert_eq!(clock.delta_time, 0.0);
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn test_reset_drops_backlog() {
        let mut clock = GameClock::new();
        clock.advance(0.2);
        assert!(clock.should_fixed_update());
        clock.reset();
        assert!(!clock.should_fixed_update());
    }
}
