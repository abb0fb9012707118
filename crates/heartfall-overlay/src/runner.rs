//! Fixed-step physics scheduler

use heartfall_core::RuntimeConfig;
use heartfall_physics::HeartWorld;
use heartfall_runtime::GameClock;

/// Drives `HeartWorld::fixed_update` from an accumulator, independent of
/// how often frames are painted
pub struct PhysicsRunner {
    clock: GameClock,
    running: bool,
    steps: u64,
}

impl PhysicsRunner {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            clock: GameClock::with_fixed_timestep(config.physics_hz)
                .with_max_frame_time(config.max_frame_time),
            running: false,
            steps: 0,
        }
    }

    pub fn start(&mut self) {
        self.clock.reset();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fixed steps taken since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn timestep(&self) -> f64 {
        self.clock.fixed_timestep
    }

    /// Advance by wall-clock time since the previous call
    pub fn tick(&mut self, world: &mut HeartWorld) -> usize {
        if !self.running {
            return 0;
        }
        self.clock.tick();
        self.drain(world)
    }

    /// Advance by an explicit amount of elapsed seconds
    pub fn advance(&mut self, world: &mut HeartWorld, elapsed: f64) -> usize {
        if !self.running {
            return 0;
        }
        self.clock.advance(elapsed);
        self.drain(world)
    }

    fn drain(&mut self, world: &mut HeartWorld) -> usize {
        let dt = self.clock.fixed_timestep;
        let mut taken = 0;
        while self.clock.should_fixed_update() {
            world.fixed_update(dt as f32);
            self.clock.consume_fixed_step();
            taken += 1;
        }
        self.steps += taken as u64;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartfall_core::{OverlayConfig, Viewport};

    fn empty_world() -> HeartWorld {
        HeartWorld::from_specs(&OverlayConfig::default(), Viewport::new(800.0, 600.0), &[])
    }

    #[test]
    fn test_stopped_runner_does_not_step() {
        let mut runner = PhysicsRunner::new(&RuntimeConfig::default());
        let mut world = empty_world();
        assert_eq!(runner.advance(&mut world, 1.0), 0);
        assert_eq!(runner.steps(), 0);
    }

    #[test]
    fn test_runs_whole_steps() {
        let mut runner = PhysicsRunner::new(&RuntimeConfig::default());
        let mut world = empty_world();
        runner.start();

        assert_eq!(runner.advance(&mut world, 2.5 / 60.0), 2);
        // The leftover half step carries into the next frame
        assert_eq!(runner.advance(&mut world, 0.6 / 60.0), 1);
        assert_eq!(runner.steps(), 3);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let config = RuntimeConfig {
            max_frame_time: 0.11,
            ..RuntimeConfig::default()
        };
        let mut runner = PhysicsRunner::new(&config);
        let mut world = empty_world();
        runner.start();
        assert_eq!(runner.advance(&mut world, 30.0), 6);
    }

    #[test]
    fn test_restart_drops_backlog() {
        let mut runner = PhysicsRunner::new(&RuntimeConfig::default());
        let mut world = empty_world();
        runner.start();
        runner.advance(&mut world, 0.5 / 60.0);
        runner.stop();
        runner.start();
        assert_eq!(runner.advance(&mut world, 0.6 / 60.0), 0);
    }
}
