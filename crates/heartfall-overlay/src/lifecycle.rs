//! Activation, teardown and resize of the overlay

use crate::runner::PhysicsRunner;
use heartfall_core::{BodySnapshot, OverlayConfig, Result, Viewport};
use heartfall_physics::HeartWorld;
use heartfall_render::{PixelCanvas, RenderLoop};
use heartfall_runtime::{EventBus, OverlayEvent, PointerEvent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Everything one activation owns. Dropping it releases the world, both
/// loops and the drawing surface together.
pub struct OverlaySession {
    world: HeartWorld,
    runner: PhysicsRunner,
    render_loop: RenderLoop,
    canvas: PixelCanvas,
    snapshots: Vec<BodySnapshot>,
    viewport: Viewport,
    seed: u64,
}

impl OverlaySession {
    /// Build the world, start both loops and allocate the canvas
    pub fn start(config: &OverlayConfig, viewport: Viewport, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = HeartWorld::new(config, viewport, &mut rng)?;

        let mut runner = PhysicsRunner::new(&config.runtime);
        runner.start();
        let mut render_loop = RenderLoop::new();
        render_loop.start();
        let canvas = PixelCanvas::new(viewport)?;

        Ok(Self {
            snapshots: Vec::with_capacity(world.body_count()),
            world,
            runner,
            render_loop,
            canvas,
            viewport,
            seed,
        })
    }

    /// Run whatever fixed steps `elapsed` seconds allow
    pub fn tick_physics(&mut self, elapsed: f64) -> usize {
        self.runner.advance(&mut self.world, elapsed)
    }

    /// Run fixed steps against the wall clock
    pub fn tick_physics_realtime(&mut self) -> usize {
        self.runner.tick(&mut self.world)
    }

    /// Paint the current body state into the canvas
    pub fn paint(&mut self) -> usize {
        self.world.snapshots_into(&mut self.snapshots);
        self.render_loop.frame(&mut self.canvas, &self.snapshots)
    }

    /// Follow a new viewport without touching body state. Nothing changes
    /// if the canvas cannot be reallocated.
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.canvas.resize(viewport)?;
        self.world.resize(viewport);
        self.viewport = viewport;
        Ok(())
    }

    /// Route a pointer change to the drag constraint
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<OverlayEvent> {
        match event {
            PointerEvent::Pressed(at) => self
                .world
                .grab(at)
                .map(|id| OverlayEvent::DragStarted { body: id.0 }),
            PointerEvent::Moved(at) => {
                self.world.drag_to(at);
                None
            }
            PointerEvent::Released => self
                .world
                .release()
                .map(|id| OverlayEvent::DragEnded { body: id.0 }),
        }
    }

    /// Stop both loops and let go of any held body. Consumes the session so
    /// nothing can tick it afterwards.
    pub fn shutdown(mut self) -> Option<OverlayEvent> {
        self.runner.stop();
        self.render_loop.stop();
        self.world
            .release()
            .map(|id| OverlayEvent::DragEnded { body: id.0 })
    }

    pub fn world(&self) -> &HeartWorld {
        &self.world
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn runner(&self) -> &PhysicsRunner {
        &self.runner
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Seed the body population was generated from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

enum Phase {
    Inactive,
    Active(Box<OverlaySession>),
}

/// Two-state controller driven by the host's "show" flag
pub struct Lifecycle {
    config: OverlayConfig,
    seeds: ChaCha8Rng,
    phase: Phase,
    events: EventBus,
}

impl Lifecycle {
    /// A configured seed makes the sequence of populations reproducible;
    /// otherwise seeds come from entropy.
    pub fn new(config: OverlayConfig) -> Self {
        let seeds = match config.bodies.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        Self {
            config,
            seeds,
            phase: Phase::Inactive,
            events: EventBus::new(),
        }
    }

    /// Apply the host's show flag. Only edges cause transitions; returns
    /// whether one happened.
    pub fn set_show(&mut self, show: bool, viewport: Viewport) -> Result<bool> {
        match (show, self.is_active()) {
            (true, false) => {
                self.activate(viewport)?;
                Ok(true)
            }
            (false, true) => {
                self.deactivate();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn activate(&mut self, viewport: Viewport) -> Result<()> {
        let seed: u64 = self.seeds.gen();
        let session = OverlaySession::start(&self.config, viewport, seed)?;
        let body_count = session.world().body_count();
        self.phase = Phase::Active(Box::new(session));

        tracing::info!(
            bodies = body_count,
            width = viewport.width,
            height = viewport.height,
            seed,
            "overlay activated"
        );
        self.events.push(OverlayEvent::Activated { body_count });
        Ok(())
    }

    fn deactivate(&mut self) {
        let Phase::Active(session) = std::mem::replace(&mut self.phase, Phase::Inactive) else {
            return;
        };
        if let Some(event) = (*session).shutdown() {
            self.events.push(event);
        }

        tracing::info!("overlay deactivated");
        self.events.push(OverlayEvent::Deactivated);
    }

    /// Tear down and rebuild with a fresh population
    pub fn reload(&mut self, viewport: Viewport) -> Result<()> {
        self.deactivate();
        self.activate(viewport)
    }

    /// Swap configuration; takes effect on the next activation. An invalid
    /// configuration is rejected and the current one kept.
    pub fn set_config(&mut self, config: OverlayConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    pub fn session(&self) -> Option<&OverlaySession> {
        match &self.phase {
            Phase::Active(session) => Some(&**session),
            Phase::Inactive => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut OverlaySession> {
        match &mut self.phase {
            Phase::Active(session) => Some(&mut **session),
            Phase::Inactive => None,
        }
    }

    /// Resize the active session, if any
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        let Some(session) = self.session_mut() else {
            return Ok(());
        };
        if session.viewport() == viewport {
            return Ok(());
        }
        session.resize(viewport)?;

        tracing::info!(width = viewport.width, height = viewport.height, "overlay resized");
        self.events.push(OverlayEvent::Resized {
            width: viewport.width,
            height: viewport.height,
        });
        Ok(())
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        let Some(session) = self.session_mut() else {
            return;
        };
        if let Some(event) = session.handle_pointer(event) {
            self.events.push(event);
        }
    }

    /// Physics tick with an explicit elapsed time; zero when inactive
    pub fn tick_physics(&mut self, elapsed: f64) -> usize {
        self.session_mut()
            .map_or(0, |session| session.tick_physics(elapsed))
    }

    /// Physics tick against the wall clock; zero when inactive
    pub fn tick_physics_realtime(&mut self) -> usize {
        self.session_mut()
            .map_or(0, |session| session.tick_physics_realtime())
    }

    /// Paint a frame and hand back the canvas to present
    pub fn paint(&mut self) -> Option<&PixelCanvas> {
        let session = self.session_mut()?;
        session.paint();
        Some(session.canvas())
    }

    pub fn drain_events(&mut self) -> Vec<OverlayEvent> {
        self.events.drain()
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.deactivate();
    }
}
