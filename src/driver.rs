//! The frame driver and the simulation state it owns.
//!
//! [`Simulation`] holds everything that used to be process-wide: the
//! drifting hue, both entity collections, the spawn counters and the
//! pointer.  [`FrameDriver`] wraps it in an explicit idle → running →
//! stopped state machine.  The host calls [`FrameDriver::advance`] once per
//! display refresh and keeps scheduling frames for as long as it answers
//! [`FrameRequest::Continue`]; tests call it directly to step one tick.

use rand::Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::entities::{Bounds, Point, PointerState};
use crate::error::{FireworksError, Result};
use crate::population::{Population, TickReport};
use crate::render::fade_trails;
use crate::scheduler::{Launch, SpawnScheduler};
use crate::surface::Surface;

// ── Simulation state ──────────────────────────────────────────────────────────

/// Complete state of one fireworks display.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: Config,
    bounds: Bounds,
    hue: f64,
    population: Population,
    scheduler: SpawnScheduler,
    pointer: PointerState,
    frames: u64,
}

/// What one frame did, for diagnostics and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub tick: TickReport,
    pub launches: Vec<Launch>,
}

impl Simulation {
    /// Build a simulation for a surface of the given size.
    ///
    /// Fails if the config is invalid or the surface has no area.
    pub fn new(config: Config, bounds: Bounds) -> Result<Self> {
        config.validate()?;
        if !(bounds.width > 0.0 && bounds.height > 0.0) {
            return Err(FireworksError::SurfaceUnavailable(format!(
                "surface must have positive size, got {}x{}",
                bounds.width, bounds.height
            )));
        }
        Ok(Self {
            hue: config.starting_hue,
            scheduler: SpawnScheduler::new(&config),
            population: Population::new(),
            pointer: PointerState::default(),
            frames: 0,
            config,
            bounds,
        })
    }

    /// Build a simulation sized to `surface`.
    pub fn for_surface<S: Surface + ?Sized>(config: Config, surface: &S) -> Result<Self> {
        let (width, height) = surface.size();
        Self::new(config, Bounds::new(width, height))
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn launch_point(&self) -> Point {
        self.bounds.launch_point()
    }

    // ── Input handlers ───────────────────────────────────────────────────────
    //
    // These only record pointer state.  Launches happen in the next frame's
    // scheduler pass.

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.position = Some(Point::new(x, y));
    }

    pub fn pointer_down(&mut self) {
        self.pointer.held = true;
    }

    pub fn pointer_up(&mut self) {
        self.pointer.held = false;
    }

    /// Launch a projectile from the launch point toward `target` right away.
    pub fn launch<R: Rng + ?Sized>(&mut self, target: Point, rng: &mut R) {
        let origin = self.launch_point();
        self.population.spawn(origin, target, &self.config, rng);
    }

    /// Run one frame body: drift the hue, fade the previous frame, draw and
    /// update every entity, then let the scheduler launch.
    pub fn step<S, R>(&mut self, surface: &mut S, rng: &mut R) -> FrameReport
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        self.frames += 1;
        self.hue += self.config.hue_increment;

        fade_trails(surface, self.config.trail_fade_alpha);

        let tick = self.population.tick(surface, self.hue, &self.config, rng);

        let launches = self.scheduler.advance(&self.pointer, self.bounds, rng);
        for launch in &launches {
            debug!(?launch, frame = self.frames, "launch");
            self.launch(launch.target(), rng);
        }

        FrameReport { tick, launches }
    }
}

// ── Frame driver ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No frame has been requested yet.
    Idle,
    Running,
    /// Stopped for good; no further frames are requested.
    Stopped,
}

/// Answer to the host after a frame: schedule another one or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRequest {
    Continue,
    Halt,
}

#[derive(Clone, Debug)]
pub struct FrameDriver {
    state: DriverState,
    simulation: Simulation,
}

impl FrameDriver {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            state: DriverState::Idle,
            simulation,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }

    /// Idle → Running.  No effect once running or stopped.
    pub fn start(&mut self) {
        if self.state == DriverState::Idle {
            info!("frame driver started");
            self.state = DriverState::Running;
        }
    }

    /// Stop requesting frames.  Stopping is final.
    pub fn stop(&mut self) {
        if self.state != DriverState::Stopped {
            info!(frames = self.simulation.frame_count(), "frame driver stopped");
            self.state = DriverState::Stopped;
        }
    }

    /// Run one frame if the driver is running.
    ///
    /// The first call on an idle driver starts it.  A stopped driver does
    /// no work and always answers [`FrameRequest::Halt`].
    pub fn advance<S, R>(&mut self, surface: &mut S, rng: &mut R) -> FrameRequest
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        self.start();
        if self.state == DriverState::Stopped {
            return FrameRequest::Halt;
        }
        self.simulation.step(surface, rng);
        FrameRequest::Continue
    }
}
