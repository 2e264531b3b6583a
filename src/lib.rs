//! A fireworks display: projectiles launch from the bottom of a drawing
//! surface, burst at their targets, and leave fading particle trails.
//!
//! The simulation core (`entities`, `compute`, `population`, `scheduler`,
//! `driver`) is pure and draws through the [`surface::Surface`] trait.
//! [`display::TerminalCanvas`] is the terminal-backed surface used by the
//! binary.

pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod error;
pub mod population;
pub mod render;
pub mod scheduler;
pub mod surface;

pub use config::Config;
pub use driver::{DriverState, FrameDriver, FrameRequest, Simulation};
pub use error::{FireworksError, Result};
