//! Diffusion-limited aggregation on 2-D and 3-D integer lattices.
//!
//! Walkers are released one at a time from the boundary of a spawn region,
//! diffuse on a square or triangular lattice, and join the cluster when they
//! step onto it and pass the stickiness draw.
//!
//! Main components:
//! - [`types`]: lattice points, lattice and attractor kinds.
//! - [`config`]: aggregate parameters.
//! - [`geometry`]: spawn-region state and the [`Site`] abstraction.
//! - [`attractor`]: seed geometries.
//! - [`spawner`]: walker launch positions.
//! - [`stepper`]: random neighbour moves.
//! - [`boundary`]: the elastic boundary.
//! - [`aggregate`]: cluster state, stick test and generation loop.
//! - [`stats`]: summary statistics and fractal dimension.

pub mod aggregate;
pub mod attractor;
pub mod boundary;
pub mod config;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod spawner;
pub mod stats;
pub mod stepper;
pub mod types;

pub use aggregate::{Aggregate, Aggregate2D, Aggregate3D, Stick, Walker};
pub use config::Config;
pub use error::AggregateError;
pub use geometry::{Geometry, Site};
pub use rng::UniformSource;
pub use stats::AggregateStats;
pub use types::{AttractorKind, Dimension, Lattice, Point2, Point3};
