//! Geometric state of an aggregate and the [`Site`] abstraction over 2-D and
//! 3-D lattice points.

use std::fmt::Debug;

use glam::{DVec3, IVec2, IVec3};

use crate::{
    attractor, boundary,
    error::AggregateError,
    rng::UniformSource,
    spawner, stepper,
    types::{AttractorKind, Lattice},
};

/// Constant margin between the outermost particle and the spawn boundary.
pub const BOUNDARY_OFFSET: i32 = 6;

/// Slack added to the spawn region before the elastic boundary fires.
pub const BOUNDARY_EPSILON: i32 = 2;

/// Extents and spawn-region parameters of an aggregate.
///
/// `max_extent` holds the running maximum of `|x|`, `|y|`, `|z|` over the
/// attractor seeds and stuck particles (`z` stays 0 in 2-D). `max_r_sqd` is
/// only tracked for a point attractor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub kind: AttractorKind,
    pub att_size: i32,
    pub b_offset: i32,
    pub spawn_diam: i32,
    pub max_extent: IVec3,
    pub max_r_sqd: i64,
    /// Whether the 2-D line boundary reports its snap-backs as bounces.
    pub count_line_bounces: bool,
}

impl Geometry {
    pub fn new(kind: AttractorKind, att_size: i32) -> Self {
        Self {
            kind,
            att_size,
            b_offset: BOUNDARY_OFFSET,
            spawn_diam: BOUNDARY_OFFSET,
            max_extent: IVec3::ZERO,
            max_r_sqd: 0,
            count_line_bounces: false,
        }
    }

    /// Half the spawn diameter, truncated.
    #[inline]
    pub fn half_diam(&self) -> i32 {
        self.spawn_diam / 2
    }
}

/// A lattice point type the engine can simulate on.
///
/// Implemented for [`IVec2`] and [`IVec3`]; each method dispatches to the
/// dimension-specific rule in the component modules.
pub trait Site: Copy + Eq + Debug + Send + 'static {
    const DIM: usize;

    /// Whether `kind` is a valid attractor in this dimension.
    fn supports(kind: AttractorKind) -> bool;

    /// Seed coordinates of the attractor, in insertion order.
    fn seeds(kind: AttractorKind, att_size: i32) -> Result<Vec<Self>, AggregateError>;

    /// Launch position of a new walker on the spawn boundary.
    fn spawn<R: UniformSource + ?Sized>(geom: &Geometry, rng: &mut R) -> Self;

    /// Position after one random neighbour move.
    fn step<R: UniformSource + ?Sized>(self, lattice: Lattice, rng: &mut R) -> Self;

    /// Whether the position lies past the elastic boundary.
    fn escaped(self, geom: &Geometry) -> bool;

    /// Component-wise absolute value widened to three axes.
    fn extents(self) -> IVec3;

    /// Squared distance from the origin.
    fn radius_sqd(self) -> i64;

    /// Real-valued position widened to three axes.
    fn to_dvec3(self) -> DVec3;

    /// Whether a snap-back at the boundary counts as a bounce.
    fn counts_bounce(_geom: &Geometry) -> bool {
        true
    }
}

impl Site for IVec2 {
    const DIM: usize = 2;

    fn supports(kind: AttractorKind) -> bool {
        matches!(
            kind,
            AttractorKind::Point | AttractorKind::Line | AttractorKind::Circle
        )
    }

    fn seeds(kind: AttractorKind, att_size: i32) -> Result<Vec<Self>, AggregateError> {
        attractor::seeds_2d(kind, att_size)
    }

    fn spawn<R: UniformSource + ?Sized>(geom: &Geometry, rng: &mut R) -> Self {
        spawner::spawn_2d(geom, rng)
    }

    fn step<R: UniformSource + ?Sized>(self, lattice: Lattice, rng: &mut R) -> Self {
        stepper::step_2d(self, lattice, rng)
    }

    fn escaped(self, geom: &Geometry) -> bool {
        boundary::escaped_2d(self, geom)
    }

    fn extents(self) -> IVec3 {
        self.abs().extend(0)
    }

    fn radius_sqd(self) -> i64 {
        let (x, y) = (self.x as i64, self.y as i64);
        x * x + y * y
    }

    fn to_dvec3(self) -> DVec3 {
        self.as_dvec2().extend(0.0)
    }

    fn counts_bounce(geom: &Geometry) -> bool {
        geom.kind != AttractorKind::Line || geom.count_line_bounces
    }
}

impl Site for IVec3 {
    const DIM: usize = 3;

    fn supports(_kind: AttractorKind) -> bool {
        true
    }

    fn seeds(kind: AttractorKind, att_size: i32) -> Result<Vec<Self>, AggregateError> {
        attractor::seeds_3d(kind, att_size)
    }

    fn spawn<R: UniformSource + ?Sized>(geom: &Geometry, rng: &mut R) -> Self {
        spawner::spawn_3d(geom, rng)
    }

    fn step<R: UniformSource + ?Sized>(self, lattice: Lattice, rng: &mut R) -> Self {
        stepper::step_3d(self, lattice, rng)
    }

    fn escaped(self, geom: &Geometry) -> bool {
        boundary::escaped_3d(self, geom)
    }

    fn extents(self) -> IVec3 {
        self.abs()
    }

    fn radius_sqd(self) -> i64 {
        let (x, y, z) = (self.x as i64, self.y as i64, self.z as i64);
        x * x + y * y + z * z
    }

    fn to_dvec3(self) -> DVec3 {
        self.as_dvec3()
    }
}
