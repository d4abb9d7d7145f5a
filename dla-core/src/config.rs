use serde::{Deserialize, Serialize};

use crate::{
    error::AggregateError,
    geometry::Site,
    types::{AttractorKind, Dimension, Lattice},
};

/// Parameters of an aggregate.
///
/// Deserializes from a flat mapping; every field is optional:
///
/// ```yaml
/// dimension: three
/// stickiness: 0.8
/// lattice: triangle
/// attractor: plane
/// attractor_size: 5
/// seed: 42
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Only read by frontends choosing between 2-D and 3-D aggregates.
    pub dimension: Dimension,
    /// Probability in `[0, 1]` that a contact sticks.
    pub stickiness: f64,
    pub lattice: Lattice,
    pub attractor: AttractorKind,
    /// Line length, circle/sphere radius or plane side.
    pub attractor_size: u32,
    /// Generator seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Count snap-backs at a 2-D line boundary as bounces.
    pub count_line_bounces: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimension: Dimension::Two,
            stickiness: 1.0,
            lattice: Lattice::Square,
            attractor: AttractorKind::Point,
            attractor_size: 1,
            seed: None,
            count_line_bounces: false,
        }
    }
}

impl Config {
    pub fn new(stickiness: f64, lattice: Lattice, attractor: AttractorKind) -> Self {
        Self {
            stickiness,
            lattice,
            attractor,
            ..Self::default()
        }
    }

    pub fn with_attractor_size(mut self, size: u32) -> Self {
        self.attractor_size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the parameters against the lattice dimension of `S`.
    pub fn validate<S: Site>(&self) -> Result<(), AggregateError> {
        if !(0.0..=1.0).contains(&self.stickiness) {
            return Err(AggregateError::InvalidStickiness(self.stickiness));
        }
        if !S::supports(self.attractor) {
            return Err(AggregateError::UnsupportedAttractor {
                kind: self.attractor,
                dim: S::DIM,
            });
        }
        validate_attractor_size(self.attractor_size)?;
        Ok(())
    }
}

/// Largest attractor size whose strip width `2 * size` fits an `i32`.
pub const MAX_ATTRACTOR_SIZE: u32 = (i32::MAX / 2) as u32;

pub(crate) fn validate_attractor_size(size: u32) -> Result<i32, AggregateError> {
    match size {
        0 => Err(AggregateError::ZeroAttractorSize),
        s if s > MAX_ATTRACTOR_SIZE => Err(AggregateError::AttractorTooLarge(s)),
        s => Ok(s as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, IVec3};

    #[test]
    fn default_is_a_sticky_square_point() {
        let cfg = Config::default();
        assert_eq!(cfg.stickiness, 1.0);
        assert_eq!(cfg.lattice, Lattice::Square);
        assert_eq!(cfg.attractor, AttractorKind::Point);
        assert_eq!(cfg.attractor_size, 1);
        assert!(cfg.seed.is_none());
        assert!(cfg.validate::<IVec2>().is_ok());
    }

    #[test]
    fn stickiness_outside_unit_interval_is_rejected() {
        for bad in [-0.1, 1.01, f64::NAN] {
            let cfg = Config::new(bad, Lattice::Square, AttractorKind::Point);
            assert!(matches!(
                cfg.validate::<IVec2>(),
                Err(AggregateError::InvalidStickiness(_))
            ));
        }
    }

    #[test]
    fn attractor_must_fit_the_dimension() {
        let cfg = Config::new(1.0, Lattice::Square, AttractorKind::Plane);
        assert_eq!(
            cfg.validate::<IVec2>(),
            Err(AggregateError::UnsupportedAttractor {
                kind: AttractorKind::Plane,
                dim: 2
            })
        );
        assert!(cfg.validate::<IVec3>().is_ok());
    }

    #[test]
    fn zero_attractor_size_is_rejected() {
        let cfg = Config::default().with_attractor_size(0);
        assert_eq!(
            cfg.validate::<IVec3>(),
            Err(AggregateError::ZeroAttractorSize)
        );
    }

    #[test]
    fn attractor_size_must_leave_room_for_the_strip() {
        let cfg = Config::new(1.0, Lattice::Square, AttractorKind::Line);

        let widest = cfg.with_attractor_size(MAX_ATTRACTOR_SIZE);
        assert!(widest.validate::<IVec3>().is_ok());
        assert_eq!(validate_attractor_size(MAX_ATTRACTOR_SIZE), Ok(i32::MAX / 2));

        for size in [MAX_ATTRACTOR_SIZE + 1, 1_500_000_000, u32::MAX] {
            assert_eq!(
                cfg.with_attractor_size(size).validate::<IVec3>(),
                Err(AggregateError::AttractorTooLarge(size))
            );
        }
    }
}
