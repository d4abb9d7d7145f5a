use std::collections::TryReserveError;

use thiserror::Error;

use crate::types::AttractorKind;

/// Errors produced while building or growing an aggregate.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    /// A sequence could not grow to hold `requested` more records.
    #[error("out of memory while reserving {requested} records")]
    OutOfMemory {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("stickiness {0} must be between 0.0 and 1.0")]
    InvalidStickiness(f64),
    #[error("{kind} attractor is not available in {dim}D")]
    UnsupportedAttractor { kind: AttractorKind, dim: usize },
    #[error("attractor size must be at least 1")]
    ZeroAttractorSize,
    #[error("attractor size {0} does not fit on the lattice")]
    AttractorTooLarge(u32),
    #[error("attractor size cannot change once the attractor is seeded")]
    AttractorAlreadySeeded,
}

/// Reserves room for `additional` more elements, mapping allocation failure
/// to [`AggregateError::OutOfMemory`].
pub(crate) fn try_reserve<T>(seq: &mut Vec<T>, additional: usize) -> Result<(), AggregateError> {
    seq.try_reserve(additional)
        .map_err(|source| AggregateError::OutOfMemory {
            requested: additional,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absurd_reservation_reports_out_of_memory() {
        let mut seq: Vec<u64> = Vec::new();
        let err = try_reserve(&mut seq, usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::OutOfMemory {
                requested: usize::MAX,
                ..
            }
        ));
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = AggregateError::UnsupportedAttractor {
            kind: AttractorKind::Sphere,
            dim: 2,
        };
        assert_eq!(err.to_string(), "sphere attractor is not available in 2D");
        assert_eq!(
            AggregateError::InvalidStickiness(1.5).to_string(),
            "stickiness 1.5 must be between 0.0 and 1.0"
        );
    }
}
