use rand::Rng;

/// Source of uniform reals in `[0, 1)` consumed by the walker.
///
/// Every [`rand::Rng`] is a source. Tests implement it directly to replay
/// fixed draw sequences.
pub trait UniformSource {
    fn uniform(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Maps a uniform draw onto one of `bins` equal sub-intervals of `[0, 1)`.
///
/// Bin edges are compared as `k / bins` so that boundary draws land in the
/// same bin as an explicit `u < k / bins` chain would put them.
#[inline]
pub(crate) fn bin(u: f64, bins: usize) -> usize {
    (1..bins)
        .find(|&k| u < k as f64 / bins as f64)
        .map_or(bins - 1, |k| k - 1)
}

/// Plays back a fixed list of draws, cycling when exhausted.
#[cfg(test)]
pub(crate) struct Scripted {
    draws: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.to_vec(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl UniformSource for Scripted {
    fn uniform(&mut self) -> f64 {
        let u = self.draws[self.next % self.draws.len()];
        self.next += 1;
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn bin_splits_unit_interval_evenly() {
        assert_eq!(bin(0.0, 4), 0);
        assert_eq!(bin(0.2499, 4), 0);
        assert_eq!(bin(0.25, 4), 1);
        assert_eq!(bin(0.74, 4), 2);
        assert_eq!(bin(0.9999, 4), 3);
        assert_eq!(bin(1.0 / 6.0, 6), 1);
        assert_eq!(bin(0.5, 8), 4);
    }

    #[test]
    fn std_rng_draws_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn scripted_source_cycles() {
        let mut s = Scripted::new(&[0.1, 0.9]);
        assert_eq!(s.uniform(), 0.1);
        assert_eq!(s.uniform(), 0.9);
        assert_eq!(s.uniform(), 0.1);
    }
}
