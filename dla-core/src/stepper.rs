//! Random neighbour moves for the active walker.
//!
//! A move consumes one uniform draw, split into equal bins in the order of
//! the move tables below.

use glam::{IVec2, IVec3};

use crate::{
    rng::{UniformSource, bin},
    types::Lattice,
};

/// Von Neumann neighbourhood: ±x, then ±y.
pub const SQUARE_2D: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// ±x, then the four diagonals.
pub const TRIANGLE_2D: [IVec2; 6] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(1, 1),
    IVec2::new(1, -1),
    IVec2::new(-1, 1),
    IVec2::new(-1, -1),
];

/// ±x, ±y, then ±z.
pub const SQUARE_3D: [IVec3; 6] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// xy-diagonals, then ±x, then ±z. There is no pure y move.
pub const TRIANGLE_3D: [IVec3; 8] = [
    IVec3::new(1, 1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(-1, -1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// Neighbour offsets of a 2-D lattice. The set is symmetric, so it is
/// also the contact neighbourhood of a cluster site.
pub fn moves_2d(lattice: Lattice) -> &'static [IVec2] {
    match lattice {
        Lattice::Square => &SQUARE_2D,
        Lattice::Triangle => &TRIANGLE_2D,
    }
}

/// Neighbour offsets of a 3-D lattice.
pub fn moves_3d(lattice: Lattice) -> &'static [IVec3] {
    match lattice {
        Lattice::Square => &SQUARE_3D,
        Lattice::Triangle => &TRIANGLE_3D,
    }
}

/// Moves a 2-D walker to a random neighbour.
///
/// ### Parameters
/// - `pos` - Current walker site.
/// - `lattice` - Which move table to draw from.
/// - `rng` - Source of the single uniform draw that picks the move.
///
/// ### Returns
/// The neighbouring site. Escapes are not checked here.
pub fn step_2d<R: UniformSource + ?Sized>(pos: IVec2, lattice: Lattice, rng: &mut R) -> IVec2 {
    let moves = moves_2d(lattice);
    pos + moves[bin(rng.uniform(), moves.len())]
}

/// Moves a 3-D walker to a random neighbour.
///
/// Same contract as [`step_2d`], drawing from [`moves_3d`].
pub fn step_3d<R: UniformSource + ?Sized>(pos: IVec3, lattice: Lattice, rng: &mut R) -> IVec3 {
    let moves = moves_3d(lattice);
    pos + moves[bin(rng.uniform(), moves.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn square_2d_bins_in_table_order() {
        let draws = [0.1, 0.3, 0.6, 0.9];
        let mut rng = Scripted::new(&draws);
        let got: Vec<IVec2> = (0..4)
            .map(|_| step_2d(IVec2::ZERO, Lattice::Square, &mut rng))
            .collect();
        assert_eq!(got, SQUARE_2D.to_vec());
    }

    #[test]
    fn triangle_2d_bins_in_table_order() {
        let draws: Vec<f64> = (0..6).map(|k| (k as f64 + 0.5) / 6.0).collect();
        let mut rng = Scripted::new(&draws);
        let start = IVec2::new(2, 2);
        for expected in TRIANGLE_2D {
            assert_eq!(
                step_2d(start, Lattice::Triangle, &mut rng),
                start + expected
            );
        }
    }

    #[test]
    fn triangle_3d_never_moves_along_y_alone() {
        let draws: Vec<f64> = (0..8).map(|k| (k as f64 + 0.5) / 8.0).collect();
        let mut rng = Scripted::new(&draws);
        for expected in TRIANGLE_3D {
            let d = step_3d(IVec3::ZERO, Lattice::Triangle, &mut rng);
            assert_eq!(d, expected);
            assert!(!(d.x == 0 && d.z == 0), "pure y move {d:?}");
        }
    }

    #[test]
    fn square_3d_moves_are_unit_steps() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let d = step_3d(IVec3::ZERO, Lattice::Square, &mut rng);
            assert_eq!(d.abs().element_sum(), 1);
            let idx = SQUARE_3D.iter().position(|&m| m == d).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn move_sets_are_symmetric() {
        for lattice in [Lattice::Square, Lattice::Triangle] {
            for &m in moves_2d(lattice) {
                assert!(moves_2d(lattice).contains(&-m));
            }
            for &m in moves_3d(lattice) {
                assert!(moves_3d(lattice).contains(&-m));
            }
        }
    }
}
