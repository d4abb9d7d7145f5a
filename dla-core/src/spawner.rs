//! Walker launch positions on the boundary of the current spawn region.
//!
//! Every spawn draws a face selector `p` first; any further draws fill the
//! free coordinates in axis order.

use glam::{IVec2, IVec3};

use crate::{geometry::Geometry, rng::UniformSource, types::AttractorKind};

/// `trunc(extent * (u - 0.5))` for a fresh draw `u`.
#[inline]
fn centred<R: UniformSource + ?Sized>(extent: i32, rng: &mut R) -> i32 {
    (extent as f64 * (rng.uniform() - 0.5)) as i32
}

#[inline]
fn signed(value: i32, positive: bool) -> i32 {
    if positive { value } else { -value }
}

/// Launches a 2-D walker.
///
/// Point and circle attractors spawn on the square of side `spawn_diam`;
/// a line attractor spawns on the strip `y = ±spawn_diam` above and below it.
pub fn spawn_2d<R: UniformSource + ?Sized>(geom: &Geometry, rng: &mut R) -> IVec2 {
    let p = rng.uniform();
    match geom.kind {
        AttractorKind::Line => {
            let x = centred(2 * geom.att_size, rng);
            IVec2::new(x, signed(geom.spawn_diam, p < 0.5))
        }
        _ => {
            let half = geom.half_diam();
            if p < 0.5 {
                let x = centred(geom.spawn_diam, rng);
                IVec2::new(x, signed(half, p < 0.25))
            } else {
                let y = centred(geom.spawn_diam, rng);
                IVec2::new(signed(half, p < 0.75), y)
            }
        }
    }
}

/// Launches a 3-D walker.
///
/// Point, circle and sphere attractors spawn on the faces of the cube of
/// side `spawn_diam`, with the face normal chosen z, x, y by thirds of `p`.
/// A line attractor spawns with `y = z = ±spawn_diam`; a plane attractor
/// spawns on `z = ±spawn_diam` over the plane's footprint.
pub fn spawn_3d<R: UniformSource + ?Sized>(geom: &Geometry, rng: &mut R) -> IVec3 {
    let p = rng.uniform();
    match geom.kind {
        AttractorKind::Line => {
            let x = centred(2 * geom.att_size, rng);
            let yz = signed(geom.spawn_diam, p < 0.5);
            IVec3::new(x, yz, yz)
        }
        AttractorKind::Plane => {
            let x = centred(2 * geom.att_size, rng);
            let y = centred(2 * geom.att_size, rng);
            IVec3::new(x, y, signed(geom.spawn_diam, p < 0.5))
        }
        AttractorKind::Point | AttractorKind::Circle | AttractorKind::Sphere => {
            let half = geom.half_diam();
            let d = geom.spawn_diam;
            if p < 1.0 / 3.0 {
                let x = centred(d, rng);
                let y = centred(d, rng);
                IVec3::new(x, y, signed(half, p < 1.0 / 6.0))
            } else if p < 2.0 / 3.0 {
                let y = centred(d, rng);
                let z = centred(d, rng);
                IVec3::new(signed(half, p < 0.5), y, z)
            } else {
                let x = centred(d, rng);
                let z = centred(d, rng);
                IVec3::new(x, signed(half, p < 5.0 / 6.0), z)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;
    use rand::{SeedableRng, rngs::StdRng};

    fn geom(kind: AttractorKind, att_size: i32, spawn_diam: i32) -> Geometry {
        let mut g = Geometry::new(kind, att_size);
        g.spawn_diam = spawn_diam;
        g
    }

    #[test]
    fn square_boundary_faces_follow_the_selector() {
        let g = geom(AttractorKind::Point, 1, 10);
        // u = 0.9 -> trunc(10 * 0.4) = 4
        assert_eq!(spawn_2d(&g, &mut Scripted::new(&[0.1, 0.9])), IVec2::new(4, 5));
        assert_eq!(spawn_2d(&g, &mut Scripted::new(&[0.3, 0.9])), IVec2::new(4, -5));
        assert_eq!(spawn_2d(&g, &mut Scripted::new(&[0.6, 0.9])), IVec2::new(5, 4));
        assert_eq!(spawn_2d(&g, &mut Scripted::new(&[0.8, 0.9])), IVec2::new(-5, 4));
    }

    #[test]
    fn free_coordinate_truncates_toward_zero() {
        let g = geom(AttractorKind::Circle, 4, 10);
        // u = 0.01 -> 10 * -0.49 = -4.9 -> -4
        assert_eq!(spawn_2d(&g, &mut Scripted::new(&[0.1, 0.01])), IVec2::new(-4, 5));
    }

    #[test]
    fn line_spawns_on_the_strip() {
        let g = geom(AttractorKind::Line, 5, 8);
        // u = 0.9 -> trunc(10 * 0.4) = 4
        assert_eq!(spawn_2d(&g, &mut Scripted::new(&[0.2, 0.9])), IVec2::new(4, 8));
        assert_eq!(spawn_2d(&g, &mut Scripted::new(&[0.7, 0.9])), IVec2::new(4, -8));

        assert_eq!(
            spawn_3d(&g, &mut Scripted::new(&[0.7, 0.9])),
            IVec3::new(4, -8, -8)
        );
    }

    #[test]
    fn cube_faces_follow_the_selector() {
        let g = geom(AttractorKind::Sphere, 2, 10);
        // Fresh draws of 0.9 put free coordinates at 4.
        let cases = [
            (0.10, IVec3::new(4, 4, 5)),
            (0.20, IVec3::new(4, 4, -5)),
            (0.40, IVec3::new(5, 4, 4)),
            (0.60, IVec3::new(-5, 4, 4)),
            (0.70, IVec3::new(4, 5, 4)),
            (0.90, IVec3::new(4, -5, 4)),
        ];
        for (p, expected) in cases {
            assert_eq!(
                spawn_3d(&g, &mut Scripted::new(&[p, 0.9, 0.9])),
                expected,
                "p = {p}"
            );
        }
    }

    #[test]
    fn plane_spawns_above_or_below_its_footprint() {
        let g = geom(AttractorKind::Plane, 3, 7);
        // x: trunc(6 * 0.4) = 2, y: trunc(6 * -0.5) = -3
        assert_eq!(
            spawn_3d(&g, &mut Scripted::new(&[0.4, 0.9, 0.0])),
            IVec3::new(2, -3, 7)
        );
        assert_eq!(
            spawn_3d(&g, &mut Scripted::new(&[0.5, 0.9, 0.0])),
            IVec3::new(2, -3, -7)
        );
    }

    #[test]
    fn spawns_lie_on_the_square_boundary() {
        let g = geom(AttractorKind::Point, 1, 13);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let p = spawn_2d(&g, &mut rng);
            let a = p.abs();
            assert!(a.max_element() == 6, "{p:?} is not on the boundary");
        }
    }
}
