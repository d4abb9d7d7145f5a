//! Elastic boundary around the spawn region.
//!
//! A walker that steps past the region enlarged by [`BOUNDARY_EPSILON`] is
//! put back on the site it came from. It is never discarded.

use glam::{IVec2, IVec3};

use crate::{
    geometry::{BOUNDARY_EPSILON, Geometry, Site},
    types::AttractorKind,
};

/// Whether a 2-D walker has left the region it may roam.
///
/// ### Parameters
/// - `pos` - Walker site after the step.
/// - `geom` - Current spawn-region state.
///
/// ### Returns
/// `true` past the line strip (`|x| > 2 * att_size` or
/// `|y| > spawn_diam + ε`), or past the square of half side
/// `spawn_diam / 2 + ε` for other attractors.
pub fn escaped_2d(pos: IVec2, geom: &Geometry) -> bool {
    let a = pos.abs();
    match geom.kind {
        AttractorKind::Line => {
            a.x > 2 * geom.att_size || a.y > geom.spawn_diam + BOUNDARY_EPSILON
        }
        _ => a.max_element() > geom.half_diam() + BOUNDARY_EPSILON,
    }
}

/// Whether a 3-D walker has left the region it may roam.
///
/// Line and plane attractors bound `x` (and `y` for a plane) by
/// `2 * att_size` and the remaining axes by `spawn_diam + ε`. Other
/// attractors use the cube of half side `spawn_diam / 2 + ε`.
pub fn escaped_3d(pos: IVec3, geom: &Geometry) -> bool {
    let a = pos.abs();
    let strip = geom.spawn_diam + BOUNDARY_EPSILON;
    match geom.kind {
        AttractorKind::Line => a.x > 2 * geom.att_size || a.y > strip || a.z > strip,
        AttractorKind::Plane => {
            a.x > 2 * geom.att_size || a.y > 2 * geom.att_size || a.z > strip
        }
        AttractorKind::Point | AttractorKind::Circle | AttractorKind::Sphere => {
            a.max_element() > geom.half_diam() + BOUNDARY_EPSILON
        }
    }
}

/// Snaps `curr` back to `prev` if it left the region.
///
/// Returns `true` when a bounce should be counted for the walker. A 2-D line
/// attractor snaps back without counting unless
/// [`Geometry::count_line_bounces`] is set.
pub fn collide<S: Site>(geom: &Geometry, curr: &mut S, prev: S) -> bool {
    if !curr.escaped(geom) {
        return false;
    }
    *curr = prev;
    S::counts_bounce(geom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(kind: AttractorKind, att_size: i32, spawn_diam: i32) -> Geometry {
        let mut g = Geometry::new(kind, att_size);
        g.spawn_diam = spawn_diam;
        g
    }

    #[test]
    fn square_region_is_enlarged_by_epsilon() {
        let g = geom(AttractorKind::Point, 1, 6);
        // half = 3, limit = 5
        assert!(!escaped_2d(IVec2::new(5, -5), &g));
        assert!(escaped_2d(IVec2::new(6, 0), &g));
        assert!(escaped_2d(IVec2::new(0, -6), &g));
        assert!(!escaped_3d(IVec3::new(5, 5, -5), &g));
        assert!(escaped_3d(IVec3::new(0, 0, 6), &g));
    }

    #[test]
    fn line_region_is_a_strip() {
        let g = geom(AttractorKind::Line, 3, 8);
        assert!(!escaped_2d(IVec2::new(6, 10), &g));
        assert!(escaped_2d(IVec2::new(7, 0), &g));
        assert!(escaped_2d(IVec2::new(0, -11), &g));
        assert!(escaped_3d(IVec3::new(0, 0, 11), &g));
        assert!(!escaped_3d(IVec3::new(-6, 10, -10), &g));
    }

    #[test]
    fn plane_region_is_a_slab() {
        let g = geom(AttractorKind::Plane, 3, 7);
        assert!(!escaped_3d(IVec3::new(6, -6, 9), &g));
        assert!(escaped_3d(IVec3::new(0, 7, 0), &g));
        assert!(escaped_3d(IVec3::new(0, 0, -10), &g));
    }

    #[test]
    fn collide_snaps_back_and_counts() {
        let g = geom(AttractorKind::Point, 1, 6);
        let prev = IVec3::new(5, 0, 0);
        let mut curr = IVec3::new(6, 0, 0);
        assert!(collide(&g, &mut curr, prev));
        assert_eq!(curr, prev);

        let mut inside = IVec3::new(4, 0, 0);
        assert!(!collide(&g, &mut inside, prev));
        assert_eq!(inside, IVec3::new(4, 0, 0));
    }

    #[test]
    fn planar_line_snaps_back_without_counting_by_default() {
        let mut g = geom(AttractorKind::Line, 3, 8);
        let prev = IVec2::new(6, 0);
        let mut curr = IVec2::new(7, 0);
        assert!(!collide(&g, &mut curr, prev));
        assert_eq!(curr, prev);

        g.count_line_bounces = true;
        let mut curr = IVec2::new(7, 0);
        assert!(collide(&g, &mut curr, prev));
        assert_eq!(curr, prev);
    }

    #[test]
    fn collide_is_idempotent() {
        let g = geom(AttractorKind::Plane, 2, 6);
        let prev = IVec3::new(4, 0, 1);
        let mut once = IVec3::new(5, 0, 1);
        collide(&g, &mut once, prev);
        let mut twice = once;
        collide(&g, &mut twice, prev);
        assert_eq!(once, twice);
        assert_eq!(twice, prev);
    }
}
