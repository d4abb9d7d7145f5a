//! Seed geometries placed on the lattice before any walker is released.
//!
//! Angular sampling walks the angle from its lower bound in increments of
//! `1 / att_size` while it stays below `upper + step`, so the closing angle
//! is always sampled. Coordinates are truncated toward zero and repeated
//! lattice points are kept.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{IVec2, IVec3};

use crate::{
    error::{AggregateError, try_reserve},
    types::AttractorKind,
};

fn line_offsets(att_size: i32) -> impl Iterator<Item = i32> {
    let half = att_size / 2;
    (0..att_size).map(move |i| i - half)
}

fn circle_angles(att_size: i32) -> Vec<f64> {
    let step = 1.0 / att_size as f64;
    let mut angles = Vec::new();
    let mut theta = 0.0;
    while theta < TAU + step {
        angles.push(theta);
        theta += step;
    }
    angles
}

fn polar_angles(att_size: i32) -> Vec<f64> {
    let step = 1.0 / att_size as f64;
    let mut angles = Vec::new();
    let mut theta = -FRAC_PI_2;
    while theta < FRAC_PI_2 + step {
        angles.push(theta);
        theta += step;
    }
    angles
}

/// Seed coordinates for a 2-D attractor.
///
/// ### Errors
/// - [`AggregateError::UnsupportedAttractor`] for sphere and plane.
/// - [`AggregateError::OutOfMemory`] if the seed buffer cannot be reserved.
pub fn seeds_2d(kind: AttractorKind, att_size: i32) -> Result<Vec<IVec2>, AggregateError> {
    let mut seeds = Vec::new();
    match kind {
        AttractorKind::Point => {
            try_reserve(&mut seeds, 1)?;
            seeds.push(IVec2::ZERO);
        }
        AttractorKind::Line => {
            try_reserve(&mut seeds, att_size as usize)?;
            seeds.extend(line_offsets(att_size).map(|x| IVec2::new(x, 0)));
        }
        AttractorKind::Circle => {
            let a = att_size as f64;
            let angles = circle_angles(att_size);
            try_reserve(&mut seeds, angles.len())?;
            seeds.extend(
                angles
                    .iter()
                    .map(|t| IVec2::new((a * t.cos()) as i32, (a * t.sin()) as i32)),
            );
        }
        AttractorKind::Sphere | AttractorKind::Plane => {
            return Err(AggregateError::UnsupportedAttractor { kind, dim: 2 });
        }
    }
    Ok(seeds)
}

/// Seed coordinates for a 3-D attractor.
///
/// ### Errors
/// - [`AggregateError::OutOfMemory`] if the seed buffer cannot be reserved.
pub fn seeds_3d(kind: AttractorKind, att_size: i32) -> Result<Vec<IVec3>, AggregateError> {
    let mut seeds = Vec::new();
    let a = att_size as f64;
    match kind {
        AttractorKind::Point => {
            try_reserve(&mut seeds, 1)?;
            seeds.push(IVec3::ZERO);
        }
        AttractorKind::Line => {
            try_reserve(&mut seeds, att_size as usize)?;
            seeds.extend(line_offsets(att_size).map(|x| IVec3::new(x, 0, 0)));
        }
        AttractorKind::Plane => {
            let side = att_size as usize;
            try_reserve(&mut seeds, side.saturating_mul(side))?;
            for x in line_offsets(att_size) {
                seeds.extend(line_offsets(att_size).map(|y| IVec3::new(x, y, 0)));
            }
        }
        AttractorKind::Circle => {
            let angles = circle_angles(att_size);
            try_reserve(&mut seeds, angles.len())?;
            seeds.extend(
                angles
                    .iter()
                    .map(|t| IVec3::new((a * t.cos()) as i32, (a * t.sin()) as i32, 0)),
            );
        }
        AttractorKind::Sphere => {
            let azimuths = circle_angles(att_size);
            let polars = polar_angles(att_size);
            try_reserve(&mut seeds, azimuths.len().saturating_mul(polars.len()))?;
            for phi in &azimuths {
                seeds.extend(polars.iter().map(|theta| {
                    IVec3::new(
                        (a * theta.sin() * phi.cos()) as i32,
                        (a * theta.sin() * phi.sin()) as i32,
                        (a * theta.cos()) as i32,
                    )
                }));
            }
        }
    }
    Ok(seeds)
}
