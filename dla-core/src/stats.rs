//! Summary statistics of a grown aggregate.

use glam::DVec3;

use crate::{aggregate::Aggregate, geometry::Site, rng::UniformSource};

/// Number of radii sampled by [`mass_radius_dimension`].
const DIMENSION_SAMPLES: usize = 12;

/// Smallest radius sampled by [`mass_radius_dimension`].
const DIMENSION_MIN_RADIUS: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateStats {
    /// Cluster size, attractor included.
    pub particles: usize,
    pub attractor_sites: usize,
    pub mean_rsteps: f64,
    pub max_rsteps: u64,
    pub mean_bcolls: f64,
    pub max_bcolls: u64,
    pub centroid: DVec3,
    pub radius_of_gyration: f64,
    /// Mass-radius estimate, `None` for clusters too small to fit.
    pub fractal_dimension: Option<f64>,
}

impl AggregateStats {
    pub fn of<S: Site, R: UniformSource>(agg: &Aggregate<S, R>) -> Self {
        let points: Vec<DVec3> = agg.particles().iter().map(|p| p.to_dvec3()).collect();
        let centroid = centroid(&points);

        Self {
            particles: agg.size(),
            attractor_sites: agg.attractor().len(),
            mean_rsteps: mean(agg.rsteps()),
            max_rsteps: agg.rsteps().iter().copied().max().unwrap_or(0),
            mean_bcolls: mean(agg.bcolls()),
            max_bcolls: agg.bcolls().iter().copied().max().unwrap_or(0),
            centroid,
            radius_of_gyration: radius_of_gyration(&points, centroid),
            fractal_dimension: mass_radius_dimension(&points, centroid),
        }
    }
}

fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

pub fn centroid(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}

/// Root-mean-square distance of `points` from `centre`.
pub fn radius_of_gyration(points: &[DVec3], centre: DVec3) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points.iter().map(|p| p.distance_squared(centre)).sum();
    (sum / points.len() as f64).sqrt()
}

/// Estimates the fractal dimension from the mass-radius relation
/// `N(r) ~ r^D`.
///
/// Counts the points within geometrically spaced radii from `centre` up to
/// half the cluster's outer radius, and returns the least-squares slope of
/// `ln N(r)` against `ln r`.
pub fn mass_radius_dimension(points: &[DVec3], centre: DVec3) -> Option<f64> {
    let mut dist: Vec<f64> = points.iter().map(|p| p.distance(centre)).collect();
    dist.sort_by(f64::total_cmp);

    let outer = 0.5 * dist.last().copied()?;
    if outer <= DIMENSION_MIN_RADIUS {
        return None;
    }

    let ratio = outer / DIMENSION_MIN_RADIUS;
    let samples: Vec<(f64, f64)> = (0..DIMENSION_SAMPLES)
        .filter_map(|k| {
            let t = k as f64 / (DIMENSION_SAMPLES - 1) as f64;
            let r = DIMENSION_MIN_RADIUS * ratio.powf(t);
            let count = dist.partition_point(|&d| d <= r);
            (count > 0).then(|| (r.ln(), (count as f64).ln()))
        })
        .collect();

    if samples.len() < 2 {
        return None;
    }

    let n = samples.len() as f64;
    let mx = samples.iter().map(|s| s.0).sum::<f64>() / n;
    let my = samples.iter().map(|s| s.1).sum::<f64>() / n;
    let sxy: f64 = samples.iter().map(|s| (s.0 - mx) * (s.1 - my)).sum();
    let sxx: f64 = samples.iter().map(|s| (s.0 - mx) * (s.0 - mx)).sum();
    (sxx > 0.0).then(|| sxy / sxx)
}
