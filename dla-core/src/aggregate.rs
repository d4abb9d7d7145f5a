//! The aggregate: cluster state, the stick test, and the generation loop.
//!
//! One walker is live at a time. Each step runs, in order:
//! 1. [`Site::step`]: one random neighbour move.
//! 2. [`boundary::collide`]: snap back if the walker left the region.
//! 3. The stick test: with probability `stickiness`, scan the cluster for
//!    the walker's site and, on a hit, append the site it came from.

use glam::IVec3;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace};

use crate::{
    boundary,
    config::{Config, validate_attractor_size},
    error::{AggregateError, try_reserve},
    geometry::{Geometry, Site},
    rng::UniformSource,
    types::{AttractorKind, Lattice, Point2, Point3},
};

/// 2-D aggregate on [`Point2`] sites.
pub type Aggregate2D<R = StdRng> = Aggregate<Point2, R>;

/// 3-D aggregate on [`Point3`] sites.
pub type Aggregate3D<R = StdRng> = Aggregate<Point3, R>;

/// The walker currently diffusing towards the cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walker<S> {
    pub pos: S,
    /// Steps taken since spawning, cancelled ones included.
    pub steps: u64,
    /// Times the elastic boundary fired.
    pub bounces: u64,
}

/// Record of a walker joining the cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stick<S> {
    /// Site appended to the cluster.
    pub site: S,
    pub steps: u64,
    pub bounces: u64,
}

/// A diffusion-limited aggregate growing on the lattice of `S`.
///
/// ### Fields
/// - `cluster` - Every stuck site, attractor seeds first.
/// - `attractor` - Copy of the seed sites.
/// - `rsteps` / `bcolls` - Steps and bounces of each stuck walker, in stick order.
/// - `geom` - Extents and spawn region, updated as the cluster grows.
/// - `walker` - The live walker, if one has been spawned.
/// - `rng` - Generator owned by this aggregate.
pub struct Aggregate<S: Site, R: UniformSource = StdRng> {
    cluster: Vec<S>,
    attractor: Vec<S>,
    rsteps: Vec<u64>,
    bcolls: Vec<u64>,
    stickiness: f64,
    lattice: Lattice,
    geom: Geometry,
    seeded: bool,
    walker: Option<Walker<S>>,
    rng: R,
}

impl<S: Site> Aggregate<S> {
    /// Creates an empty aggregate with its own [`StdRng`], seeded from
    /// `config.seed` or from the OS when no seed is given.
    ///
    /// ### Errors
    /// Any validation error from [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, AggregateError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<S: Site, R: UniformSource> Aggregate<S, R> {
    /// Creates an empty aggregate drawing from `rng`. `config.seed` is ignored.
    pub fn with_rng(config: &Config, rng: R) -> Result<Self, AggregateError> {
        config.validate::<S>()?;
        let att_size = validate_attractor_size(config.attractor_size)?;
        let mut geom = Geometry::new(config.attractor, att_size);
        geom.count_line_bounces = config.count_line_bounces;

        Ok(Self {
            cluster: Vec::new(),
            attractor: Vec::new(),
            rsteps: Vec::new(),
            bcolls: Vec::new(),
            stickiness: config.stickiness,
            lattice: config.lattice,
            geom,
            seeded: false,
            walker: None,
            rng,
        })
    }

    /// Changes the attractor parameter. Only allowed before seeding.
    pub fn set_attractor_size(&mut self, size: u32) -> Result<(), AggregateError> {
        if self.seeded {
            return Err(AggregateError::AttractorAlreadySeeded);
        }
        self.geom.att_size = validate_attractor_size(size)?;
        Ok(())
    }

    /// Reserves statistics storage for `n` more walkers.
    pub fn reserve(&mut self, n: usize) -> Result<(), AggregateError> {
        try_reserve(&mut self.rsteps, n)?;
        try_reserve(&mut self.bcolls, n)?;
        Ok(())
    }

    /// Places the attractor seeds, reserving the cluster for `n` walkers on
    /// top of them. Does nothing if the attractor is already seeded.
    pub fn seed_attractor(&mut self, n: usize) -> Result<(), AggregateError> {
        if self.seeded {
            return Ok(());
        }
        let seeds = S::seeds(self.geom.kind, self.geom.att_size)?;
        try_reserve(&mut self.attractor, seeds.len())?;
        try_reserve(&mut self.cluster, seeds.len().saturating_add(n))?;
        self.attractor.extend_from_slice(&seeds);
        self.cluster.extend_from_slice(&seeds);
        self.seeded = true;

        // Seeds count toward the extents but never resize the spawn region.
        self.geom.max_extent = seeds
            .iter()
            .fold(self.geom.max_extent, |max, p| max.max(p.extents()));

        debug!(
            kind = %self.geom.kind,
            size = self.geom.att_size,
            seeds = seeds.len(),
            "seeded attractor"
        );
        Ok(())
    }

    /// Grows the aggregate by `n` walkers.
    ///
    /// Seeds the attractor on the first call. After every stick, `progress`
    /// receives the completed percentage of this call.
    ///
    /// Runs until `n` walkers have stuck; with `stickiness == 0` it never
    /// returns. Use [`Aggregate::walk`] for bounded work.
    pub fn generate(
        &mut self,
        n: usize,
        mut progress: Option<&mut dyn FnMut(u32)>,
    ) -> Result<(), AggregateError> {
        info!(
            n,
            dim = S::DIM,
            lattice = %self.lattice,
            attractor = %self.geom.kind,
            stickiness = self.stickiness,
            "generating aggregate"
        );

        self.reserve(n)?;
        self.seed_attractor(n)?;

        for count in 1..=n {
            let stick = self.stick_next()?;
            trace!(
                site = ?stick.site,
                steps = stick.steps,
                bounces = stick.bounces,
                "walker stuck"
            );

            if let Some(report) = progress.as_deref_mut() {
                report((count as u128 * 100 / n as u128) as u32);
            }
        }

        info!(
            size = self.cluster.len(),
            spawn_diam = self.geom.spawn_diam,
            "aggregate complete"
        );
        Ok(())
    }

    /// Walks until the live walker (spawning one if needed) sticks.
    pub fn stick_next(&mut self) -> Result<Stick<S>, AggregateError> {
        self.prepare_stick()?;
        loop {
            if let Some(stick) = self.advance() {
                return Ok(stick);
            }
        }
    }

    /// Takes at most `max_steps` walker steps, stopping at the first stick.
    ///
    /// The walker persists between calls, so a walk that ran out of steps
    /// resumes where it stopped.
    pub fn walk(&mut self, max_steps: u64) -> Result<Option<Stick<S>>, AggregateError> {
        self.prepare_stick()?;
        for _ in 0..max_steps {
            if let Some(stick) = self.advance() {
                return Ok(Some(stick));
            }
        }
        Ok(None)
    }

    fn prepare_stick(&mut self) -> Result<(), AggregateError> {
        self.seed_attractor(0)?;
        try_reserve(&mut self.cluster, 1)?;
        self.reserve(1)
    }

    /// One step of the live walker. Storage for one stick must be reserved.
    fn advance(&mut self) -> Option<Stick<S>> {
        let mut walker = match self.walker.take() {
            Some(w) => w,
            None => Walker {
                pos: S::spawn(&self.geom, &mut self.rng),
                steps: 0,
                bounces: 0,
            },
        };

        let prev = walker.pos;
        walker.pos = prev.step(self.lattice, &mut self.rng);
        if boundary::collide(&self.geom, &mut walker.pos, prev) {
            walker.bounces += 1;
        }
        walker.steps += 1;

        if self.collide(walker.pos, prev) {
            self.rsteps.push(walker.steps);
            self.bcolls.push(walker.bounces);
            Some(Stick {
                site: prev,
                steps: walker.steps,
                bounces: walker.bounces,
            })
        } else {
            self.walker = Some(walker);
            None
        }
    }

    /// Stickiness-gated contact test of `curr` against the cluster.
    ///
    /// On contact `prev` joins the cluster and the extents and spawn region
    /// are updated from it.
    fn collide(&mut self, curr: S, prev: S) -> bool {
        if self.rng.uniform() > self.stickiness {
            return false;
        }
        if !self.cluster.contains(&curr) {
            return false;
        }
        self.cluster.push(prev);
        self.absorb(prev);
        true
    }

    fn absorb(&mut self, site: S) {
        let ext = site.extents();
        let grew = ext.cmpgt(self.geom.max_extent);
        self.geom.max_extent = self.geom.max_extent.max(ext);

        let g = &mut self.geom;
        let old_diam = g.spawn_diam;
        match g.kind {
            AttractorKind::Point => {
                let r2 = site.radius_sqd();
                if r2 > g.max_r_sqd {
                    g.max_r_sqd = r2;
                    g.spawn_diam = 2 * r2.isqrt() as i32 + g.b_offset;
                }
            }
            AttractorKind::Line if S::DIM == 2 && grew.y => {
                g.spawn_diam = ext.y + g.b_offset;
            }
            AttractorKind::Plane if grew.z => {
                g.spawn_diam = ext.z + g.b_offset;
            }
            _ => {}
        }

        if g.spawn_diam != old_diam {
            debug!(from = old_diam, to = g.spawn_diam, "spawn region resized");
        }
    }

    /// Number of sites in the cluster, attractor included.
    pub fn size(&self) -> usize {
        self.cluster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cluster.is_empty()
    }

    /// Cluster site `i`.
    ///
    /// ### Panics
    /// Panics if `i >= self.size()`.
    pub fn particle_at(&self, i: usize) -> S {
        self.cluster[i]
    }

    pub fn get(&self, i: usize) -> Option<S> {
        self.cluster.get(i).copied()
    }

    pub fn particles(&self) -> &[S] {
        &self.cluster
    }

    pub fn attractor(&self) -> &[S] {
        &self.attractor
    }

    /// Steps-to-stick of the `i`-th stuck walker.
    ///
    /// ### Panics
    /// Panics if fewer than `i + 1` walkers have stuck.
    pub fn rsteps_at(&self, i: usize) -> u64 {
        self.rsteps[i]
    }

    /// Boundary collisions of the `i`-th stuck walker.
    ///
    /// ### Panics
    /// Panics if fewer than `i + 1` walkers have stuck.
    pub fn bcolls_at(&self, i: usize) -> u64 {
        self.bcolls[i]
    }

    pub fn rsteps(&self) -> &[u64] {
        &self.rsteps
    }

    pub fn bcolls(&self) -> &[u64] {
        &self.bcolls
    }

    pub fn stickiness(&self) -> f64 {
        self.stickiness
    }

    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    pub fn attractor_kind(&self) -> AttractorKind {
        self.geom.kind
    }

    pub fn attractor_size(&self) -> u32 {
        self.geom.att_size as u32
    }

    pub fn spawn_diameter(&self) -> i32 {
        self.geom.spawn_diam
    }

    pub fn boundary_offset(&self) -> i32 {
        self.geom.b_offset
    }

    /// Running maximum of `|x|`, `|y|`, `|z|` over stuck walkers.
    pub fn max_extent(&self) -> IVec3 {
        self.geom.max_extent
    }

    /// Largest squared radius of a stuck walker (point attractor only).
    pub fn max_radius_sqd(&self) -> i64 {
        self.geom.max_r_sqd
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geom
    }

    /// The live walker, if any.
    pub fn walker(&self) -> Option<&Walker<S>> {
        self.walker.as_ref()
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
}
