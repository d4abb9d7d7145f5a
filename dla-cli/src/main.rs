//! Command-line driver: grows one aggregate and writes it as CSV.

mod output;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dla_core::{
    Aggregate, AggregateStats, AttractorKind, Config, Dimension, Lattice, Point2, Point3,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use output::{CsvSite, write_csv};

#[derive(Parser, Debug)]
#[command(name = "dla", about = "Grow a diffusion-limited aggregate on a lattice")]
struct Args {
    /// YAML file with aggregate parameters; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lattice dimension: 2 or 3.
    #[arg(short, long)]
    dim: Option<Dimension>,

    /// Number of walkers to stick.
    #[arg(short = 'n', long, default_value_t = 1000)]
    particles: usize,

    /// Probability in [0, 1] that a contact sticks.
    #[arg(short, long)]
    stickiness: Option<f64>,

    /// square or triangle.
    #[arg(short, long)]
    lattice: Option<Lattice>,

    /// point, line, circle, sphere or plane.
    #[arg(short, long)]
    attractor: Option<AttractorKind>,

    /// Line length, circle/sphere radius or plane side.
    #[arg(long)]
    attractor_size: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Count snap-backs at a 2-D line boundary as bounces.
    #[arg(long)]
    count_line_bounces: bool,

    /// CSV destination; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suppress progress output.
    #[arg(short, long)]
    quiet: bool,
}

fn load_config(path: &Path) -> Result<Config> {
    let file =
        File::open(path).with_context(|| format!("failed to open config {}", path.display()))?;
    let cfg: Config = serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}

fn build_config(args: &Args) -> Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(dim) = args.dim {
        cfg.dimension = dim;
    }
    if let Some(stickiness) = args.stickiness {
        cfg.stickiness = stickiness;
    }
    if let Some(lattice) = args.lattice {
        cfg.lattice = lattice;
    }
    if let Some(attractor) = args.attractor {
        cfg.attractor = attractor;
    }
    if let Some(size) = args.attractor_size {
        cfg.attractor_size = size;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.count_line_bounces |= args.count_line_bounces;
    Ok(cfg)
}

fn run<S: CsvSite>(cfg: &Config, args: &Args) -> Result<()> {
    let mut agg = Aggregate::<S>::new(cfg).context("failed to initialise aggregate")?;

    let mut last = None;
    let mut report = |pct: u32| {
        if last != Some(pct) {
            eprint!("\rProgress: {pct}%");
            let _ = io::stderr().flush();
            last = Some(pct);
        }
    };
    let progress: Option<&mut dyn FnMut(u32)> = if args.quiet {
        None
    } else {
        Some(&mut report)
    };

    agg.generate(args.particles, progress)
        .context("failed to generate aggregate")?;
    if !args.quiet {
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(&agg, &mut BufWriter::new(file))
        }
        None => write_csv(&agg, &mut BufWriter::new(io::stdout().lock())),
    }
    .context("failed to write aggregate")?;

    let stats = AggregateStats::of(&agg);
    info!(
        particles = stats.particles,
        attractor_sites = stats.attractor_sites,
        mean_steps = stats.mean_rsteps,
        max_steps = stats.max_rsteps,
        mean_bounces = stats.mean_bcolls,
        radius_of_gyration = stats.radius_of_gyration,
        fractal_dimension = ?stats.fractal_dimension,
        "aggregate written"
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dla=info,dla_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cfg = build_config(&args)?;
    info!(?cfg, particles = args.particles, "starting");

    match cfg.dimension {
        Dimension::Two => run::<Point2>(&cfg, &args),
        Dimension::Three => run::<Point3>(&cfg, &args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "dla",
            "--dim",
            "3",
            "-n",
            "50",
            "--stickiness",
            "0.25",
            "--lattice",
            "triangle",
            "--attractor",
            "plane",
            "--attractor-size",
            "4",
            "--seed",
            "9",
        ]);
        let cfg = build_config(&args).unwrap();
        assert_eq!(args.particles, 50);
        assert_eq!(cfg.dimension, Dimension::Three);
        assert_eq!(cfg.stickiness, 0.25);
        assert_eq!(cfg.lattice, Lattice::Triangle);
        assert_eq!(cfg.attractor, AttractorKind::Plane);
        assert_eq!(cfg.attractor_size, 4);
        assert_eq!(cfg.seed, Some(9));
        assert!(!cfg.count_line_bounces);
    }

    #[test]
    fn yaml_config_fills_missing_fields_with_defaults() {
        let cfg: Config = serde_yaml::from_str("dimension: three\nattractor: sphere\n").unwrap();
        assert_eq!(cfg.dimension, Dimension::Three);
        assert_eq!(cfg.attractor, AttractorKind::Sphere);
        assert_eq!(cfg.stickiness, 1.0);
        assert_eq!(cfg.lattice, Lattice::Square);
    }

    #[test]
    fn unknown_attractor_is_a_parse_error() {
        assert!(Args::try_parse_from(["dla", "--attractor", "torus"]).is_err());
    }
}
