//! CSV export of a grown aggregate.

use std::io::{self, Write};

use dla_core::{Aggregate, Site, UniformSource};
use glam::{IVec2, IVec3};

/// Lattice points that know how to print their coordinates as CSV fields.
pub trait CsvSite: Site {
    const COORDS: &'static str;

    fn write_coords<W: Write>(&self, w: &mut W) -> io::Result<()>;
}

impl CsvSite for IVec2 {
    const COORDS: &'static str = "x,y";

    fn write_coords<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{},{}", self.x, self.y)
    }
}

impl CsvSite for IVec3 {
    const COORDS: &'static str = "x,y,z";

    fn write_coords<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Writes one row per cluster site as `index,x,y[,z],steps,bounces`.
///
/// Attractor rows leave `steps` and `bounces` empty.
pub fn write_csv<S, R, W>(agg: &Aggregate<S, R>, w: &mut W) -> io::Result<()>
where
    S: CsvSite,
    R: UniformSource,
    W: Write,
{
    writeln!(w, "index,{},steps,bounces", S::COORDS)?;

    let seeds = agg.attractor().len();
    for (i, site) in agg.particles().iter().enumerate() {
        write!(w, "{i},")?;
        site.write_coords(w)?;
        match i.checked_sub(seeds) {
            Some(k) => writeln!(w, ",{},{}", agg.rsteps_at(k), agg.bcolls_at(k))?,
            None => writeln!(w, ",,")?,
        }
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dla_core::{Aggregate2D, Aggregate3D, AttractorKind, Config, Lattice};

    #[test]
    fn attractor_rows_have_no_statistics() {
        let cfg = Config::new(1.0, Lattice::Square, AttractorKind::Line)
            .with_attractor_size(3)
            .with_seed(1);
        let mut agg = Aggregate2D::new(&cfg).unwrap();
        agg.generate(2, None).unwrap();

        let mut buf = Vec::new();
        write_csv(&agg, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 5);
        assert_eq!(lines[0], "index,x,y,steps,bounces");
        assert_eq!(lines[1], "0,-1,0,,");
        assert_eq!(lines[3], "2,1,0,,");

        let walker: Vec<&str> = lines[4].split(',').collect();
        assert_eq!(walker.len(), 5);
        assert_eq!(walker[3], agg.rsteps_at(0).to_string());
        assert_eq!(walker[4], agg.bcolls_at(0).to_string());
    }

    #[test]
    fn three_dimensional_rows_carry_z() {
        let mut agg = Aggregate3D::new(&Config::default().with_seed(2)).unwrap();
        agg.generate(1, None).unwrap();

        let mut buf = Vec::new();
        write_csv(&agg, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("index,x,y,z,steps,bounces"));
        assert_eq!(lines.next(), Some("0,0,0,0,,"));
        assert_eq!(lines.next().map(|l| l.split(',').count()), Some(6));
    }
}
