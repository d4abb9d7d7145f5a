use std::fmt;
use std::str::FromStr;

use glam::{IVec2, IVec3};
use serde::{Deserialize, Serialize};

/// A site on the 2-D integer lattice.
pub type Point2 = IVec2;

/// A site on the 3-D integer lattice.
pub type Point3 = IVec3;

/// Neighbourhood rule used by the random walker.
///
/// See [`crate::stepper`] for the exact move sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lattice {
    #[default]
    Square,
    Triangle,
}

/// Fixed seed geometry the first walkers stick to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttractorKind {
    #[default]
    Point,
    Line,
    Circle,
    Sphere,
    Plane,
}

/// Dimensionality of an aggregate, as chosen by a frontend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Two,
    Three,
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lattice::Square => "square",
            Lattice::Triangle => "triangle",
        })
    }
}

impl FromStr for Lattice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(Lattice::Square),
            "triangle" => Ok(Lattice::Triangle),
            other => Err(format!("unknown lattice `{other}` (expected square or triangle)")),
        }
    }
}

impl fmt::Display for AttractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttractorKind::Point => "point",
            AttractorKind::Line => "line",
            AttractorKind::Circle => "circle",
            AttractorKind::Sphere => "sphere",
            AttractorKind::Plane => "plane",
        })
    }
}

impl FromStr for AttractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "point" => Ok(AttractorKind::Point),
            "line" => Ok(AttractorKind::Line),
            "circle" => Ok(AttractorKind::Circle),
            "sphere" => Ok(AttractorKind::Sphere),
            "plane" => Ok(AttractorKind::Plane),
            other => Err(format!(
                "unknown attractor `{other}` (expected point, line, circle, sphere or plane)"
            )),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Two => "two",
            Dimension::Three => "three",
        })
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "2" | "2d" | "two" => Ok(Dimension::Two),
            "3" | "3d" | "three" => Ok(Dimension::Three),
            other => Err(format!("unknown dimension `{other}` (expected 2 or 3)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Triangle".parse::<Lattice>(), Ok(Lattice::Triangle));
        assert_eq!("PLANE".parse::<AttractorKind>(), Ok(AttractorKind::Plane));
        assert_eq!("3d".parse::<Dimension>(), Ok(Dimension::Three));
        assert!("hexagon".parse::<Lattice>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for kind in [
            AttractorKind::Point,
            AttractorKind::Line,
            AttractorKind::Circle,
            AttractorKind::Sphere,
            AttractorKind::Plane,
        ] {
            assert_eq!(kind.to_string().parse::<AttractorKind>(), Ok(kind));
        }
        for lattice in [Lattice::Square, Lattice::Triangle] {
            assert_eq!(lattice.to_string().parse::<Lattice>(), Ok(lattice));
        }
        for dim in [Dimension::Two, Dimension::Three] {
            assert_eq!(dim.to_string().parse::<Dimension>(), Ok(dim));
        }
        assert_eq!(Dimension::Three.to_string(), "three");
    }
}
