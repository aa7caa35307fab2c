//! Anchors: the named sides and center lines of a rectangle

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two independent axes constraints are resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("x"),
            Axis::Vertical => f.write_str("y"),
        }
    }
}

/// A side (or center line) of a component used as an alignment reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    North,
    South,
    East,
    West,
    HorizontalCenter,
    VerticalCenter,
}

impl Anchor {
    /// The axis this anchor lies on
    pub fn axis(self) -> Axis {
        match self {
            Anchor::West | Anchor::East | Anchor::HorizontalCenter => Axis::Horizontal,
            Anchor::North | Anchor::South | Anchor::VerticalCenter => Axis::Vertical,
        }
    }

    /// Position of the anchor as a fraction of the component's extent on its axis
    pub fn fraction(self) -> f64 {
        match self {
            Anchor::West | Anchor::North => 0.0,
            Anchor::HorizontalCenter | Anchor::VerticalCenter => 0.5,
            Anchor::East | Anchor::South => 1.0,
        }
    }

    /// Anchors valid on an axis, for error messages
    pub fn valid_for(axis: Axis) -> &'static [Anchor] {
        match axis {
            Axis::Horizontal => &[Anchor::West, Anchor::East, Anchor::HorizontalCenter],
            Axis::Vertical => &[Anchor::North, Anchor::South, Anchor::VerticalCenter],
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anchor::North => "north",
            Anchor::South => "south",
            Anchor::East => "east",
            Anchor::West => "west",
            Anchor::HorizontalCenter => "horizontal_center",
            Anchor::VerticalCenter => "vertical_center",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_axes() {
        assert_eq!(Anchor::West.axis(), Axis::Horizontal);
        assert_eq!(Anchor::HorizontalCenter.axis(), Axis::Horizontal);
        assert_eq!(Anchor::South.axis(), Axis::Vertical);
        assert_eq!(Anchor::VerticalCenter.axis(), Axis::Vertical);
    }

    #[test]
    fn test_anchor_fractions() {
        assert_eq!(Anchor::North.fraction(), 0.0);
        assert_eq!(Anchor::VerticalCenter.fraction(), 0.5);
        assert_eq!(Anchor::East.fraction(), 1.0);
    }

    #[test]
    fn test_anchor_deserialize_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            side: Anchor,
        }
        let w: Wrapper = toml::from_str(r#"side = "horizontal_center""#).unwrap();
        assert_eq!(w.side, Anchor::HorizontalCenter);
    }
}
