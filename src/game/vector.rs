use std::fmt;
use std::ops::{Add, Neg};

/// Integer lattice vector, used both as a grid cell and as a step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis
    pub const fn splat(v: i32) -> Self {
        Self::new(v, v, v)
    }

    pub fn manhattan_distance(&self, other: Vec3i) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }
}

impl Add for Vec3i {
    type Output = Vec3i;

    fn add(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Neg for Vec3i {
    type Output = Vec3i;

    fn neg(self) -> Vec3i {
        Vec3i::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six axis-aligned unit steps the snake can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Heading {
    pub const ALL: [Heading; 6] = [
        Heading::PosX,
        Heading::NegX,
        Heading::PosY,
        Heading::NegY,
        Heading::PosZ,
        Heading::NegZ,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Heading) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Heading {
        match self {
            Heading::PosX => Heading::NegX,
            Heading::NegX => Heading::PosX,
            Heading::PosY => Heading::NegY,
            Heading::NegY => Heading::PosY,
            Heading::PosZ => Heading::NegZ,
            Heading::NegZ => Heading::PosZ,
        }
    }

    /// Unit step for this heading
    pub fn delta(&self) -> Vec3i {
        match self {
            Heading::PosX => Vec3i::new(1, 0, 0),
            Heading::NegX => Vec3i::new(-1, 0, 0),
            Heading::PosY => Vec3i::new(0, 1, 0),
            Heading::NegY => Vec3i::new(0, -1, 0),
            Heading::PosZ => Vec3i::new(0, 0, 1),
            Heading::NegZ => Vec3i::new(0, 0, -1),
        }
    }

    /// Short label for the status line
    pub fn label(&self) -> &'static str {
        match self {
            Heading::PosX => "+X",
            Heading::NegX => "-X",
            Heading::PosY => "+Y",
            Heading::NegY => "-Y",
            Heading::PosZ => "+Z",
            Heading::NegZ => "-Z",
        }
    }
}

impl From<Heading> for Vec3i {
    fn from(heading: Heading) -> Self {
        heading.delta()
    }
}

/// A vector that is not one of the six cardinal unit steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHeading(pub Vec3i);

impl fmt::Display for InvalidHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not an axis-aligned unit vector", self.0)
    }
}

impl std::error::Error for InvalidHeading {}

impl TryFrom<Vec3i> for Heading {
    type Error = InvalidHeading;

    fn try_from(v: Vec3i) -> Result<Self, Self::Error> {
        Heading::ALL
            .into_iter()
            .find(|heading| heading.delta() == v)
            .ok_or(InvalidHeading(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_headings() {
        assert!(Heading::PosX.is_opposite(Heading::NegX));
        assert!(Heading::NegY.is_opposite(Heading::PosY));
        assert!(Heading::PosZ.is_opposite(Heading::NegZ));

        assert!(!Heading::PosX.is_opposite(Heading::PosY));
        assert!(!Heading::PosZ.is_opposite(Heading::PosZ));
    }

    #[test]
    fn test_opposite_is_negated_delta() {
        for heading in Heading::ALL {
            assert_eq!(heading.opposite().delta(), -heading.delta());
        }
    }

    #[test]
    fn test_vector_from_heading() {
        assert_eq!(Vec3i::from(Heading::PosX), Vec3i::new(1, 0, 0));
        assert_eq!(Vec3i::from(Heading::NegZ), Vec3i::new(0, 0, -1));
    }

    #[test]
    fn test_heading_from_vector() {
        assert_eq!(Heading::try_from(Vec3i::new(0, -1, 0)), Ok(Heading::NegY));
        assert_eq!(
            Heading::try_from(Vec3i::new(1, 1, 0)),
            Err(InvalidHeading(Vec3i::new(1, 1, 0)))
        );
        assert!(Heading::try_from(Vec3i::default()).is_err());
        assert!(Heading::try_from(Vec3i::new(2, 0, 0)).is_err());
    }

    #[test]
    fn test_vector_arithmetic() {
        let cell = Vec3i::new(4, 4, 4);
        assert_eq!(cell + Heading::PosX.delta(), Vec3i::new(5, 4, 4));
        assert_eq!(cell + Heading::NegZ.delta(), Vec3i::new(4, 4, 3));
        assert_eq!(cell.manhattan_distance(Vec3i::new(5, 3, 4)), 2);
        assert_eq!(Vec3i::splat(3), Vec3i::new(3, 3, 3));
    }
}
