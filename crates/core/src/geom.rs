use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[macro_export]
macro_rules! pt {
    ($x:expr, $y:expr $(,)*) => {
        $crate::geom::Point::new($x, $y)
    };
    ($a:expr) => {
        $crate::geom::Point::new($a, $a)
    };
}

/// A point in host coordinates, used for finger positions and drag vectors.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Point) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction of a gesture, relative to the screen.
///
/// A finger dragged toward the top of the screen produces a `North` swipe.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::East => Dir::West,
            Dir::South => Dir::North,
            Dir::West => Dir::East,
        }
    }
}

/// Direction of a relative page cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CycleDir {
    Next,
    Previous,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = pt!(3, 4);
        let b = pt!(1, 2);
        assert_eq!(a + b, pt!(4, 6));
        assert_eq!(a - b, pt!(2, 2));
        assert_eq!(-a, pt!(-3, -4));
    }

    #[test]
    fn dir_opposite_is_involutive() {
        for dir in [Dir::North, Dir::East, Dir::South, Dir::West] {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }
}
