//! Grid geometry primitives
//!
//! Cells are addressed by (column, row). Column grows to the right, row grows
//! towards `Direction::Top`.

use std::fmt;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub column: i32,
    pub row: i32,
}

impl GridPoint {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Neighbouring cell one step in `direction` (self for `Direction::None`)
    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        self + direction.vector()
    }

    /// The four orthogonal neighbours, in `Direction::CARDINAL` order
    pub fn neighbours(self) -> impl Iterator<Item = GridPoint> {
        Direction::CARDINAL.into_iter().map(move |d| self.step(d))
    }

    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.column, self.row)
    }
}

impl From<IVec2> for GridPoint {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

impl std::ops::Add<IVec2> for GridPoint {
    type Output = GridPoint;

    fn add(self, rhs: IVec2) -> GridPoint {
        (self.as_ivec2() + rhs).into()
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Travel / facing direction
///
/// `None` means "not moving". It is a valid state but never a valid argument
/// where an actual direction is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Cardinal directions in clockwise order (rotation order for `plus`)
    pub const CARDINAL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Unit displacement in cells
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::None => IVec2::ZERO,
            Direction::Top => IVec2::Y,
            Direction::Right => IVec2::X,
            Direction::Bottom => IVec2::NEG_Y,
            Direction::Left => IVec2::NEG_X,
        }
    }

    /// Unit displacement as a float vector (for sub-cell accumulation)
    #[inline]
    pub fn vec2(self) -> Vec2 {
        self.vector().as_vec2()
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }

    pub fn is_none(self) -> bool {
        self == Direction::None
    }

    fn index(self) -> Option<i32> {
        Direction::CARDINAL
            .iter()
            .position(|&d| d == self)
            .map(|i| i as i32)
    }

    /// Rotate clockwise by `steps` quarter turns (negative turns counter-clockwise).
    /// `None` stays `None`.
    pub fn plus(self, steps: i32) -> Direction {
        match self.index() {
            Some(i) => Direction::CARDINAL[(i + steps).rem_euclid(4) as usize],
            None => Direction::None,
        }
    }

    /// Signed angle in degrees (counter-clockwise positive) from `self` to `other`,
    /// in (-180, 180]. Zero when either side is `None`.
    pub fn angle_to(self, other: Direction) -> f32 {
        match (self.index(), other.index()) {
            (Some(a), Some(b)) => {
                // Clockwise quarter turns from self to other
                let cw = (b - a).rem_euclid(4);
                match cw {
                    0 => 0.0,
                    1 => -90.0,
                    2 => 180.0,
                    _ => 90.0,
                }
            }
            _ => 0.0,
        }
    }
}
