//! Module poses, connector-side lookup and the pose-assignment enumerator.

use crate::connection::ConnectorSide;
use crate::error::{Error, Result};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;

/// One of four 90° orientations of a module.
///
/// `Pose(n)` is a rotation of `n * 90°`; only `0..4` is representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Pose(u8);

impl Pose {
    pub const ALL: [Pose; 4] = [Pose(0), Pose(1), Pose(2), Pose(3)];

    /// Builds a pose from any number of quarter turns, wrapping modulo 4.
    pub fn from_quarter_turns(turns: u32) -> Self {
        Self((turns % 4) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Pose {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if value < 4 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidShape(format!("pose {value} out of range 0..4")))
        }
    }
}

impl From<Pose> for u8 {
    fn from(pose: Pose) -> Self {
        pose.0
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connector faces indexed by `(pose + offset) mod 4`.
const BASE: [ConnectorSide; 4] = [
    ConnectorSide::Bottom,
    ConnectorSide::Right,
    ConnectorSide::Top,
    ConnectorSide::Left,
];

/// A grid direction relative to a module, used to pick the facing connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn offset(self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Right => 3,
            Self::Down => 2,
            Self::Left => 1,
        }
    }

    /// The connector side a module in `pose` presents towards this direction.
    pub fn side(self, pose: Pose) -> ConnectorSide {
        BASE[((pose.0 + self.offset()) % 4) as usize]
    }

    /// Classifies `current - neighbor` into the directions assigned to each end.
    ///
    /// Returns `(direction for current, direction for neighbor)`. The bindings
    /// are fixed connector conventions rather than geometric facing, so e.g. a
    /// column offset of `+1` uses `Right` on the current module. `x` is the row
    /// delta and `y` the column delta. Anything but an orthogonal unit vector
    /// yields `None`.
    pub fn from_offset(dir: IVec2) -> Option<(Direction, Direction)> {
        match (dir.x, dir.y) {
            (0, 1) => Some((Self::Right, Self::Left)),
            (0, -1) => Some((Self::Left, Self::Right)),
            (1, 0) => Some((Self::Down, Self::Up)),
            (-1, 0) => Some((Self::Up, Self::Down)),
            _ => None,
        }
    }
}

/// Poses for every cell of a shape, aligned with the shape's cell order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseAssignment(pub Vec<Pose>);

impl PoseAssignment {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn poses(&self) -> &[Pose] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<Pose> {
        self.0.get(index).copied()
    }
}

impl FromIterator<Pose> for PoseAssignment {
    fn from_iter<T: IntoIterator<Item = Pose>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for PoseAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, pose) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pose}")?;
        }
        write!(f, ")")
    }
}

/// Lazy enumeration of all `4^k` pose assignments for `k` cells.
///
/// Order is the lexicographic Cartesian product with position 0 as the most
/// significant digit: `(0,0)`, `(0,1)`, `(0,2)`, `(0,3)`, `(1,0)`, ...
/// Symmetry reduction keeps the first member of each class it sees, so this
/// order decides which representative survives.
///
/// No capping is applied. Cloning or calling [`restart`](Self::restart) replays
/// the sequence from the beginning.
#[derive(Clone, Debug)]
pub struct PoseEnumerator {
    digits: Vec<u8>,
    remaining: Option<u128>,
    done: bool,
}

impl PoseEnumerator {
    /// Creates an enumerator for `cells` cells. Zero cells is rejected.
    pub fn new(cells: usize) -> Result<Self> {
        if cells < 1 {
            return Err(Error::InvalidShape(
                "cannot enumerate poses for zero cells".to_string(),
            ));
        }
        Ok(Self {
            digits: vec![0; cells],
            remaining: Self::count(cells),
            done: false,
        })
    }

    /// `4^cells`, or `None` if it does not fit in a `u128`.
    pub fn count(cells: usize) -> Option<u128> {
        u32::try_from(cells).ok().and_then(|k| 4u128.checked_pow(k))
    }

    /// Total number of assignments this enumerator yields from the start.
    pub fn total(&self) -> Option<u128> {
        Self::count(self.digits.len())
    }

    pub fn cells(&self) -> usize {
        self.digits.len()
    }

    /// Rewinds to the first assignment.
    pub fn restart(&mut self) {
        self.digits.iter_mut().for_each(|d| *d = 0);
        self.remaining = self.total();
        self.done = false;
    }

    fn advance(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            if *digit < 3 {
                *digit += 1;
                return;
            }
            *digit = 0;
        }
        self.done = true;
    }
}

impl Iterator for PoseEnumerator {
    type Item = PoseAssignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.digits.iter().map(|&d| Pose(d)).collect();
        self.advance();
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining.map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}

impl FusedIterator for PoseEnumerator {}
