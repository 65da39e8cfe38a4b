//! Polyomino shapes: cells, bounding box, neighbor lookup and symmetry labels.

use crate::error::{Error, Result};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A grid cell. `x` is the row, `y` the column; both are non-negative inside a [`Shape`].
pub type Cell = IVec2;

/// Returns the four orthogonal neighbors of `cell`: up, down, left, right.
///
/// Membership in any shape is not checked.
pub fn neighbors(cell: Cell) -> [Cell; 4] {
    [
        cell - IVec2::X,
        cell + IVec2::X,
        cell - IVec2::Y,
        cell + IVec2::Y,
    ]
}

/// A fixed set of cells forming one robot assembly footprint.
///
/// The cell order is significant: a cell's position in [`cells`](Self::cells)
/// is the module index used by every encoded connection.
///
/// Deserialized shapes go through the same validation as [`Shape::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRepr")]
pub struct Shape {
    cells: Vec<Cell>,
    height: usize,
    width: usize,

    /// Symmetry generators that map the footprint onto itself, one character
    /// each: `-` row flip, `|` column flip, `%` half turn, `@` quarter turn.
    symmetry: String,
}

impl Shape {
    /// Builds a shape from ordered cells and a symmetry label.
    ///
    /// The footprint must touch row 0 and column 0, since symmetry images are
    /// taken over the box from the origin. The label is stored verbatim; it is
    /// validated when a [`SymmetryReducer`](crate::SymmetryReducer) parses it.
    pub fn new(cells: Vec<Cell>, symmetry: impl Into<String>) -> Result<Self> {
        if cells.is_empty() {
            return Err(Error::InvalidShape("shape has no cells".to_string()));
        }
        if let Some(c) = cells.iter().find(|c| c.x < 0 || c.y < 0) {
            return Err(Error::InvalidShape(format!(
                "cell {c} has a negative coordinate"
            )));
        }
        let mut seen = HashSet::with_capacity(cells.len());
        if let Some(c) = cells.iter().find(|c| !seen.insert(**c)) {
            return Err(Error::InvalidShape(format!("cell {c} appears twice")));
        }
        let min = cells.iter().fold(IVec2::MAX, |acc, &c| acc.min(c));
        if min != IVec2::ZERO {
            return Err(Error::InvalidShape(format!(
                "footprint starts at {min}, expected row 0 and column 0"
            )));
        }

        let height = cells.iter().map(|c| c.x).max().unwrap_or(0) as usize + 1;
        let width = cells.iter().map(|c| c.y).max().unwrap_or(0) as usize + 1;
        Ok(Self {
            cells,
            height,
            width,
            symmetry: symmetry.into(),
        })
    }

    /// Builds a shape and derives its symmetry label from the footprint.
    pub fn with_detected_symmetry(cells: Vec<Cell>) -> Result<Self> {
        let mut shape = Self::new(cells, "")?;
        shape.symmetry = shape.detect_symmetry();
        Ok(shape)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a shape has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box as `(height, width)`, measured from the origin.
    pub fn bounding_box(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn symmetry(&self) -> &str {
        &self.symmetry
    }

    /// True if the shape carries any non-trivial symmetry generator.
    pub fn is_symmetric(&self) -> bool {
        !self.symmetry.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }

    /// Number of member neighbors of `cell`.
    pub fn degree(&self, cell: Cell) -> usize {
        neighbors(cell).into_iter().filter(|n| self.contains(*n)).count()
    }

    fn detect_symmetry(&self) -> String {
        let footprint: HashSet<Cell> = self.cells.iter().copied().collect();
        let max = IVec2::new(self.height as i32 - 1, self.width as i32 - 1);
        let preserved =
            |map: &dyn Fn(Cell) -> Cell| self.cells.iter().all(|&c| footprint.contains(&map(c)));

        let mut label = String::new();
        if preserved(&|c| IVec2::new(max.x - c.x, c.y)) {
            label.push('-');
        }
        if preserved(&|c| IVec2::new(c.x, max.y - c.y)) {
            label.push('|');
        }
        if preserved(&|c| max - c) {
            label.push('%');
        }
        // Clockwise quarter turn: (r, c) -> (c, h - 1 - r).
        if max.x == max.y && preserved(&|c| IVec2::new(c.y, max.x - c.x)) {
            label.push('@');
        }
        label
    }
}

/// Wire form of a [`Shape`]; `height` and `width` are optional but must agree
/// with the cells when given.
#[derive(Deserialize)]
struct ShapeRepr {
    cells: Vec<Cell>,
    #[serde(default)]
    height: Option<usize>,
    #[serde(default)]
    width: Option<usize>,
    #[serde(default)]
    symmetry: String,
}

impl TryFrom<ShapeRepr> for Shape {
    type Error = Error;

    fn try_from(repr: ShapeRepr) -> Result<Self> {
        let shape = Self::new(repr.cells, repr.symmetry)?;
        let (height, width) = shape.bounding_box();
        if repr.height.is_some_and(|h| h != height) || repr.width.is_some_and(|w| w != width) {
            return Err(Error::InvalidShape(format!(
                "stated box {}x{} does not match cells ({height}x{width})",
                repr.height.unwrap_or(height),
                repr.width.unwrap_or(width)
            )));
        }
        Ok(shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height as i32 {
            for col in 0..self.width as i32 {
                let ch = if self.contains(IVec2::new(row, col)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
