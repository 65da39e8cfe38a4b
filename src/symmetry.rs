//! Removal of pose assignments that are symmetry images of earlier ones.
//!
//! Each candidate is rendered into a [`PoseGrid`] the size of the shape's
//! bounding box. The grid is transformed by every generator in the shape's
//! symmetry label, and the candidate is dropped if any single image equals a
//! grid already kept. The first candidate of each class in enumeration order
//! survives.
//!
//! Only single-generator images are compared, not the full orbit under the
//! generated group. For labels with several independent generators (e.g.
//! `-|`), assignments related only by a composition of generators can both
//! survive. Downstream counts depend on this, so it is kept as is.

use crate::error::{Error, Result};
use crate::pose::PoseAssignment;
use crate::shape::Shape;
use std::collections::HashSet;
use std::str::FromStr;

/// The symmetry generators named by a shape's symmetry label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymmetryGenerators {
    /// `-`: flip across the horizontal axis (reverse rows).
    pub row_flip: bool,
    /// `|`: flip across the vertical axis (reverse columns).
    pub col_flip: bool,
    /// `%`: 180° rotation.
    pub half_turn: bool,
    /// `@`: 90° rotation. Only consulted together with `half_turn`.
    pub quarter_turn: bool,
}

impl SymmetryGenerators {
    pub fn is_trivial(&self) -> bool {
        !(self.row_flip || self.col_flip || self.half_turn)
    }

    /// All generator images of `grid`, in checking order.
    pub fn images(&self, grid: &PoseGrid) -> Vec<PoseGrid> {
        let mut images = Vec::new();
        if self.row_flip {
            images.push(grid.flip_rows());
        }
        if self.col_flip {
            images.push(grid.flip_cols());
        }
        if self.half_turn {
            let quarter = grid.rotate_cw();
            let half = quarter.rotate_cw();
            if self.quarter_turn {
                images.push(quarter);
                images.push(half.clone());
                images.push(half.rotate_cw());
            }
            images.push(half);
        }
        images
    }
}

impl FromStr for SymmetryGenerators {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self> {
        let mut generators = Self::default();
        for ch in label.chars() {
            match ch {
                '-' => generators.row_flip = true,
                '|' => generators.col_flip = true,
                '%' => generators.half_turn = true,
                '@' => generators.quarter_turn = true,
                _ => {
                    return Err(Error::UnrecognizedSymmetryLabel {
                        label: label.to_string(),
                        ch,
                    });
                }
            }
        }
        Ok(generators)
    }
}

/// A pose assignment drawn onto the shape's bounding box.
///
/// Member cells hold their pose value, everything else holds 0. Equality
/// compares dimensions as well as contents, so a quarter-turned non-square
/// grid never matches an untransformed one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PoseGrid {
    height: usize,
    width: usize,
    values: Vec<u8>,
}

impl PoseGrid {
    pub fn render(shape: &Shape, assignment: &PoseAssignment) -> Self {
        let (height, width) = shape.bounding_box();
        let mut values = vec![0; height * width];
        for (cell, pose) in shape.cells().iter().zip(assignment.poses()) {
            values[cell.x as usize * width + cell.y as usize] = pose.value();
        }
        Self {
            height,
            width,
            values,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.height && col < self.width).then(|| self.values[row * self.width + col])
    }

    fn from_fn(height: usize, width: usize, f: impl Fn(usize, usize) -> u8) -> Self {
        let mut values = Vec::with_capacity(height * width);
        for r in 0..height {
            for c in 0..width {
                values.push(f(r, c));
            }
        }
        Self {
            height,
            width,
            values,
        }
    }

    fn at(&self, row: usize, col: usize) -> u8 {
        self.values[row * self.width + col]
    }

    /// Reverses the row order.
    pub fn flip_rows(&self) -> Self {
        Self::from_fn(self.height, self.width, |r, c| {
            self.at(self.height - 1 - r, c)
        })
    }

    /// Reverses the column order.
    pub fn flip_cols(&self) -> Self {
        Self::from_fn(self.height, self.width, |r, c| {
            self.at(r, self.width - 1 - c)
        })
    }

    /// Rotates 90° clockwise; the result is `width x height`.
    pub fn rotate_cw(&self) -> Self {
        Self::from_fn(self.width, self.height, |r, c| {
            self.at(self.height - 1 - c, r)
        })
    }
}

/// Keeps the first pose assignment of each symmetry class, in input order.
#[derive(Debug)]
pub struct SymmetryReducer<'a> {
    shape: &'a Shape,
    generators: SymmetryGenerators,
    seen: HashSet<PoseGrid>,
}

impl<'a> SymmetryReducer<'a> {
    /// Parses the shape's symmetry label. Fails on unrecognized characters.
    pub fn new(shape: &'a Shape) -> Result<Self> {
        let generators = shape.symmetry().parse()?;
        Ok(Self {
            shape,
            generators,
            seen: HashSet::new(),
        })
    }

    pub fn generators(&self) -> SymmetryGenerators {
        self.generators
    }

    /// Number of assignments kept so far.
    pub fn kept(&self) -> usize {
        self.seen.len()
    }

    /// Returns true and records the assignment if none of its generator
    /// images matches an already kept assignment.
    ///
    /// The untransformed grid is recorded, not the image.
    pub fn admit(&mut self, assignment: &PoseAssignment) -> bool {
        let grid = PoseGrid::render(self.shape, assignment);
        let redundant = self
            .generators
            .images(&grid)
            .iter()
            .any(|image| self.seen.contains(image));
        if redundant {
            return false;
        }
        self.seen.insert(grid);
        true
    }

    /// Lazily filters `candidates`, preserving the order of kept elements.
    pub fn reduce<I>(mut self, candidates: I) -> impl Iterator<Item = PoseAssignment> + 'a
    where
        I: IntoIterator<Item = PoseAssignment>,
        I::IntoIter: 'a,
    {
        candidates.into_iter().filter(move |a| self.admit(a))
    }
}
