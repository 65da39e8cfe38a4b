//! Free polyomino catalog used as the shape source.
//!
//! Shapes of `n` cells are grown cell by cell from the monomino. Each
//! candidate is reduced to a canonical orientation (the smallest normalized
//! cell list over the eight rigid transforms of the square grid), so every
//! free polyomino appears exactly once.

use crate::error::{Error, Result};
use crate::shape::{Shape, neighbors};
use glam::IVec2;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Normalized cells as sortable `(row, col)` keys.
type Key = Vec<(i32, i32)>;

/// Which shapes of a given size to offer.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Cells per shape.
    pub cells: usize,
    /// Keep only shapes with a non-trivial symmetry label.
    ///
    /// Shapes whose only symmetry is a diagonal mirror (L tromino, V and W
    /// pentominoes) have no label character and are dropped too.
    pub symmetric_only: bool,
    /// Drop unbranched chains, except the straight bar.
    pub exclude_line: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cells: 5,
            symmetric_only: true,
            exclude_line: true,
        }
    }
}

fn normalize(cells: impl IntoIterator<Item = (i32, i32)>) -> Key {
    let mut key: Key = cells.into_iter().collect();
    let min_r = key.iter().map(|c| c.0).min().unwrap_or(0);
    let min_c = key.iter().map(|c| c.1).min().unwrap_or(0);
    for c in key.iter_mut() {
        *c = (c.0 - min_r, c.1 - min_c);
    }
    key.sort_unstable();
    key
}

/// The smallest of the eight rigid images of `key`.
fn canonical(key: &Key) -> Key {
    let transforms: [fn((i32, i32)) -> (i32, i32); 8] = [
        |(r, c)| (r, c),
        |(r, c)| (c, -r),
        |(r, c)| (-r, -c),
        |(r, c)| (-c, r),
        |(r, c)| (r, -c),
        |(r, c)| (-r, c),
        |(r, c)| (c, r),
        |(r, c)| (-c, -r),
    ];
    transforms
        .iter()
        .map(|t| normalize(key.iter().map(|&p| t(p))))
        .min()
        .unwrap_or_default()
}

/// All free polyominoes of `n` cells, sorted by canonical cell list.
///
/// Cells of each shape are in row-major order and carry a detected symmetry label.
pub fn free_polyominoes(n: usize) -> Result<Vec<Shape>> {
    if n < 1 {
        return Err(Error::InvalidShape(
            "polyominoes need at least one cell".to_string(),
        ));
    }
    let mut generation: BTreeSet<Key> = BTreeSet::from([vec![(0, 0)]]);
    for size in 2..=n {
        let mut next = BTreeSet::new();
        for key in &generation {
            for &(r, c) in key {
                for nb in neighbors(IVec2::new(r, c)) {
                    let cell = (nb.x, nb.y);
                    if key.contains(&cell) {
                        continue;
                    }
                    let grown = normalize(key.iter().copied().chain([cell]));
                    next.insert(canonical(&grown));
                }
            }
        }
        debug!(size, count = next.len(), "Grew polyomino generation");
        generation = next;
    }

    generation
        .into_iter()
        .map(|key| {
            Shape::with_detected_symmetry(key.into_iter().map(|(r, c)| IVec2::new(r, c)).collect())
        })
        .collect()
}

/// True for shapes whose cells form an unbranched chain (or cycle) but not a straight bar.
fn is_degenerate_line(shape: &Shape) -> bool {
    let n = shape.len();
    let (h, w) = shape.bounding_box();
    let straight = (h == n && w == 1) || (w == n && h == 1);
    let unbranched = shape.cells().iter().all(|&c| shape.degree(c) <= 2);
    unbranched && !straight
}

/// Free polyominoes of `config.cells` cells, filtered per `config`.
pub fn catalog(config: &CatalogConfig) -> Result<Vec<Shape>> {
    let mut shapes = free_polyominoes(config.cells)?;
    info!(cells = config.cells, count = shapes.len(), "Free polyominoes");
    if config.symmetric_only {
        shapes.retain(Shape::is_symmetric);
        info!(count = shapes.len(), "Symmetric polyominoes");
    }
    if config.exclude_line {
        shapes.retain(|s| !is_degenerate_line(s));
        info!(count = shapes.len(), "Excluding line polyominoes");
    }
    Ok(shapes)
}

/// Picks one shape uniformly with the caller's generator, or `None` if `shapes` is empty.
pub fn pick<'a, R: Rng>(shapes: &'a [Shape], rng: &mut R) -> Option<&'a Shape> {
    if shapes.is_empty() {
        return None;
    }
    shapes.get(rng.gen_range(0..shapes.len()))
}
