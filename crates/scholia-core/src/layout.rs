//! Fallback placement for annotations that carry no stored position.
//!
//! This is an index-based grid, not text anchoring: the n-th annotation on a
//! page always lands in the n-th grid cell, whatever the page content.

use crate::annotation::{Annotation, Position};

pub const GRID_COLUMNS: usize = 3;
pub const GRID_ORIGIN: Position = Position { x: 40.0, y: 80.0 };
pub const CELL_WIDTH: f64 = 220.0;
pub const CELL_HEIGHT: f64 = 140.0;

/// Grid cell for the annotation at `index` in its page-scoped list.
pub fn fallback_position(index: usize) -> Position {
  let col = (index % GRID_COLUMNS) as f64;
  let row = (index / GRID_COLUMNS) as f64;
  Position {
    x: GRID_ORIGIN.x + col * CELL_WIDTH,
    y: GRID_ORIGIN.y + row * CELL_HEIGHT,
  }
}

/// The stored position, or the grid cell for `index` when there is none.
pub fn resolve_position(annotation: &Annotation, index: usize) -> Position {
  annotation
    .position
    .unwrap_or_else(|| fallback_position(index))
}

/// Pair each annotation of a page with where it should be drawn.
///
/// `page` must be the page-scoped list in insertion order, as returned by
/// [`crate::annotation::AnnotationBook::by_page`].
pub fn layout_page<'a>(page: &[&'a Annotation]) -> Vec<(&'a Annotation, Position)> {
  page
    .iter()
    .enumerate()
    .map(|(i, a)| (*a, resolve_position(a, i)))
    .collect()
}
