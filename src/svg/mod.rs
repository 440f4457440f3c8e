//! SVG templating: document tree, cell embedding, grid placement.

pub mod document;
pub mod embed;
pub mod grid;

pub use document::{Attribute, Document, Element, Node, XLINK_NS};
pub use embed::{embed_cell, EmbeddedCell, CELL_SIZE};
pub use grid::{cell_id, grid_position, place_cells, Origin};
