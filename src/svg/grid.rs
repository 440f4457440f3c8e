//! Grid placement of embedded cells on a card document.
//!
//! Column-major: index `i` lands in column `i / 5`, row `i % 5`.

use crate::tables::GRID_ROWS;

use super::document::{Document, XLINK_NS};
use super::embed::EmbeddedCell;

/// Top-left corner of a table on the card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Grid coordinates of cell `index`.
#[must_use]
pub const fn grid_position(index: usize) -> (usize, usize) {
    (index / GRID_ROWS, index % GRID_ROWS)
}

/// Element id of cell `index` in a table of `len` cells.
#[must_use]
pub fn cell_id(len: usize, index: usize) -> String {
    format!("cell{len}{index}")
}

/// Append one `<image>` per cell to the root of `doc`, offset from `origin`.
pub fn place_cells(doc: &mut Document, cells: &[EmbeddedCell], origin: Origin) {
    let xlink = doc.ensure_prefix(XLINK_NS, "xlink");
    let len = cells.len();

    for (i, cell) in cells.iter().enumerate() {
        let (col, row) = grid_position(i);
        let mut attributes = cell.attributes(&xlink);
        attributes.push(("id".to_string(), cell_id(len, i)));
        attributes.push(("x".to_string(), format!("{:.5}", origin.x + cell.width * col as f64)));
        attributes.push(("y".to_string(), format!("{:.5}", origin.y + cell.height * row as f64)));
        doc.append_to_root("image", attributes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::embed::CELL_SIZE;

    fn cells(n: usize) -> Vec<EmbeddedCell> {
        (0..n)
            .map(|i| EmbeddedCell {
                width: CELL_SIZE,
                height: CELL_SIZE,
                href: format!("data:image/svg+xml;base64,{i}"),
            })
            .collect()
    }

    #[test]
    fn test_grid_position() {
        assert_eq!(grid_position(0), (0, 0));
        assert_eq!(grid_position(4), (0, 4));
        assert_eq!(grid_position(5), (1, 0));
        assert_eq!(grid_position(49), (9, 4));
    }

    #[test]
    fn test_positions_unique() {
        let mut seen: Vec<_> = (0..50).map(grid_position).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn test_place_cells() {
        let mut doc = Document::parse_str(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        place_cells(&mut doc, &cells(15), Origin::new(10.0, 5.0));

        assert_eq!(doc.root().attr("xmlns:xlink"), Some(XLINK_NS));

        let first = doc.find_by_id("cell150").unwrap();
        assert_eq!(first.attr("x"), Some("10.00000"));
        assert_eq!(first.attr("y"), Some("5.00000"));
        assert_eq!(first.attr("width"), Some("42.333332"));
        assert_eq!(first.attr("preserveAspectRatio"), Some("none"));
        assert_eq!(first.attr("xlink:href"), Some("data:image/svg+xml;base64,0"));

        // Index 7: column 1, row 2
        let seventh = doc.find_by_id("cell157").unwrap();
        assert_eq!(seventh.attr("x"), Some("52.33333"));
        assert_eq!(seventh.attr("y"), Some("89.66666"));

        let names: Vec<_> = first.attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["preserveAspectRatio", "width", "height", "xlink:href", "id", "x", "y"]);
    }

    #[test]
    fn test_two_tables_do_not_collide() {
        let mut doc = Document::parse_str(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        place_cells(&mut doc, &cells(15), Origin::new(0.0, 0.0));
        place_cells(&mut doc, &cells(25), Origin::new(100.0, 0.0));

        let mut ids: Vec<String> = doc
            .root()
            .descendants()
            .iter()
            .filter_map(|el| el.id().map(str::to_string))
            .collect();
        assert_eq!(ids.len(), 40);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 40);
    }
}
