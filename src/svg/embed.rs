//! Cell embedding: one character cell rendered into its own SVG, encoded
//! as a data URI for an `<image>` reference on the card.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::TemplateError;
use crate::tables::CharCell;

use super::document::Document;

/// Width and height of a cell on the card grid, in user units.
pub const CELL_SIZE: f64 = 42.333332;

/// Placeholder ids in the cell template.
pub const CENTER_ID: &str = "text0";
pub const TOP_LEFT_ID: &str = "text1";
pub const BOTTOM_LEFT_ID: &str = "text2";
pub const BOTTOM_RIGHT_ID: &str = "text3";
pub const TOP_RIGHT_ID: &str = "text4";

/// Fallback family the text style names; an override is spliced in ahead.
const FALLBACK_FAMILY: &str = "monospace";

const SOLID_STROKE: &str = "stroke-dasharray:none;stroke-opacity:1";
const DASHED_STROKE: &str = "stroke-dasharray:4.23326016,4.23326016;stroke-opacity:1;stroke-dashoffset:0";

/// Attributes of one embedded cell image, before placement.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddedCell {
    pub width: f64,
    pub height: f64,
    /// `data:image/svg+xml;base64,...`
    pub href: String,
}

impl EmbeddedCell {
    /// Attributes in output order, `href` under the given xlink prefix.
    #[must_use]
    pub fn attributes(&self, xlink_prefix: &str) -> Vec<(String, String)> {
        vec![
            ("preserveAspectRatio".to_string(), "none".to_string()),
            ("width".to_string(), self.width.to_string()),
            ("height".to_string(), self.height.to_string()),
            (format!("{xlink_prefix}:href"), self.href.clone()),
        ]
    }
}

/// Render `cell` into a copy of `template`.
///
/// The template itself is never modified. With a font override, every text
/// style gets the family ahead of the monospace fallback. Decorated cells
/// get dashed strokes on every styled path.
pub fn embed_cell(
    template: &Document,
    cell: &CharCell,
    font: Option<&str>,
) -> Result<EmbeddedCell, TemplateError> {
    let mut doc = template.clone();

    if let Some(font) = font {
        let family = format!("{font},{FALLBACK_FAMILY}");
        doc.for_each_named("text", |el| {
            if let Some(style) = el.attr("style") {
                let rewritten = style.replace(FALLBACK_FAMILY, &family);
                el.set_attr("style", rewritten);
            }
        })?;
    }

    let center = cell.center.to_string();
    for (id, text) in [
        (CENTER_ID, center.as_str()),
        (TOP_LEFT_ID, cell.top_left),
        (BOTTOM_LEFT_ID, cell.bottom_left),
        (BOTTOM_RIGHT_ID, cell.bottom_right),
        (TOP_RIGHT_ID, cell.top_right),
    ] {
        doc.set_placeholder_text(id, text)?;
    }

    if cell.decorated {
        doc.for_each_named("path", |el| {
            if let Some(style) = el.attr("style") {
                let rewritten = style.replace(SOLID_STROKE, DASHED_STROKE);
                el.set_attr("style", rewritten);
            }
        })?;
    }

    let bytes = doc.to_bytes()?;
    Ok(EmbeddedCell {
        width: CELL_SIZE,
        height: CELL_SIZE,
        href: format!("data:image/svg+xml;base64,{}", STANDARD.encode(bytes)),
    })
}
