//! Card assembly: configuration, template sources, rendering and output.

pub mod assembler;
pub mod config;
pub mod templates;

pub use assembler::{generate_card, CardAssembler, CardDocuments};
pub use config::{
    CardConfig, FontFamily, OutputPaths, CARD_BACK_TEMPLATE, CARD_FRONT_TEMPLATE, LEFT_ORIGIN,
    RESERVED_NAMES, RIGHT_ORIGIN, SERIAL_ID,
};
pub use templates::{MemoryTemplates, TemplateDir, TemplateSource};
