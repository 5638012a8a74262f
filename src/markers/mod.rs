//! Dynmap to BlueMap marker conversion module
//!
//! This module parses Dynmap `markers.yml` marker configurations and
//! converts them to BlueMap `marker-sets` JSON.
//!
//! The conversion process:
//! 1. Validate options and parse the YAML input
//! 2. Flatten sets and marker categories into named records
//! 3. Filter sets by name and markers by world
//! 4. Convert points, lines and areas (colors, outlines, icons)
//! 5. Re-key the survivors and render them with a stats report

pub mod color;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod options;
pub mod parser;
pub mod records;
pub mod stats;
pub mod types;
pub mod writer;

// Re-export main public API
pub use color::convert_color;
pub use convert::{Conversion, convert, convert_to_string};
pub use error::{ConvertError, Location};
pub use geometry::{expand_rectangle, zip_coordinates};
pub use options::{ConvertOptions, IconAnchors, parse_excluded_sets};
pub use parser::parse_input;
pub use records::{Named, flatten, unflatten};
pub use stats::{Counts, Stats};
pub use types::*;
pub use writer::render_output;
