//! # marker-convert
//!
//! A Rust library for converting Minecraft web-map marker configurations.
//!
//! ## Features
//!
//! - **Dynmap to BlueMap**: Convert Dynmap `markers.yml` marker sets (points,
//!   lines and areas) to BlueMap `marker-sets` JSON
//! - **Filtering**: Keep a single world and drop unwanted marker sets
//! - **Report**: Counts, warnings and errors appended as a comment block
//!
//! ## Example
//!
//! ```rust,ignore
//! use marker_convert::markers::{ConvertOptions, convert_to_string};
//!
//! let yaml = std::fs::read_to_string("markers.yml").unwrap();
//! let options = ConvertOptions {
//!     world: Some("world".to_string()),
//!     icon_template: "assets/%icon%.png".to_string(),
//!     ..Default::default()
//! };
//! let output = convert_to_string(&yaml, &options).unwrap();
//! std::fs::write("marker-sets.conf", output).unwrap();
//! ```

pub mod markers;

// Re-export commonly used items
pub use markers::{Conversion, ConvertError, ConvertOptions, convert, convert_to_string};
