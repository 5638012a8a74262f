use super::types::{Color, Scalar};

const DEFAULT_OPACITY: f64 = 1.0;

/// Convert a packed 0xRRGGBB color plus a separate opacity into RGBA.
///
/// Only the low 24 bits are used; negative or oversized values wrap like an
/// unsigned 32-bit coercion. A missing opacity means fully opaque.
pub fn convert_color(packed: i64, opacity: Option<f64>) -> Color {
    let rgb = (packed as u32) & 0x00FF_FFFF;

    Color {
        r: ((rgb >> 16) & 0xFF) as u8,
        g: ((rgb >> 8) & 0xFF) as u8,
        b: (rgb & 0xFF) as u8,
        a: Scalar(opacity.unwrap_or(DEFAULT_OPACITY)),
    }
}

/// Convert a color read from the input, where colors arrive as plain numbers
pub fn convert_scalar_color(packed: Scalar, opacity: Option<f64>) -> Color {
    convert_color(packed.value() as i64, opacity)
}
