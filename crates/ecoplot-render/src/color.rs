//! Hex color parsing.

use ecoplot_types::ColorMap;
use plotters::style::RGBColor;

use crate::error::RenderError;

/// Parse a `#rrggbb` or `#rgb` color. The leading `#` is optional.
pub fn parse_hex_color(color: &str) -> Option<RGBColor> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(RGBColor(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let mut digits = hex.chars().map(|c| channel(&format!("{c}{c}")));
            Some(RGBColor(digits.next()??, digits.next()??, digits.next()??))
        }
        _ => None,
    }
}

/// Check that every configured color can be drawn.
///
/// Lets callers reject a bad configuration before running a simulation
/// whose output could not be charted.
pub fn check_colors(colors: &ColorMap) -> Result<(), RenderError> {
    for (name, color) in colors.iter() {
        if parse_hex_color(color).is_none() {
            return Err(RenderError::InvalidColor {
                name: name.to_owned(),
                color: color.to_owned(),
            });
        }
    }
    Ok(())
}

fn channel(pair: &str) -> Option<u8> {
    u8::from_str_radix(pair, 16).ok()
}
