//! Categorical color cycle for group series.
//!
//! Group `i` gets `colors[i % len]`, so colors depend only on group order.

use tracing::warn;

/// Default cycle (the familiar ten-color categorical set, C0 through C9).
pub const DEFAULT_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// An ordered list of RGB colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_colors()
    }
}

impl Palette {
    /// Build a palette from hex strings, skipping invalid entries.
    /// Falls back to the default cycle when nothing valid remains.
    pub fn from_hex<'a, I>(hex_colors: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let colors: Vec<[u8; 3]> = hex_colors
            .into_iter()
            .filter_map(|hex| {
                let parsed = parse_hex_color(hex);
                if parsed.is_none() {
                    warn!("Ignoring invalid palette color '{}'", hex);
                }
                parsed
            })
            .collect();

        if colors.is_empty() {
            return Self::default_colors();
        }
        Self { colors }
    }

    fn default_colors() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .filter_map(|hex| parse_hex_color(hex))
                .collect(),
        }
    }

    /// Color for the group at `index`, wrapping around.
    pub fn color(&self, index: usize) -> [u8; 3] {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

/// Parse `#rrggbb` (or `#rrggbbaa`, alpha ignored) into RGB.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim().trim_start_matches('#');

    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Format an RGB triple as `#rrggbb`.
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1f77b4"), Some([0x1f, 0x77, 0xb4]));
        assert_eq!(parse_hex_color("ff0000ff"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn test_color_wraps_around() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.color(0), palette.color(10));
        assert_ne!(palette.color(0), palette.color(1));
    }

    #[test]
    fn test_custom_palette_skips_invalid() {
        let palette = Palette::from_hex(["#000000", "nope", "#ffffff"]);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color(1), [255, 255, 255]);
        assert_eq!(palette.color(2), [0, 0, 0]);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let palette = Palette::from_hex(Vec::<&str>::new());
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([0x1f, 0x77, 0xb4]), "#1f77b4");
    }
}
