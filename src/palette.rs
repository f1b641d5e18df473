//! Fixed color palettes shared by the choropleth fill, the chart series,
//! and the proportional-symbol panel.

use ratatui::style::Color;

/// 24-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Scale toward black by an opacity factor in [0, 1].
    /// Terminal cells have no alpha channel, so fill opacity is
    /// approximated by dimming the fill color.
    pub fn dim(self, opacity: f64) -> Rgb {
        let f = opacity.clamp(0.0, 1.0);
        Rgb(
            (self.0 as f64 * f) as u8,
            (self.1 as f64 * f) as u8,
            (self.2 as f64 * f) as u8,
        )
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

/// Classification ramp, keyed by region `fid` 1..=5.
/// Also used as the series palette for the all-regions chart
/// (indexed by catalog position modulo 5).
pub const CLASS_RAMP: [Rgb; 5] = [
    Rgb(179, 226, 205), // #B3E2CD
    Rgb(253, 205, 172), // #FDCDAC
    Rgb(215, 176, 158), // #D7B09E
    Rgb(244, 241, 234), // #F4F1EA
    Rgb(230, 245, 201), // #E6F5C9
];

/// Fallback when a region's classification code is absent or unknown
pub const NEUTRAL: Rgb = Rgb(192, 192, 192); // #C0C0C0

/// One color per reporting year for the single-region chart
pub const YEAR_COLORS: [Rgb; 3] = [
    Rgb(253, 141, 60), // #FD8D3C
    Rgb(227, 26, 28),  // #E31A1C
    Rgb(128, 0, 38),   // #800026
];

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);

/// Country-borders overlay color
pub const BORDER_ORANGE: Rgb = Rgb(236, 105, 47); // #ec692f

/// Choropleth fill for a region's classification code
pub fn class_fill(fid: Option<u32>) -> Rgb {
    match fid {
        Some(n @ 1..=5) => CLASS_RAMP[(n - 1) as usize],
        _ => NEUTRAL,
    }
}

/// Series color for the all-regions chart, by catalog position
pub fn series_color(index: usize) -> Rgb {
    CLASS_RAMP[index % CLASS_RAMP.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_fill_maps_known_codes() {
        assert_eq!(class_fill(Some(1)), Rgb(179, 226, 205));
        assert_eq!(class_fill(Some(5)), Rgb(230, 245, 201));
    }

    #[test]
    fn class_fill_defaults_to_neutral() {
        assert_eq!(class_fill(None), NEUTRAL);
        assert_eq!(class_fill(Some(0)), NEUTRAL);
        assert_eq!(class_fill(Some(9)), NEUTRAL);
    }

    #[test]
    fn series_palette_wraps() {
        assert_eq!(series_color(0), CLASS_RAMP[0]);
        assert_eq!(series_color(5), CLASS_RAMP[0]);
        assert_eq!(series_color(7), CLASS_RAMP[2]);
    }

    #[test]
    fn dim_scales_channels() {
        assert_eq!(Rgb(200, 100, 50).dim(0.5), Rgb(100, 50, 25));
        assert_eq!(WHITE.dim(1.0), WHITE);
    }
}
