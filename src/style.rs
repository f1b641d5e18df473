//! Pure region styling: `compute(fid, hovered)` decides what a region
//! looks like, the renderer decides how that gets drawn. No style is
//! ever mutated in place, so leaving hover always restores the default
//! exactly.

use crate::palette::{self, Rgb};

/// Leaflet-shaped style record for one rendered region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    /// Border weight; 1 = single-pixel outline, >1 = thick outline
    pub weight: u8,
    pub opacity: f64,
    pub fill_opacity: f64,
}

/// Style for a region given its classification code and hover state.
pub fn compute(fid: Option<u32>, hovered: bool) -> RegionStyle {
    let fill = palette::class_fill(fid);
    if hovered {
        RegionStyle {
            fill,
            stroke: palette::WHITE,
            weight: 4,
            opacity: 1.0,
            fill_opacity: 0.9,
        }
    } else {
        RegionStyle {
            fill,
            stroke: palette::BLACK,
            weight: 1,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_values() {
        let s = compute(Some(2), false);
        assert_eq!(s.weight, 1);
        assert_eq!(s.stroke, palette::BLACK);
        assert_eq!(s.fill_opacity, 0.8);
        assert_eq!(s.fill, palette::CLASS_RAMP[1]);
    }

    #[test]
    fn hover_style_values() {
        let s = compute(Some(2), true);
        assert_eq!(s.weight, 4);
        assert_eq!(s.stroke, palette::WHITE);
        assert_eq!(s.fill_opacity, 0.9);
        // hover never changes the fill color itself
        assert_eq!(s.fill, compute(Some(2), false).fill);
    }

    #[test]
    fn hover_cycles_always_revert_exactly() {
        let default = compute(None, false);
        let mut current = default;
        for _ in 0..10 {
            current = compute(None, true);
            current = compute(None, false);
        }
        assert_eq!(current, default);
    }
}
