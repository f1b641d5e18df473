//! Proportional symbol generator: per-year scaled indicators for the
//! selected region.

use crate::catalog::{Region, YEARS};
use crate::palette::{self, Rgb};

const SCALE_FACTOR: f64 = 3.5;
const MIN_SIZE: f64 = 130.0;

/// One sized indicator for a single year
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolCircle {
    pub year: &'static str,
    /// Percentage share for the year (unparsable source values are 0)
    pub value: f64,
    /// Display diameter in abstract units
    pub size: f64,
}

/// Self-contained panel for the selected region
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolPanel {
    pub title: String,
    pub description: String,
    pub fill: Rgb,
    pub circles: [SymbolCircle; 3],
}

/// Linear scale with a floor clamp so near-zero values remain visible.
pub fn circle_size(value: f64) -> f64 {
    (value * SCALE_FACTOR).max(MIN_SIZE)
}

/// Build the symbol panel for a region.
pub fn generate(region: &Region) -> SymbolPanel {
    let circles = std::array::from_fn(|i| {
        let value = region.percents[i];
        SymbolCircle {
            year: YEARS[i],
            value,
            size: circle_size(value),
        }
    });

    SymbolPanel {
        title: region.name.clone(),
        description: region.description.clone(),
        fill: palette::class_fill(region.fid),
        circles,
    }
}
