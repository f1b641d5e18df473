use ratatui::style::Color;

use super::geometry::{draw_line, draw_thick_line, fill_polygon, point_in_ring};
use super::projection::Viewport;
use super::spatial::FeatureGrid;
use crate::braille::BrailleCanvas;
use crate::catalog::{Country, Region, RegionCatalog, Ring};
use crate::style;

/// Hit-test grid cell size in degrees; regions span several degrees each
const GRID_CELL_DEGREES: f64 = 5.0;

/// Display settings for map layers
#[derive(Clone)]
pub struct DisplaySettings {
    pub show_borders: bool,
    pub show_labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_borders: false,
            show_labels: true,
        }
    }
}

/// One region rendered as a fill layer plus an outline layer, each
/// tinted by the computed style
pub struct RegionLayer {
    pub fill: BrailleCanvas,
    pub outline: BrailleCanvas,
    pub fill_color: Color,
    pub stroke_color: Color,
}

/// Per-frame render output: colored canvases back-to-front plus label
/// positions in character coordinates
pub struct MapLayers {
    pub regions: Vec<RegionLayer>,
    pub borders: BrailleCanvas,
    pub labels: Vec<(u16, u16, String)>,
}

/// Choropleth renderer over the region catalog with an optional
/// country-borders overlay
pub struct MapRenderer {
    catalog: RegionCatalog,
    countries: Vec<Country>,
    grid: FeatureGrid,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new(catalog: RegionCatalog, countries: Vec<Country>) -> Self {
        let grid = FeatureGrid::build(catalog.bboxes(), GRID_CELL_DEGREES);
        Self {
            catalog,
            countries,
            grid,
            settings: DisplaySettings::default(),
        }
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn has_data(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Toggle the country-borders overlay
    pub fn toggle_borders(&mut self) {
        self.settings.show_borders = !self.settings.show_borders;
    }

    /// Toggle region name labels
    pub fn toggle_labels(&mut self) {
        self.settings.show_labels = !self.settings.show_labels;
    }

    /// Region under the given geographic point, if any.
    /// Grid candidates keep catalog order, so overlap ties go to the
    /// first-loaded region.
    pub fn hit_test(&self, lon: f64, lat: f64) -> Option<usize> {
        for &idx in self.grid.candidates_at(lon, lat) {
            if let Some(region) = self.catalog.get(idx) {
                if region.rings.iter().any(|ring| point_in_ring(lon, lat, ring)) {
                    return Some(idx);
                }
            }
        }
        None
    }

    /// Render all map layers for a frame. `hovered` selects the
    /// emphasized style for at most one region.
    pub fn render(
        &self,
        width: usize,
        height: usize,
        viewport: &Viewport,
        hovered: Option<usize>,
    ) -> MapLayers {
        let mut layers = MapLayers {
            regions: Vec::with_capacity(self.catalog.len()),
            borders: BrailleCanvas::new(width, height),
            labels: Vec::new(),
        };

        for (idx, region) in self.catalog.regions().iter().enumerate() {
            layers
                .regions
                .push(self.render_region(region, width, height, viewport, hovered == Some(idx)));

            if self.settings.show_labels {
                let (px, py) = viewport.project(region.anchor.0, region.anchor.1);
                if viewport.is_visible(px, py) && px >= 0 && py >= 0 {
                    // Center the label on the anchor
                    let char_x = (px / 2).saturating_sub(region.name.chars().count() as i32 / 2);
                    let char_y = py / 4;
                    layers
                        .labels
                        .push((char_x.max(0) as u16, char_y as u16, region.name.clone()));
                }
            }
        }

        if self.settings.show_borders {
            for country in &self.countries {
                for ring in &country.rings {
                    draw_ring_outline(&mut layers.borders, ring, viewport, false);
                }
            }
        }

        layers
    }

    fn render_region(
        &self,
        region: &Region,
        width: usize,
        height: usize,
        viewport: &Viewport,
        hovered: bool,
    ) -> RegionLayer {
        let style = style::compute(region.fid, hovered);
        let mut fill = BrailleCanvas::new(width, height);
        let mut outline = BrailleCanvas::new(width, height);

        for ring in &region.rings {
            let projected: Vec<(i32, i32)> = ring
                .iter()
                .map(|&(lon, lat)| viewport.project(lon, lat))
                .collect();
            if projected
                .iter()
                .any(|&(px, py)| viewport.line_might_be_visible((px, py), (px, py)))
            {
                fill_polygon(&mut fill, &projected);
            }
            draw_ring_outline(&mut outline, ring, viewport, style.weight > 1);
        }

        RegionLayer {
            fill,
            outline,
            fill_color: style.fill.dim(style.fill_opacity).to_color(),
            stroke_color: style.stroke.dim(style.opacity).to_color(),
        }
    }
}

/// Draw a ring outline with viewport culling
fn draw_ring_outline(canvas: &mut BrailleCanvas, ring: &Ring, viewport: &Viewport, thick: bool) {
    if ring.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in ring {
        let (px, py) = viewport.project(lon, lat);

        if let Some((prev_x, prev_y)) = prev {
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                if thick {
                    draw_thick_line(canvas, prev_x, prev_y, px, py);
                } else {
                    draw_line(canvas, prev_x, prev_y, px, py);
                }
            }
        }

        prev = Some((px, py));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::three_region_catalog;

    fn renderer() -> MapRenderer {
        MapRenderer::new(three_region_catalog(), Vec::new())
    }

    #[test]
    fn hit_test_finds_containing_region() {
        let r = renderer();
        assert_eq!(r.hit_test(10.0, 25.0), Some(0));
        assert_eq!(r.hit_test(15.0, 0.5), Some(1));
        assert_eq!(r.hit_test(25.0, -25.0), Some(2));
    }

    #[test]
    fn hit_test_misses_outside_all_regions() {
        let r = renderer();
        assert_eq!(r.hit_test(-20.0, 35.0), None);
        // inside region 0's grid cell but outside its ring
        assert_eq!(r.hit_test(10.0, 20.0), None);
    }

    #[test]
    fn render_emits_one_layer_per_region() {
        let r = renderer();
        let viewport = Viewport::africa(160, 96);
        let layers = r.render(80, 24, &viewport, None);
        assert_eq!(layers.regions.len(), 3);
        assert_eq!(layers.labels.len(), 3);
    }

    #[test]
    fn hovered_region_gets_emphasized_stroke() {
        let r = renderer();
        let viewport = Viewport::africa(160, 96);
        let layers = r.render(80, 24, &viewport, Some(1));
        assert_eq!(layers.regions[1].stroke_color, Color::Rgb(255, 255, 255));
        assert_eq!(layers.regions[0].stroke_color, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn empty_catalog_has_no_data() {
        let r = MapRenderer::new(RegionCatalog::default(), Vec::new());
        assert!(!r.has_data());
        assert_eq!(r.hit_test(0.0, 0.0), None);
    }
}
