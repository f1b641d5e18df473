//! Region data model: one record per African region with its exterior
//! rings and the 2020-2022 emission statistics, plus the ordered catalog
//! that backs the all-regions chart.

/// The three fixed reporting years
pub const YEARS: [&str; 3] = ["2020", "2021", "2022"];

/// A closed sequence of lon/lat coordinates (exterior ring of a polygon)
pub type Ring = Vec<(f64, f64)>;

/// One region feature, immutable once loaded.
///
/// Missing or malformed source properties are normalized at load time:
/// absent year values and unparsable percentages become 0, a missing
/// description becomes the empty string.
#[derive(Clone, Debug)]
pub struct Region {
    /// `Region_1` name
    pub name: String,
    /// `fid` classification code, keys the 5-entry color ramp
    pub fid: Option<u32>,
    /// Exterior rings (1 for Polygon, N for MultiPolygon)
    pub rings: Vec<Ring>,
    /// Emissions in million tonnes per year
    pub values: [f64; 3],
    /// Per-year percentage shares used for proportional sizing
    pub percents: [f64; 3],
    /// Free-text description (`Desc`)
    pub description: String,
    /// Label anchor from the centroid selector
    pub anchor: (f64, f64),
}

/// A country-border overlay feature
#[derive(Clone, Debug)]
pub struct Country {
    pub name: String,
    pub rings: Vec<Ring>,
}

/// The full ordered sequence of regions, built once at load time.
/// Source of the all-regions stacked chart view.
#[derive(Clone, Debug, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Lon/lat bounding box per region, for the spatial hit-test grid
    pub fn bboxes(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.regions.iter().map(|r| {
            let mut min_lon = f64::MAX;
            let mut min_lat = f64::MAX;
            let mut max_lon = f64::MIN;
            let mut max_lat = f64::MIN;
            for ring in &r.rings {
                for &(lon, lat) in ring {
                    min_lon = min_lon.min(lon);
                    min_lat = min_lat.min(lat);
                    max_lon = max_lon.max(lon);
                    max_lat = max_lat.max(lat);
                }
            }
            (min_lon, min_lat, max_lon, max_lat)
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Square region centered on (cx, cy) with side 2*half
    pub fn square_region(name: &str, fid: u32, cx: f64, cy: f64, half: f64, values: [f64; 3]) -> Region {
        let ring = vec![
            (cx - half, cy - half),
            (cx + half, cy - half),
            (cx + half, cy + half),
            (cx - half, cy + half),
            (cx - half, cy - half),
        ];
        Region {
            name: name.to_string(),
            fid: Some(fid),
            rings: vec![ring],
            values,
            percents: [10.0, 20.0, 30.0],
            description: String::new(),
            anchor: (cx, cy),
        }
    }

    pub fn three_region_catalog() -> RegionCatalog {
        RegionCatalog::new(vec![
            square_region("North", 1, 10.0, 25.0, 4.0, [100.0, 110.0, 120.0]),
            square_region("Central", 2, 15.0, 0.0, 4.0, [50.0, 55.0, 60.0]),
            square_region("South", 3, 25.0, -25.0, 4.0, [80.0, 70.0, 90.0]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::three_region_catalog;

    #[test]
    fn bboxes_cover_rings() {
        let catalog = three_region_catalog();
        let boxes: Vec<_> = catalog.bboxes().collect();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0], (6.0, 21.0, 14.0, 29.0));
    }
}
