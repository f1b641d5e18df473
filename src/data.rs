//! GeoJSON dataset loading. Both files are static assets read once at
//! startup; missing or malformed per-feature properties degrade to
//! zero/empty values so the map stays renderable with incomplete
//! records.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geojson::{GeoJson, JsonObject, Value};
use tracing::warn;

use crate::catalog::{Country, Region, RegionCatalog, Ring, YEARS};
use crate::map::{geometry, MapRenderer};

pub const REGIONS_FILE: &str = "co2_stat_2020_to_2022_with_desc.geojson";
pub const COUNTRIES_FILE: &str = "countries_co2_2020_to_2022.geojson";

/// Load both datasets from `data_dir` and build the map renderer.
///
/// The regions file is required; the country-borders overlay is
/// optional and only logged when missing.
pub fn load_map(data_dir: &Path) -> Result<MapRenderer> {
    let regions_path = data_dir.join(REGIONS_FILE);
    let text = fs::read_to_string(&regions_path)
        .with_context(|| format!("reading {}", regions_path.display()))?;
    let catalog = parse_regions(&text)
        .with_context(|| format!("parsing {}", regions_path.display()))?;

    let countries_path = data_dir.join(COUNTRIES_FILE);
    let countries = match fs::read_to_string(&countries_path) {
        Ok(text) => match parse_countries(&text) {
            Ok(countries) => countries,
            Err(err) => {
                warn!("failed to parse {}: {err}", countries_path.display());
                Vec::new()
            }
        },
        Err(err) => {
            warn!("country borders unavailable ({}): {err}", countries_path.display());
            Vec::new()
        }
    };

    Ok(MapRenderer::new(catalog, countries))
}

/// Parse the region-statistics feature collection.
pub fn parse_regions(text: &str) -> Result<RegionCatalog> {
    let GeoJson::FeatureCollection(fc) = text.parse::<GeoJson>()? else {
        bail!("region dataset is not a FeatureCollection");
    };

    let mut regions = Vec::with_capacity(fc.features.len());

    for feature in fc.features {
        let props = feature.properties;

        let Some(name) = prop_str(props.as_ref(), "Region_1") else {
            warn!("skipping region feature without a Region_1 name");
            continue;
        };

        let rings = feature
            .geometry
            .as_ref()
            .map(|g| exterior_rings(&g.value))
            .unwrap_or_default();

        let anchor = match geometry::label_anchor(&rings) {
            Ok(anchor) => anchor,
            Err(err) => {
                warn!("skipping region {name}: {err}");
                continue;
            }
        };

        let values = std::array::from_fn(|i| prop_f64(props.as_ref(), YEARS[i]));
        let percents = std::array::from_fn(|i| {
            prop_f64(props.as_ref(), &format!("F{}_per", YEARS[i]))
        });
        let fid = props
            .as_ref()
            .and_then(|p| p.get("fid"))
            .and_then(|v| v.as_u64())
            .map(|v| v as u32);
        let description = prop_str(props.as_ref(), "Desc").unwrap_or_default();

        regions.push(Region {
            name,
            fid,
            rings,
            values,
            percents,
            description,
            anchor,
        });
    }

    Ok(RegionCatalog::new(regions))
}

/// Parse the country-borders feature collection.
pub fn parse_countries(text: &str) -> Result<Vec<Country>> {
    let GeoJson::FeatureCollection(fc) = text.parse::<GeoJson>()? else {
        bail!("country dataset is not a FeatureCollection");
    };

    Ok(fc
        .features
        .into_iter()
        .filter_map(|feature| {
            let name = prop_str(feature.properties.as_ref(), "Country")?;
            let rings = feature
                .geometry
                .as_ref()
                .map(|g| exterior_rings(&g.value))
                .unwrap_or_default();
            Some(Country { name, rings })
        })
        .collect())
}

/// Extract the exterior ring of each polygon in the geometry
fn exterior_rings(value: &Value) -> Vec<Ring> {
    match value {
        Value::Polygon(rings) => rings
            .first()
            .map(|ring| vec![to_ring(ring)])
            .unwrap_or_default(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| rings.first().map(|ring| to_ring(ring)))
            .collect(),
        _ => Vec::new(),
    }
}

fn to_ring(coords: &[Vec<f64>]) -> Ring {
    coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}

/// Numeric property; accepts numbers or numeric strings, anything else
/// is 0
fn prop_f64(props: Option<&JsonObject>, key: &str) -> f64 {
    props
        .and_then(|p| p.get(key))
        .and_then(|v| {
            v.as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .unwrap_or(0.0)
}

fn prop_str(props: Option<&JsonObject>, key: &str) -> Option<String> {
    props
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "Region_1": "Sahel", "fid": 2,
                    "2020": 100.5, "2022": 120.0,
                    "F2020_per": "12.5", "F2021_per": "n/a",
                    "Desc": "Semi-arid belt"
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,10],[10,10],[10,20],[0,20],[0,10]]]
                }
            },
            {
                "type": "Feature",
                "properties": {
                    "Region_1": "Horn"
                },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[40,0],[41,0],[41,1],[40,1],[40,0]]],
                        [[[35,-5],[45,-5],[45,10],[35,10],[35,-5]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "2020": 5 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_regions_with_defaults() {
        let catalog = parse_regions(SAMPLE).unwrap();
        // unnamed feature is skipped
        assert_eq!(catalog.len(), 2);

        let sahel = catalog.get(0).unwrap();
        assert_eq!(sahel.name, "Sahel");
        assert_eq!(sahel.fid, Some(2));
        // missing 2021 value defaults to 0
        assert_eq!(sahel.values, [100.5, 0.0, 120.0]);
        // string percentage parses; unparsable and missing become 0
        assert_eq!(sahel.percents, [12.5, 0.0, 0.0]);
        assert_eq!(sahel.description, "Semi-arid belt");
        assert_eq!(sahel.anchor, (5.0, 15.0));
    }

    #[test]
    fn multipolygon_anchor_uses_largest_ring() {
        let catalog = parse_regions(SAMPLE).unwrap();
        let horn = catalog.get(1).unwrap();
        assert_eq!(horn.rings.len(), 2);
        assert_eq!(horn.anchor, (40.0, 2.5));
        // missing Desc renders as empty, not as an error
        assert_eq!(horn.description, "");
    }

    #[test]
    fn rejects_non_feature_collection() {
        let geom_only = r#"{"type":"Point","coordinates":[0,0]}"#;
        assert!(parse_regions(geom_only).is_err());
    }

    #[test]
    fn skips_feature_without_geometry() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"Region_1": "Ghost"}, "geometry": null}
            ]
        }"#;
        let catalog = parse_regions(text).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn parses_countries() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"Country": "Kenya"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[34,-4],[42,-4],[42,5],[34,5],[34,-4]]]
                    }
                }
            ]
        }"#;
        let countries = parse_countries(text).unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name, "Kenya");
        assert_eq!(countries[0].rings[0].len(), 5);
    }
}
