//! Chart projection: maps selection state onto the chart's data model.
//!
//! `project` is a pure function of the catalog and the selection. The
//! model is rebuilt wholesale on every call rather than patched, so a
//! stale series can never linger across selection changes.

use crate::catalog::{RegionCatalog, YEARS};
use crate::palette::{self, Rgb, YEAR_COLORS};

/// How a series is painted: one color for the whole series (all-regions
/// view) or one color per year (single-region view).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Uniform(Rgb),
    ByYear([Rgb; 3]),
}

impl Paint {
    /// Color of the bar for year index `year` (0..3)
    pub fn for_year(&self, year: usize) -> Rgb {
        match self {
            Paint::Uniform(c) => *c,
            Paint::ByYear(cs) => cs[year.min(2)],
        }
    }
}

/// One labeled series of three yearly values
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: [f64; 3],
    pub paint: Paint,
}

/// Everything the chart widget needs to draw itself
#[derive(Clone, Debug, PartialEq)]
pub struct ChartModel {
    pub title: String,
    pub labels: [&'static str; 3],
    pub series: Vec<Series>,
    pub legend: bool,
}

/// Project the selection onto a chart model.
///
/// No selection: one series per catalog region, palette color by
/// position, legend shown. Selection: exactly one series with the
/// region's values, painted per year, legend hidden.
pub fn project(catalog: &RegionCatalog, selection: Option<usize>) -> ChartModel {
    match selection.and_then(|i| catalog.get(i)) {
        Some(region) => ChartModel {
            title: format!("{} CO₂ Statistics", region.name),
            labels: YEARS,
            series: vec![Series {
                name: format!("Emissions for {}", region.name),
                values: region.values,
                paint: Paint::ByYear(YEAR_COLORS),
            }],
            legend: false,
        },
        None => ChartModel {
            title: "Total CO₂ Emissions by Region (2020-2022)".to_string(),
            labels: YEARS,
            series: catalog
                .regions()
                .iter()
                .enumerate()
                .map(|(i, region)| Series {
                    name: region.name.clone(),
                    values: region.values,
                    paint: Paint::Uniform(palette::series_color(i)),
                })
                .collect(),
            legend: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::three_region_catalog;
    use crate::select::SelectionState;

    #[test]
    fn unselected_yields_one_series_per_region() {
        let catalog = three_region_catalog();
        let model = project(&catalog, None);
        assert_eq!(model.series.len(), catalog.len());
        assert!(model.legend);
        assert_eq!(model.labels, ["2020", "2021", "2022"]);
        assert_eq!(model.series[0].paint, Paint::Uniform(palette::CLASS_RAMP[0]));
        assert_eq!(model.series[1].values, [50.0, 55.0, 60.0]);
    }

    #[test]
    fn selected_yields_exactly_one_series() {
        let catalog = three_region_catalog();
        let model = project(&catalog, Some(2));
        assert_eq!(model.series.len(), 1);
        assert!(!model.legend);
        assert_eq!(model.series[0].values, [80.0, 70.0, 90.0]);
        assert_eq!(model.series[0].name, "Emissions for South");
        assert_eq!(model.series[0].paint, Paint::ByYear(YEAR_COLORS));
        assert_eq!(model.title, "South CO₂ Statistics");
    }

    #[test]
    fn out_of_range_selection_falls_back_to_all_regions() {
        let catalog = three_region_catalog();
        let model = project(&catalog, Some(99));
        assert_eq!(model.series.len(), 3);
    }

    #[test]
    fn select_then_close_restores_exact_stacked_model() {
        let catalog = three_region_catalog();
        let mut selection = SelectionState::new();

        let before = project(&catalog, selection.selected());

        selection.click(1);
        let during = project(&catalog, selection.selected());
        assert_eq!(during.series.len(), 1);

        selection.close();
        let after = project(&catalog, selection.selected());
        assert_eq!(before, after);
    }
}
