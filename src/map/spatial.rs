use std::collections::HashMap;

/// Spatial index for region features using conservative approximation.
/// Each feature's bounding box is indexed into every cell it overlaps,
/// guaranteeing no false negatives while allowing false positives
/// (eliminated by the downstream point-in-ring test).
pub struct FeatureGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl FeatureGrid {
    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon / self.cell_size).floor() as i32;
        let y = (lat / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Build from feature bounding boxes (each feature inserted into
    /// every cell its bbox overlaps)
    pub fn build(bboxes: impl Iterator<Item = (f64, f64, f64, f64)>, cell_size: f64) -> Self {
        let mut grid = Self {
            cells: HashMap::new(),
            cell_size,
        };
        for (idx, (min_lon, min_lat, max_lon, max_lat)) in bboxes.enumerate() {
            let min_cell = grid.to_cell(min_lon, min_lat);
            let max_cell = grid.to_cell(max_lon, max_lat);
            for y in min_cell.1..=max_cell.1 {
                for x in min_cell.0..=max_cell.0 {
                    grid.cells.entry((x, y)).or_default().push(idx);
                }
            }
        }
        grid
    }

    /// Candidate feature indices whose bbox cell contains the point.
    /// Preserves insertion order so the first-rendered feature wins ties.
    pub fn candidates_at(&self, lon: f64, lat: f64) -> &[usize] {
        self.cells
            .get(&self.to_cell(lon, lat))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_found_in_overlapped_cells() {
        let boxes = vec![(0.0, 0.0, 9.0, 9.0), (20.0, 20.0, 29.0, 29.0)];
        let grid = FeatureGrid::build(boxes.into_iter(), 5.0);

        assert_eq!(grid.candidates_at(3.0, 3.0), &[0]);
        assert_eq!(grid.candidates_at(8.0, 8.0), &[0]);
        assert_eq!(grid.candidates_at(25.0, 25.0), &[1]);
        assert!(grid.candidates_at(50.0, 50.0).is_empty());
    }

    #[test]
    fn overlapping_features_keep_insertion_order() {
        let boxes = vec![(0.0, 0.0, 4.0, 4.0), (0.0, 0.0, 4.0, 4.0)];
        let grid = FeatureGrid::build(boxes.into_iter(), 10.0);
        assert_eq!(grid.candidates_at(1.0, 1.0), &[0, 1]);
    }
}
