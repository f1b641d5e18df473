//! Polygon rasterization and geographic helpers: Bresenham outlines,
//! scanline fills, point-in-ring tests, and the label-anchor selector.

use anyhow::{bail, Result};

use crate::braille::BrailleCanvas;
use crate::catalog::Ring;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a thicker line (hovered region outlines)
pub fn draw_thick_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    draw_line(canvas, x0, y0, x1, y1);
    draw_line(canvas, x0 + 1, y0, x1 + 1, y1);
    draw_line(canvas, x0, y0 + 1, x1, y1 + 1);
}

/// Draw a filled circle (proportional symbols)
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

/// Fill a polygon given its projected outline, even-odd rule.
/// Scanlines sample at pixel centers (y + 0.5) so edges landing exactly
/// on a pixel row don't double-count vertices.
pub fn fill_polygon(canvas: &mut BrailleCanvas, points: &[(i32, i32)]) {
    if points.len() < 3 {
        return;
    }

    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let max_y = points
        .iter()
        .map(|p| p.1)
        .max()
        .unwrap_or(0)
        .min(canvas.pixel_height() as i32 - 1);

    let mut crossings: Vec<f64> = Vec::new();

    for y in min_y..=max_y {
        let yc = y as f64 + 0.5;
        crossings.clear();

        for i in 0..points.len() {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % points.len()];
            let (y0, y1f) = (y0 as f64, y1 as f64);
            if (y0 > yc) != (y1f > yc) {
                let t = (yc - y0) / (y1f - y0);
                crossings.push(x0 as f64 + t * (x1 - x0) as f64);
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            canvas.fill_span(y, pair[0].round() as i32, pair[1].round() as i32);
        }
    }
}

/// Ray-cast point-in-ring test (even-odd)
pub fn point_in_ring(lon: f64, lat: f64, ring: &Ring) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        let intersect =
            ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi + 1e-12) + xi);
        if intersect {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Bounding box of a ring as (min_lon, min_lat, max_lon, max_lat)
pub fn ring_bbox(ring: &Ring) -> Option<(f64, f64, f64, f64)> {
    let mut iter = ring.iter();
    let &(first_lon, first_lat) = iter.next()?;
    let mut bbox = (first_lon, first_lat, first_lon, first_lat);
    for &(lon, lat) in iter {
        bbox.0 = bbox.0.min(lon);
        bbox.1 = bbox.1.min(lat);
        bbox.2 = bbox.2.max(lon);
        bbox.3 = bbox.3.max(lat);
    }
    Some(bbox)
}

/// Pick one representative point for label placement.
///
/// Each ring is scored by the lon/lat rectangle area of its bounding box
/// (a proxy, not true area; fine for regional label placement). The
/// strictly largest ring wins, ties go to the first-encountered ring,
/// and the anchor is that ring's bounding-box center.
pub fn label_anchor(rings: &[Ring]) -> Result<(f64, f64)> {
    let mut best: Option<((f64, f64, f64, f64), f64)> = None;

    for ring in rings {
        let Some(bbox) = ring_bbox(ring) else {
            continue;
        };
        let area = (bbox.3 - bbox.1) * (bbox.2 - bbox.0);
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((bbox, area)),
        }
    }

    match best {
        Some(((min_lon, min_lat, max_lon, max_lat), _)) => {
            Ok(((min_lon + max_lon) / 2.0, (min_lat + max_lat) / 2.0))
        }
        None => bail!("feature has no geometry"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_ring(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Ring {
        vec![
            (min_lon, min_lat),
            (max_lon, min_lat),
            (max_lon, max_lat),
            (min_lon, max_lat),
            (min_lon, min_lat),
        ]
    }

    #[test]
    fn anchor_of_single_ring_is_bbox_center() {
        let anchor = label_anchor(&[rect_ring(0.0, 0.0, 10.0, 4.0)]).unwrap();
        assert_eq!(anchor, (5.0, 2.0));
    }

    #[test]
    fn anchor_picks_largest_proxy_area_ring() {
        let small = rect_ring(100.0, 100.0, 101.0, 101.0);
        let large = rect_ring(-10.0, -10.0, 10.0, 10.0);
        let anchor = label_anchor(&[small, large]).unwrap();
        assert_eq!(anchor, (0.0, 0.0));
    }

    #[test]
    fn anchor_tie_resolves_to_first_ring() {
        let first = rect_ring(0.0, 0.0, 2.0, 2.0);
        let second = rect_ring(50.0, 50.0, 52.0, 52.0);
        let anchor = label_anchor(&[first, second]).unwrap();
        assert_eq!(anchor, (1.0, 1.0));
    }

    #[test]
    fn anchor_of_empty_geometry_is_an_error() {
        assert!(label_anchor(&[]).is_err());
        assert!(label_anchor(&[vec![]]).is_err());
    }

    #[test]
    fn point_in_ring_basic() {
        let ring = rect_ring(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_ring(5.0, 5.0, &ring));
        assert!(!point_in_ring(15.0, 5.0, &ring));
        assert!(!point_in_ring(5.0, -1.0, &ring));
    }

    #[test]
    fn fill_polygon_fills_interior() {
        let mut canvas = BrailleCanvas::new(4, 2);
        // Rectangle over the 8x8 pixel canvas; pixel-center sampling
        // leaves the final row (y=7.5) outside the polygon
        fill_polygon(&mut canvas, &[(0, 0), (7, 0), (7, 7), (0, 7)]);
        assert_eq!(canvas.to_string(), "⣿⣿⣿⣿\n⠿⠿⠿⠿");
    }

    #[test]
    fn fill_polygon_ignores_degenerate_input() {
        let mut canvas = BrailleCanvas::new(2, 1);
        fill_polygon(&mut canvas, &[(0, 0), (3, 3)]);
        assert_eq!(canvas.to_string(), "⠀⠀");
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        let s = canvas.to_string();
        assert!(s.contains('⠉'));
    }
}
