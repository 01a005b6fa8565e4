//! Polygon coverage of raster cells
//!
//! Translates an AOI geometry into the set of raster cells it covers,
//! either by pixel-center test or by exact area-weighted fractional
//! overlap (Sutherland–Hodgman clipping of the polygon against each
//! cell rectangle).

use geo::{BoundingRect, Contains};
use geo_types::{Coord, Geometry, Point, Polygon};
use geozonal_core::{Raster, RasterElement};

/// One covered cell with its coverage weight.
///
/// Pixel-center engines always report weight 1.0; the area-weighted
/// engine reports the covered fraction in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoveredCell {
    pub row: usize,
    pub col: usize,
    pub weight: f64,
}

/// A cell rectangle in geographic coordinates
#[derive(Debug, Clone, Copy)]
struct CellRect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl CellRect {
    fn area(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }
}

/// Rows and columns of the grid window intersecting the geometry's
/// bounding rectangle, or None when the geometry misses the grid.
fn candidate_window<T: RasterElement>(
    geom: &Geometry<f64>,
    grid: &Raster<T>,
) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
    let rect = geom.bounding_rect()?;
    let (rows, cols) = grid.shape();
    let t = grid.transform();

    let (c0, r0) = t.geo_to_pixel(rect.min().x, rect.max().y);
    let (c1, r1) = t.geo_to_pixel(rect.max().x, rect.min().y);

    let row_start = r0.min(r1).floor().max(0.0) as usize;
    let row_end = (r0.max(r1).ceil().max(0.0) as usize).min(rows);
    let col_start = c0.min(c1).floor().max(0.0) as usize;
    let col_end = (c0.max(c1).ceil().max(0.0) as usize).min(cols);

    if row_start >= row_end || col_start >= col_end {
        return None;
    }
    Some((row_start..row_end, col_start..col_end))
}

/// Cells whose center falls inside the geometry, weight 1.0 each
pub fn center_coverage<T: RasterElement>(
    geom: &Geometry<f64>,
    grid: &Raster<T>,
) -> Vec<CoveredCell> {
    let Some((row_range, col_range)) = candidate_window(geom, grid) else {
        return Vec::new();
    };

    let mut cells = Vec::new();
    for row in row_range {
        for col in col_range.clone() {
            let (x, y) = grid.transform().pixel_to_geo(col, row);
            if geom.contains(&Point::new(x, y)) {
                cells.push(CoveredCell {
                    row,
                    col,
                    weight: 1.0,
                });
            }
        }
    }
    cells
}

/// Rasterize the geometry into a 0/1 mask by pixel-center test
pub fn rasterize_mask<T: RasterElement>(geom: &Geometry<f64>, grid: &Raster<T>) -> Raster<u8> {
    let mut mask: Raster<u8> = grid.with_same_meta();
    for cell in center_coverage(geom, grid) {
        // center_coverage only yields in-bounds cells
        unsafe { mask.set_unchecked(cell.row, cell.col, 1) };
    }
    mask
}

/// Cells the geometry overlaps, weighted by the covered area fraction.
///
/// Non-areal geometries fall back to the pixel-center test.
pub fn fraction_coverage<T: RasterElement>(
    geom: &Geometry<f64>,
    grid: &Raster<T>,
) -> Vec<CoveredCell> {
    let polygons: Vec<&Polygon<f64>> = match geom {
        Geometry::Polygon(p) => vec![p],
        Geometry::MultiPolygon(mp) => mp.0.iter().collect(),
        _ => return center_coverage(geom, grid),
    };

    let Some((row_range, col_range)) = candidate_window(geom, grid) else {
        return Vec::new();
    };

    let mut cells = Vec::new();
    for row in row_range {
        for col in col_range.clone() {
            let (min_x, min_y, max_x, max_y) = grid.transform().cell_rect(row, col);
            let rect = CellRect {
                min_x,
                min_y,
                max_x,
                max_y,
            };

            let covered: f64 = polygons.iter().map(|p| polygon_rect_area(p, &rect)).sum();
            let weight = (covered / rect.area()).clamp(0.0, 1.0);
            if weight > 0.0 {
                cells.push(CoveredCell { row, col, weight });
            }
        }
    }
    cells
}

/// Area of the polygon clipped to the rectangle: clipped exterior minus
/// clipped holes
fn polygon_rect_area(poly: &Polygon<f64>, rect: &CellRect) -> f64 {
    let outer = clipped_ring_area(&poly.exterior().0, rect);
    let holes: f64 = poly
        .interiors()
        .iter()
        .map(|ring| clipped_ring_area(&ring.0, rect))
        .sum();
    (outer - holes).max(0.0)
}

fn clipped_ring_area(ring: &[Coord<f64>], rect: &CellRect) -> f64 {
    let mut vertices: Vec<Coord<f64>> = ring.to_vec();

    // Drop the closing vertex for the clipping passes
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    for edge in [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top] {
        vertices = clip_ring_edge(&vertices, edge, rect);
        if vertices.is_empty() {
            return 0.0;
        }
    }

    ring_area(&vertices)
}

/// Shoelace formula, unsigned
fn ring_area(vertices: &[Coord<f64>]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        twice_area += a.x * b.y - b.x * a.y;
    }
    twice_area.abs() / 2.0
}

/// Edge of the clipping rectangle
#[derive(Debug, Clone, Copy)]
enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    fn is_inside(&self, p: &Coord<f64>, rect: &CellRect) -> bool {
        match self {
            Edge::Left => p.x >= rect.min_x,
            Edge::Right => p.x <= rect.max_x,
            Edge::Bottom => p.y >= rect.min_y,
            Edge::Top => p.y <= rect.max_y,
        }
    }

    fn intersect(&self, p: &Coord<f64>, q: &Coord<f64>, rect: &CellRect) -> Coord<f64> {
        let dx = q.x - p.x;
        let dy = q.y - p.y;

        match self {
            Edge::Left => {
                let t = (rect.min_x - p.x) / dx;
                Coord {
                    x: rect.min_x,
                    y: p.y + t * dy,
                }
            }
            Edge::Right => {
                let t = (rect.max_x - p.x) / dx;
                Coord {
                    x: rect.max_x,
                    y: p.y + t * dy,
                }
            }
            Edge::Bottom => {
                let t = (rect.min_y - p.y) / dy;
                Coord {
                    x: p.x + t * dx,
                    y: rect.min_y,
                }
            }
            Edge::Top => {
                let t = (rect.max_y - p.y) / dy;
                Coord {
                    x: p.x + t * dx,
                    y: rect.max_y,
                }
            }
        }
    }
}

/// Clip a ring against one rectangle edge (Sutherland–Hodgman step)
fn clip_ring_edge(vertices: &[Coord<f64>], edge: Edge, rect: &CellRect) -> Vec<Coord<f64>> {
    if vertices.is_empty() {
        return Vec::new();
    }

    let mut output = Vec::new();
    let n = vertices.len();

    for i in 0..n {
        let current = &vertices[i];
        let next = &vertices[(i + 1) % n];

        let current_inside = edge.is_inside(current, rect);
        let next_inside = edge.is_inside(next, rect);

        match (current_inside, next_inside) {
            (true, true) => output.push(*next),
            (true, false) => output.push(edge.intersect(current, next, rect)),
            (false, true) => {
                output.push(edge.intersect(current, next, rect));
                output.push(*next);
            }
            (false, false) => {}
        }
    }

    output
}
