use serde::{Deserialize, Serialize};

use crate::correlation::Seed;
use crate::error::{CorrMapError, Result};

/// Region of interest used to pick a correlation seed.
///
/// Coordinates are pixels, `x` = column and `y` = row; `Rect` and `Oval`
/// describe their bounding box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Roi {
    Point {
        x: usize,
        y: usize,
    },
    Rect {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    Oval {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    Points(Vec<(usize, usize)>),
}

impl Roi {
    /// Pixels covered by the region, clipped to a `width` x `height` image.
    pub fn contained_points(&self, width: usize, height: usize) -> Vec<(usize, usize)> {
        let inside = |&(x, y): &(usize, usize)| x < width && y < height;
        match self {
            Self::Point { x, y } => [(*x, *y)].into_iter().filter(inside).collect(),
            Self::Rect {
                x,
                y,
                width: rw,
                height: rh,
            } => (*y..y + rh)
                .flat_map(|row| (*x..x + rw).map(move |col| (col, row)))
                .filter(inside)
                .collect(),
            Self::Oval {
                x,
                y,
                width: rw,
                height: rh,
            } => {
                let (a, b) = (*rw as f64 / 2.0, *rh as f64 / 2.0);
                let (cx, cy) = (*x as f64 + a, *y as f64 + b);
                (*y..y + rh)
                    .flat_map(|row| (*x..x + rw).map(move |col| (col, row)))
                    .filter(|&(col, row)| {
                        // test pixel centres against the inscribed ellipse
                        let dx = (col as f64 + 0.5 - cx) / a;
                        let dy = (row as f64 + 0.5 - cy) / b;
                        dx * dx + dy * dy <= 1.0
                    })
                    .filter(inside)
                    .collect()
            }
            Self::Points(points) => points.iter().copied().filter(inside).collect(),
        }
    }

    /// Centroid of the contained points, truncated toward zero.
    pub fn seed(&self, width: usize, height: usize) -> Result<Seed> {
        let points = self.contained_points(width, height);
        if points.is_empty() {
            return Err(CorrMapError::EmptyRoi);
        }
        let n = points.len();
        let sum_x: usize = points.iter().map(|p| p.0).sum();
        let sum_y: usize = points.iter().map(|p| p.1).sum();
        Ok(Seed::new(sum_x / n, sum_y / n))
    }
}

impl std::fmt::Display for Roi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Point { x, y } => write!(f, "Point ({x}, {y})"),
            Self::Rect {
                x,
                y,
                width,
                height,
            } => write!(f, "Rect {width}x{height} at ({x}, {y})"),
            Self::Oval {
                x,
                y,
                width,
                height,
            } => write!(f, "Oval {width}x{height} at ({x}, {y})"),
            Self::Points(points) => write!(f, "{} point(s)", points.len()),
        }
    }
}
