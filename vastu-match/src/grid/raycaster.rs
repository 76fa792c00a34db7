//! Bresenham ray tracing over grid cells.
//!
//! Every ray of a reading is traced from the sensor cell to the endpoint
//! cell. The endpoint is evidence of an obstacle, every cell before it is
//! evidence of free space:
//!
//! ```text
//! From (0,0) to (7,3):
//!
//!     3 │        ●   <- endpoint (occupied)
//!     2 │     ●●
//!     1 │  ●●        <- interior (empty)
//!     0 ●●
//!       └──────────
//!        0 1 2 3 4 5 6 7
//! ```

use crate::core::GridCoord;

/// Bresenham's line algorithm iterator.
///
/// Yields every grid cell from `start` to `end`, both included.
pub struct BresenhamLine {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    x_inc: i32,
    y_inc: i32,
    error: i32,
    steep: bool,
    end_x: i32,
    end_y: i32,
    done: bool,
}

impl BresenhamLine {
    /// Create a new line iterator from start to end coordinates.
    pub fn new(start: GridCoord, end: GridCoord) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let steep = dy > dx;

        let (x, y, end_x, end_y, dx, dy) = if steep {
            (start.y, start.x, end.y, end.x, dy, dx)
        } else {
            (start.x, start.y, end.x, end.y, dx, dy)
        };

        let x_inc = if end_x > x { 1 } else { -1 };
        let y_inc = if end_y > y { 1 } else { -1 };

        Self {
            x,
            y,
            dx,
            dy,
            x_inc,
            y_inc,
            error: dx / 2,
            steep,
            end_x,
            end_y,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = GridCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = if self.steep {
            GridCoord::new(self.y, self.x)
        } else {
            GridCoord::new(self.x, self.y)
        };

        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(result);
        }

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_inc;
            self.error += self.dx;
        }
        self.x += self.x_inc;

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bresenham_horizontal() {
        let cells: Vec<_> = BresenhamLine::new(GridCoord::new(0, 0), GridCoord::new(5, 0)).collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], GridCoord::new(0, 0));
        assert_eq!(cells[5], GridCoord::new(5, 0));
    }

    #[test]
    fn test_bresenham_negative_direction() {
        let cells: Vec<_> = BresenhamLine::new(GridCoord::new(5, 5), GridCoord::new(0, 0)).collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], GridCoord::new(5, 5));
        assert_eq!(cells[5], GridCoord::new(0, 0));
    }

    #[test]
    fn test_bresenham_steep() {
        let cells: Vec<_> = BresenhamLine::new(GridCoord::new(0, 0), GridCoord::new(2, 5)).collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[5], GridCoord::new(2, 5));
        // No gaps: consecutive cells are 8-connected
        for pair in cells.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(&pair[1]), 1);
        }
    }

    #[test]
    fn test_single_cell_ray() {
        let start = GridCoord::new(3, 3);
        let cells: Vec<_> = BresenhamLine::new(start, start).collect();
        assert_eq!(cells, vec![start]);
    }
}
