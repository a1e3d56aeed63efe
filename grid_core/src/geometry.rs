use std::fmt;
use std::ops::Sub;

pub const GRID_SIZE: u32 = 10;
pub const CELL_SIZE: f32 = 50.0;

/// A discrete grid cell, addressed by (column, row).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Item extent in cells. Both sides are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    width: u32,
    height: u32,
}

impl Span {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Pointer position in surface units, relative to the grid's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Fixed N×N grid with square cells of `cell_size` surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub size: u32,
    pub cell_size: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(GRID_SIZE, CELL_SIZE)
    }
}

impl GridGeometry {
    pub const fn new(size: u32, cell_size: f32) -> Self {
        Self { size, cell_size }
    }

    /// Map a grid-relative pointer position to a cell, clamping each axis
    /// into `[0, size - 1]`.
    pub fn cell_at(&self, p: Point) -> Cell {
        Cell::new(self.axis(p.x), self.axis(p.y))
    }

    fn axis(&self, v: f32) -> u32 {
        let max = self.size.saturating_sub(1);
        let idx = (v / self.cell_size).floor();

        if idx.is_nan() || idx <= 0.0 {
            0
        } else if idx >= max as f32 {
            max
        } else {
            idx as u32
        }
    }

    /// Top-left corner of a cell in surface units.
    pub fn cell_origin(&self, cell: Cell) -> Point {
        Point::new(
            cell.x as f32 * self.cell_size,
            cell.y as f32 * self.cell_size,
        )
    }

    /// Side length of the whole grid in surface units.
    pub fn extent(&self) -> f32 {
        self.size as f32 * self.cell_size
    }

    pub fn contains(&self, p: Point) -> bool {
        let extent = self.extent();
        (0.0..extent).contains(&p.x) && (0.0..extent).contains(&p.y)
    }

    /// Clamp an arbitrary cell into the grid.
    pub fn clamp(&self, cell: Cell) -> Cell {
        let max = self.size.saturating_sub(1);
        Cell::new(cell.x.min(max), cell.y.min(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pointer_maps_to_floor_cell() {
        let g = GridGeometry::default();
        assert_eq!(g.cell_at(Point::new(275.0, 125.0)), Cell::new(5, 2));
        assert_eq!(g.cell_at(Point::new(0.0, 0.0)), Cell::new(0, 0));
        assert_eq!(g.cell_at(Point::new(49.99, 50.0)), Cell::new(0, 1));
    }

    #[test]
    fn pointer_outside_grid_is_clamped() {
        let g = GridGeometry::default();
        assert_eq!(g.cell_at(Point::new(520.0, -10.0)), Cell::new(9, 0));
        assert_eq!(g.cell_at(Point::new(-0.5, 10_000.0)), Cell::new(0, 9));
    }

    #[test]
    fn non_finite_pointer_is_clamped() {
        let g = GridGeometry::default();
        assert_eq!(g.cell_at(Point::new(f32::NAN, f32::NAN)), Cell::ORIGIN);
        assert_eq!(
            g.cell_at(Point::new(f32::INFINITY, f32::NEG_INFINITY)),
            Cell::new(9, 0)
        );
    }

    #[test]
    fn span_never_collapses_below_one() {
        let s = Span::new(0, 3);
        assert_eq!((s.width(), s.height()), (1, 3));
    }

    #[test]
    fn contains_is_half_open() {
        let g = GridGeometry::default();
        assert!(g.contains(Point::new(0.0, 499.9)));
        assert!(!g.contains(Point::new(500.0, 10.0)));
        assert!(!g.contains(Point::new(10.0, -0.1)));
    }

    proptest! {
        #[test]
        fn mapped_cell_is_always_inside_grid(
            x in proptest::num::f32::ANY,
            y in proptest::num::f32::ANY,
            size in 1u32..64,
            cell in 1.0f32..200.0,
        ) {
            let g = GridGeometry::new(size, cell);
            let c = g.cell_at(Point::new(x, y));
            prop_assert!(c.x < size);
            prop_assert!(c.y < size);
        }

        #[test]
        fn in_bounds_pointer_round_trips_through_cell_origin(cx in 0u32..10, cy in 0u32..10) {
            let g = GridGeometry::default();
            let origin = g.cell_origin(Cell::new(cx, cy));
            let p = Point::new(origin.x + 1.0, origin.y + 1.0);
            prop_assert_eq!(g.cell_at(p), Cell::new(cx, cy));
        }
    }
}
