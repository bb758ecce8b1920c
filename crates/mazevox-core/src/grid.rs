//! Per-floor cell grid and coordinate model.
//!
//! A floor with a footprint of `size_x × size_z` maze nodes is stored as a
//! flat row-major grid of extent `(2·size_x+1) × (2·size_z+1)`. Parity is
//! significant: cells with both coordinates odd are the nodes, cells with a
//! mixed parity are the walls between adjacent nodes and become passages
//! only when the carver connects those nodes. The outer ring is permanently
//! solid and is never visited.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A floor-local cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Step along the column axis, keeping the row.
    pub const fn offset_col(self, d: i32) -> GridPos {
        GridPos::new(self.col + d, self.row)
    }

    /// Step along the row axis, keeping the column.
    pub const fn offset_row(self, d: i32) -> GridPos {
        GridPos::new(self.col, self.row + d)
    }

    /// The cell halfway between two node positions two steps apart.
    pub const fn midpoint(self, other: GridPos) -> GridPos {
        GridPos::new((self.col + other.col) / 2, (self.row + other.row) / 2)
    }

    /// True when both coordinates are odd, i.e. a maze node.
    pub const fn is_node(self) -> bool {
        self.col % 2 == 1 && self.row % 2 == 1
    }
}

/// One grid unit of a single floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub pos: GridPos,
    /// Permanently solid boundary cell; never visited or carved.
    pub is_wall: bool,
    /// Incorporated into the floor's spanning tree.
    pub is_visited: bool,
}

/// An access outside a floor's extent. Given well-formed inputs this never
/// happens; it is surfaced as a fatal invariant violation, not recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridError {
    pub pos: GridPos,
    pub cols: i32,
    pub rows: i32,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid position ({}, {}) outside {}x{} floor",
            self.pos.col, self.pos.row, self.cols, self.rows
        )
    }
}

impl std::error::Error for GridError {}

/// A single floor's cells, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorGrid {
    cols: i32,
    rows: i32,
    cells: Vec<Cell>,
}

impl FloorGrid {
    /// Allocate a floor for a `size_x × size_z` footprint and mark the
    /// outer ring solid.
    pub fn new(size_x: i32, size_z: i32) -> Self {
        let cols = 2 * size_x + 1;
        let rows = 2 * size_z + 1;
        let mut cells = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let pos = GridPos::new(col, row);
                let is_wall = col == 0 || row == 0 || col == cols - 1 || row == rows - 1;
                cells.push(Cell {
                    pos,
                    is_wall,
                    is_visited: false,
                });
            }
        }
        Self { cols, rows, cells }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.col >= 0 && pos.col < self.cols && pos.row >= 0 && pos.row < self.rows
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.row * self.cols + pos.col) as usize)
        } else {
            None
        }
    }

    fn out_of_range(&self, pos: GridPos) -> GridError {
        GridError {
            pos,
            cols: self.cols,
            rows: self.rows,
        }
    }

    pub fn cell(&self, pos: GridPos) -> Result<&Cell, GridError> {
        self.index(pos)
            .map(|i| &self.cells[i])
            .ok_or_else(|| self.out_of_range(pos))
    }

    pub fn cell_mut(&mut self, pos: GridPos) -> Result<&mut Cell, GridError> {
        match self.index(pos) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(self.out_of_range(pos)),
        }
    }

    /// Every cell of the floor, walls included, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All interior node positions: both coordinates odd, off the boundary
    /// ring. Row-major order.
    pub fn interior_nodes(&self) -> Vec<GridPos> {
        let mut nodes = Vec::new();
        let mut row = 1;
        while row < self.rows - 1 {
            let mut col = 1;
            while col < self.cols - 1 {
                nodes.push(GridPos::new(col, row));
                col += 2;
            }
            row += 2;
        }
        nodes
    }

    /// Count of cells marked visited, nodes and midpoints alike.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visited).count()
    }
}

/// The full stacked maze: one grid per floor plus the shared footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    pub floors: Vec<FloorGrid>,
    pub size_x: i32,
    pub size_z: i32,
}

impl Maze {
    /// Allocate `floor_count` identical floors.
    pub fn new(floor_count: usize, size_x: i32, size_z: i32) -> Self {
        let floors = (0..floor_count)
            .map(|_| FloorGrid::new(size_x, size_z))
            .collect();
        Self {
            floors,
            size_x,
            size_z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubled_grid_extent() {
        let grid = FloorGrid::new(2, 2);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.rows(), 5);
        let grid = FloorGrid::new(3, 4);
        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.rows(), 9);
    }

    #[test]
    fn test_boundary_ring_is_wall() {
        let grid = FloorGrid::new(3, 3);
        for cell in grid.cells() {
            let on_ring = cell.pos.col == 0
                || cell.pos.row == 0
                || cell.pos.col == grid.cols() - 1
                || cell.pos.row == grid.rows() - 1;
            assert_eq!(cell.is_wall, on_ring, "wall flag mismatch at {:?}", cell.pos);
        }
    }

    #[test]
    fn test_interior_node_count() {
        // size_x × size_z footprint carries exactly size_x·size_z nodes.
        let grid = FloorGrid::new(2, 2);
        assert_eq!(grid.interior_nodes().len(), 4);
        let grid = FloorGrid::new(5, 3);
        assert_eq!(grid.interior_nodes().len(), 15);
        for pos in grid.interior_nodes() {
            assert!(pos.is_node());
            assert!(!grid.cell(pos).unwrap().is_wall);
        }
    }

    #[test]
    fn test_out_of_range_access_is_an_error() {
        let grid = FloorGrid::new(2, 2);
        assert!(grid.cell(GridPos::new(5, 0)).is_err());
        assert!(grid.cell(GridPos::new(0, -1)).is_err());
        assert!(grid.cell(GridPos::new(4, 4)).is_ok());
    }

    #[test]
    fn test_midpoint_between_adjacent_nodes() {
        let a = GridPos::new(1, 3);
        assert_eq!(a.midpoint(a.offset_col(2)), GridPos::new(2, 3));
        assert_eq!(a.midpoint(a.offset_row(-2)), GridPos::new(1, 2));
        assert!(!a.midpoint(a.offset_col(2)).is_node());
    }

    #[test]
    fn test_maze_allocates_independent_floors() {
        let mut maze = Maze::new(3, 2, 2);
        assert_eq!(maze.floors.len(), 3);
        maze.floors[0]
            .cell_mut(GridPos::new(1, 1))
            .unwrap()
            .is_visited = true;
        assert!(!maze.floors[1].cell(GridPos::new(1, 1)).unwrap().is_visited);
    }
}
