//! Far-point search over a carved floor.
//!
//! Enumerates every simple path from an entry node through the floor's
//! spanning tree with a queue of full path prefixes. On a tree this is an
//! exhaustive walk of the leaf-to-entry paths — polynomial in node count,
//! though it does redundant work by carrying whole prefixes instead of
//! parent pointers. The longest finished path decides where the connector
//! to the next floor is placed.

use crate::grid::{FloorGrid, GridPos};
use std::collections::VecDeque;

/// Find the far end of the longest simple path from `entry` through the
/// carved tree.
///
/// Returns the last two nodes of that path — the approach node and the end
/// node — or `None` when the tree has no adjacent pair (a single-node
/// floor). Ties between equally long paths resolve to the path encountered
/// first.
pub fn furthest_pair(grid: &FloorGrid, entry: GridPos) -> Option<(GridPos, GridPos)> {
    let mut queue: VecDeque<Vec<GridPos>> = VecDeque::from([vec![entry]]);
    let mut best: Option<Vec<GridPos>> = None;

    while let Some(path) = queue.pop_front() {
        let Some(&pos) = path.last() else { continue };
        let mut extended = false;
        for next in [
            pos.offset_col(-2),
            pos.offset_col(2),
            pos.offset_row(-2),
            pos.offset_row(2),
        ] {
            // Followable only through a carved midpoint; the cycle guard on
            // the path itself is redundant on a tree but kept anyway.
            let mid = pos.midpoint(next);
            let carved = grid.cell(mid).map_or(false, |c| c.is_visited);
            if !carved || path.contains(&next) {
                continue;
            }
            let mut longer = path.clone();
            longer.push(next);
            queue.push_back(longer);
            extended = true;
        }
        if !extended && best.as_ref().map_or(true, |b| path.len() > b.len()) {
            best = Some(path);
        }
    }

    match best?.as_slice() {
        [.., a, b] => Some((*a, *b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carver::carve_floor;
    use crate::grid::FloorGrid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Carve a fixed corridor into a blank grid: the midpoints between the
    /// listed nodes (and the nodes themselves) become visited.
    fn hand_carved(size_x: i32, size_z: i32, nodes: &[GridPos]) -> FloorGrid {
        let mut grid = FloorGrid::new(size_x, size_z);
        for pair in nodes.windows(2) {
            let mid = pair[0].midpoint(pair[1]);
            grid.cell_mut(pair[0]).unwrap().is_visited = true;
            grid.cell_mut(mid).unwrap().is_visited = true;
            grid.cell_mut(pair[1]).unwrap().is_visited = true;
        }
        grid
    }

    #[test]
    fn test_straight_corridor() {
        // (1,1) ─ (3,1) ─ (5,1): far pair from (1,1) is (3,1) → (5,1).
        let nodes = [GridPos::new(1, 1), GridPos::new(3, 1), GridPos::new(5, 1)];
        let grid = hand_carved(3, 3, &nodes);
        let (from, to) = furthest_pair(&grid, GridPos::new(1, 1)).unwrap();
        assert_eq!(from, GridPos::new(3, 1));
        assert_eq!(to, GridPos::new(5, 1));
    }

    #[test]
    fn test_branching_tree_prefers_longer_arm() {
        //  (1,1) ─ (3,1) ─ (5,1)
        //            │
        //          (3,3) ─ (3,5)   ← longer arm from (1,1)
        let spine = [GridPos::new(1, 1), GridPos::new(3, 1), GridPos::new(5, 1)];
        let mut grid = hand_carved(3, 3, &spine);
        let arm = [GridPos::new(3, 1), GridPos::new(3, 3), GridPos::new(3, 5)];
        for pair in arm.windows(2) {
            grid.cell_mut(pair[0]).unwrap().is_visited = true;
            grid.cell_mut(pair[0].midpoint(pair[1])).unwrap().is_visited = true;
            grid.cell_mut(pair[1]).unwrap().is_visited = true;
        }
        let (from, to) = furthest_pair(&grid, GridPos::new(1, 1)).unwrap();
        assert_eq!(from, GridPos::new(3, 3));
        assert_eq!(to, GridPos::new(3, 5));
    }

    #[test]
    fn test_single_node_tree_has_no_pair() {
        let mut grid = FloorGrid::new(2, 2);
        grid.cell_mut(GridPos::new(1, 1)).unwrap().is_visited = true;
        assert_eq!(furthest_pair(&grid, GridPos::new(1, 1)), None);
    }

    #[test]
    fn test_deterministic_on_fixed_tree() {
        let mut grid = FloorGrid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(31);
        carve_floor(&mut grid, &mut rng).unwrap();

        let entry = GridPos::new(1, 1);
        let first = furthest_pair(&grid, entry);
        for _ in 0..5 {
            assert_eq!(furthest_pair(&grid, entry), first);
        }
    }

    #[test]
    fn test_result_is_adjacent_carved_pair() {
        for seed in [2, 9, 100] {
            let mut grid = FloorGrid::new(4, 6);
            let mut rng = StdRng::seed_from_u64(seed);
            carve_floor(&mut grid, &mut rng).unwrap();

            let (from, to) = furthest_pair(&grid, GridPos::new(1, 1)).unwrap();
            let dist = (from.col - to.col).abs() + (from.row - to.row).abs();
            assert_eq!(dist, 2, "pair must be adjacent nodes");
            assert!(grid.cell(from.midpoint(to)).unwrap().is_visited);
        }
    }
}
