//! Spanning-tree carving via loop-erased random walks.
//!
//! Wilson-style incremental growth: one random node seeds the tree, then
//! each walk starts at a random unvisited node, wanders between nodes in ±2
//! steps, backtracks its own self-intersections away, and commits once it
//! lands on a node that already belongs to the tree. Because a committed
//! walk touches the tree at exactly one point and never loops over itself,
//! the carved node/midpoint graph stays a tree. The committed sequence of
//! nodes and midpoints, in walked order, is the floor's drill path.

use crate::grid::{FloorGrid, GridError, GridPos};
use rand::Rng;
use std::collections::HashSet;

/// Carve one floor into a perfect maze.
///
/// Returns the drill path: every cell of the floor that becomes passable,
/// in the order it should be opened. Every interior node is visited exactly
/// once; a floor with a single interior node yields a path of length 1.
pub fn carve_floor(grid: &mut FloorGrid, rng: &mut impl Rng) -> Result<Vec<GridPos>, GridError> {
    let mut unvisited = grid.interior_nodes();
    let mut drill_path = Vec::new();
    if unvisited.is_empty() {
        return Ok(drill_path);
    }

    // Seed the tree with one random node.
    let root = unvisited.swap_remove(rng.gen_range(0..unvisited.len()));
    grid.cell_mut(root)?.is_visited = true;
    drill_path.push(root);

    while !unvisited.is_empty() {
        let start = unvisited[rng.gen_range(0..unvisited.len())];
        let walk = random_walk(grid, start, rng)?;
        commit_walk(grid, &walk, &mut drill_path)?;
        unvisited.retain(|&pos| grid.cell(pos).map_or(false, |c| !c.is_visited));
    }
    Ok(drill_path)
}

/// Walk from `start` until the walk's end lands on a tree node.
///
/// Steps onto cells already touched by this walk are rejected; when every
/// direction from the current end is rejected, the last step is erased and
/// the walk resumes from the new end. Touched cells stay excluded after a
/// backtrack, so an erased branch is never re-entered.
fn random_walk(
    grid: &FloorGrid,
    start: GridPos,
    rng: &mut impl Rng,
) -> Result<Vec<GridPos>, GridError> {
    let mut walk = vec![start];
    let mut touched = HashSet::from([start]);

    while let Some(&end) = walk.last() {
        if grid.cell(end)?.is_visited {
            break;
        }
        let mut open = neighbor_nodes(grid, end);
        let mut next = None;
        while !open.is_empty() {
            let pick = open.swap_remove(rng.gen_range(0..open.len()));
            if touched.insert(pick) {
                next = Some(pick);
                break;
            }
        }
        match next {
            Some(pos) => walk.push(pos),
            None => {
                // Dead end: erase the last step and retry from the new end.
                let _ = walk.pop();
            }
        }
    }
    Ok(walk)
}

/// In-bounds node neighbors two steps away along each axis.
fn neighbor_nodes(grid: &FloorGrid, pos: GridPos) -> Vec<GridPos> {
    [
        pos.offset_col(-2),
        pos.offset_col(2),
        pos.offset_row(-2),
        pos.offset_row(2),
    ]
    .into_iter()
    .filter(|p| {
        p.col >= 1 && p.row >= 1 && p.col <= grid.cols() - 2 && p.row <= grid.rows() - 2
    })
    .collect()
}

/// Commit a finished walk to the tree: each consecutive pair marks its node
/// and connecting midpoint visited and appends both to the drill path in
/// walked order. The walk's final entry is the tree node it joined, already
/// committed by an earlier walk.
fn commit_walk(
    grid: &mut FloorGrid,
    walk: &[GridPos],
    drill_path: &mut Vec<GridPos>,
) -> Result<(), GridError> {
    for pair in walk.windows(2) {
        let (node, next) = (pair[0], pair[1]);
        grid.cell_mut(node)?.is_visited = true;
        drill_path.push(node);
        let mid = node.midpoint(next);
        grid.cell_mut(mid)?.is_visited = true;
        drill_path.push(mid);
    }
    Ok(())
}
