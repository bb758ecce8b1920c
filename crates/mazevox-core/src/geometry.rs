//! Grid-to-world geometry: passage volumes, floor slabs, shafts, ladders.
//!
//! Every abstract `(floor, GridPos)` position maps to real-world cuboids by
//! scaling the grid coordinate with the passage width and stacking floors
//! `wall_height + 1` levels apart (one level of slab under each floor of
//! passable space). Connector orientation is a pure function of the
//! approach vector along the floor's longest path.

use crate::grid::GridPos;
use crate::world::{Block, BlockPos, Facing, Volume};

/// World-placement parameters for one maze: the origin corner plus the
/// scaling applied to every cell.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub origin: BlockPos,
    pub passage_width: i32,
    pub wall_height: i32,
}

impl Layout {
    pub fn new(origin: BlockPos, passage_width: i32, wall_height: i32) -> Self {
        Self {
            origin,
            passage_width,
            wall_height,
        }
    }

    /// Base height of a floor's passable space, one above its slab.
    fn floor_base(&self, floor: i32) -> i32 {
        self.origin.y + 1 + floor * (self.wall_height + 1)
    }

    /// The cuboid a cell occupies on a floor: `passage_width` wide on each
    /// horizontal axis, `wall_height` tall above the slab.
    pub fn cell_volume(&self, floor: i32, pos: GridPos) -> Volume {
        let min = BlockPos::new(
            self.origin.x + self.passage_width * pos.col,
            self.floor_base(floor),
            self.origin.z + self.passage_width * pos.row,
        );
        let max = BlockPos::new(
            min.x + self.passage_width - 1,
            min.y + self.wall_height - 1,
            min.z + self.passage_width - 1,
        );
        Volume::new(min, max)
    }

    /// The one-level slab directly below a cell's volume. For floor `y+1`
    /// this is also the shaft opening cut above a connector on floor `y`.
    pub fn slab_volume(&self, floor: i32, pos: GridPos) -> Volume {
        let cell = self.cell_volume(floor, pos);
        Volume::new(
            BlockPos::new(cell.min.x, cell.min.y - 1, cell.min.z),
            BlockPos::new(cell.max.x, cell.min.y - 1, cell.max.z),
        )
    }

    /// Ladder fills for a floor connector whose longest path approaches
    /// `end` from `prev`.
    ///
    /// The primary strip hugs the wall the path ran into, spans the full
    /// passage width across the perpendicular axis, and faces back along
    /// the approach vector. With `passage_width > 1`, the two near-side
    /// corners get one extra column each, oriented inward by their own
    /// offset along the perpendicular axis. Every column spans from the
    /// connector base up through the opened slab above.
    pub fn ladder_fills(&self, floor: i32, prev: GridPos, end: GridPos) -> Vec<(Block, Volume)> {
        let cell = self.cell_volume(floor, end);
        let (min, max) = (cell.min, cell.max);
        let dx = (end.col - prev.col) / 2;
        let dz = (end.row - prev.row) / 2;
        let Some(approach) = Facing::from_step(dx, dz) else {
            return Vec::new();
        };

        let corner = BlockPos::new(
            if dx == 1 { max.x } else { min.x },
            min.y,
            if dz == 1 { max.z } else { min.z },
        );
        let across = BlockPos::new(
            if dx == 0 { max.x } else { corner.x },
            min.y,
            if dz == 0 { max.z } else { corner.z },
        );
        let mut fills = vec![(
            Block::Ladder(approach.opposite()),
            Volume::new(
                corner,
                BlockPos::new(across.x, across.y + self.wall_height, across.z),
            ),
        )];

        if self.passage_width == 1 {
            return fills;
        }

        let near = BlockPos::new(
            if dx == 1 { min.x } else { max.x },
            min.y,
            if dz == 1 { min.z } else { max.z },
        );
        let mut second = near;
        if dz != 0 {
            second.x = if dx == 1 { max.x } else { min.x };
        }
        if dx != 0 {
            second.z = if dz == 1 { max.z } else { min.z };
        }
        for point in [near, second] {
            let (odx, odz) = if dz != 0 {
                if point.x == min.x {
                    (-1, 0)
                } else {
                    (1, 0)
                }
            } else if point.z == min.z {
                (0, -1)
            } else {
                (0, 1)
            };
            let Some(offset) = Facing::from_step(odx, odz) else {
                continue;
            };
            fills.push((
                Block::Ladder(offset.opposite()),
                Volume::new(
                    point,
                    BlockPos::new(point.x, point.y + self.wall_height, point.z),
                ),
            ));
        }
        fills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(pw: i32, wh: i32) -> Layout {
        Layout::new(BlockPos::new(100, 60, -40), pw, wh)
    }

    #[test]
    fn test_cell_volume_is_idempotent() {
        let l = layout(2, 3);
        let a = l.cell_volume(1, GridPos::new(3, 5));
        let b = l.cell_volume(1, GridPos::new(3, 5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cell_volume_extent() {
        let l = layout(2, 3);
        let v = l.cell_volume(0, GridPos::new(1, 1));
        assert_eq!(v.min, BlockPos::new(102, 61, -38));
        assert_eq!(v.max, BlockPos::new(103, 63, -37));
        assert_eq!(v.block_count(), 2 * 3 * 2);
    }

    #[test]
    fn test_floors_stack_without_overlap() {
        let l = layout(1, 3);
        let below = l.cell_volume(0, GridPos::new(1, 1));
        let above_slab = l.slab_volume(1, GridPos::new(1, 1));
        let above = l.cell_volume(1, GridPos::new(1, 1));
        // passable 0 | slab 1 | passable 1, each exactly adjacent.
        assert_eq!(above_slab.min.y, below.max.y + 1);
        assert_eq!(above.min.y, above_slab.max.y + 1);
    }

    #[test]
    fn test_slab_sits_under_cell() {
        let l = layout(3, 2);
        let cell = l.cell_volume(2, GridPos::new(5, 3));
        let slab = l.slab_volume(2, GridPos::new(5, 3));
        assert_eq!(slab.min.y, cell.min.y - 1);
        assert_eq!(slab.max.y, slab.min.y);
        assert_eq!((slab.min.x, slab.max.x), (cell.min.x, cell.max.x));
        assert_eq!((slab.min.z, slab.max.z), (cell.min.z, cell.max.z));
    }

    #[test]
    fn test_single_width_connector_faces_back_along_approach() {
        let l = layout(1, 3);
        // Approach east: prev (1,1) → end (3,1).
        let fills = l.ladder_fills(0, GridPos::new(1, 1), GridPos::new(3, 1));
        assert_eq!(fills.len(), 1);
        let (block, volume) = fills[0];
        assert_eq!(block, Block::Ladder(Facing::West));
        let cell = l.cell_volume(0, GridPos::new(3, 1));
        assert_eq!(volume.min.x, cell.max.x, "strip hugs the far wall");
        assert_eq!(volume.max.y - volume.min.y, 3, "spans into the opened slab");
    }

    #[test]
    fn test_wide_connector_east_approach() {
        // Passage width 2, approach (1,0): the far strip covers two
        // parallel west-facing columns one passage-width apart along z.
        let l = layout(2, 3);
        let fills = l.ladder_fills(0, GridPos::new(1, 1), GridPos::new(3, 1));
        assert_eq!(fills.len(), 3);

        let cell = l.cell_volume(0, GridPos::new(3, 1));
        let (block, strip) = fills[0];
        assert_eq!(block, Block::Ladder(Facing::West));
        assert_eq!(strip.min.x, cell.max.x);
        assert_eq!(strip.max.x, cell.max.x);
        assert_eq!((strip.min.z, strip.max.z), (cell.min.z, cell.max.z));

        // Near-side corners face inward along z.
        let facings: Vec<_> = fills[1..].iter().map(|(b, _)| *b).collect();
        assert!(facings.contains(&Block::Ladder(Facing::South)));
        assert!(facings.contains(&Block::Ladder(Facing::North)));
        for (_, v) in &fills[1..] {
            assert_eq!(v.min.x, cell.min.x, "corner columns sit on the near side");
            assert_eq!(v.min.x, v.max.x);
            assert_eq!(v.min.z, v.max.z);
        }
    }

    #[test]
    fn test_wide_connector_south_approach() {
        let l = layout(2, 2);
        // Approach (0,1): prev (1,1) → end (1,3).
        let fills = l.ladder_fills(0, GridPos::new(1, 1), GridPos::new(1, 3));
        assert_eq!(fills.len(), 3);
        let cell = l.cell_volume(0, GridPos::new(1, 3));
        let (block, strip) = fills[0];
        assert_eq!(block, Block::Ladder(Facing::North));
        assert_eq!((strip.min.z, strip.max.z), (cell.max.z, cell.max.z));
        let facings: Vec<_> = fills[1..].iter().map(|(b, _)| *b).collect();
        assert!(facings.contains(&Block::Ladder(Facing::East)));
        assert!(facings.contains(&Block::Ladder(Facing::West)));
    }

    #[test]
    fn test_opposite_approaches_give_opposite_facings() {
        let l = layout(1, 3);
        let east = l.ladder_fills(0, GridPos::new(1, 1), GridPos::new(3, 1));
        let west = l.ladder_fills(0, GridPos::new(3, 1), GridPos::new(1, 1));
        let (Block::Ladder(a), Block::Ladder(b)) = (east[0].0, west[0].0) else {
            panic!("expected ladder fills");
        };
        assert_eq!(a.opposite(), b);
    }

    #[test]
    fn test_non_adjacent_pair_places_nothing() {
        let l = layout(1, 3);
        assert!(l
            .ladder_fills(0, GridPos::new(1, 1), GridPos::new(1, 1))
            .is_empty());
        assert!(l
            .ladder_fills(0, GridPos::new(1, 1), GridPos::new(5, 1))
            .is_empty());
    }
}
