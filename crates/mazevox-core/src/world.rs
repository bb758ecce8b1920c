//! Voxel world interface and shared placement types.
//!
//! The engine never touches a game world directly; every mutation is an
//! inclusive axis-aligned volume fill issued through [`VoxelWorld`]. Fills
//! are fire-and-forget: atomic per call from the engine's perspective, with
//! failure handling left to the collaborator. [`RecordingWorld`] captures
//! fills in order for unit tests and the headless harness.

use serde::Serialize;

/// An absolute block coordinate in the destination world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// An inclusive axis-aligned cuboid, `min` ≤ `max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Volume {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl Volume {
    pub const fn new(min: BlockPos, max: BlockPos) -> Self {
        Self { min, max }
    }

    /// Number of blocks covered by the fill.
    pub fn block_count(&self) -> u64 {
        let dx = (self.max.x - self.min.x + 1) as u64;
        let dy = (self.max.y - self.min.y + 1) as u64;
        let dz = (self.max.z - self.min.z + 1) as u64;
        dx * dy * dz
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }
}

/// Cardinal orientation of a directional block.
///
/// `North` faces −z, `South` faces +z, `East` faces +x, `West` faces −x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    /// Orientation matching a unit grid step, if the step is cardinal.
    pub fn from_step(dx: i32, dz: i32) -> Option<Facing> {
        match (dx, dz) {
            (1, 0) => Some(Facing::East),
            (-1, 0) => Some(Facing::West),
            (0, 1) => Some(Facing::South),
            (0, -1) => Some(Facing::North),
            _ => None,
        }
    }

    pub fn opposite(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::East => Facing::West,
            Facing::West => Facing::East,
        }
    }
}

/// The block choice for a single fill.
///
/// Cube materials carry the block name of the destination palette; ladders
/// carry the direction their rungs face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Block {
    Air,
    Cube(&'static str),
    Ladder(Facing),
}

/// World mutation interface consumed by the engine.
pub trait VoxelWorld {
    /// Fill an inclusive cuboid with a single block.
    fn fill_volume(&mut self, block: Block, volume: Volume);
}

/// One recorded fill operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillOp {
    pub block: Block,
    pub volume: Volume,
}

/// A [`VoxelWorld`] that stores every fill in issue order.
#[derive(Debug, Default)]
pub struct RecordingWorld {
    pub fills: Vec<FillOp>,
}

impl RecordingWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// The block a position would hold after replaying every fill, i.e. the
    /// last fill whose volume covers it.
    pub fn final_block(&self, pos: BlockPos) -> Option<Block> {
        self.fills
            .iter()
            .rev()
            .find(|op| op.volume.contains(pos))
            .map(|op| op.block)
    }

    /// Fills matching a predicate, in issue order.
    pub fn fills_where<'a>(
        &'a self,
        mut pred: impl FnMut(&FillOp) -> bool + 'a,
    ) -> impl Iterator<Item = &'a FillOp> {
        self.fills.iter().filter(move |op| pred(op))
    }
}

impl VoxelWorld for RecordingWorld {
    fn fill_volume(&mut self, block: Block, volume: Volume) {
        self.fills.push(FillOp { block, volume });
    }
}
