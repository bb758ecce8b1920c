//! Generation driver: phases, scheduled steps, and world emission.
//!
//! A [`MazeGenerator`] owns one generation from request to completion. All
//! carving and floor-connection math runs synchronously inside
//! [`MazeGenerator::generate`]; every world mutation is decomposed into
//! [`Step`]s on the tick queue and emitted as the host advances turns, one
//! drilled cell per floor per turn.

use crate::carver::carve_floor;
use crate::config::{GenerateError, MazeConfig, Requester};
use crate::geometry::Layout;
use crate::grid::{GridPos, Maze};
use crate::longest_path::furthest_pair;
use crate::scheduler::TickQueue;
use crate::theme::FloorTheme;
use crate::world::{Block, BlockPos, VoxelWorld};
use rand::Rng;
use std::collections::VecDeque;

/// Turns between carving a floor and placing its connector ladders.
const LADDER_DELAY_TURNS: u64 = 100;

/// The boundary cell opened as the maze entrance, next to node (1,1) on
/// the ground floor.
const ENTRY_NOTCH: GridPos = GridPos::new(0, 1);

/// Entry node every generation starts from.
const ENTRY_NODE: GridPos = GridPos::new(1, 1);

/// Generation phase for the whole maze instance.
///
/// `Ladders` is declared for connector rendering, but no transition
/// currently depends on it: ladder steps run off their fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FillAll,
    Drilling,
    Ladders,
}

/// One scheduled unit of world mutation.
#[derive(Debug)]
enum Step {
    /// Render every cell of every floor solid, open the entry notch, then
    /// flip the phase to `Drilling`.
    FillAll,
    /// Open one drill-path cell per turn on a floor. Defers, without
    /// consuming a cell, while the phase is still `FillAll`.
    Drill {
        floor: usize,
        path: VecDeque<GridPos>,
    },
    /// Cut the slab opening above a connector's base cell.
    OpenShaft { floor: usize, pos: GridPos },
    /// Place the ladder columns for a floor connector.
    PlaceLadders {
        floor: usize,
        from: GridPos,
        to: GridPos,
    },
}

/// Drives one maze generation to completion across cooperative turns.
#[derive(Debug)]
pub struct MazeGenerator {
    config: MazeConfig,
    layout: Layout,
    maze: Maze,
    themes: Vec<FloorTheme>,
    phase: Phase,
    queue: TickQueue<Step>,
}

impl MazeGenerator {
    /// Validate the request and prepare a generation.
    ///
    /// Carving and floor connection run here, synchronously; all world
    /// mutation is armed on the tick queue and emitted by [`tick`](Self::tick).
    pub fn generate(
        requester: &Requester,
        origin: BlockPos,
        config: MazeConfig,
        rng: &mut impl Rng,
    ) -> Result<MazeGenerator, GenerateError> {
        if !requester.interactive {
            return Err(GenerateError::NonInteractiveRequester {
                name: requester.name.clone(),
            });
        }
        config.validate()?;

        let maze = Maze::new(config.floors as usize, config.size_x, config.size_z);
        let layout = Layout::new(origin, config.passage_width, config.wall_height);
        let themes: Vec<FloorTheme> = (0..config.floors)
            .map(|_| FloorTheme::resolve(config.theme.as_deref(), rng))
            .collect();

        let mut gen = MazeGenerator {
            config,
            layout,
            maze,
            themes,
            phase: Phase::FillAll,
            queue: TickQueue::new(),
        };
        gen.start(rng)?;
        Ok(gen)
    }

    fn start(&mut self, rng: &mut impl Rng) -> Result<(), GenerateError> {
        log::info!(
            "generating {}x{} maze, {} floor(s), passage width {}",
            self.config.size_x,
            self.config.size_z,
            self.config.floors,
            self.config.passage_width
        );

        // The solid fill is armed for the next turn while carving and floor
        // connection run in this call. Drill steps re-arm until the phase
        // flips, but the shaft openings armed in connect_floors land on the
        // same turn as the fill and rely on FIFO order within that turn —
        // a scheduler that reordered same-turn tasks could cut a shaft
        // before the volume it cuts through is solid.
        self.queue.run_next_turn(Step::FillAll);

        for floor in 0..self.maze.floors.len() {
            let path = carve_floor(&mut self.maze.floors[floor], rng)?;
            log::debug!("floor {} carved, drill path {} cells", floor, path.len());
            self.queue.run_next_turn(Step::Drill {
                floor,
                path: path.into(),
            });
        }
        self.connect_floors();
        Ok(())
    }

    /// Walk the floors bottom-up, placing each connector at the far end of
    /// the longest path from that floor's entry. The connector cell becomes
    /// the entry of the floor above.
    fn connect_floors(&mut self) {
        let mut entry = ENTRY_NODE;
        for floor in 0..self.maze.floors.len().saturating_sub(1) {
            match furthest_pair(&self.maze.floors[floor], entry) {
                Some((from, to)) => {
                    self.queue.run_next_turn(Step::OpenShaft {
                        floor: floor + 1,
                        pos: to,
                    });
                    self.queue.run_after_delay(
                        Step::PlaceLadders { floor, from, to },
                        LADDER_DELAY_TURNS,
                    );
                    entry = to;
                }
                None => {
                    // Degenerate single-node floor: nothing to climb along,
                    // so the floor above keeps the same entry.
                    log::warn!(
                        "floor {} has no connector pair, floor {} keeps entry ({}, {})",
                        floor,
                        floor + 1,
                        entry.col,
                        entry.row
                    );
                }
            }
        }
    }

    /// Run one cooperative turn, executing every step that came due.
    /// Returns the number of steps executed.
    pub fn tick(&mut self, world: &mut impl VoxelWorld, rng: &mut impl Rng) -> usize {
        let steps = self.queue.advance();
        let count = steps.len();
        for step in steps {
            self.run_step(step, world, rng);
        }
        count
    }

    /// Drive turns until no work remains. Returns the number of turns run.
    pub fn run_to_completion(&mut self, world: &mut impl VoxelWorld, rng: &mut impl Rng) -> u64 {
        let mut turns = 0;
        while !self.queue.is_idle() {
            self.tick(world, rng);
            turns += 1;
        }
        log::info!("maze generation finished after {} turns", turns);
        turns
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once every armed step has run.
    pub fn is_finished(&self) -> bool {
        self.queue.is_idle()
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    fn run_step(&mut self, step: Step, world: &mut impl VoxelWorld, rng: &mut impl Rng) {
        match step {
            Step::FillAll => self.fill_all(world, rng),
            Step::Drill { floor, mut path } => {
                if self.phase != Phase::Drilling {
                    // Not our turn yet; re-arm without consuming a cell.
                    self.queue.run_next_turn(Step::Drill { floor, path });
                    return;
                }
                if let Some(pos) = path.pop_front() {
                    world.fill_volume(Block::Air, self.layout.cell_volume(floor as i32, pos));
                }
                if path.is_empty() {
                    log::debug!("floor {} fully drilled", floor);
                } else {
                    self.queue.run_next_turn(Step::Drill { floor, path });
                }
            }
            Step::OpenShaft { floor, pos } => {
                world.fill_volume(Block::Air, self.layout.slab_volume(floor as i32, pos));
            }
            Step::PlaceLadders { floor, from, to } => {
                for (block, volume) in self.layout.ladder_fills(floor as i32, from, to) {
                    world.fill_volume(block, volume);
                }
            }
        }
    }

    /// Render every floor solid (walls plus slab), open the entry notch,
    /// and let drilling begin.
    fn fill_all(&mut self, world: &mut impl VoxelWorld, rng: &mut impl Rng) {
        for (floor, grid) in self.maze.floors.iter().enumerate() {
            let theme = &self.themes[floor];
            for cell in grid.cells() {
                world.fill_volume(
                    theme.pick_wall(rng),
                    self.layout.cell_volume(floor as i32, cell.pos),
                );
                world.fill_volume(
                    theme.pick_floor(rng),
                    self.layout.slab_volume(floor as i32, cell.pos),
                );
            }
        }
        world.fill_volume(Block::Air, self.layout.cell_volume(0, ENTRY_NOTCH));
        self.phase = Phase::Drilling;
        log::info!("solid fill issued, drilling begins");
    }
}
