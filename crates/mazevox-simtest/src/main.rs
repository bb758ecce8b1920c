//! Mazevox Headless Generation Harness
//!
//! Validates carving, far-point search, and world emission without a game
//! host. Runs entirely in-process — no world, no rendering; every fill goes
//! into a recording double.
//!
//! Usage:
//!   cargo run -p mazevox-simtest
//!   cargo run -p mazevox-simtest -- --verbose
//!   cargo run -p mazevox-simtest -- --json

use mazevox_core::carver::carve_floor;
use mazevox_core::config::{MazeConfig, Requester};
use mazevox_core::engine::MazeGenerator;
use mazevox_core::grid::{FloorGrid, GridPos, Maze};
use mazevox_core::longest_path::furthest_pair;
use mazevox_core::persistence::{load_maze, save_maze};
use mazevox_core::theme::theme_names;
use mazevox_core::world::{Block, BlockPos, RecordingWorld};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn result(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");

    if !json {
        println!("=== Mazevox Generation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Carving sweep across footprints and seeds
    results.extend(validate_carving(verbose, json));

    // 2. Far-point search
    results.extend(validate_longest_path(verbose, json));

    // 3. End-to-end generation scenarios
    results.extend(validate_generation(verbose, json));

    // 4. Snapshot round-trip
    results.extend(validate_snapshot(verbose, json));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(out) => println!("{}", out),
            Err(e) => eprintln!("failed to serialize results: {}", e),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Carving ──────────────────────────────────────────────────────────

fn validate_carving(verbose: bool, json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Carving ---");
    }
    let mut results = Vec::new();

    for (size_x, size_z) in [(2, 2), (3, 5), (8, 8), (12, 4)] {
        for seed in 0..4u64 {
            let mut grid = FloorGrid::new(size_x, size_z);
            let mut rng = StdRng::seed_from_u64(seed);
            let path = match carve_floor(&mut grid, &mut rng) {
                Ok(p) => p,
                Err(e) => {
                    results.push(result(
                        "carve",
                        false,
                        format!("{}x{} seed {}: {}", size_x, size_z, seed, e),
                    ));
                    continue;
                }
            };

            let nodes: Vec<_> = path.iter().filter(|p| p.is_node()).collect();
            let unique: HashSet<_> = nodes.iter().collect();
            let coverage_ok =
                nodes.len() as i32 == size_x * size_z && unique.len() == nodes.len();
            results.push(result(
                "carve_node_coverage",
                coverage_ok,
                format!(
                    "{}x{} seed {}: {} nodes, {} unique",
                    size_x,
                    size_z,
                    seed,
                    nodes.len(),
                    unique.len()
                ),
            ));

            let tree_ok = is_spanning_tree(&grid);
            results.push(result(
                "carve_tree_property",
                tree_ok,
                format!("{}x{} seed {}: acyclic and connected", size_x, size_z, seed),
            ));

            if verbose && !json {
                println!(
                    "  {}x{} seed {}: drill path {} cells",
                    size_x,
                    size_z,
                    seed,
                    path.len()
                );
            }
        }
    }
    results
}

/// n−1 carved midpoints and full connectivity over them.
fn is_spanning_tree(grid: &FloorGrid) -> bool {
    let nodes = grid.interior_nodes();
    let edges = grid
        .cells()
        .filter(|c| c.is_visited && !c.pos.is_node())
        .count();
    if edges + 1 != nodes.len() {
        return false;
    }
    let mut seen: HashSet<GridPos> = HashSet::from([nodes[0]]);
    let mut queue = VecDeque::from([nodes[0]]);
    while let Some(pos) = queue.pop_front() {
        for next in [
            pos.offset_col(-2),
            pos.offset_col(2),
            pos.offset_row(-2),
            pos.offset_row(2),
        ] {
            let mid = pos.midpoint(next);
            let open = grid.cell(mid).map_or(false, |c| c.is_visited);
            if open && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == nodes.len()
}

// ── 2. Far-point search ─────────────────────────────────────────────────

fn validate_longest_path(verbose: bool, json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Far-point search ---");
    }
    let mut results = Vec::new();
    let entry = GridPos::new(1, 1);

    for seed in [1u64, 19, 404] {
        let mut grid = FloorGrid::new(6, 6);
        let mut rng = StdRng::seed_from_u64(seed);
        if let Err(e) = carve_floor(&mut grid, &mut rng) {
            results.push(result("far_point", false, format!("carve failed: {}", e)));
            continue;
        }

        let first = furthest_pair(&grid, entry);
        let stable = (0..3).all(|_| furthest_pair(&grid, entry) == first);
        results.push(result(
            "far_point_deterministic",
            stable,
            format!("seed {}: repeated runs agree", seed),
        ));

        let adjacent = first.map_or(false, |(from, to)| {
            (from.col - to.col).abs() + (from.row - to.row).abs() == 2
                && grid.cell(from.midpoint(to)).map_or(false, |c| c.is_visited)
        });
        results.push(result(
            "far_point_adjacent_pair",
            adjacent,
            format!("seed {}: {:?}", seed, first),
        ));

        if verbose && !json {
            println!("  seed {}: far pair {:?}", seed, first);
        }
    }
    results
}

// ── 3. End-to-end generation ────────────────────────────────────────────

fn validate_generation(verbose: bool, json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Generation scenarios ---");
    }
    let mut results = Vec::new();

    // Scenario: 2x2 footprint, single floor.
    {
        let config = MazeConfig {
            size_x: 2,
            size_z: 2,
            ..Default::default()
        };
        let (world, gen) = run_generation(config, 101);
        let grid = &gen.maze().floors[0];
        results.push(result(
            "single_floor_grid",
            grid.cols() == 5 && grid.rows() == 5 && grid.interior_nodes().len() == 4,
            format!("{}x{} grid, {} nodes", grid.cols(), grid.rows(), grid.interior_nodes().len()),
        ));

        let air = world
            .fills
            .iter()
            .filter(|op| op.block == Block::Air)
            .count();
        results.push(result(
            "single_floor_openings",
            air == 8,
            format!("{} air fills (entry notch + 7 drill cells)", air),
        ));

        let ladders = world
            .fills
            .iter()
            .filter(|op| matches!(op.block, Block::Ladder(_)))
            .count();
        results.push(result(
            "single_floor_no_connector",
            ladders == 0,
            format!("{} ladder fills", ladders),
        ));
    }

    // Scenario: two floors, one shaft and one connector.
    {
        let config = MazeConfig {
            size_x: 4,
            size_z: 4,
            floors: 2,
            ..Default::default()
        };
        let (world, gen) = run_generation(config, 202);
        let shafts: Vec<_> = world
            .fills
            .iter()
            .filter(|op| op.block == Block::Air && op.volume.min.y == op.volume.max.y)
            .collect();
        let ladders = world
            .fills
            .iter()
            .filter(|op| matches!(op.block, Block::Ladder(_)))
            .count();
        results.push(result(
            "two_floor_connector",
            shafts.len() == 1 && ladders == 1,
            format!("{} shafts, {} ladders", shafts.len(), ladders),
        ));

        let far = furthest_pair(&gen.maze().floors[0], GridPos::new(1, 1));
        let placed_at_far = far.map_or(false, |(_, to)| {
            shafts
                .first()
                .map_or(false, |op| op.volume == gen.layout().slab_volume(1, to))
        });
        results.push(result(
            "two_floor_shaft_at_far_point",
            placed_at_far,
            format!("far pair {:?}", far),
        ));
    }

    // Scenario: wide passage, extra ladder columns.
    {
        let config = MazeConfig {
            size_x: 3,
            size_z: 3,
            passage_width: 2,
            floors: 2,
            ..Default::default()
        };
        let (world, _) = run_generation(config, 303);
        let ladders = world
            .fills
            .iter()
            .filter(|op| matches!(op.block, Block::Ladder(_)))
            .count();
        results.push(result(
            "wide_passage_ladder_columns",
            ladders == 3,
            format!("{} ladder fills (far strip + 2 corners)", ladders),
        ));
    }

    // Ordering: every solid fill precedes the first opening.
    {
        let config = MazeConfig {
            size_x: 3,
            size_z: 3,
            floors: 2,
            ..Default::default()
        };
        let (world, _) = run_generation(config, 404);
        let first_air = world.fills.iter().position(|op| op.block == Block::Air);
        let last_solid = world
            .fills
            .iter()
            .rposition(|op| matches!(op.block, Block::Cube(_)));
        let ordered = matches!((first_air, last_solid), (Some(a), Some(s)) if s < a);
        results.push(result(
            "solid_fill_before_drilling",
            ordered,
            format!("last solid at {:?}, first air at {:?}", last_solid, first_air),
        ));
    }

    // Request refusal paths.
    {
        let mut rng = StdRng::seed_from_u64(1);
        let refused = MazeGenerator::generate(
            &Requester::automation("command_block"),
            BlockPos::new(0, 0, 0),
            MazeConfig::default(),
            &mut rng,
        )
        .is_err();
        let invalid = MazeGenerator::generate(
            &Requester::player("kubi"),
            BlockPos::new(0, 0, 0),
            MazeConfig {
                size_x: 1,
                ..Default::default()
            },
            &mut rng,
        )
        .is_err();
        results.push(result(
            "request_validation",
            refused && invalid,
            format!("non-interactive refused: {}, bad footprint refused: {}", refused, invalid),
        ));
    }

    if verbose && !json {
        println!("  scenarios complete");
    }
    results
}

fn run_generation(config: MazeConfig, seed: u64) -> (RecordingWorld, MazeGenerator) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut gen = MazeGenerator::generate(
        &Requester::player("harness"),
        BlockPos::new(0, 64, 0),
        config,
        &mut rng,
    )
    .expect("generation request refused");
    let mut world = RecordingWorld::new();
    gen.run_to_completion(&mut world, &mut rng);
    (world, gen)
}

// ── 4. Snapshots ────────────────────────────────────────────────────────

fn validate_snapshot(verbose: bool, json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Snapshots ---");
    }
    let mut results = Vec::new();

    let mut maze = Maze::new(2, 5, 4);
    let mut rng = StdRng::seed_from_u64(9);
    for grid in &mut maze.floors {
        if let Err(e) = carve_floor(grid, &mut rng) {
            results.push(result("snapshot", false, format!("carve failed: {}", e)));
            return results;
        }
    }

    let mut buffer = Vec::new();
    let round_trip = save_maze(&mut buffer, &maze).is_ok()
        && match load_maze(&buffer[..]) {
            Ok(loaded) => {
                loaded.floors.len() == maze.floors.len()
                    && loaded
                        .floors
                        .iter()
                        .zip(&maze.floors)
                        .all(|(a, b)| a.visited_count() == b.visited_count())
            }
            Err(_) => false,
        };
    results.push(result(
        "snapshot_round_trip",
        round_trip,
        format!("{} bytes", buffer.len()),
    ));

    results.push(result(
        "stock_themes_registered",
        theme_names() == vec!["stone", "cherry"],
        format!("{:?}", theme_names()),
    ));

    if verbose && !json {
        println!("  snapshot {} bytes", buffer.len());
    }
    results
}
